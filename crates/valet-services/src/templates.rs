//! HTML bodies for transactional booking emails.
//!
//! Each template is a self-contained page with inline styles, as email
//! clients require. Texts are in Spanish, matching the public site.

use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use valet_core::models::Booking;

use crate::brand;

const CONFIRMATION_STYLES: &str = r#"
        body {
            font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif;
            background-color: #f6f9fc;
            margin: 0;
            padding: 40px 20px;
            color: #333333;
        }
        .container {
            max-width: 600px;
            margin: 0 auto;
            background-color: #ffffff;
            border-radius: 8px;
            overflow: hidden;
            box-shadow: 0 4px 6px rgba(0,0,0,0.05);
        }
        .header {
            background-color: #ff6600;
            color: #ffffff;
            padding: 40px 20px;
            text-align: center;
        }
        .header h1 {
            margin: 0;
            font-size: 28px;
            font-weight: bold;
        }
        .header p {
            margin: 10px 0 0 0;
            font-size: 16px;
            opacity: 0.9;
        }
        .content {
            padding: 40px;
            line-height: 1.6;
        }
        .content h2 {
            color: #1a1a1a;
            margin-top: 0;
        }
        .details-box {
            background-color: #f9f9f9;
            border: 1px solid #eeeeee;
            border-radius: 8px;
            padding: 20px;
            margin: 30px 0;
        }
        .detail-row {
            display: flex;
            justify-content: space-between;
            border-bottom: 1px solid #eeeeee;
            padding: 12px 0;
        }
        .detail-row:last-child {
            border-bottom: none;
        }
        .label {
            font-weight: 600;
            color: #666666;
        }
        .value {
            font-weight: bold;
            color: #000000;
            text-align: right;
        }
        .btn-container {
            text-align: center;
            margin-top: 30px;
        }
        .btn {
            display: inline-block;
            background-color: #ff6600;
            color: #ffffff !important;
            padding: 14px 30px;
            text-decoration: none;
            border-radius: 50px;
            font-weight: bold;
            font-size: 16px;
            box-shadow: 0 4px 6px rgba(255, 102, 0, 0.2);
        }
        .btn:hover {
            background-color: #e65c00;
        }
        .footer {
            background-color: #f6f9fc;
            padding: 30px;
            text-align: center;
            font-size: 12px;
            color: #8898aa;
            border-top: 1px solid #e9ecef;
        }
        .footer p {
            margin: 5px 0;
        }
        .footer-links {
            margin-bottom: 15px;
        }
        .footer-links span {
            color: #ff6600;
            font-weight: bold;
            margin: 0 5px;
        }
"#;

const UPDATE_STYLES: &str = r#"
        body {
            font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif;
            background-color: #f6f9fc;
            margin: 0;
            padding: 40px 20px;
            color: #333333;
        }
        .container {
            max-width: 600px;
            margin: 0 auto;
            background-color: #ffffff;
            border-radius: 8px;
            overflow: hidden;
            box-shadow: 0 4px 6px rgba(0,0,0,0.05);
        }
        .header {
            background-color: #ff6600;
            color: #ffffff;
            padding: 40px 20px;
            text-align: center;
        }
        .header h1 {
            margin: 0;
            font-size: 28px;
            font-weight: bold;
        }
        .header p {
            margin: 10px 0 0 0;
            font-size: 16px;
            opacity: 0.9;
        }
        .content {
            padding: 40px;
            line-height: 1.6;
        }
        .content h2 {
            color: #1a1a1a;
            margin-top: 0;
        }
        .details-box {
            background-color: #fff8f2;
            border: 1px solid #ffe0b2;
            border-radius: 8px;
            padding: 20px;
            margin: 30px 0;
        }
        .detail-row {
            display: flex;
            justify-content: space-between;
            border-bottom: 1px solid #ffe0b2;
            padding: 12px 0;
        }
        .detail-row:last-child {
            border-bottom: none;
        }
        .label {
            font-weight: 600;
            color: #666666;
        }
        .value {
            font-weight: bold;
            color: #000000;
            text-align: right;
        }
        .btn-container {
            text-align: center;
            margin-top: 30px;
        }
        .btn {
            display: inline-block;
            background-color: #ff6600;
            color: #ffffff !important;
            padding: 14px 30px;
            text-decoration: none;
            border-radius: 50px;
            font-weight: bold;
            font-size: 16px;
            box-shadow: 0 4px 6px rgba(255, 102, 0, 0.2);
        }
        .btn:hover {
            background-color: #e65c00;
        }
        .footer {
            background-color: #f6f9fc;
            padding: 30px;
            text-align: center;
            font-size: 12px;
            color: #8898aa;
            border-top: 1px solid #e9ecef;
        }
        .footer p {
            margin: 5px 0;
        }
"#;

const CANCELLATION_STYLES: &str = r#"
        body {
            font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif;
            background-color: #f6f9fc;
            margin: 0;
            padding: 40px 20px;
            color: #333333;
        }
        .container {
            max-width: 600px;
            margin: 0 auto;
            background-color: #ffffff;
            border-radius: 8px;
            overflow: hidden;
            box-shadow: 0 4px 6px rgba(0,0,0,0.05);
        }
        .header {
            background-color: #333333;
            color: #ffffff;
            padding: 40px 20px;
            text-align: center;
        }
        .header h1 {
            margin: 0;
            font-size: 28px;
            font-weight: bold;
        }
        .content {
            padding: 40px;
            line-height: 1.6;
        }
        .content h2 {
            color: #d32f2f;
            margin-top: 0;
        }
        .details-box {
            background-color: #f9f9f9;
            border: 1px solid #eeeeee;
            border-radius: 8px;
            padding: 20px;
            margin: 30px 0;
            opacity: 0.7;
        }
        .detail-row {
            display: flex;
            justify-content: space-between;
            border-bottom: 1px solid #eeeeee;
            padding: 12px 0;
        }
        .detail-row:last-child {
            border-bottom: none;
        }
        .label {
            font-weight: 600;
            color: #666666;
        }
        .value {
            font-weight: bold;
            color: #000000;
            text-align: right;
        }
        .btn-container {
            text-align: center;
            margin-top: 30px;
        }
        .btn {
            display: inline-block;
            background-color: #ff6600;
            color: #ffffff !important;
            padding: 14px 30px;
            text-decoration: none;
            border-radius: 50px;
            font-weight: bold;
            font-size: 16px;
        }
        .footer {
            background-color: #f6f9fc;
            padding: 30px;
            text-align: center;
            font-size: 12px;
            color: #8898aa;
            border-top: 1px solid #e9ecef;
        }
        .footer p {
            margin: 5px 0;
        }
"#;

/// Short Spanish date, "10/6/2025", or the fallback when missing.
fn formatear_fecha(fecha: Option<NaiveDate>, fallback: &str) -> String {
    match fecha {
        Some(f) => format!("{}/{}/{}", f.day(), f.month(), f.year()),
        None => fallback.to_string(),
    }
}

fn hora_display(hora: Option<NaiveTime>) -> String {
    hora.map(|h| h.format("%H:%M").to_string()).unwrap_or_default()
}

/// ISO date plus time, "Sin fecha" when the date is missing.
fn fecha_iso_display(fecha: Option<NaiveDate>, hora: Option<NaiveTime>) -> String {
    let fecha = fecha
        .map(|f| f.to_string())
        .unwrap_or_else(|| "Sin fecha".to_string());
    format!("{} {}", fecha, hora_display(hora))
        .trim_end()
        .to_string()
}

fn nombre_display(booking: &Booking) -> &str {
    booking.nombre_completo.as_deref().unwrap_or("cliente")
}

/// Confirmation email, sent right after a booking is created.
pub fn booking_confirmation(booking: &Booking) -> String {
    let entrada = fecha_iso_display(booking.fecha_entrada, booking.hora_entrada);
    let salida = fecha_iso_display(booking.fecha_salida, booking.hora_salida);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>{styles}</style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>{name}</h1>
      <p>{tagline}</p>
    </div>
    <div class="content">
      <h2>Reserva Confirmada</h2>
      <p>Hola <strong>{nombre}</strong>,</p>
      <p>Hemos recibido correctamente tu reserva. A continuación encontrarás el resumen de los detalles.</p>
      <div class="details-box">
        <div class="detail-row">
          <span class="label">Fecha Entrada: </span>
          <span class="value">{entrada}</span>
        </div>
        <div class="detail-row">
          <span class="label">Fecha Salida: </span>
          <span class="value">{salida}</span>
        </div>
        <div class="detail-row">
          <span class="label">Vehículo: </span>
          <span class="value">{coche}</span>
        </div>
        <div class="detail-row">
          <span class="label">Matrícula: </span>
          <span class="value">{matricula}</span>
        </div>
        <div class="detail-row">
          <span class="label">Precio Total: </span>
          <span class="value" style="color: #ff6600;">{precio} €</span>
        </div>
      </div>
      <p>📎 Hemos adjuntado tu <strong>ticket oficial en PDF</strong> a este correo. Es recomendable tenerlo a mano al llegar al aeropuerto.</p>
      <div class="btn-container">
        <a href="{url}" class="btn">Ir a la Web</a>
      </div>
    </div>
    <div class="footer">
      <div class="footer-links">
        <span>Contacto</span> • <span>Ayuda</span> • <span>Términos</span>
      </div>
      <p>© {year} {name}. Todos los derechos reservados.</p>
      <p>{address}</p>
    </div>
  </div>
</body>
</html>
"#,
        styles = CONFIRMATION_STYLES,
        name = brand::NAME,
        tagline = brand::TAGLINE,
        nombre = nombre_display(booking),
        entrada = entrada,
        salida = salida,
        coche = booking.coche,
        matricula = booking.matricula,
        precio = booking.precio.normalize(),
        url = brand::WEBSITE_URL,
        year = Utc::now().year(),
        address = brand::POSTAL_ADDRESS,
    )
}

/// Update email, sent after a booking is modified.
pub fn booking_update(booking: &Booking) -> String {
    let entrada = format!(
        "{} {}",
        formatear_fecha(booking.fecha_entrada, "Sin fecha"),
        hora_display(booking.hora_entrada)
    )
    .trim_end()
    .to_string();
    let salida = format!(
        "{} {}",
        formatear_fecha(booking.fecha_salida, "Sin fecha"),
        hora_display(booking.hora_salida)
    )
    .trim_end()
    .to_string();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>{styles}</style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>{name}</h1>
      <p>Actualización de Reserva</p>
    </div>
    <div class="content">
      <h2>Reserva Modificada</h2>
      <p>Hola <strong>{nombre}</strong>,</p>
      <p>Te confirmamos que los datos de tu reserva <strong>#{num_reserva}</strong> han sido actualizados correctamente.</p>
      <p>Estos son los detalles vigentes de tu reserva:</p>
      <div class="details-box">
        <div class="detail-row">
          <span class="label">Nueva Fecha Entrada: </span>
          <span class="value">{entrada}</span>
        </div>
        <div class="detail-row">
          <span class="label">Nueva Fecha Salida: </span>
          <span class="value">{salida}</span>
        </div>
        <div class="detail-row">
          <span class="label">Vehículo: </span>
          <span class="value">{coche}</span>
        </div>
        <div class="detail-row">
          <span class="label">Matrícula: </span>
          <span class="value">{matricula}</span>
        </div>
        <div class="detail-row">
          <span class="label">Precio Actualizado: </span>
          <span class="value" style="color: #ff6600;">{precio}€</span>
        </div>
      </div>
      <p>📎 Hemos adjuntado el <strong>ticket actualizado</strong> en PDF a este correo. Por favor, desecha el anterior.</p>
      <div class="btn-container">
        <a href="{url}" class="btn">Ir a la Web</a>
      </div>
    </div>
    <div class="footer">
      <p>© {year} {name}. Todos los derechos reservados.</p>
      <p>{address}</p>
    </div>
  </div>
</body>
</html>
"#,
        styles = UPDATE_STYLES,
        name = brand::NAME,
        nombre = nombre_display(booking),
        num_reserva = booking.num_reserva,
        entrada = entrada,
        salida = salida,
        coche = booking.coche,
        matricula = booking.matricula,
        precio = booking.precio.normalize(),
        url = brand::WEBSITE_URL,
        year = Utc::now().year(),
        address = brand::POSTAL_ADDRESS,
    )
}

/// Cancellation email, sent after a booking is cancelled.
pub fn booking_cancellation(booking: &Booking) -> String {
    let fechas = format!(
        "{} - {}",
        formatear_fecha(booking.fecha_entrada, "---"),
        formatear_fecha(booking.fecha_salida, "---")
    );

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>{styles}</style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>{name}</h1>
    </div>
    <div class="content">
      <h2>Reserva Cancelada</h2>
      <p>Hola <strong>{nombre}</strong>,</p>
      <p>Te confirmamos que tu reserva ha sido <strong>cancelada correctamente</strong> tal y como has solicitado.</p>
      <div class="details-box">
        <div class="detail-row">
          <span class="label">Nº Reserva: </span>
          <span class="value">#{num_reserva}</span>
        </div>
        <div class="detail-row">
          <span class="label">Fechas Previstas: </span>
          <span class="value">{fechas}</span>
        </div>
        <div class="detail-row">
          <span class="label">Vehículo: </span>
          <span class="value">{coche} ({matricula})</span>
        </div>
      </div>
      <p>Esperamos volver a verte pronto en tu próximo viaje.</p>
      <div class="btn-container">
        <a href="{url}" class="btn">Hacer Nueva Reserva</a>
      </div>
    </div>
    <div class="footer">
      <p>© {year} {name}.</p>
      <p>{address}</p>
    </div>
  </div>
</body>
</html>
"#,
        styles = CANCELLATION_STYLES,
        name = brand::NAME,
        nombre = nombre_display(booking),
        num_reserva = booking.num_reserva,
        fechas = fechas,
        coche = booking.coche,
        matricula = booking.matricula,
        url = brand::WEBSITE_URL,
        year = Utc::now().year(),
        address = brand::POSTAL_ADDRESS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use valet_core::models::SpaceType;

    fn sample_booking() -> Booking {
        let mut booking = Booking::new(
            SpaceType::AireLibre,
            "Seat León Rojo".to_string(),
            "1234BCD".to_string(),
            dec!(45.00),
        );
        booking.num_reserva = 1023;
        booking.fecha_entrada = NaiveDate::from_ymd_opt(2025, 6, 10);
        booking.hora_entrada = NaiveTime::from_hms_opt(12, 30, 0);
        booking.fecha_salida = NaiveDate::from_ymd_opt(2025, 6, 15);
        booking.hora_salida = NaiveTime::from_hms_opt(9, 0, 0);
        booking.nombre_completo = Some("María García".to_string());
        booking.email = Some("maria@example.com".to_string());
        booking
    }

    #[test]
    fn test_formatear_fecha_uses_short_spanish_form() {
        let fecha = NaiveDate::from_ymd_opt(2025, 3, 5);
        assert_eq!(formatear_fecha(fecha, "Sin fecha"), "5/3/2025");
        assert_eq!(formatear_fecha(None, "Sin fecha"), "Sin fecha");
        assert_eq!(formatear_fecha(None, "---"), "---");
    }

    #[test]
    fn test_confirmation_contains_booking_summary() {
        let html = booking_confirmation(&sample_booking());

        assert!(html.contains("Reserva Confirmada"));
        assert!(html.contains("Tu vehículo en las mejores manos"));
        assert!(html.contains("Hola <strong>María García</strong>"));
        assert!(html.contains("2025-06-10 12:30"));
        assert!(html.contains("Seat León Rojo"));
        assert!(html.contains("1234BCD"));
        assert!(html.contains("45 €"));
        assert!(html.contains("ticket oficial en PDF"));
        assert!(html.contains(r#"href="https://www.alcvaletparking.com""#));
        assert!(html.contains("background-color: #ff6600"));
    }

    #[test]
    fn test_confirmation_falls_back_when_dates_missing() {
        let mut booking = sample_booking();
        booking.fecha_entrada = None;
        booking.hora_entrada = None;

        let html = booking_confirmation(&booking);
        assert!(html.contains("Sin fecha"));
    }

    #[test]
    fn test_update_mentions_booking_number_and_replacement() {
        let html = booking_update(&sample_booking());

        assert!(html.contains("Reserva Modificada"));
        assert!(html.contains("#1023"));
        assert!(html.contains("10/6/2025 12:30"));
        assert!(html.contains("Nueva Fecha Entrada"));
        assert!(html.contains("desecha el anterior"));
        assert!(html.contains("45€"));
    }

    #[test]
    fn test_cancellation_shows_planned_dates_and_new_booking_button() {
        let html = booking_cancellation(&sample_booking());

        assert!(html.contains("Reserva Cancelada"));
        assert!(html.contains("Nº Reserva"));
        assert!(html.contains("#1023"));
        assert!(html.contains("10/6/2025 - 15/6/2025"));
        assert!(html.contains("Seat León Rojo (1234BCD)"));
        assert!(html.contains("Hacer Nueva Reserva"));
        assert!(html.contains("background-color: #333333"));
    }

    #[test]
    fn test_cancellation_dashes_for_missing_dates() {
        let mut booking = sample_booking();
        booking.fecha_entrada = None;
        booking.fecha_salida = None;

        let html = booking_cancellation(&booking);
        assert!(html.contains("--- - ---"));
    }
}
