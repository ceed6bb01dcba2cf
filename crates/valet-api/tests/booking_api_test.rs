//! Integration tests for the booking API
//!
//! DTO-level tests plus service tests for the quote endpoint, which needs
//! no database. Handlers touching Postgres are covered by repository unit
//! tests; full end-to-end runs require DATABASE_URL.

use serde_json::{json, Value};

mod dto_contract {
    use super::*;
    use validator::Validate;
    use valet_api::dto::CreateBookingRequest;
    use valet_core::AppError;

    #[test]
    fn test_empty_create_request_reports_camel_case_fields() {
        let request = CreateBookingRequest::default();
        let error = AppError::from(request.validate().unwrap_err());

        let AppError::Validation(errors) = error else {
            panic!("expected validation error");
        };

        let campos: Vec<&str> = errors.iter().map(|e| e.campo.as_str()).collect();
        assert_eq!(campos, vec!["coche", "matricula", "tipoPlaza"]);

        let tipo = errors.iter().find(|e| e.campo == "tipoPlaza").unwrap();
        assert_eq!(
            tipo.mensaje,
            "Debes elegir entre 'Plaza Aire Libre' o 'Plaza Cubierta'"
        );
    }

    #[test]
    fn test_bad_date_reports_wire_field_name() {
        let request = CreateBookingRequest {
            fecha_entrada: Some("2025/06/10".to_string()),
            tipo_plaza: Some("Plaza Cubierta".to_string()),
            coche: Some("Ford Focus".to_string()),
            matricula: Some("0000AAA".to_string()),
            ..Default::default()
        };
        let error = AppError::from(request.validate().unwrap_err());

        let AppError::Validation(errors) = error else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].campo, "fechaEntrada");
        assert_eq!(errors[0].mensaje, "La fecha debe tener formato YYYY-MM-DD");
    }
}

mod quote_endpoint {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App};
    use valet_api::configure_bookings;

    #[actix_web::test]
    async fn test_quote_returns_tariff_price() {
        let app =
            test::init_service(App::new().service(web::scope("/api").configure(configure_bookings)))
                .await;

        // Nine days covered parking sits on the 9-day tier
        let req = test::TestRequest::post()
            .uri("/api/bookings/pricing")
            .set_json(json!({
                "fechaEntrada": "2024-01-01",
                "fechaSalida": "2024-01-10",
                "tipoPlaza": "Plaza Cubierta"
            }))
            .to_request();

        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["totalPrice"], json!(50.0));
    }

    #[actix_web::test]
    async fn test_same_day_stay_charges_one_day() {
        let app =
            test::init_service(App::new().service(web::scope("/api").configure(configure_bookings)))
                .await;

        let req = test::TestRequest::post()
            .uri("/api/bookings/pricing")
            .set_json(json!({
                "fechaEntrada": "2024-01-01",
                "fechaSalida": "2024-01-01",
                "tipoPlaza": "Plaza Aire Libre"
            }))
            .to_request();

        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["totalPrice"], json!(25.0));
    }

    #[actix_web::test]
    async fn test_incomplete_quote_is_zero_not_error() {
        let app =
            test::init_service(App::new().service(web::scope("/api").configure(configure_bookings)))
                .await;

        let req = test::TestRequest::post()
            .uri("/api/bookings/pricing")
            .set_json(json!({ "fechaEntrada": "2024-01-01" }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["totalPrice"], json!(0.0));
    }

    #[actix_web::test]
    async fn test_unknown_space_type_is_rejected() {
        let app =
            test::init_service(App::new().service(web::scope("/api").configure(configure_bookings)))
                .await;

        let req = test::TestRequest::post()
            .uri("/api/bookings/pricing")
            .set_json(json!({
                "fechaEntrada": "2024-01-01",
                "fechaSalida": "2024-01-10",
                "tipoPlaza": "Plaza VIP"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("unknown_space_type"));
        assert_eq!(body["message"], json!("Tipo de plaza desconocido: Plaza VIP"));
    }

    #[actix_web::test]
    async fn test_malformed_date_gets_field_errors() {
        let app =
            test::init_service(App::new().service(web::scope("/api").configure(configure_bookings)))
                .await;

        let req = test::TestRequest::post()
            .uri("/api/bookings/pricing")
            .set_json(json!({ "fechaSalida": "10-01-2024" }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Datos de reserva inválidos"));
        assert_eq!(body["errors"][0]["campo"], json!("fechaSalida"));
        assert_eq!(
            body["errors"][0]["mensaje"],
            json!("La fecha debe tener formato YYYY-MM-DD")
        );
    }
}
