//! Application router configuration.

use axum::{Router, routing::post};

use crate::{AppState, endpoints, transaction::create_transaction_endpoint};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            post(create_transaction_endpoint).get(get_hello_world),
        )
        .with_state(state)
}

/// A route handler that returns a fixed greeting.
///
/// Purely a smoke-test endpoint; it carries no business meaning and does not
/// touch the database.
async fn get_hello_world() -> &'static str {
    "Hello, World!"
}

#[cfg(test)]
mod route_tests {
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{AppState, build_router, endpoints, transaction::count_transactions};

    fn get_test_server() -> (TestServer, Arc<Mutex<Connection>>) {
        let db_connection = Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(db_connection).expect("Could not initialize database.");
        let db_connection = state.db_connection.clone();

        let server = TestServer::new(build_router(state));

        (server, db_connection)
    }

    #[tokio::test]
    async fn probe_returns_hello_world() {
        let (server, _) = get_test_server();

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status_ok();
        assert_eq!(response.text(), "Hello, World!");
    }

    #[tokio::test]
    async fn probe_is_unaffected_by_prior_requests() {
        let (server, _) = get_test_server();

        server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({ "tipoTransacao": "PIX", "valor": "12.34" }))
            .await
            .assert_status_ok();

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status_ok();
        assert_eq!(response.text(), "Hello, World!");
    }

    #[tokio::test]
    async fn create_transaction_returns_submitted_fields_and_id() {
        let (server, _) = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "tipoTransacao": "PIX",
                "valor": "150.00",
                "chavePix": "abc@example.com",
                "agencia": "0001",
                "numeroConta": "123456",
                "descricao": "rent",
                "data": "2024-03-01"
            }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["id"], json!(1));
        assert_eq!(body["tipoTransacao"], json!("PIX"));
        assert_eq!(body["valor"], json!("150.00"));
        assert_eq!(body["chavePix"], json!("abc@example.com"));
        assert_eq!(body["agencia"], json!("0001"));
        assert_eq!(body["numeroConta"], json!("123456"));
        assert_eq!(body["descricao"], json!("rent"));
        assert_eq!(body["data"], json!("2024-03-01"));
    }

    #[tokio::test]
    async fn resubmitting_a_response_creates_a_new_identical_record() {
        let (server, _) = get_test_server();

        let first_response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "tipoTransacao": "TRANSFERENCIA",
                "valor": "99.90",
                "agencia": "0001",
                "numeroConta": "123456",
                "data": "2024-03-01"
            }))
            .await;
        first_response.assert_status_ok();
        let mut first_body: serde_json::Value = first_response.json();
        let first_id = first_body["id"].as_i64().expect("id should be an integer");
        first_body.as_object_mut().unwrap().remove("id");

        let second_response = server.post(endpoints::TRANSACTIONS).json(&first_body).await;

        second_response.assert_status_ok();
        let mut second_body: serde_json::Value = second_response.json();
        let second_id = second_body["id"].as_i64().expect("id should be an integer");
        second_body.as_object_mut().unwrap().remove("id");

        assert_ne!(first_id, second_id);
        assert_eq!(first_body, second_body);
    }

    #[tokio::test]
    async fn missing_amount_responds_bad_request_and_persists_nothing() {
        let (server, db_connection) = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({ "tipoTransacao": "PIX", "chavePix": "abc@example.com" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let connection = db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection).unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_transaction_type_is_rejected_before_the_handler() {
        let (server, db_connection) = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({ "tipoTransacao": "BOLETO", "valor": "10.00" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let connection = db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection).unwrap(), 0);
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_before_the_handler() {
        let (server, db_connection) = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .content_type("application/json")
            .bytes(axum::body::Bytes::from_static(b"{ this is not json"))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let connection = db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection).unwrap(), 0);
    }
}
