//! Motor endpoints

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{FetchParams, Motor, MotorFilter};

/// Register confirmation
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
}

/// POST /register - insert one motor record
///
/// The body is decoded regardless of its declared content type.
async fn register_motor(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let motor = Motor::from_json(&body).map_err(ApiError::InvalidBody)?;

    state
        .store
        .insert(&motor)
        .await
        .map_err(ApiError::database("inserting data"))?;

    tracing::info!(serial_no = %motor.serial_no, party_name = %motor.party_name, "Motor registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Motor registered successfully",
        }),
    ))
}

/// GET /fetch - motors by serial number and/or party name
///
/// Query pairs are taken raw so a repeated key keeps its first value
/// instead of failing deserialization.
async fn fetch_motors(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Motor>>, ApiError> {
    let filter = MotorFilter::try_from(FetchParams::from_pairs(pairs))?;
    tracing::debug!(?filter, "Fetching motors");

    let motors = state
        .store
        .find(&filter)
        .await
        .map_err(ApiError::database("fetching motors"))?;

    if motors.is_empty() {
        return Err(ApiError::NotFound { resource: "motors" });
    }

    Ok(Json(motors))
}

/// Motor routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/fetch", get(fetch_motors))
        .route("/register", post(register_motor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryMotorStore, MotorStore};
    use crate::http::server::build_router;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, Response};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const S1: &str = r#"{"serial_no":"S1","motor_model":"M1","rpm":1500,"phase":"3","party_name":"Acme","dispatch_date":"2024-01-01","transport_agency":"T1","lr_eway_bill":"LR1","test_certificate":"C1","party_address":"Addr","hp_kw":"5HP","remarks":""}"#;

    fn app(store: Arc<MemoryMotorStore>) -> Router {
        build_router(AppState::new(store))
    }

    async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
        app.clone().oneshot(request).await.unwrap()
    }

    fn register(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn fetch(query: &str) -> Request<Body> {
        Request::builder()
            .uri(format!("/fetch{}", query))
            .body(Body::empty())
            .unwrap()
    }

    async fn text(response: Response<Body>) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn json_body(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn motor(serial_no: &str, party_name: &str) -> Motor {
        Motor {
            serial_no: serial_no.into(),
            party_name: party_name.into(),
            rpm: 960,
            ..Motor::default()
        }
    }

    #[tokio::test]
    async fn register_then_fetch_by_serial() {
        let store = Arc::new(MemoryMotorStore::new());
        let app = app(store.clone());

        let response = send(&app, register(S1)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            json_body(response).await,
            json!({"message": "Motor registered successfully"})
        );

        let response = send(&app, fetch("?serial_no=S1")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let expected: Value = serde_json::from_str(S1).unwrap();
        assert_eq!(json_body(response).await, json!([expected]));
    }

    #[tokio::test]
    async fn register_ignores_content_type() {
        let store = Arc::new(MemoryMotorStore::new());
        let app = app(store.clone());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/register")
            .body(Body::from(S1))
            .unwrap();
        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn register_rejects_non_numeric_rpm() {
        let store = Arc::new(MemoryMotorStore::new());
        let app = app(store.clone());

        let body = json!({"serial_no": "S1", "rpm": "1500"}).to_string();
        let response = send(&app, register(&body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(text(response).await, "Invalid input");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn register_accepts_null_fields() {
        let store = Arc::new(MemoryMotorStore::new());
        let app = app(store.clone());

        let response = send(&app, register(r#"{"serial_no":"S1","remarks":null}"#)).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = send(&app, fetch("?serial_no=S1")).await;
        let body = json_body(response).await;
        assert_eq!(body[0]["remarks"], "");
        assert_eq!(body[0]["rpm"], 0);
    }

    #[tokio::test]
    async fn register_accepts_null_body() {
        let store = Arc::new(MemoryMotorStore::new());
        let app = app(store.clone());

        let response = send(&app, register("null")).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn register_rejects_malformed_json() {
        let app = app(Arc::new(MemoryMotorStore::new()));

        let response = send(&app, register("{\"serial_no\": ")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_storage_failure_is_500() {
        let store = Arc::new(MemoryMotorStore::new());
        store.close();
        let app = app(store);

        let response = send(&app, register(S1)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(text(response).await, "Error inserting data");
    }

    #[tokio::test]
    async fn fetch_by_serial_and_party_matches_both() {
        let store = Arc::new(MemoryMotorStore::new());
        store.insert(&motor("S1", "Acme")).await.unwrap();
        store.insert(&motor("S1", "Globex")).await.unwrap();
        store.insert(&motor("S2", "Acme")).await.unwrap();
        let app = app(store);

        let response = send(&app, fetch("?serial_no=S1&party_name=Acme")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["serial_no"], "S1");
        assert_eq!(rows[0]["party_name"], "Acme");
    }

    #[tokio::test]
    async fn fetch_by_party_keeps_storage_order() {
        let store = Arc::new(MemoryMotorStore::new());
        store.insert(&motor("S2", "Acme")).await.unwrap();
        store.insert(&motor("S9", "Globex")).await.unwrap();
        store.insert(&motor("S1", "Acme")).await.unwrap();
        let app = app(store);

        let response = send(&app, fetch("?party_name=Acme")).await;
        let body = json_body(response).await;
        let serials: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["serial_no"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(serials, ["S2", "S1"]);
    }

    #[tokio::test]
    async fn fetch_trims_parameters() {
        let store = Arc::new(MemoryMotorStore::new());
        store.insert(&motor("S1", "Acme")).await.unwrap();
        let app = app(store);

        let response = send(&app, fetch("?serial_no=%20S1%20&party_name=%20%20")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn fetch_without_parameters_is_400() {
        let app = app(Arc::new(MemoryMotorStore::new()));

        let response = send(&app, fetch("")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(text(response).await, "No valid query parameters provided");

        let response = send(&app, fetch("?serial_no=&party_name=+")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fetch_repeated_serial_uses_first_value() {
        let store = Arc::new(MemoryMotorStore::new());
        store.insert(&motor("S1", "Acme")).await.unwrap();
        store.insert(&motor("S2", "Acme")).await.unwrap();
        let app = app(store);

        let response = send(&app, fetch("?serial_no=S1&serial_no=S2")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["serial_no"], "S1");
    }

    #[tokio::test]
    async fn fetch_unknown_serial_is_404() {
        let store = Arc::new(MemoryMotorStore::new());
        store.insert(&motor("S1", "Acme")).await.unwrap();
        let app = app(store);

        let response = send(&app, fetch("?serial_no=S404")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(text(response).await, "No motors found");
    }

    #[tokio::test]
    async fn fetch_storage_failure_hides_driver_error() {
        let store = Arc::new(MemoryMotorStore::new());
        store.close();
        let app = app(store);

        let response = send(&app, fetch("?serial_no=S1")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = text(response).await;
        assert_eq!(body, "Error fetching motors");
        assert!(!body.contains("closed"));
    }

    #[tokio::test]
    async fn wrong_method_is_405() {
        let app = app(Arc::new(MemoryMotorStore::new()));

        let request = Request::builder()
            .method(Method::GET)
            .uri("/register")
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let app = app(Arc::new(MemoryMotorStore::new()));

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
