// Integration tests for `RestBackend` using wiremock.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use clinicdesk_core::{ApiError, Backend, RestBackend};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RestBackend) {
    let server = MockServer::start().await;
    let backend = RestBackend::from_reqwest(&server.uri(), reqwest::Client::new())
        .with_initial_backoff(Duration::from_millis(5));
    (server, backend)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_get_sends_bearer_token_from_cookie() {
    let (server, backend) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dentistas"))
        .and(header("Authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "nome": "Maria"}])))
        .expect(1)
        .mount(&server)
        .await;

    let authed = backend.with_cookies("theme=dark; token=abc123");
    let body = authed.get("/api/dentistas").await.unwrap();
    assert_eq!(body[0]["nome"], json!("Maria"));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let (server, backend) = setup().await;
    let payload = json!({"dente": "11", "procedimento": "Restauração", "valor": 150, "pacienteId": 7});

    Mock::given(method("POST"))
        .and(path("/api/planos-dentais"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 10})))
        .expect(1)
        .mount(&server)
        .await;

    let created = backend.post("/api/planos-dentais", &payload).await.unwrap();
    assert_eq!(created["id"], json!(10));
}

#[tokio::test]
async fn test_empty_body_is_null() {
    let (server, backend) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/pacientes/3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/dentistas/2/inactivate"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(backend.delete("/api/pacientes/3").await.unwrap().is_null());
    assert!(backend.patch("/api/dentistas/2/inactivate", None).await.unwrap().is_null());
}

#[tokio::test]
async fn test_rate_limit_is_retried() {
    let (server, backend) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/pacientes/stats"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/pacientes/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 3})))
        .mount(&server)
        .await;

    let stats = backend.get("/api/pacientes/stats").await.unwrap();
    assert_eq!(stats["total"], json!(3));
}

// ── Error-mapping tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_rate_limit_gives_up() {
    let (server, backend) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dentistas"))
        .respond_with(ResponseTemplate::new(429))
        .expect(4)
        .mount(&server)
        .await;

    let err = backend.get("/api/dentistas").await.unwrap_err();
    assert!(matches!(err, ApiError::RateLimited));
}

#[tokio::test]
async fn test_not_found_uses_backend_message() {
    let (server, backend) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/pacientes/prontuario/999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"status": 404, "message": "Paciente não encontrado"})),
        )
        .mount(&server)
        .await;

    let err = backend.get("/api/pacientes/prontuario/999").await.unwrap_err();
    match err {
        ApiError::NotFound(message) => assert_eq!(message, "Paciente não encontrado"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_status_mapping() {
    let (server, backend) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/dentistas/1"))
        .respond_with(ResponseTemplate::new(409).set_body_string("CRO já cadastrado"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dentistas/1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dentistas/summary"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = backend.put("/api/dentistas/1", &json!({})).await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(ref m) if m == "CRO já cadastrado"));

    let err = backend.get("/api/dentistas/1").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));

    let err = backend.get("/api/dentistas/summary").await.unwrap_err();
    assert!(matches!(err, ApiError::ServerError(ref m) if m == "boom"));
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let (server, backend) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dentistas"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = backend.get("/api/dentistas").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
