//! End-to-end client tests against a mock HTTP server.
//!
//! These cover the behaviors that only show up over a real socket: bearer
//! attachment, the one-shot 401 refresh/replay, multipart submission, and
//! envelope unwrapping of real response bodies.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cargodesk_client::{
    ApiClient, AuthService, ClientConfig, CompanyService, Credentials, ErrorKind, FilePart,
    InvoiceService, ListQuery, OrderService, SessionStore,
};
use cargodesk_core::CompanyDraft;

async fn client_for(server: &MockServer) -> (ApiClient, SessionStore) {
    let session = SessionStore::in_memory();
    let config = ClientConfig::new(format!("{}/api/v1", server.uri()));
    let client = ApiClient::new(config, session.clone()).unwrap();
    (client, session)
}

fn order_json(id: i64, number: &str) -> serde_json::Value {
    json!({
        "id": id,
        "orderNumber": number,
        "companyId": 1,
        "status": "confirmed",
        "totalCents": 125000,
        "currency": "USD",
        "createdAt": "2026-02-01T10:00:00Z",
        "updatedAt": "2026-02-01T10:00:00Z"
    })
}

#[tokio::test]
async fn test_list_unwraps_nested_envelope() {
    let server = MockServer::start().await;
    let (client, session) = client_for(&server).await;
    session
        .set_tokens("access".to_string(), "refresh".to_string())
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/orders"))
        .and(header("authorization", "Bearer access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "data": [order_json(1, "ORD-1"), order_json(2, "ORD-2")],
                "pagination": {"page": 1, "limit": 10, "total": 2, "totalPages": 1}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = OrderService::new(client);
    let page = service.list(&ListQuery::page(1)).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].order_number, "ORD-1");
    assert_eq!(page.pagination.unwrap().total, 2);
}

#[tokio::test]
async fn test_401_refreshes_once_and_replays() {
    let server = MockServer::start().await;
    let (client, session) = client_for(&server).await;
    session
        .set_tokens("stale-access".to_string(), "refresh-old".to_string())
        .await;

    // First attempt with the stale token is rejected.
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/5"))
        .and(header("authorization", "Bearer stale-access"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    // Exactly one refresh exchange.
    Mock::given(method("POST"))
        .and(path("/api/v1/refresh-token"))
        .and(body_json(json!({"refreshToken": "refresh-old"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"accessToken": "new-access", "refreshToken": "new-refresh"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    // The replay carries the refreshed token.
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/5"))
        .and(header("authorization", "Bearer new-access"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": order_json(5, "ORD-5")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = OrderService::new(client);
    let order = service.get(5).await.unwrap();

    assert_eq!(order.id, 5);
    assert_eq!(session.access_token().await.as_deref(), Some("new-access"));
}

#[tokio::test]
async fn test_failed_refresh_clears_session() {
    let server = MockServer::start().await;
    let (client, session) = client_for(&server).await;
    session
        .set_tokens("stale".to_string(), "dead-refresh".to_string())
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/orders"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/refresh-token"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let service = OrderService::new(client);
    let err = service.list(&ListQuery::page(1)).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Auth);
    assert_eq!(err.message, "Your session has expired. Please log in again.");
    assert!(!session.is_authenticated().await);
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let server = MockServer::start().await;
    let (client, session) = client_for(&server).await;
    session
        .set_tokens("stale-access".to_string(), "refresh-old".to_string())
        .await;

    for id in [21, 22] {
        // Stale token rejected, refreshed token accepted.
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/orders/{}", id)))
            .and(header("authorization", "Bearer stale-access"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/orders/{}", id)))
            .and(header("authorization", "Bearer new-access"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"data": order_json(id, "ORD-X")}),
            ))
            .mount(&server)
            .await;
    }

    // The refresh token rotates on use, so a second exchange would fail;
    // exactly one is allowed.
    Mock::given(method("POST"))
        .and(path("/api/v1/refresh-token"))
        .and(body_json(json!({"refreshToken": "refresh-old"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"accessToken": "new-access", "refreshToken": "new-refresh"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = OrderService::new(client);
    let (a, b) = tokio::join!(service.get(21), service.get(22));

    assert_eq!(a.unwrap().id, 21);
    assert_eq!(b.unwrap().id, 22);
    assert!(session.is_authenticated().await);
    assert_eq!(session.access_token().await.as_deref(), Some("new-access"));
}

#[tokio::test]
async fn test_login_stores_tokens_and_skips_refresh() {
    let server = MockServer::start().await;
    let (client, session) = client_for(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "accessToken": "access-1",
                "refreshToken": "refresh-1",
                "user": {"id": 3, "name": "Asha", "email": "a@b.com", "role": "admin"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthService::new(client);
    let user = auth
        .login(&Credentials {
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.id, 3);
    assert_eq!(session.access_token().await.as_deref(), Some("access-1"));
}

#[tokio::test]
async fn test_login_failure_surfaces_server_reason_without_refresh() {
    let server = MockServer::start().await;
    let (client, _session) = client_for(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid email or password"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    // A credential failure must never hit the refresh endpoint.
    Mock::given(method("POST"))
        .and(path("/api/v1/refresh-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let auth = AuthService::new(client);
    let err = auth
        .login(&Credentials {
            email: "a@b.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.message, "Invalid email or password");
    assert_eq!(err.kind, ErrorKind::Auth);
}

#[tokio::test]
async fn test_failed_logout_clears_session_and_surfaces_error() {
    let server = MockServer::start().await;
    let (client, session) = client_for(&server).await;
    session
        .set_tokens("access".to_string(), "refresh".to_string())
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/logout"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "revocation store down"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthService::new(client);
    let err = auth.logout().await.unwrap_err();

    // The failure is normalized and rethrown, never swallowed...
    assert_eq!(err.message, "Logout failed. Please try again.");
    assert_eq!(err.kind, ErrorKind::Server);
    // ...but the local session is gone regardless.
    assert!(!session.is_authenticated().await);
}

#[tokio::test]
async fn test_multipart_company_create() {
    let server = MockServer::start().await;
    let (client, session) = client_for(&server).await;
    session
        .set_tokens("access".to_string(), "refresh".to_string())
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/companies"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "id": 7,
                "name": "Acme Exports",
                "email": "ops@acme.example",
                "bankDetails": [],
                "createdAt": "2026-02-01T10:00:00Z",
                "updatedAt": "2026-02-01T10:00:00Z"
            },
            "message": "Company created"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = CompanyDraft {
        name: "Acme Exports".to_string(),
        email: "ops@acme.example".to_string(),
        ..CompanyDraft::default()
    };
    let logo = FilePart {
        filename: "logo.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    };

    let service = CompanyService::new(client);
    let mutation = service.create(&draft, Some(logo), None).await.unwrap();

    assert_eq!(mutation.data.id, 7);
    assert_eq!(mutation.data.name, "Acme Exports");
    assert_eq!(mutation.message, "Company created");
}

#[tokio::test]
async fn test_pdf_download_uses_disposition_then_fallback() {
    let server = MockServer::start().await;
    let (client, session) = client_for(&server).await;
    session
        .set_tokens("access".to_string(), "refresh".to_string())
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/invoices/12/pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=\"INV-2026-12.pdf\"")
                .set_body_bytes(vec![0x25, 0x50, 0x44, 0x46]),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/invoices/13/pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x25, 0x50, 0x44, 0x46]))
        .mount(&server)
        .await;

    let service = InvoiceService::new(client);

    let named = service.download_pdf(12).await.unwrap();
    assert_eq!(named.filename, "INV-2026-12.pdf");
    assert_eq!(named.bytes.len(), 4);

    let fallback = service.download_pdf(13).await.unwrap();
    assert_eq!(fallback.filename, "Invoice-13.pdf");
}

#[tokio::test]
async fn test_connection_failure_normalizes_to_network_message() {
    // Nothing listens on this port.
    let session = SessionStore::in_memory();
    let config = ClientConfig::new("http://127.0.0.1:9/api/v1");
    let client = ApiClient::new(config, session).unwrap();

    let service = OrderService::new(client);
    let err = service.list(&ListQuery::page(1)).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(
        err.message,
        "Unable to connect to the server. Please check your internet connection and try again."
    );
}
