use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use pharmacy::handler::AppRouter;
use serde_json::{Value, json};
use shared::{
    abstract_trait::DynHashing,
    config::{AdminSeed, Config, Hashing},
    state::AppState,
};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@pharmacy.test";
const ADMIN_PASSWORD: &str = "admin-pass";
const BOUNDARY: &str = "pharmacy-test-boundary";

struct TestServer {
    router: Router,
    _uploads: TempDir,
}

impl TestServer {
    async fn start() -> Self {
        let uploads = tempfile::tempdir().unwrap();
        let mut config = Config::in_memory("api-secret", uploads.path());
        config.admin = Some(AdminSeed {
            email: ADMIN_EMAIL.into(),
            password: ADMIN_PASSWORD.into(),
        });

        let hashing = Arc::new(Hashing::with_cost(4)) as DynHashing;
        let state = AppState::with_hashing(&config, hashing).await.unwrap();

        Self {
            router: AppRouter::build(state),
            _uploads: uploads,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let (status, bytes) = self.send(request).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn register(&self, email: &str) -> String {
        let (status, body) = self
            .json(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({
                    "name": "Test User",
                    "email": email,
                    "password": "secret123",
                    "confirmPassword": "secret123"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn admin_token(&self) -> String {
        let (status, body) = self
            .json(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn create_medicine(&self, admin: &str, name: &str, price: f64, stock: i32) -> i64 {
        let (status, body) = self
            .json(
                "POST",
                "/api/medicines",
                Some(admin),
                Some(medicine_body(name, price, stock)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }
}

fn medicine_body(name: &str, price: f64, stock: i32) -> Value {
    json!({
        "name": name,
        "description": format!("{name} tablets"),
        "price": price,
        "category": "OTC",
        "dosage": "500mg",
        "manufacturer": "Acme Pharma",
        "expiryDate": "2030-01-01",
        "stock": stock
    })
}

fn multipart_request(
    uri: &str,
    token: &str,
    field: &str,
    file_name: &str,
    bytes: &[u8],
) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn registration_and_profile_round_trip() {
    let server = TestServer::start().await;
    let token = server.register("jane@pharmacy.test").await;

    let (status, body) = server.json("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "jane@pharmacy.test");
    assert_eq!(body["data"]["role"], "user");

    let (status, body) = server
        .json(
            "PUT",
            "/api/auth/profile",
            Some(&token),
            Some(json!({ "name": "Jane Smith", "phone": "555-0100" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Jane Smith");

    let (status, body) = server
        .json(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Jane Again",
                "email": "jane@pharmacy.test",
                "password": "secret123",
                "confirmPassword": "secret123"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn authentication_failures_use_the_error_envelope() {
    let server = TestServer::start().await;

    let (status, body) = server.json("GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "You are not logged in, please provide token");

    let (status, body) = server
        .json("GET", "/api/auth/me", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");

    let (status, body) = server
        .json(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": ADMIN_EMAIL, "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let server = TestServer::start().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let (status, _) = server.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = server
        .json(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "J",
                "email": "nope",
                "password": "secret123",
                "confirmPassword": "secret123"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Invalid email format"), "{message}");
}

#[tokio::test]
async fn catalog_management_is_admin_only() {
    let server = TestServer::start().await;
    let admin = server.admin_token().await;
    let user = server.register("jane@pharmacy.test").await;

    let (status, body) = server
        .json(
            "POST",
            "/api/medicines",
            Some(&user),
            Some(medicine_body("Paracetamol", 5.0, 10)),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not authorized as an admin");

    let (status, _) = server
        .json(
            "POST",
            "/api/medicines",
            None,
            Some(medicine_body("Paracetamol", 5.0, 10)),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let id = server.create_medicine(&admin, "Paracetamol", 5.0, 10).await;

    let (status, body) = server
        .json(
            "PUT",
            &format!("/api/medicines/{id}"),
            Some(&admin),
            Some(medicine_body("Paracetamol Forte", 6.5, 12)),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Paracetamol Forte");
    assert_eq!(body["data"]["stock"], 12);

    let (status, body) = server
        .json("GET", "/api/medicines?category=OTC&search=forte", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = server
        .json("GET", "/api/medicines?category=Herbal", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (status, _) = server
        .json("DELETE", &format!("/api/medicines/{id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = server
        .json("GET", &format!("/api/medicines/{id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Medicine not found");
}

#[tokio::test]
async fn order_lifecycle_over_http() {
    let server = TestServer::start().await;
    let admin = server.admin_token().await;
    let alice = server.register("alice@pharmacy.test").await;
    let bob = server.register("bob@pharmacy.test").await;
    let m1 = server.create_medicine(&admin, "Paracetamol", 50.0, 3).await;

    let (status, body) = server
        .json(
            "POST",
            "/api/orders",
            Some(&alice),
            Some(json!({ "items": [{ "medicine": m1, "quantity": 5 }] })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Insufficient stock for Paracetamol");

    let (status, body) = server
        .json(
            "POST",
            "/api/orders",
            Some(&alice),
            Some(json!({ "items": [{ "medicine": 9, "quantity": 1 }] })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Medicine 9 not found");

    let (status, body) = server
        .json(
            "POST",
            "/api/orders",
            Some(&alice),
            Some(json!({
                "items": [{ "medicine": m1, "quantity": 2 }],
                "deliveryDetails": { "address": "1 Main St", "city": "Springfield" }
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["total"].as_f64(), Some(100.0));
    assert_eq!(body["data"]["status"], "pending");
    let order_id = body["data"]["id"].as_i64().unwrap();

    let (_, body) = server
        .json("GET", &format!("/api/medicines/{m1}"), None, None)
        .await;
    assert_eq!(body["data"]["stock"], 1);

    let (status, body) = server
        .json("GET", "/api/orders/user", Some(&alice), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = server
        .json("GET", &format!("/api/orders/{order_id}"), Some(&bob), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = server.json("GET", "/api/orders", Some(&alice), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = server.json("GET", "/api/orders", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let status_uri = format!("/api/orders/{order_id}/status");
    let (status, body) = server
        .json(
            "PATCH",
            &status_uri,
            Some(&admin),
            Some(json!({ "status": "delivered" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "delivered");

    let (status, body) = server
        .json(
            "PATCH",
            &status_uri,
            Some(&admin),
            Some(json!({ "status": "pending" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Cannot change order status from delivered to pending"
    );

    let (status, _) = server
        .json(
            "PATCH",
            "/api/orders/999/status",
            Some(&admin),
            Some(json!({ "status": "delivered" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = server
        .json("GET", &format!("/api/orders/{order_id}"), Some(&alice), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["price"].as_f64(), Some(50.0));
}

#[tokio::test]
async fn prescriptions_can_be_uploaded_and_downloaded() {
    let server = TestServer::start().await;
    let token = server.register("patient@pharmacy.test").await;

    let (status, bytes) = server
        .send(multipart_request(
            "/api/prescriptions/upload",
            &token,
            "prescription",
            "rx.pdf",
            b"%PDF-1.4 scan",
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let url = body["data"]["url"].as_str().unwrap().to_string();
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, served) = server
        .send(Request::builder().uri(&url).body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(served, b"%PDF-1.4 scan");

    let (status, body) = server
        .json("GET", "/api/prescriptions", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = server
        .json("DELETE", &format!("/api/prescriptions/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = server
        .json("DELETE", &format!("/api/prescriptions/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_uploads_are_rejected() {
    let server = TestServer::start().await;
    let token = server.register("patient@pharmacy.test").await;

    let (status, bytes) = server
        .send(multipart_request(
            "/api/prescriptions/upload",
            &token,
            "attachment",
            "rx.pdf",
            b"%PDF",
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Please upload a file");

    let (status, bytes) = server
        .send(multipart_request(
            "/api/prescriptions/upload",
            &token,
            "prescription",
            "payload.exe",
            b"MZ",
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Only PDF, JPG, JPEG and PNG files are allowed");
}

#[tokio::test]
async fn metrics_and_docs_are_served() {
    let server = TestServer::start().await;

    let (status, _) = server.json("GET", "/api/medicines", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, bytes) = server
        .send(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("medicine_query_service_request_counter"));

    let (status, body) = server.json("GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/orders"].is_object());
}
