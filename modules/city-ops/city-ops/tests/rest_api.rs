#![allow(clippy::unwrap_used, clippy::expect_used)]

//! HTTP surface driven through the full router with `oneshot`.

mod support;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use civitas_errors::Problem;
use serde_json::{Value, json};
use tower::ServiceExt; // for oneshot

async fn app() -> Router {
    support::module().await.router()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_owned());
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("body is not JSON")
    };
    (status, content_type, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_req(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn create_tenant(app: &Router, domain: &str) -> String {
    let (status, _, body) = send(
        app,
        json_req(
            "POST",
            "/api/v1/tenants",
            &json!({"name": "Springfield", "domain": domain}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_owned()
}

fn asset_body(tenant_id: &str) -> Value {
    json!({
        "type": "air_quality_sensor",
        "name": "AQ-17",
        "location": {"type": "Point", "coordinates": [-122.4194, 37.7749]},
        "properties": {"model": "PM-9"},
        "tenant_id": tenant_id
    })
}

#[tokio::test]
async fn create_asset_returns_201_with_defaults() {
    let app = app().await;
    let tenant_id = create_tenant(&app, "springfield.example").await;

    let (status, _, body) = send(&app, json_req("POST", "/api/v1/assets", &asset_body(&tenant_id))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["type"], "air_quality_sensor");
    assert_eq!(body["status"], "active");
    assert_eq!(body["location"]["coordinates"], json!([-122.4194, 37.7749]));
    assert_eq!(body["updated_at"], Value::Null);

    let uri = format!("/api/v1/assets/{}", body["id"].as_str().unwrap());
    let (status, _, fetched) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "AQ-17");
}

#[tokio::test]
async fn unknown_asset_status_is_422_problem() {
    let app = app().await;
    let tenant_id = create_tenant(&app, "shelbyville.example").await;
    let mut body = asset_body(&tenant_id);
    body["status"] = json!("broken");

    let (status, content_type, problem) = send(&app, json_req("POST", "/api/v1/assets", &body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    let problem: Problem = serde_json::from_value(problem).unwrap();
    let errors = problem.errors.unwrap();
    assert_eq!(errors[0].field, "status");
}

#[tokio::test]
async fn malformed_json_is_422() {
    let app = app().await;
    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/tenants")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let (status, content_type, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
}

#[tokio::test]
async fn missing_asset_is_404_with_detail() {
    let app = app().await;
    let uri = format!("/api/v1/assets/{}", uuid::Uuid::now_v7());
    let (status, content_type, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(body["detail"], "Asset not found");
    assert!(body.get("instance").is_none());
}

#[tokio::test]
async fn malformed_id_is_422() {
    let app = app().await;
    let (status, _, _) = send(&app, get("/api/v1/incidents/not-a-uuid")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_body_carries_flat_pagination() {
    let app = app().await;
    let tenant_id = create_tenant(&app, "capital.example").await;
    for _ in 0..3 {
        let (status, _, _) = send(&app, json_req("POST", "/api/v1/assets", &asset_body(&tenant_id))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _, body) = send(&app, get("/api/v1/assets?skip=2&limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assets"].as_array().unwrap().len(), 1);
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 2);
    assert_eq!(body["per_page"], 2);
    assert_eq!(body["total_pages"], 2);
}

#[tokio::test]
async fn blank_filter_values_are_ignored() {
    let app = app().await;
    let tenant_id = create_tenant(&app, "blank.example").await;
    let (status, _, _) =
        send(&app, json_req("POST", "/api/v1/assets", &asset_body(&tenant_id))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, body) = send(&app, get("/api/v1/assets?status=&type=&tenant_id=")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);

    let (status, _, body) = send(&app, get("/api/v1/incidents?severity=&status=")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);

    let (status, _, _) = send(&app, get("/api/v1/assets?status=bogus")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn limit_above_max_is_422() {
    let app = app().await;
    let (status, _, body) = send(&app, get("/api/v1/incidents?limit=101")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().is_some());
}

#[tokio::test]
async fn duplicate_domain_is_409() {
    let app = app().await;
    create_tenant(&app, "twin.example").await;
    let (status, _, _) = send(
        &app,
        json_req(
            "POST",
            "/api/v1/tenants",
            &json!({"name": "Twin", "domain": "twin.example"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn incident_update_and_delete() {
    let app = app().await;
    let tenant_id = create_tenant(&app, "ogdenville.example").await;
    let (status, _, created) = send(
        &app,
        json_req(
            "POST",
            "/api/v1/incidents",
            &json!({
                "title": "Transformer fire",
                "description": "Smoke from substation 3",
                "type": "fire",
                "severity": "high",
                "location": {"type": "Point", "coordinates": [13.405, 52.52]},
                "tags": ["power"],
                "tenant_id": tenant_id
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "reported");
    let uri = format!("/api/v1/incidents/{}", created["id"].as_str().unwrap());

    let (status, _, updated) = send(&app, json_req("PUT", &uri, &json!({"status": "resolved"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "resolved");
    assert_eq!(updated["title"], "Transformer fire");
    assert!(updated["resolved_at"].is_string());

    let del = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(&app, del).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Incident deleted successfully");

    let (status, _, _) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn telemetry_placeholder_is_empty() {
    let app = app().await;
    let tenant_id = create_tenant(&app, "telemetry.example").await;
    let (_, _, asset) = send(&app, json_req("POST", "/api/v1/assets", &asset_body(&tenant_id))).await;
    let uri = format!(
        "/api/v1/assets/{}/telemetry?limit=5",
        asset["id"].as_str().unwrap()
    );
    let (status, _, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["limit"], 5);
    assert_eq!(body["telemetry_data"], json!([]));
}

#[tokio::test]
async fn login_then_me_and_logout() {
    let app = app().await;
    let tenant_id = create_tenant(&app, "login.example").await;
    let (status, _, _) = send(
        &app,
        json_req(
            "POST",
            "/api/v1/users",
            &json!({
                "email": "chief@login.example",
                "name": "Chief Wiggum",
                "role": "admin",
                "tenant_id": tenant_id,
                "password": support::PASSWORD
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let form = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username=chief%40login.example&password={}",
            support::PASSWORD
        )))
        .unwrap();
    let (status, _, token) = send(&app, form).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(token["token_type"], "bearer");
    let bearer = format!("Bearer {}", token["access_token"].as_str().unwrap());

    let me = Request::builder()
        .uri("/api/v1/auth/me")
        .header(header::AUTHORIZATION, &bearer)
        .body(Body::empty())
        .unwrap();
    let (status, _, user) = send(&app, me).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["email"], "chief@login.example");
    assert_eq!(user["role"], "admin");
    assert!(user.get("password_hash").is_none());

    let logout = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/logout")
        .header(header::AUTHORIZATION, &bearer)
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(&app, logout).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully logged out");
}

#[tokio::test]
async fn me_without_token_is_401() {
    let app = app().await;
    let (status, _, body) = send(&app, get("/api/v1/auth/me")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Not authenticated");
}

#[tokio::test]
async fn register_and_refresh_are_501() {
    let app = app().await;
    for uri in ["/api/v1/auth/register", "/api/v1/auth/refresh"] {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    }
}

#[tokio::test]
async fn system_endpoints() {
    let app = app().await;

    let (status, _, root) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(root["status"], "operational");

    let (status, _, health) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["services"]["database"], "healthy");

    let (status, _, _) = send(&app, get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, info) = send(&app, get("/api")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(info["endpoints"].is_object());
}
