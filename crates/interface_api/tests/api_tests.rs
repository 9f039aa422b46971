//! Router tests for the HTTP API

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use core_kernel::UserId;
use domain_case::{CaseStatus, Role};
use interface_api::auth::create_token;
use interface_api::config::ApiConfig;
use interface_api::create_router;
use test_utils::{ADMIN_EMAIL, ADMIN_PASSWORD, ApplicantFixtures, ServiceFixture};

async fn app() -> (Router, ServiceFixture) {
    let fixture = ServiceFixture::new().await;
    let router = create_router(fixture.service.clone(), ApiConfig::default());
    (router, fixture)
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn login(router: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["access_token"].as_str().unwrap().to_string()
}

async fn submit(router: &Router, email: &str) -> Value {
    let submission = serde_json::to_value(ApplicantFixtures::submission(email)).unwrap();
    let (status, body) = send(router, Method::POST, "/api/clients/submit", None, Some(submission)).await;
    assert_eq!(status, StatusCode::CREATED, "submit failed: {}", body);
    body
}

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoints() {
        let (router, _) = app().await;

        let (status, body) = send(&router, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = send(&router, Method::GET, "/health/ready", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["adapters"].as_array().unwrap().len(), 3);
    }
}

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_login_returns_bearer_token() {
        let (router, fixture) = app().await;
        let (status, body) = send(
            &router,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "bearer");
        assert_eq!(body["role"], "admin");
        assert_eq!(body["user_id"], json!(fixture.admin.user_id));
    }

    #[tokio::test]
    async fn test_bad_credentials_are_401() {
        let (router, _) = app().await;
        let (status, body) = send(
            &router,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": ADMIN_EMAIL, "password": "wrong" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");
        assert_eq!(body["message"], "Incorrect email or password");
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let (router, _) = app().await;

        let (status, _) = send(&router, Method::GET, "/api/auth/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&router, Method::GET, "/api/auth/me", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let token = login(&router, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        let (status, body) = send(&router, Method::GET, "/api/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], ADMIN_EMAIL);
        assert_eq!(body["role"], "admin");
    }

    #[tokio::test]
    async fn test_token_for_unknown_user_is_401() {
        let (router, _) = app().await;
        let config = ApiConfig::default();
        let token = create_token(UserId::new(), Role::Admin, &config.jwt_secret, 60).unwrap();

        let (status, _) = send(&router, Method::GET, "/api/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

mod client_tests {
    use super::*;

    #[tokio::test]
    async fn test_submission_then_client_dashboard() {
        let (router, _) = app().await;
        let receipt = submit(&router, "jane@example.com").await;
        assert_eq!(receipt["success"], true);
        assert_eq!(receipt["password"].as_str().unwrap().len(), 12);

        let token = login(&router, "jane@example.com", receipt["password"].as_str().unwrap()).await;
        let (status, body) = send(&router, Method::GET, "/api/clients/me/dashboard", Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], receipt["client_id"]);
        assert_eq!(body["case_status"], "pending");
        assert_eq!(body["status_history"][0]["notes"], "Application submitted");
        assert_eq!(body["documents_info"]["driver_license"]["filename"], "license.jpg");
    }

    #[tokio::test]
    async fn test_duplicate_submission_conflicts() {
        let (router, _) = app().await;
        submit(&router, "jane@example.com").await;

        let submission = serde_json::to_value(ApplicantFixtures::submission("jane@example.com")).unwrap();
        let (status, body) = send(&router, Method::POST, "/api/clients/submit", None, Some(submission)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Email already registered");
    }

    #[tokio::test]
    async fn test_invalid_submission_is_422() {
        let (router, _) = app().await;
        let mut submission = serde_json::to_value(ApplicantFixtures::submission("jane@example.com")).unwrap();
        submission["ssn"] = json!("123456789");

        let (status, body) = send(&router, Method::POST, "/api/clients/submit", None, Some(submission)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
        assert!(body["details"][0].as_str().unwrap().starts_with("ssn"));
    }

    #[tokio::test]
    async fn test_admin_cannot_open_client_dashboard() {
        let (router, _) = app().await;
        let token = login(&router, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        let (status, _) = send(&router, Method::GET, "/api/clients/me/dashboard", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

mod admin_tests {
    use super::*;

    #[tokio::test]
    async fn test_client_token_is_403_on_admin_routes() {
        let (router, _) = app().await;
        let receipt = submit(&router, "jane@example.com").await;
        let token = login(&router, "jane@example.com", receipt["password"].as_str().unwrap()).await;

        for uri in ["/api/admin/clients", "/api/admin/stats"] {
            let (status, body) = send(&router, Method::GET, uri, Some(&token), None).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
            assert_eq!(body["error"], "forbidden");
        }

        let uri = format!("/api/admin/clients/{}/status", receipt["client_id"].as_str().unwrap());
        let (status, _) = send(
            &router,
            Method::PATCH,
            &uri,
            Some(&token),
            Some(json!({ "status": "completed" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_routes_require_token() {
        let (router, _) = app().await;
        let (status, _) = send(&router, Method::GET, "/api/admin/stats", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_deactivated_admin_token_is_401() {
        let (router, fixture) = app().await;
        let token = login(&router, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        let (status, _) = send(&router, Method::GET, "/api/admin/stats", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        fixture.directory.deactivate(fixture.admin.user_id).await.unwrap();

        let (status, body) = send(&router, Method::GET, "/api/admin/stats", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Account is inactive");
    }

    #[tokio::test]
    async fn test_role_comes_from_account_not_token() {
        let (router, _) = app().await;
        let receipt = submit(&router, "jane@example.com").await;
        let token = login(&router, "jane@example.com", receipt["password"].as_str().unwrap()).await;
        let (_, me) = send(&router, Method::GET, "/api/auth/me", Some(&token), None).await;
        let client_user: UserId = serde_json::from_value(me["id"].clone()).unwrap();

        let config = ApiConfig::default();
        let forged = create_token(client_user, Role::Admin, &config.jwt_secret, 60).unwrap();

        let (status, _) = send(&router, Method::GET, "/api/admin/stats", Some(&forged), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_list_with_status_filter() {
        let (router, _) = app().await;
        submit(&router, "jane@example.com").await;
        let token = login(&router, ADMIN_EMAIL, ADMIN_PASSWORD).await;

        let (status, body) = send(&router, Method::GET, "/api/admin/clients?status=pending", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = send(&router, Method::GET, "/api/admin/clients?status=completed", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());

        let (status, body) = send(&router, Method::GET, "/api/admin/clients?status=archived", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Unknown case status: archived");
    }

    #[tokio::test]
    async fn test_status_update_flow() {
        let (router, _) = app().await;
        let receipt = submit(&router, "jane@example.com").await;
        let client_id = receipt["client_id"].as_str().unwrap();
        let token = login(&router, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        let uri = format!("/api/admin/clients/{}/status", client_id);

        let (status, body) = send(
            &router,
            Method::PATCH,
            &uri,
            Some(&token),
            Some(json!({ "status": "documents_verified", "notes": "License checked" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        assert_eq!(body["client"]["case_status"], "documents_verified");
        assert_eq!(body["client"]["notes"], "License checked");

        // same status, no note
        let (status, body) = send(
            &router,
            Method::PATCH,
            &uri,
            Some(&token),
            Some(json!({ "status": "documents_verified" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "No status or notes to update");

        let (status, _) = send(
            &router,
            Method::PATCH,
            &uri,
            Some(&token),
            Some(json!({ "status": "on_hold" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&router, Method::GET, &format!("/api/admin/clients/{}", client_id), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status_history"].as_array().unwrap().len(), 2);
        assert_eq!(body["documents_info"]["billing_address_proof"]["size"], 512_000);
    }

    #[tokio::test]
    async fn test_unknown_case_is_404() {
        let (router, _) = app().await;
        let token = login(&router, ADMIN_EMAIL, ADMIN_PASSWORD).await;

        let (status, _) = send(&router, Method::GET, "/api/admin/clients/not-a-uuid", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let uri = format!("/api/admin/clients/{}", core_kernel::ClientId::new());
        let (status, body) = send(&router, Method::GET, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Client not found");
    }

    #[tokio::test]
    async fn test_stats() {
        let (router, fixture) = app().await;
        submit(&router, "a@example.com").await;
        let second = submit(&router, "b@example.com").await;
        let client_id = second["client_id"].as_str().unwrap().parse().unwrap();
        fixture
            .service
            .update_case_status(&fixture.admin, client_id, CaseStatus::Completed, "")
            .await
            .unwrap();

        let token = login(&router, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        let (status, body) = send(&router, Method::GET, "/api/admin/stats", Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_clients"], 2);
        assert_eq!(body["status_counts"]["pending"], 1);
        assert_eq!(body["status_counts"]["completed"], 1);
        assert_eq!(body["status_counts"]["letters_sent"], 0);
        assert_eq!(body["recent_clients"].as_array().unwrap().len(), 2);
    }
}
