// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{Value, json};

#[actix_web::test]
async fn register_returns_user_without_secrets() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;

    let user = common::register_user(&app, "alice", Some("lawyer")).await;
    assert_eq!(user.get("username").and_then(Value::as_str), Some("alice"));
    assert_eq!(user.get("role").and_then(Value::as_str), Some("lawyer"));
    assert_eq!(user.get("is_active").and_then(Value::as_bool), Some(true));
    assert!(user.get("id").and_then(Value::as_u64).is_some());
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());
}

#[actix_web::test]
async fn duplicate_username_and_email_conflict() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;
    common::register_user(&app, "alice", None).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "username": "alice",
            "password": common::PASSWORD,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = common::read_json(resp).await;
    assert_eq!(body.get("error").and_then(Value::as_str), Some("conflict"));

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": common::PASSWORD,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn register_rejects_invalid_input() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;

    let cases = [
        json!({ "username": "ab", "password": common::PASSWORD }),
        json!({ "username": "alice", "password": "pw" }),
        json!({ "username": "alice", "email": "not-an-email", "password": common::PASSWORD }),
    ];
    for payload in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = common::read_json(resp).await;
        assert_eq!(body.get("error").and_then(Value::as_str), Some("validation"));
    }
}

#[actix_web::test]
async fn login_failures_are_indistinguishable() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;
    common::register_user(&app, "alice", None).await;

    let wrong_password = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "alice", "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, wrong_password).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body = common::read_json(resp).await;

    let unknown_user = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "nobody", "password": common::PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, unknown_user).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let unknown_user_body = common::read_json(resp).await;

    assert_eq!(wrong_password_body, unknown_user_body);
    assert_eq!(
        wrong_password_body.get("error").and_then(Value::as_str),
        Some("invalid_credentials")
    );
}

#[actix_web::test]
async fn token_form_endpoint_issues_tokens() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;
    common::register_user(&app, "alice", None).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/token")
        .set_form([("username", "alice"), ("password", common::PASSWORD)])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::read_json(resp).await;
    assert_eq!(
        body.get("token_type").and_then(Value::as_str),
        Some("bearer")
    );
    let token = body
        .get("access_token")
        .and_then(Value::as_str)
        .expect("token")
        .to_string();

    let me = common::bearer(test::TestRequest::get().uri("/api/v1/auth/me"), &token).to_request();
    let resp = test::call_service(&app, me).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn me_requires_a_valid_token() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;
    common::register_user(&app, "alice", None).await;
    let token = common::login_user(&app, "alice").await;

    let anonymous = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .to_request();
    let resp = test::call_service(&app, anonymous).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let garbage = common::bearer(
        test::TestRequest::get().uri("/api/v1/auth/me"),
        "not.a.token",
    )
    .to_request();
    let resp = test::call_service(&app, garbage).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let valid = common::bearer(test::TestRequest::get().uri("/api/v1/auth/me"), &token).to_request();
    let resp = test::call_service(&app, valid).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::read_json(resp).await;
    assert_eq!(body.get("username").and_then(Value::as_str), Some("alice"));
}

#[actix_web::test]
async fn deactivated_account_is_forbidden_not_unauthorized() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;
    common::register_user(&app, "alice", None).await;
    let token = common::login_user(&app, "alice").await;

    harness
        .auth
        .set_active("alice", false)
        .await
        .expect("deactivate");

    let me = common::bearer(test::TestRequest::get().uri("/api/v1/auth/me"), &token).to_request();
    let resp = test::call_service(&app, me).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = common::read_json(resp).await;
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("account_disabled")
    );

    // Logging in again looks like any other bad credential.
    let login = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "alice", "password": common::PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, login).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
