// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::web::Data;
use actix_web::{App, http::StatusCode, test, web};
use lexhub::api;
use lexhub::bootstrap::bootstrap_runtime;
use lexhub::config::ValidatedConfig;
use lexhub::domain::cases::CaseStore;
use lexhub::domain::feedback::FeedbackStore;
use lexhub::domain::files::FileStore;
use lexhub::domain::lawyers::LawyerStore;
use lexhub::domain::reference::{ContractStore, LawStore};
use lexhub::iam::auth::AuthService;
use lexhub::iam::jwt::JwtService;
use lexhub::iam::middleware::BearerAuthMiddlewareFactory;
use lexhub::iam::service::IamService;
use lexhub::iam::store::FileUserStore;
use serde_json::{Value, json};
use std::fs;
use std::sync::Arc;

pub const PASSWORD: &str = "correct-horse";

pub struct TestHarness {
    pub tempdir: tempfile::TempDir,
    pub config: ValidatedConfig,
    pub auth: Data<AuthService>,
    pub cases: Data<CaseStore>,
    pub files: Data<FileStore>,
    pub feedback: Data<FeedbackStore>,
    pub lawyers: Data<LawyerStore>,
    pub contracts: Data<ContractStore>,
    pub laws: Data<LawStore>,
}

impl TestHarness {
    pub async fn new() -> Self {
        let tempdir = tempfile::tempdir().expect("tempdir");
        let bootstrap = bootstrap_runtime(tempdir.path()).expect("bootstrap");
        let config = bootstrap.validated_config;
        let paths = bootstrap.runtime_paths;

        // A small statute corpus so /query/laws has something to find.
        fs::write(
            paths.state_file("laws.yaml"),
            concat!(
                "- law_name: \"Civil Code\"\n",
                "  article_no: \"Art. 12\"\n",
                "  content: \"A contract is formed when offer and acceptance coincide.\"\n",
                "- law_name: \"Civil Code\"\n",
                "  article_no: \"Art. 13\"\n",
                "  content: \"A contract may be terminated by mutual consent.\"\n",
                "- law_name: \"Labor Act\"\n",
                "  article_no: \"Art. 3\"\n",
                "  content: \"Regular working hours shall not exceed forty hours per week.\"\n",
            ),
        )
        .expect("seed laws");

        let jwt = Arc::new(JwtService::new(&config.auth).expect("jwt"));
        let user_store = Arc::new(FileUserStore::new(paths.users_file.clone()));
        let iam = IamService::new(user_store).expect("iam");
        let auth = AuthService::new(iam, jwt).expect("auth");

        TestHarness {
            config: config.clone(),
            auth: Data::new(auth),
            cases: Data::new(CaseStore::open(paths.state_file("cases.yaml")).expect("cases")),
            files: Data::new(
                FileStore::open(paths.state_file("files.yaml"), paths.uploads_dir.clone())
                    .expect("files"),
            ),
            feedback: Data::new(
                FeedbackStore::open(paths.state_file("feedback.yaml")).expect("feedback"),
            ),
            lawyers: Data::new(
                LawyerStore::open(paths.state_file("lawyers.yaml")).expect("lawyers"),
            ),
            contracts: Data::new(
                ContractStore::open(paths.state_file("contracts.yaml")).expect("contracts"),
            ),
            laws: Data::new(LawStore::open(paths.state_file("laws.yaml")).expect("laws")),
            tempdir,
        }
    }
}

pub fn build_test_app(
    harness: &TestHarness,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(BearerAuthMiddlewareFactory)
        .app_data(web::PayloadConfig::new(
            harness.config.upload.max_file_size_bytes() as usize,
        ))
        .app_data(harness.auth.clone())
        .app_data(Data::new(harness.config.clone()))
        .app_data(harness.cases.clone())
        .app_data(harness.files.clone())
        .app_data(harness.feedback.clone())
        .app_data(harness.lawyers.clone())
        .app_data(harness.contracts.clone())
        .app_data(harness.laws.clone())
        .configure(api::configure)
}

/// Register an account through the API and return its JSON representation.
pub async fn register_user<S>(app: &S, username: &str, role: Option<&str>) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let mut payload = json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "password": PASSWORD,
    });
    if let Some(role) = role {
        payload["role"] = json!(role);
    }
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("user json")
}

/// Log in through the API and return the bearer token.
pub async fn login_user<S>(app: &S, username: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": username, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let json: Value = serde_json::from_slice(&body).expect("login json");
    json.get("access_token")
        .and_then(Value::as_str)
        .expect("access_token")
        .to_string()
}

pub fn bearer(req: test::TestRequest, token: &str) -> test::TestRequest {
    req.insert_header(("Authorization", format!("Bearer {}", token)))
}

pub async fn read_json(resp: ServiceResponse<BoxBody>) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("json body")
}
