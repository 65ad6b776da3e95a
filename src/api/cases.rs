// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;

use super::error::ApiError;
use crate::domain::cases::{CaseFilter, CaseStore, NewCase};
use crate::domain::types::CaseStatus;
use crate::iam::auth::AuthService;
use crate::iam::authz::{require_case_access, require_case_create};
use crate::iam::middleware::AuthRequest;

#[derive(Deserialize)]
pub struct ListCasesQuery {
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub history: bool,
}

#[derive(Deserialize)]
pub struct CreateCaseRequest {
    pub title: String,
    #[serde(default)]
    pub case_type: Option<String>,
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default)]
    pub judge: Option<String>,
    #[serde(default)]
    pub filing_date: Option<NaiveDate>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub applicable_law: Option<String>,
    #[serde(default)]
    pub client_id: Option<u64>,
}

pub async fn list_cases(
    req: HttpRequest,
    store: web::Data<CaseStore>,
    query: web::Query<ListCasesQuery>,
) -> Result<HttpResponse, ApiError> {
    let user = req.require_user()?;

    let status = match query.status.as_deref() {
        Some(raw) => Some(
            CaseStatus::parse(raw)
                .ok_or_else(|| ApiError::bad_request(format!("Unknown case status: {}", raw)))?,
        ),
        None => None,
    };
    let filter = CaseFilter {
        keyword: query.keyword.clone(),
        status,
        history: query.history,
    };

    Ok(HttpResponse::Ok().json(store.list_for_user(user.id, &filter)))
}

pub async fn create_case(
    req: HttpRequest,
    store: web::Data<CaseStore>,
    auth: web::Data<AuthService>,
    body: web::Json<CreateCaseRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = req.require_user()?;
    require_case_create(&user)?;

    let body = body.into_inner();
    if body.title.trim().is_empty() {
        return Err(ApiError::bad_request("Case title is required"));
    }
    if let Some(client_id) = body.client_id {
        let client = auth
            .users()
            .get_user_by_id(client_id)
            .map_err(|err| ApiError::internal(err.to_string()))?;
        if client.is_none() {
            return Err(ApiError::bad_request(format!(
                "Unknown client id: {}",
                client_id
            )));
        }
    }

    let case = store.create(
        user.id,
        NewCase {
            title: body.title,
            case_type: body.case_type,
            court: body.court,
            judge: body.judge,
            filing_date: body.filing_date,
            amount: body.amount,
            applicable_law: body.applicable_law,
            client_id: body.client_id,
        },
    )?;
    Ok(HttpResponse::Created().json(case))
}

pub async fn get_case(
    req: HttpRequest,
    store: web::Data<CaseStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let user = req.require_user()?;
    let case_id = path.into_inner();
    let case = store
        .get(case_id)
        .ok_or_else(|| ApiError::not_found(format!("No such case: {}", case_id)))?;
    require_case_access(&user, &case)?;
    Ok(HttpResponse::Ok().json(case))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cases")
            .route("", web::get().to(list_cases))
            .route("", web::post().to(create_case))
            .route("/{case_id}", web::get().to(get_case)),
    );
}
