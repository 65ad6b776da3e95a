// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use super::error::ApiError;
use crate::domain::reference::{ContractStore, LawStore, NewContract};
use crate::iam::middleware::AuthRequest;

#[derive(Deserialize)]
pub struct ContractsQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateContractRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_id: Option<String>,
}

#[derive(Deserialize)]
pub struct LawsQuery {
    #[serde(default)]
    pub law_name: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
}

pub async fn list_contracts(
    req: HttpRequest,
    store: web::Data<ContractStore>,
    query: web::Query<ContractsQuery>,
) -> Result<HttpResponse, ApiError> {
    let user = req.require_user()?;
    let contracts = store.list_for_user(user.id, query.q.as_deref(), query.status.as_deref());
    Ok(HttpResponse::Ok().json(contracts))
}

pub async fn create_contract(
    req: HttpRequest,
    store: web::Data<ContractStore>,
    body: web::Json<CreateContractRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = req.require_user()?;
    let body = body.into_inner();
    if body.title.trim().is_empty() {
        return Err(ApiError::bad_request("Contract title is required"));
    }

    let contract = store.create(
        user.id,
        NewContract {
            title: body.title,
            description: body.description,
            file_id: body.file_id,
        },
    )?;
    Ok(HttpResponse::Created().json(contract))
}

/// Statute search is public reference material.
pub async fn search_laws(
    store: web::Data<LawStore>,
    query: web::Query<LawsQuery>,
) -> Result<HttpResponse, ApiError> {
    let articles = store.search(query.law_name.as_deref(), query.keyword.as_deref());
    Ok(HttpResponse::Ok().json(articles))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/query")
            .route("/contracts", web::get().to(list_contracts))
            .route("/contracts", web::post().to(create_contract))
            .route("/laws", web::get().to(search_laws)),
    );
}
