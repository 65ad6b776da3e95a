// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use super::error::ApiError;
use crate::domain::lawyers::LawyerStore;
use crate::domain::types::{LawyerEducation, LawyerProfile};
use crate::iam::middleware::AuthRequest;
use crate::iam::types::Role;

#[derive(Deserialize)]
pub struct ListLawyersQuery {
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct ProfileRequest {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub practice_years: Option<u32>,
    #[serde(default)]
    pub practice_area: Option<String>,
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(default)]
    pub expertise_areas: Vec<String>,
    #[serde(default)]
    pub language_skills: Vec<String>,
    #[serde(default)]
    pub education: Option<LawyerEducation>,
    #[serde(default)]
    pub work_experience: Option<String>,
    #[serde(default)]
    pub case_experience: Option<String>,
    #[serde(default)]
    pub avatar_emoji: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// The directory is public: browsing lawyers needs no account.
pub async fn list_lawyers(
    store: web::Data<LawyerStore>,
    query: web::Query<ListLawyersQuery>,
) -> Result<HttpResponse, ApiError> {
    let profiles = store.list(query.keyword.as_deref(), query.category.as_deref());
    Ok(HttpResponse::Ok().json(profiles))
}

pub async fn get_lawyer(
    store: web::Data<LawyerStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let profile = store
        .get(user_id)
        .ok_or_else(|| ApiError::not_found("No such lawyer"))?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Lawyers publish or replace their own directory entry.
pub async fn put_own_profile(
    req: HttpRequest,
    store: web::Data<LawyerStore>,
    body: web::Json<ProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = req.require_user()?;
    if user.role != Some(Role::Lawyer) {
        return Err(ApiError::from(crate::iam::auth::AuthError::Forbidden));
    }
    let body = body.into_inner();
    if body.name.trim().is_empty() {
        return Err(ApiError::bad_request("A display name is required"));
    }

    let profile = store.upsert(LawyerProfile {
        user_id: user.id,
        name: body.name,
        title: body.title,
        organization: body.organization,
        license_number: body.license_number,
        practice_years: body.practice_years,
        practice_area: body.practice_area,
        introduction: body.introduction,
        expertise_areas: body.expertise_areas,
        language_skills: body.language_skills,
        education: body.education,
        work_experience: body.work_experience,
        case_experience: body.case_experience,
        avatar_emoji: body.avatar_emoji,
        tags: body.tags,
        categories: body.categories,
    })?;
    Ok(HttpResponse::Ok().json(profile))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/lawyers")
            .route("", web::get().to(list_lawyers))
            .route("/me", web::put().to(put_own_profile))
            .route("/{user_id}", web::get().to(get_lawyer)),
    );
}
