// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::iam::auth::AuthService;
use crate::iam::middleware::AuthRequest;
use crate::iam::types::{Role, User};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// OAuth2-style password grant form, for clients that speak
/// `application/x-www-form-urlencoded`.
#[derive(Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

/// A user as the API shows it. The password hash never leaves the server.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: u64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize)]
struct LoginResponse {
    access_token: String,
    token_type: &'static str,
    user: UserResponse,
}

#[derive(Serialize)]
struct TokenResponse {
    access_token: String,
    token_type: &'static str,
}

pub async fn register(
    auth: web::Data<AuthService>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let user = auth
        .register(
            &body.username,
            body.email.as_deref(),
            &body.password,
            body.role,
        )
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

pub async fn login(
    auth: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let (access_token, user) = auth.login(&body.username, &body.password).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token,
        token_type: "bearer",
        user: UserResponse::from(user),
    }))
}

pub async fn token(
    auth: web::Data<AuthService>,
    form: web::Form<TokenForm>,
) -> Result<HttpResponse, ApiError> {
    let (access_token, _user) = auth.login(&form.username, &form.password).await?;
    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

pub async fn me(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let user = req.require_user()?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/token", web::post().to(token))
            .route("/me", web::get().to(me)),
    );
}
