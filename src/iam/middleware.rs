// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header;
use actix_web::web::Data;
use actix_web::{HttpMessage, HttpRequest};
use std::future::{Ready, ready};
use std::pin::Pin;
use std::rc::Rc; // Services are per-thread

use super::auth::{AuthError, AuthService};
use super::types::{Role, User};

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let header = req.headers().get(header::AUTHORIZATION)?;
    let value = header.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Trait to add authentication methods to HttpRequest
pub trait AuthRequest {
    fn user_info(&self) -> Option<User>;
    fn is_authenticated(&self) -> bool;
    fn has_role(&self, role: Role) -> bool;
    /// The resolved user, or the error a protected endpoint should return.
    fn require_user(&self) -> Result<User, AuthError>;
}

impl AuthRequest for HttpRequest {
    fn user_info(&self) -> Option<User> {
        self.extensions().get::<User>().cloned()
    }

    fn is_authenticated(&self) -> bool {
        self.user_info().is_some()
    }

    fn has_role(&self, role: Role) -> bool {
        self.user_info()
            .map(|user| user.role == Some(role))
            .unwrap_or(false)
    }

    fn require_user(&self) -> Result<User, AuthError> {
        if let Some(user) = self.user_info() {
            return Ok(user);
        }
        // Distinguish a deactivated account from everything else so the
        // endpoint can answer 403 instead of 401.
        match self.extensions().get::<AuthOutcome>() {
            Some(AuthOutcome::Disabled) => Err(AuthError::Disabled),
            _ => Err(AuthError::Unauthenticated),
        }
    }
}

/// What token resolution concluded for this request, recorded even when no
/// user lands in the extensions.
#[derive(Debug, Clone, Copy)]
enum AuthOutcome {
    Disabled,
    Unauthenticated,
}

// Bearer-token authentication middleware. Resolves the Authorization header
// once per request and stashes the outcome; handlers decide whether an
// anonymous request is acceptable.
pub struct BearerAuthMiddlewareFactory;

impl<S, B> Transform<S, ServiceRequest> for BearerAuthMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let auth_data = req.app_data::<Data<AuthService>>().cloned();
        let service = self.service.clone();

        Box::pin(async move {
            if let Some(auth) = auth_data {
                let token = bearer_token(&req);
                match auth.resolve_required(token.as_deref()) {
                    Ok(user) => {
                        log::debug!("Authenticated request as {}", user.username);
                        req.extensions_mut().insert(user);
                    }
                    Err(AuthError::Disabled) => {
                        req.extensions_mut().insert(AuthOutcome::Disabled);
                    }
                    Err(_) => {
                        req.extensions_mut().insert(AuthOutcome::Unauthenticated);
                    }
                }
            }

            service.call(req).await
        })
    }
}
