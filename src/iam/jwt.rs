// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::AuthParams;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Token payload: exactly the subject (username) and the expiry timestamp
/// in seconds since the epoch. Nothing else travels in the token.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

/// Startup-time token configuration failures. These block the server from
/// starting; they are never surfaced per request.
#[derive(Debug)]
pub enum TokenError {
    ConfigurationError(String),
    CreationError(String),
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::ConfigurationError(msg) => write!(f, "Token configuration error: {}", msg),
            TokenError::CreationError(msg) => write!(f, "Token creation error: {}", msg),
        }
    }
}

impl std::error::Error for TokenError {}

/// Uniform verification failure. Expired, forged, malformed and
/// missing-claim tokens all collapse to this one value so callers cannot
/// leak the reason to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidToken;

pub struct JwtService {
    secret: String,
    algorithm: Algorithm,
    token_ttl_minutes: i64,
}

impl JwtService {
    /// Create a new JwtService from validated auth parameters. An empty
    /// secret is a fatal misconfiguration.
    pub fn new(params: &AuthParams) -> Result<Self, TokenError> {
        if params.secret.trim().is_empty() {
            return Err(TokenError::ConfigurationError(
                "Signing secret is not configured".to_string(),
            ));
        }
        Ok(JwtService {
            secret: params.secret.clone(),
            algorithm: params.algorithm,
            token_ttl_minutes: params.token_ttl_minutes,
        })
    }

    /// Issue a signed token for `subject`, expiring `ttl_minutes` from now
    /// (the configured default when not given).
    pub fn issue_token(
        &self,
        subject: &str,
        ttl_minutes: Option<i64>,
    ) -> Result<String, TokenError> {
        let ttl = ttl_minutes.unwrap_or(self.token_ttl_minutes);
        let expiration = Utc::now() + Duration::minutes(ttl);
        let claims = Claims {
            sub: subject.to_string(),
            exp: expiration.timestamp(),
        };

        encode(
            &Header::new(self.algorithm),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| TokenError::CreationError(e.to_string()))
    }

    /// Verify signature and expiry. Every failure mode returns the same
    /// [`InvalidToken`] value.
    pub fn verify_token(&self, token: &str) -> Result<Claims, InvalidToken> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| InvalidToken)
    }
}
