// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::iam::auth::AuthError;
use crate::storage::StorageError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

/// Error as the API reports it: a status code, a stable machine-readable
/// code, and a human-readable message safe to show the caller.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: &'a str,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            code: "validation",
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::NOT_FOUND,
            code: "not_found",
            message: message.into(),
        }
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            code: "payload_too_large",
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        log::error!("Internal error: {}", message);
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal",
            message: "Internal server error".to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated => ApiError {
                status: StatusCode::UNAUTHORIZED,
                code: "unauthenticated",
                message: err.to_string(),
            },
            AuthError::InvalidCredentials => ApiError {
                status: StatusCode::UNAUTHORIZED,
                code: "invalid_credentials",
                message: err.to_string(),
            },
            AuthError::Disabled => ApiError {
                status: StatusCode::FORBIDDEN,
                code: "account_disabled",
                message: err.to_string(),
            },
            AuthError::Forbidden => ApiError {
                status: StatusCode::FORBIDDEN,
                code: "forbidden",
                message: err.to_string(),
            },
            AuthError::Conflict(msg) => ApiError {
                status: StatusCode::CONFLICT,
                code: "conflict",
                message: msg,
            },
            AuthError::Validation(msg) => ApiError::bad_request(msg),
            AuthError::Internal(msg) => ApiError::internal(msg),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(ErrorBody {
            error: self.code,
            message: &self.message,
        })
    }
}
