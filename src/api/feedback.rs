// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use super::error::ApiError;
use crate::domain::feedback::{FeedbackStore, NewFeedback};
use crate::domain::types::MAX_FEEDBACK_IMAGES;
use crate::iam::middleware::AuthRequest;

#[derive(Deserialize)]
pub struct FeedbackRequest {
    #[serde(rename = "type")]
    pub kind: i32,
    pub content: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Feedback is open to everyone; a logged-in sender is attributed, an
/// anonymous one is not.
pub async fn submit_feedback(
    req: HttpRequest,
    store: web::Data<FeedbackStore>,
    body: web::Json<FeedbackRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = req.user_info().map(|user| user.id);

    let body = body.into_inner();
    if body.content.trim().is_empty() {
        return Err(ApiError::bad_request("Feedback content is required"));
    }
    if body.images.len() > MAX_FEEDBACK_IMAGES {
        return Err(ApiError::bad_request(format!(
            "At most {} images per feedback",
            MAX_FEEDBACK_IMAGES
        )));
    }

    let entry = store.create(
        user_id,
        NewFeedback {
            kind: body.kind,
            content: body.content,
            contact: body.contact,
            images: body.images,
        },
    )?;
    Ok(HttpResponse::Created().json(entry))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/feedback", web::post().to(submit_feedback));
}
