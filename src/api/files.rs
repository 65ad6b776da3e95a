// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use super::error::ApiError;
use crate::config::ValidatedConfig;
use crate::domain::files::FileStore;
use crate::iam::authz::require_file_access;
use crate::iam::middleware::AuthRequest;

#[derive(Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

/// Raw-body upload; the original filename travels in the query string and
/// the media type in the Content-Type header.
pub async fn upload_file(
    req: HttpRequest,
    store: web::Data<FileStore>,
    config: web::Data<ValidatedConfig>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let user = req.require_user()?;

    let filename = query.filename.trim();
    if filename.is_empty() {
        return Err(ApiError::bad_request("A filename is required"));
    }
    if !config.upload.extension_allowed(filename) {
        return Err(ApiError::bad_request(format!(
            "File type not allowed: {}",
            filename
        )));
    }
    let max_bytes = config.upload.max_file_size_bytes();
    if body.len() as u64 > max_bytes {
        return Err(ApiError::payload_too_large(format!(
            "Upload exceeds the {} MB limit",
            config.upload.max_file_size_mb
        )));
    }

    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let record = store.save_upload(user.id, filename, content_type, &body)?;
    Ok(HttpResponse::Created().json(record))
}

pub async fn list_files(
    req: HttpRequest,
    store: web::Data<FileStore>,
) -> Result<HttpResponse, ApiError> {
    let user = req.require_user()?;
    Ok(HttpResponse::Ok().json(store.list_for_user(user.id)))
}

pub async fn download_file(
    req: HttpRequest,
    store: web::Data<FileStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user = req.require_user()?;
    let stored_filename = path.into_inner();
    let record = store
        .get(&stored_filename)
        .ok_or_else(|| ApiError::not_found("No such file"))?;
    require_file_access(&user, &record)?;

    let content = store.read_content(&record)?;
    let mut response = HttpResponse::Ok();
    if let Some(content_type) = &record.content_type {
        response.insert_header((header::CONTENT_TYPE, content_type.as_str()));
    }
    response.insert_header((
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{}\"", record.original_filename),
    ));
    Ok(response.body(content))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/files")
            .route("", web::get().to(list_files))
            .route("/upload", web::post().to(upload_file))
            .route("/{stored_filename}", web::get().to(download_file)),
    );
}
