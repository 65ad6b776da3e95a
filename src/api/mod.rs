// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::web;

pub mod auth;
pub mod cases;
pub mod error;
pub mod feedback;
pub mod files;
pub mod lawyers;
pub mod reference;

pub use error::ApiError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(auth::configure)
            .configure(cases::configure)
            .configure(files::configure)
            .configure(lawyers::configure)
            .configure(reference::configure)
            .configure(feedback::configure),
    );
}
