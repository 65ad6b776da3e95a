// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod auth;
pub mod authz;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod service;
pub mod store;
pub mod types;
