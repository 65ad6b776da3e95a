// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use validator::ValidateEmail;

pub const MIN_USERNAME_CHARS: usize = 3;
pub const MAX_USERNAME_CHARS: usize = 50;
pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MAX_PASSWORD_CHARS: usize = 128;
pub const MAX_EMAIL_CHARS: usize = 128;

/// Validate a username for registration. Usernames are immutable once
/// created, so this is the only place the rules apply.
pub fn validate_username_field(username: &str) -> Result<(), String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err("Username is required".to_string());
    }
    let len = trimmed.chars().count();
    if len < MIN_USERNAME_CHARS || len > MAX_USERNAME_CHARS {
        return Err(format!(
            "Username must be between {} and {} characters",
            MIN_USERNAME_CHARS, MAX_USERNAME_CHARS
        ));
    }
    if trimmed != username {
        return Err("Username must not start or end with whitespace".to_string());
    }
    Ok(())
}

/// Validate a password before it reaches the hasher. The hasher itself
/// accepts any well-formed string; length policy lives here.
pub fn validate_password_field(password: &str) -> Result<(), String> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_CHARS || len > MAX_PASSWORD_CHARS {
        return Err(format!(
            "Password must be between {} and {} characters",
            MIN_PASSWORD_CHARS, MAX_PASSWORD_CHARS
        ));
    }
    Ok(())
}

/// Validate user email input
pub fn validate_email_field(email: &str) -> Result<(), String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err("Email is required".to_string());
    }
    if trimmed.chars().count() > MAX_EMAIL_CHARS {
        return Err(format!(
            "Email must be at most {} characters",
            MAX_EMAIL_CHARS
        ));
    }
    if !trimmed.validate_email() {
        return Err("Email format is invalid".to_string());
    }
    Ok(())
}
