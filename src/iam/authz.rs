// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::auth::AuthError;
use super::types::{Role, User};
use crate::domain::types::{Case, UploadedFile};

/// A case is visible only to the lawyer it is assigned to and, when one is
/// linked, the client. Everyone else gets Forbidden, not NotFound; callers
/// that want to hide existence do their lookup first.
pub fn require_case_access(user: &User, case: &Case) -> Result<(), AuthError> {
    if case.lawyer_id == user.id || case.client_id == Some(user.id) {
        Ok(())
    } else {
        log::debug!(
            "User {} denied access to case {}",
            user.username,
            case.case_no
        );
        Err(AuthError::Forbidden)
    }
}

/// Only lawyers open cases.
pub fn require_case_create(user: &User) -> Result<(), AuthError> {
    if user.role == Some(Role::Lawyer) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

/// Uploaded files are private to the account that uploaded them.
pub fn require_file_access(user: &User, file: &UploadedFile) -> Result<(), AuthError> {
    if file.user_id == user.id {
        Ok(())
    } else {
        log::debug!(
            "User {} denied access to file {}",
            user.username,
            file.stored_filename
        );
        Err(AuthError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: u64, role: Option<Role>) -> User {
        User {
            id,
            username: format!("user{}", id),
            email: None,
            password_hash: "$argon2id$stub".to_string(),
            is_active: true,
            role,
            created_at: Utc::now(),
        }
    }

    fn case(lawyer_id: u64, client_id: Option<u64>) -> Case {
        Case {
            id: 1,
            case_no: "LX-2026-0001".to_string(),
            title: "Contract dispute".to_string(),
            case_type: None,
            status: crate::domain::types::CaseStatus::Pending,
            progress: 0,
            court: None,
            judge: None,
            filing_date: None,
            amount: None,
            applicable_law: None,
            lawyer_id,
            client_id,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn case_is_visible_to_lawyer_and_client_only() {
        let case = case(1, Some(2));
        assert!(require_case_access(&user(1, Some(Role::Lawyer)), &case).is_ok());
        assert!(require_case_access(&user(2, Some(Role::Client)), &case).is_ok());
        assert!(matches!(
            require_case_access(&user(3, Some(Role::Client)), &case),
            Err(AuthError::Forbidden)
        ));
    }

    #[test]
    fn case_without_client_is_lawyer_only() {
        let case = case(1, None);
        assert!(require_case_access(&user(1, Some(Role::Lawyer)), &case).is_ok());
        assert!(require_case_access(&user(2, Some(Role::Client)), &case).is_err());
    }

    #[test]
    fn only_lawyers_create_cases() {
        assert!(require_case_create(&user(1, Some(Role::Lawyer))).is_ok());
        assert!(require_case_create(&user(2, Some(Role::Client))).is_err());
        assert!(require_case_create(&user(3, None)).is_err());
    }

    #[test]
    fn files_are_private_to_their_uploader() {
        let file = UploadedFile {
            user_id: 1,
            original_filename: "brief.pdf".to_string(),
            stored_filename: "abc123_brief.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            size: 42,
            created_at: Utc::now(),
        };
        assert!(require_file_access(&user(1, None), &file).is_ok());
        assert!(matches!(
            require_file_access(&user(2, None), &file),
            Err(AuthError::Forbidden)
        ));
    }
}
