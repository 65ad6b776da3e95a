// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Pending,
    Processing,
    Completed,
}

impl CaseStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(CaseStatus::Pending),
            "processing" => Some(CaseStatus::Processing),
            "completed" => Some(CaseStatus::Completed),
            _ => None,
        }
    }
}

/// A legal case. Access is limited to the assigned lawyer and, when one is
/// linked, the client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Case {
    pub id: u64,
    pub case_no: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    pub status: CaseStatus,
    /// Percentage of the work done, 0 for a freshly opened case.
    #[serde(default)]
    pub progress: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filing_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_law: Option<String>,
    pub lawyer_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u64>,
    pub created_at: DateTime<Utc>,
}

/// Metadata for a stored upload. The bytes live on disk under the uploads
/// directory as `stored_filename`; the record is private to `user_id`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadedFile {
    pub user_id: u64,
    pub original_filename: String,
    pub stored_filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub size: u64,
    pub created_at: DateTime<Utc>,
}

pub const MAX_FEEDBACK_IMAGES: usize = 3;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Feedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(rename = "type")]
    pub kind: i32,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LawyerEducation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
}

/// Public directory entry for a lawyer. One per user.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LawyerProfile {
    pub user_id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expertise_areas: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub language_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<LawyerEducation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

/// A contract draft owned by a user, optionally linked to an upload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Contract {
    pub id: u64,
    pub user_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// A statute article in the reference corpus. Read-only and public.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LawArticle {
    pub law_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_no: Option<String>,
    pub content: String,
}
