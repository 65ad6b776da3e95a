// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::types::{Case, CaseStatus};
use crate::storage::{StorageError, read_yaml_file, write_yaml_file};
use chrono::{Datelike, NaiveDate, Utc};
use std::path::PathBuf;
use std::sync::RwLock;

/// Fields a lawyer supplies when opening a case. The case number, status
/// and timestamps are assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct NewCase {
    pub title: String,
    pub case_type: Option<String>,
    pub court: Option<String>,
    pub judge: Option<String>,
    pub filing_date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub applicable_law: Option<String>,
    pub client_id: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    pub keyword: Option<String>,
    pub status: Option<CaseStatus>,
    /// Completed cases are hidden unless `history` is set, which widens
    /// the listing to everything the user is a party to.
    pub history: bool,
}

pub struct CaseStore {
    path: PathBuf,
    cases: RwLock<Vec<Case>>,
}

impl CaseStore {
    pub fn open(path: PathBuf) -> Result<Self, StorageError> {
        let cases: Vec<Case> = read_yaml_file(&path, "cases")?.unwrap_or_default();
        Ok(CaseStore {
            path,
            cases: RwLock::new(cases),
        })
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Case>> {
        self.cases
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Case>> {
        self.cases
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // Case numbers are LX-<year>-<seq>, sequence per year.
    fn next_case_no(cases: &[Case]) -> String {
        let year = Utc::now().year();
        let prefix = format!("LX-{}-", year);
        let seq = cases
            .iter()
            .filter(|c| c.case_no.starts_with(&prefix))
            .count()
            + 1;
        format!("{}{:04}", prefix, seq)
    }

    /// Open a new case assigned to `lawyer_id`. New cases start pending
    /// with no progress.
    pub fn create(&self, lawyer_id: u64, new: NewCase) -> Result<Case, StorageError> {
        let mut cases = self.write();
        let case = Case {
            id: cases.iter().map(|c| c.id).max().unwrap_or(0) + 1,
            case_no: Self::next_case_no(&cases),
            title: new.title,
            case_type: new.case_type,
            status: CaseStatus::Pending,
            progress: 0,
            court: new.court,
            judge: new.judge,
            filing_date: new.filing_date,
            amount: new.amount,
            applicable_law: new.applicable_law,
            lawyer_id,
            client_id: new.client_id,
            created_at: Utc::now(),
        };

        let mut updated = cases.clone();
        updated.push(case.clone());
        write_yaml_file(&self.path, "cases", &updated)?;
        *cases = updated;
        log::info!("Created case {} for lawyer {}", case.case_no, lawyer_id);
        Ok(case)
    }

    /// Cases the user is a party to, newest first, optionally filtered.
    pub fn list_for_user(&self, user_id: u64, filter: &CaseFilter) -> Vec<Case> {
        let keyword = filter.keyword.as_deref().map(|k| k.to_lowercase());
        let mut matches: Vec<Case> = self
            .read()
            .iter()
            .filter(|c| c.lawyer_id == user_id || c.client_id == Some(user_id))
            .filter(|c| match &keyword {
                Some(k) => {
                    c.title.to_lowercase().contains(k) || c.case_no.to_lowercase().contains(k)
                }
                None => true,
            })
            .filter(|c| match filter.status {
                Some(status) => c.status == status,
                None => true,
            })
            .filter(|c| filter.history || c.status != CaseStatus::Completed)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches
    }

    pub fn get(&self, id: u64) -> Option<Case> {
        self.read().iter().find(|c| c.id == id).cloned()
    }
}
