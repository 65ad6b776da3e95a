// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::types::{Contract, LawArticle};
use crate::storage::{StorageError, read_yaml_file, write_yaml_file};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::RwLock;

pub const LAW_RESULT_LIMIT: usize = 50;

pub const CONTRACT_STATUS_DRAFT: &str = "draft";

#[derive(Debug, Clone)]
pub struct NewContract {
    pub title: String,
    pub description: Option<String>,
    pub file_id: Option<String>,
}

/// Contracts a user is drafting, optionally linked to an uploaded file.
pub struct ContractStore {
    path: PathBuf,
    contracts: RwLock<Vec<Contract>>,
}

impl ContractStore {
    pub fn open(path: PathBuf) -> Result<Self, StorageError> {
        let contracts: Vec<Contract> = read_yaml_file(&path, "contracts")?.unwrap_or_default();
        Ok(ContractStore {
            path,
            contracts: RwLock::new(contracts),
        })
    }

    pub fn create(&self, user_id: u64, new: NewContract) -> Result<Contract, StorageError> {
        if new.title.trim().is_empty() {
            return Err(StorageError::new("Contract title is required"));
        }

        let mut contracts = self
            .contracts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let next_id = contracts.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let contract = Contract {
            id: next_id,
            user_id,
            file_id: new.file_id,
            title: new.title,
            description: new.description,
            status: CONTRACT_STATUS_DRAFT.to_string(),
            created_at: Utc::now(),
        };

        let mut updated = contracts.clone();
        updated.push(contract.clone());
        write_yaml_file(&self.path, "contracts", &updated)?;
        *contracts = updated;
        Ok(contract)
    }

    /// The user's contracts, newest first, optionally narrowed by a
    /// keyword over title and description, and by status.
    pub fn list_for_user(
        &self,
        user_id: u64,
        keyword: Option<&str>,
        status: Option<&str>,
    ) -> Vec<Contract> {
        let keyword = keyword.map(|k| k.to_lowercase());
        let mut matches: Vec<Contract> = self
            .contracts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|c| c.user_id == user_id)
            .filter(|c| match &keyword {
                Some(k) => {
                    c.title.to_lowercase().contains(k)
                        || c.description
                            .as_ref()
                            .is_some_and(|d| d.to_lowercase().contains(k))
                }
                None => true,
            })
            .filter(|c| match status {
                Some(s) => c.status == s,
                None => true,
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches
    }
}

/// The statute reference corpus. Loaded once at startup and never written
/// by the server; the file is provisioned alongside the config.
pub struct LawStore {
    articles: Vec<LawArticle>,
}

impl LawStore {
    pub fn open(path: PathBuf) -> Result<Self, StorageError> {
        let articles: Vec<LawArticle> = read_yaml_file(&path, "laws")?.unwrap_or_default();
        log::info!("Loaded {} law articles", articles.len());
        Ok(LawStore { articles })
    }

    #[cfg(test)]
    pub fn from_articles(articles: Vec<LawArticle>) -> Self {
        LawStore { articles }
    }

    /// Search the corpus by statute name and a free-text keyword over the
    /// article content. Results are capped, not paginated.
    pub fn search(&self, law_name: Option<&str>, keyword: Option<&str>) -> Vec<LawArticle> {
        let law_name = law_name.map(|n| n.to_lowercase());
        let keyword = keyword.map(|k| k.to_lowercase());
        self.articles
            .iter()
            .filter(|a| match &law_name {
                Some(n) => a.law_name.to_lowercase().contains(n),
                None => true,
            })
            .filter(|a| match &keyword {
                Some(k) => {
                    a.content.to_lowercase().contains(k)
                        || a.article_no
                            .as_deref()
                            .is_some_and(|no| no.to_lowercase().contains(k))
                }
                None => true,
            })
            .take(LAW_RESULT_LIMIT)
            .cloned()
            .collect()
    }
}
