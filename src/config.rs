// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_app_description")]
    pub description: String,
}

fn default_app_name() -> String {
    "LexHub".to_string()
}

fn default_app_description() -> String {
    "A lightweight legal-services backend".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            name: default_app_name(),
            description: default_app_description(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    7080
}

fn default_workers() -> usize {
    4
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl ServerConfig {
    pub fn address_tuple(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

/// Raw auth section as it appears in config.yaml. Validation turns the
/// algorithm name into a concrete [`Algorithm`] and rejects a missing
/// secret before the server is allowed to start.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub secret: String,
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

pub fn default_token_ttl_minutes() -> i64 {
    60 * 24
}

fn default_algorithm() -> String {
    "hs256".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UploadConfig {
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_max_file_size_mb() -> u64 {
    20
}

fn default_allowed_extensions() -> Vec<String> {
    [
        "pdf", "doc", "docx", "txt", "rtf", "odt", "xls", "xlsx", "csv", "jpg", "jpeg", "png",
        "gif", "webp", "zip",
    ]
    .iter()
    .map(|ext| ext.to_string())
    .collect()
}

impl Default for UploadConfig {
    fn default() -> Self {
        UploadConfig {
            max_file_size_mb: default_max_file_size_mb(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl UploadConfig {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }

    pub fn extension_allowed(&self, filename: &str) -> bool {
        let extension = match filename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
            _ => return false,
        };
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration after startup validation. The auth parameters here are
/// injected into the JWT service at construction; nothing reads them from
/// ambient global state.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub auth: AuthParams,
    pub upload: UploadConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct AuthParams {
    pub secret: String,
    pub token_ttl_minutes: i64,
    pub algorithm: Algorithm,
}

fn parse_algorithm(name: &str) -> Result<Algorithm, ConfigError> {
    match name.to_ascii_lowercase().as_str() {
        "hs256" => Ok(Algorithm::HS256),
        "hs384" => Ok(Algorithm::HS384),
        "hs512" => Ok(Algorithm::HS512),
        other => Err(ConfigError::ValidationError(format!(
            "Unsupported signing algorithm '{}'; expected hs256, hs384 or hs512",
            other
        ))),
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join("config.yaml");
        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        let config: Config = serde_yaml::from_str(&config_content).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to parse config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Loads and validates configuration at startup. If validation fails,
    /// the application must not start.
    pub fn load_and_validate(root: &Path) -> Result<ValidatedConfig, ConfigError> {
        let config = Self::load(root)?;
        config.validate()
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if self.auth.secret.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Auth secret must not be empty".to_string(),
            ));
        }
        if self.auth.token_ttl_minutes < 1 {
            return Err(ConfigError::ValidationError(format!(
                "Token TTL must be at least 1 minute, got: {}",
                self.auth.token_ttl_minutes
            )));
        }
        let algorithm = parse_algorithm(&self.auth.algorithm)?;

        if self.server.workers == 0 {
            return Err(ConfigError::ValidationError(
                "Server workers must be at least 1".to_string(),
            ));
        }

        Ok(ValidatedConfig {
            app: self.app,
            server: self.server,
            auth: AuthParams {
                secret: self.auth.secret,
                token_ttl_minutes: self.auth.token_ttl_minutes,
                algorithm,
            },
            upload: self.upload,
            logging: self.logging,
        })
    }
}

/// Ready-made auth parameters for unit tests.
pub fn test_auth_params() -> AuthParams {
    AuthParams {
        secret: "test-secret-key".to_string(),
        token_ttl_minutes: default_token_ttl_minutes(),
        algorithm: Algorithm::HS256,
    }
}
