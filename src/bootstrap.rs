// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::{Config, ConfigError, ValidatedConfig};
use crate::runtime_paths::RuntimePaths;
use argon2::password_hash::rand_core::{OsRng, RngCore};
use std::error::Error;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

const SECRET_BYTES: usize = 32;

#[derive(Debug)]
pub struct BootstrapResult {
    pub validated_config: ValidatedConfig,
    pub runtime_paths: RuntimePaths,
    pub created_config: bool,
    pub created_users: bool,
}

#[derive(Debug)]
pub enum BootstrapError {
    Config(ConfigError),
    Io(io::Error),
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::Config(err) => write!(f, "{}", err),
            BootstrapError::Io(err) => write!(f, "Bootstrap I/O error: {}", err),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BootstrapError::Config(err) => Some(err),
            BootstrapError::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for BootstrapError {
    fn from(err: ConfigError) -> Self {
        BootstrapError::Config(err)
    }
}

impl From<io::Error> for BootstrapError {
    fn from(err: io::Error) -> Self {
        BootstrapError::Io(err)
    }
}

/// First-run provisioning: make sure the runtime root holds a usable
/// config.yaml and users.yaml, then validate the configuration. Existing
/// files are never touched.
pub fn bootstrap_runtime(root: &Path) -> Result<BootstrapResult, BootstrapError> {
    if !root.exists() {
        std::fs::create_dir_all(root)?;
        log_action(format!("created runtime directory {}", root.display()));
    }

    let created_config = ensure_config(root)?;
    let validated_config = Config::load_and_validate(root)?;
    let runtime_paths = RuntimePaths::from_root(root)?;
    let created_users = ensure_users(&runtime_paths)?;

    Ok(BootstrapResult {
        validated_config,
        runtime_paths,
        created_config,
        created_users,
    })
}

fn ensure_config(root: &Path) -> Result<bool, BootstrapError> {
    let config_path = root.join("config.yaml");
    if config_path.exists() {
        return Ok(false);
    }

    let secret = generate_secret();
    let contents = default_config_yaml(&secret);

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&config_path)
    {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(BootstrapError::Io(err)),
    };
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;

    log_action(format!(
        "created {} with a freshly generated signing secret",
        config_path.display()
    ));
    Ok(true)
}

fn ensure_users(paths: &RuntimePaths) -> Result<bool, BootstrapError> {
    if paths.users_file.exists() {
        return Ok(false);
    }

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&paths.users_file)
    {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(BootstrapError::Io(err)),
    };
    file.write_all(b"# LexHub user accounts. Managed by the server.\n")?;
    file.sync_all()?;

    log_action(format!("created {}", paths.users_file.display()));
    Ok(true)
}

fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

fn default_config_yaml(secret: &str) -> String {
    format!(
        r#"app:
  name: "LexHub"
  description: "A lightweight legal-services backend"

server:
  host: "127.0.0.1"
  port: 7080
  workers: 4

auth:
  secret: "{secret}"
  token_ttl_minutes: 1440
  algorithm: "hs256"

upload:
  max_file_size_mb: 20

logging:
  level: "info"
"#
    )
}

fn log_action(message: impl AsRef<str>) {
    eprintln!("[bootstrap] {}", message.as_ref());
}
