// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::rt::System;
use actix_web::web::Data;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{LevelFilter, info};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use lexhub::api;
use lexhub::bootstrap::{self, BootstrapResult};
use lexhub::domain::cases::CaseStore;
use lexhub::domain::feedback::FeedbackStore;
use lexhub::domain::files::FileStore;
use lexhub::domain::lawyers::LawyerStore;
use lexhub::domain::reference::{ContractStore, LawStore};
use lexhub::iam::auth::AuthService;
use lexhub::iam::jwt::JwtService;
use lexhub::iam::middleware::BearerAuthMiddlewareFactory;
use lexhub::iam::service::IamService;
use lexhub::iam::store::FileUserStore;

struct ParsedArgs {
    runtime_root: PathBuf,
    show_help: bool,
}

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let parsed_args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("Invalid command line arguments: {}", error);
            eprintln!("Use -C <root> to set the runtime directory.");
            return 1;
        }
    };

    if parsed_args.show_help {
        print!("{}", help_text());
        return 0;
    }

    let bootstrap = match bootstrap::bootstrap_runtime(&parsed_args.runtime_root) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("Bootstrap error: {}", error);
            eprintln!("Application cannot start with invalid configuration.");
            return 1;
        }
    };

    match System::new().block_on(run_server(bootstrap)) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("Server failed to start: {}", error);
            1
        }
    }
}

fn parse_args() -> Result<ParsedArgs, String> {
    let mut runtime_root = PathBuf::from(".");
    let mut show_help = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-C" => {
                let value = args
                    .next()
                    .ok_or_else(|| "-C requires a directory".to_string())?;
                runtime_root = PathBuf::from(value);
            }
            "-h" | "--help" => show_help = true,
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(ParsedArgs {
        runtime_root,
        show_help,
    })
}

fn help_text() -> String {
    [
        "LexHub - a lightweight legal-services backend",
        "",
        "Usage: lexhub [-C <root>]",
        "",
        "  -C <root>   Runtime directory (config.yaml, users.yaml, state/).",
        "              Defaults to the current directory.",
        "  -h, --help  Show this help.",
        "",
    ]
    .join("\n")
}

fn init_logging(level: &str) {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

async fn run_server(bootstrap: BootstrapResult) -> std::io::Result<()> {
    let validated_config = bootstrap.validated_config;
    let runtime_paths = bootstrap.runtime_paths;

    init_logging(&validated_config.logging.level);
    info!(
        "Starting {} from {}",
        validated_config.app.name,
        runtime_paths.root.display()
    );

    let jwt_service =
        Arc::new(JwtService::new(&validated_config.auth).map_err(std::io::Error::other)?);
    let user_store = Arc::new(FileUserStore::new(runtime_paths.users_file.clone()));
    let iam_service = IamService::new(user_store).map_err(std::io::Error::other)?;
    let auth_service =
        AuthService::new(iam_service, jwt_service).map_err(std::io::Error::other)?;

    let case_store = Data::new(
        CaseStore::open(runtime_paths.state_file("cases.yaml")).map_err(std::io::Error::other)?,
    );
    let file_store = Data::new(
        FileStore::open(
            runtime_paths.state_file("files.yaml"),
            runtime_paths.uploads_dir.clone(),
        )
        .map_err(std::io::Error::other)?,
    );
    let feedback_store = Data::new(
        FeedbackStore::open(runtime_paths.state_file("feedback.yaml"))
            .map_err(std::io::Error::other)?,
    );
    let lawyer_store = Data::new(
        LawyerStore::open(runtime_paths.state_file("lawyers.yaml"))
            .map_err(std::io::Error::other)?,
    );
    let contract_store = Data::new(
        ContractStore::open(runtime_paths.state_file("contracts.yaml"))
            .map_err(std::io::Error::other)?,
    );
    let law_store = Data::new(
        LawStore::open(runtime_paths.state_file("laws.yaml")).map_err(std::io::Error::other)?,
    );

    let auth_data = Data::new(auth_service);
    let config_data = Data::new(validated_config.clone());
    let payload_limit = validated_config.upload.max_file_size_bytes() as usize;

    let bind_address = validated_config.server.address_tuple();
    info!(
        "Listening on {}:{} with {} workers",
        bind_address.0, bind_address.1, validated_config.server.workers
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(BearerAuthMiddlewareFactory)
            .app_data(web::PayloadConfig::new(payload_limit))
            .app_data(auth_data.clone())
            .app_data(config_data.clone())
            .app_data(case_store.clone())
            .app_data(file_store.clone())
            .app_data(feedback_store.clone())
            .app_data(lawyer_store.clone())
            .app_data(contract_store.clone())
            .app_data(law_store.clone())
            .configure(api::configure)
    })
    .workers(validated_config.server.workers)
    .bind(bind_address)?
    .run()
    .await
}
