// yb-release: YugabyteDB release packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Version | Options | Inis | Package | Manifest | Name
//! ```

use std::process::ExitCode;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use yb_release::cli::{self, Command};
use yb_release::cmd::config::{run_inis_command, run_options_command};
use yb_release::cmd::manifest::run_manifest_command;
use yb_release::cmd::name::run_name_command;
use yb_release::cmd::package::{PackageOutcome, StdinConfirm, run_package_command};
use yb_release::config::Config;
use yb_release::config::loader::ConfigLoader;
use yb_release::error::Result;
use yb_release::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let config = match &cli.command {
        Some(Command::Version | Command::Inis) | None => None,
        Some(_) => match load_config(&cli) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Failed to load config: {e:#}");
                return ExitCode::FAILURE;
            }
        },
    };

    let log_config = build_log_config(config.as_ref());
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = dispatch_command(&cli, config.as_ref()).await;
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_log_config(config: Option<&Config>) -> LogConfig {
    let global = config.map(|c| c.global.clone()).unwrap_or_default();
    LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(global.log_file)
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: Option<&Config>) -> Result<ExitCode> {
    match (&cli.command, config) {
        (Some(Command::Version), _) => {
            handle_version_command();
            Ok(ExitCode::SUCCESS)
        }
        (Some(Command::Inis), _) => {
            run_inis_command(&build_config_loader(&cli.global).format_loaded_files());
            Ok(ExitCode::SUCCESS)
        }
        (Some(Command::Options), Some(config)) => {
            run_options_command(config);
            Ok(ExitCode::SUCCESS)
        }
        (Some(Command::Manifest(args)), Some(config)) => {
            run_manifest_command(args, config).map(|()| ExitCode::SUCCESS)
        }
        (Some(Command::Name(_)), Some(config)) => {
            run_name_command(config).map(|()| ExitCode::SUCCESS)
        }
        (Some(Command::Package(args)), Some(config)) => {
            let token = cancel_on_ctrl_c();
            let outcome = run_package_command(args, config, token, &mut StdinConfirm).await?;
            Ok(match outcome {
                PackageOutcome::Created(_) => ExitCode::SUCCESS,
                PackageOutcome::Declined => ExitCode::FAILURE,
            })
        }
        (Some(_), None) => Err(anyhow::anyhow!("configuration was not loaded")),
        (None, _) => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    }
}

/// Cancels the returned token on the first Ctrl-C.
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping");
            cancel.cancel();
        }
    });
    token
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &cli::global::GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional("yb-release.toml");
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader.with_env_prefix("YB_RELEASE")
}

fn load_config(cli: &cli::Cli) -> Result<Config> {
    let mut overrides = cli.global.to_config_overrides();
    if let Some(command) = &cli.command {
        overrides.extend(command.to_config_overrides());
    }
    build_config_loader(&cli.global)
        .with_overrides(&overrides)?
        .build()
}
