// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HashForge — private age-eligibility registry.
//
// Entry point. Initialises logging, resolves configuration, opens the
// registry for the session, and dispatches the chosen subcommand.

mod cli;
mod commands;
mod csv_input;
mod menu;
mod settings;

use std::process::ExitCode;

use clap::Parser;
use hashforge_core::HashForgeConfig;
use hashforge_core::error::Result;
use hashforge_registry::Registry;

use cli::{Cli, Command};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let operation = operation_name(cli.command.as_ref());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            commands::report_error(operation, &e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(Command::InitConfig { path }) = &cli.command {
        HashForgeConfig::default().save(path)?;
        println!("Configuration saved to {}", path.display());
        return Ok(());
    }

    let config = settings::resolve(&cli)?;
    let registry = Registry::open(&config)?;
    tracing::info!("HashForge session started");

    match cli.command.unwrap_or(Command::Menu) {
        Command::Register(person) => commands::register_one(&registry, &person.into()),
        Command::Verify(person) => commands::verify_one(&registry, &person.into()),
        Command::Import { csv } => commands::import_csv(&registry, &csv),
        Command::Check { csv } => commands::check_csv(&registry, &csv),
        Command::List => commands::list_records(&registry),
        Command::Menu => {
            menu::run(&registry);
            Ok(())
        }
        Command::InitConfig { .. } => Ok(()),
    }
}

fn operation_name(command: Option<&Command>) -> &'static str {
    match command {
        Some(Command::Register(_)) => "Registration",
        Some(Command::Verify(_)) => "Verification",
        Some(Command::Import { .. }) => "CSV import",
        Some(Command::Check { .. }) => "CSV verification",
        Some(Command::List) => "Database listing",
        Some(Command::InitConfig { .. }) => "Writing configuration",
        Some(Command::Menu) | None => "HashForge",
    }
}
