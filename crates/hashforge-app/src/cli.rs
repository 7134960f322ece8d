// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hashforge_core::types::PersonalRecordInput;

/// Private age-eligibility registry: stores salted digests, never PII.
#[derive(Parser)]
#[command(name = "hashforge", version, about)]
pub struct Cli {
    /// JSON configuration file.
    #[arg(long, env = "HASHFORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Record database, overriding the configuration file.
    #[arg(long, env = "HASHFORGE_DATABASE")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register one person.
    Register(PersonArgs),
    /// Look one person up.
    Verify(PersonArgs),
    /// Register every row of a CSV file.
    Import { csv: PathBuf },
    /// Verify every row of a CSV file.
    Check { csv: PathBuf },
    /// List stored rows (digests, salts, flags, initials).
    List,
    /// Write a configuration file with default settings.
    InitConfig { path: PathBuf },
    /// Interactive menu (the default).
    Menu,
}

/// The five identifying fields.
#[derive(Args)]
pub struct PersonArgs {
    #[arg(long)]
    pub first: String,
    #[arg(long)]
    pub middle: Option<String>,
    #[arg(long)]
    pub last: String,
    /// Date of birth, MM-DD-YYYY.
    #[arg(long)]
    pub dob: String,
    #[arg(long)]
    pub address: String,
}

impl From<PersonArgs> for PersonalRecordInput {
    fn from(args: PersonArgs) -> Self {
        Self {
            first_name: args.first,
            middle_initial: args.middle,
            last_name: args.last,
            dob: args.dob,
            address: args.address,
        }
    }
}
