// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// intake: request intake form with an admin moderation area
#[derive(Parser, Debug)]
#[command(name = "intake")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Request intake form with an admin moderation area")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the request database in the data directory
    InitDb {
        /// Directory holding requests.db
        #[arg(short, long, default_value = ".")]
        data: PathBuf,
    },

    /// Run the web server
    Serve {
        /// Address to bind the server to
        #[arg(short, long, default_value = "127.0.0.1:5000")]
        bind: SocketAddr,

        /// Directory holding requests.db
        #[arg(short, long, default_value = ".")]
        data: PathBuf,

        /// Optional TOML config file (environment variables take precedence)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}
