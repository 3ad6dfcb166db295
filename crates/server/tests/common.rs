// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// The intake binary with credentials cleared from the environment.
pub fn intake() -> Command {
    let mut cmd = cargo_bin_cmd!("intake");
    cmd.env_remove("INTAKE_ADMIN_USER")
        .env_remove("INTAKE_ADMIN_PASS")
        .env_remove("INTAKE_SECRET_KEY")
        .env_remove("INTAKE_DEBUG");
    cmd
}
