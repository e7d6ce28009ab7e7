// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 SUSE LLC

use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Checks SMM call-out lockdown compliance on every logical CPU")]
pub struct CmdOptions {
    /// The name of a single check module to run. All registered modules
    /// run when this is omitted.
    #[arg()]
    pub module: Option<String>,

    /// Print verbose output, including low-level access detail
    #[arg(short, long)]
    pub verbose: bool,

    /// List the registered check modules and their tags, then exit
    #[arg(short, long)]
    pub list: bool,
}
