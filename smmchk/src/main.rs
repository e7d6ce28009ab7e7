// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 SUSE LLC

use std::error::Error;
use std::process;

use clap::Parser;
use cmd_options::CmdOptions;
use smmcheck::devmsr::DevMsr;
use smmcheck::modules;
use smmcheck::{run_module, CheckModule, MsrAccess, Verdict};

mod cmd_options;
mod logger;

fn main() -> Result<(), Box<dyn Error>> {
    let options = CmdOptions::parse();

    if options.list {
        list_modules();
        return Ok(());
    }

    logger::install(options.verbose);

    let cs = DevMsr::probe().map_err(|e| {
        format!("{e}: load the msr kernel module and run as root")
    })?;
    log::debug!("{} logical CPUs", cs.thread_count());

    let selected: Vec<&dyn CheckModule> = match &options.module {
        Some(name) => {
            let module = modules::find_module(name)
                .ok_or_else(|| format!("unknown module '{name}'"))?;
            vec![module]
        }
        None => modules::MODULES.to_vec(),
    };

    let mut failed = false;
    for module in selected {
        let verdict = run_module(module, &cs)?;
        println!("{}: {}", module.name(), verdict);
        if matches!(verdict, Verdict::Failed | Verdict::Error) {
            failed = true;
        }
    }

    if failed {
        process::exit(1);
    }
    Ok(())
}

fn list_modules() {
    for module in modules::MODULES {
        println!("{:<24} {:?}", module.name(), module.tags());
    }
}
