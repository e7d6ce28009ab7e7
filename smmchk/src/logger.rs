// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 SUSE LLC

#[derive(Clone, Copy, Debug)]
struct StderrLogger {
    name: &'static str,
}

impl log::Log for StderrLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Log format/detail depends on the level.
        match record.metadata().level() {
            log::Level::Error | log::Level::Warn => {
                eprintln!(
                    "[{}] {}: {}",
                    self.name,
                    record.metadata().level().as_str(),
                    record.args()
                );
            }

            log::Level::Info => {
                eprintln!("[{}] {}", self.name, record.args());
            }

            log::Level::Debug | log::Level::Trace => {
                eprintln!(
                    "[{}/{}] {} {}",
                    self.name,
                    record.metadata().target(),
                    record.metadata().level().as_str(),
                    record.args()
                );
            }
        };
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger { name: "smmchk" };

pub fn install(verbose: bool) {
    if let Err(e) = log::set_logger(&LOGGER) {
        // Presumably something installed another logger first; output
        // still goes wherever that logger sends it.
        eprintln!("[{}] ERROR: failed to install logger: {:?}", LOGGER.name, e);
    }

    log::set_max_level(if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });
}
