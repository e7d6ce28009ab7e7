// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 SUSE LLC

//! MSR access through the Linux `msr` driver (`/dev/cpu/<n>/msr`).

use std::fs::{self, File};
use std::io::ErrorKind;
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};

use crate::access::{AccessError, MsrAccess, ThreadId};

const DEV_CPU: &str = "/dev/cpu";

/// Reads MSRs through the per-CPU device nodes exposed by the `msr`
/// kernel module. Requires root; the driver rejects reads of registers
/// the CPU faults on, which surfaces as [`AccessError::Violation`].
#[derive(Debug)]
pub struct DevMsr {
    threads: usize,
}

impl DevMsr {
    /// Enumerates the logical CPUs under `/dev/cpu`. The count is fixed
    /// for the lifetime of the accessor; topology changes while a check
    /// is running are not supported.
    pub fn probe() -> Result<Self, AccessError> {
        let entries = fs::read_dir(DEV_CPU).map_err(|e| {
            log::debug!("cannot enumerate {}: {}", DEV_CPU, e);
            AccessError::NoInterface
        })?;

        let threads = entries
            .flatten()
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .is_some_and(|n| n.parse::<u32>().is_ok())
            })
            .count();

        if threads == 0 {
            return Err(AccessError::NoInterface);
        }

        Ok(Self { threads })
    }

    fn msr_node(thread: ThreadId) -> PathBuf {
        Path::new(DEV_CPU)
            .join(thread.index().to_string())
            .join("msr")
    }
}

impl MsrAccess for DevMsr {
    fn read_msr(&self, msr: u32, thread: ThreadId) -> Result<u64, AccessError> {
        let path = Self::msr_node(thread);

        let file = File::open(&path).map_err(|e| {
            log::debug!("cpu{}: cannot open {}: {}", thread, path.display(), e);
            match e.kind() {
                ErrorKind::NotFound => AccessError::NoInterface,
                _ => AccessError::Violation,
            }
        })?;

        // The msr driver maps the register address to the file offset and
        // returns EIO for registers the CPU refuses to read.
        let mut buf = [0u8; 8];
        file.read_exact_at(&mut buf, u64::from(msr)).map_err(|e| {
            log::debug!("cpu{}: rdmsr 0x{:x} failed: {}", thread, msr, e);
            AccessError::Violation
        })?;

        Ok(u64::from_le_bytes(buf))
    }

    fn thread_count(&self) -> usize {
        self.threads
    }
}
