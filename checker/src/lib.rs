// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 SUSE LLC

//! Platform compliance checks for the SMM call-out mitigation.
//!
//! `SMM_Code_Chk_En` is a bit in `MSR_SMM_FEATURE_CONTROL`. Once set, any
//! CPU that attempts to execute SMM code outside the ranges defined by the
//! SMRRs asserts an unrecoverable MCE, so enabling and locking this bit is
//! an important step in mitigating SMM call-out vulnerabilities. This crate
//! reads the register on every logical CPU and reduces the per-thread
//! findings to a single [`Verdict`](module::Verdict).

pub mod access;
pub mod error;
pub mod module;
pub mod modules;
pub mod registers;

#[cfg(unix)]
pub mod devmsr;

pub use access::{AccessError, MsrAccess, ThreadId};
pub use error::CheckError;
pub use module::{run_module, CheckModule, ModuleTags, Verdict};
