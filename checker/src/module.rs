// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 SUSE LLC

use core::fmt;

use bitflags::bitflags;

use crate::access::MsrAccess;
use crate::error::CheckError;

/// Outcome of one compliance check. Closed set; only equality is
/// meaningful, there is no severity ordering between variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The control is configured as required.
    Passed,
    /// The control is provably misconfigured.
    Failed,
    /// The state is undecidable from this execution context; the check
    /// under-claims rather than report a failure it cannot prove.
    Warning,
    /// Structural inconsistency, e.g. threads disagreeing on a register
    /// that must be uniform. Distinct from a security failure.
    Error,
    /// The check does not apply on this platform or in this context.
    NotApplicable,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::NotApplicable => "NOT APPLICABLE",
        };
        f.write_str(s)
    }
}

bitflags! {
    /// Platform areas a check belongs to, for filtering at the front-end.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ModuleTags: u8 {
        const BIOS = 1 << 0;
        const SMM = 1 << 1;
    }
}

/// A single compliance check. Implementations are stateless values wired
/// to hardware through the [`MsrAccess`] handle passed into each call.
pub trait CheckModule: Sync {
    /// Short name used for registry lookup and reporting.
    fn name(&self) -> &'static str;

    fn tags(&self) -> ModuleTags;

    /// Probes whether the check applies in the current execution context,
    /// typically with a throwaway register read on a representative
    /// thread. A `false` here means [`run`](Self::run) must not be called.
    fn is_supported(&self, cs: &dyn MsrAccess) -> bool;

    /// Executes the check. Only called after
    /// [`is_supported`](Self::is_supported) returned `true`; an access
    /// failure at this point is unexpected and propagates as an error
    /// rather than being folded into a [`Verdict`].
    fn run(&self, cs: &dyn MsrAccess) -> Result<Verdict, CheckError>;
}

/// Gates and executes one module: unsupported modules terminate as
/// `NotApplicable` without their `run` ever being invoked.
pub fn run_module(module: &dyn CheckModule, cs: &dyn MsrAccess) -> Result<Verdict, CheckError> {
    if !module.is_supported(cs) {
        log::info!("{}: not applicable on this platform", module.name());
        return Ok(Verdict::NotApplicable);
    }
    module.run(cs)
}
