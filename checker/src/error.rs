// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 SUSE LLC

use core::fmt;

use crate::access::AccessError;

// Functions private to a module may use the leaf error types. Public
// functions return a CheckError containing a leaf error type, with a From
// conversion provided at the module level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckError {
    /// A register became unreadable after the module's applicability probe
    /// had already succeeded. Never produced by the probe itself, which
    /// maps inaccessibility to `Verdict::NotApplicable` instead.
    Access(AccessError),
}

impl From<AccessError> for CheckError {
    fn from(err: AccessError) -> Self {
        Self::Access(err)
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Access(e) => write!(f, "register access failed mid-check: {e}"),
        }
    }
}

impl std::error::Error for CheckError {}
