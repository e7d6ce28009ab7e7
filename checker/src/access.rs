// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 SUSE LLC

use core::fmt;

/// Identifies one logical CPU. Valid ids lie in
/// `[0, MsrAccess::thread_count())` for the accessor in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadId(u32);

impl ThreadId {
    /// The bootstrap processor, used as the representative thread when a
    /// check only needs to probe whether a register is readable at all.
    pub const BSP: Self = Self(0);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised by an [`MsrAccess`] implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// The read faulted or was rejected by the access mechanism. For
    /// registers like `MSR_SMM_FEATURE_CONTROL` this is the expected
    /// outcome on parts that only expose the register in SMM.
    Violation,
    /// No MSR access mechanism is available on this system.
    NoInterface,
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Violation => write!(f, "hardware access violation"),
            Self::NoInterface => write!(f, "no MSR access interface"),
        }
    }
}

/// Read access to per-thread model-specific registers plus the logical CPU
/// topology, abstracted so checks can run against real hardware or a test
/// double. Implementations own any locking or serialization the underlying
/// mechanism needs; callers treat every read as an independent operation.
pub trait MsrAccess {
    /// Reads `msr` on the given logical CPU.
    fn read_msr(&self, msr: u32, thread: ThreadId) -> Result<u64, AccessError>;

    /// Number of logical CPUs visible to this accessor. Stable for the
    /// lifetime of the accessor; checks iterate threads `0..thread_count()`.
    fn thread_count(&self) -> usize;
}
