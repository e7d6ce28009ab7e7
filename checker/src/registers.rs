// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 SUSE LLC

use bitfield_struct::bitfield;

use crate::access::ThreadId;

/// Per-thread SMM feature control register. The Intel SDM states it can
/// only be accessed while the CPU executes in SMM, but many parts allow
/// reads from outside SMM as well; checks must probe before relying on it.
pub const MSR_SMM_FEATURE_CONTROL: u32 = 0x4E0;

#[bitfield(u64)]
#[derive(PartialEq, Eq)]
pub struct SmmFeatureControl {
    /// Locks the register against further writes until platform reset
    pub lock: bool,
    /// Reserved
    pub rsvd1: bool,
    /// SMM code check enable; when set, SMM code fetches outside the
    /// SMRR ranges assert an unrecoverable MCE
    pub smm_code_chk_en: bool,
    #[bits(61)]
    rsvd: u64,
}

impl SmmFeatureControl {
    /// Logs the raw value and the named fields for one logical CPU.
    /// Interpretation of the fields is left to the calling check.
    pub fn log_decoded(self, thread: ThreadId) {
        log::info!(
            "cpu{}: MSR_SMM_FEATURE_CONTROL = 0x{:016x}",
            thread,
            u64::from(self)
        );
        log::info!("    [00] LOCK            = {}", self.lock() as u8);
        log::info!("    [02] SMM_CODE_CHK_EN = {}", self.smm_code_chk_en() as u8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_patterns() {
        let reg = SmmFeatureControl::from(0b101u64);
        assert!(reg.lock());
        assert!(reg.smm_code_chk_en());

        let reg = SmmFeatureControl::from(0b100u64);
        assert!(!reg.lock());
        assert!(reg.smm_code_chk_en());

        let reg = SmmFeatureControl::from(0u64);
        assert!(!reg.lock());
        assert!(!reg.smm_code_chk_en());

        // Reserved bits do not leak into the named fields.
        let reg = SmmFeatureControl::from(!0b101u64);
        assert!(!reg.lock());
        assert!(!reg.smm_code_chk_en());
    }

    #[test]
    fn test_roundtrip() {
        let reg = SmmFeatureControl::new().with_lock(true).with_smm_code_chk_en(true);
        assert_eq!(u64::from(reg), 0b101);
    }
}
