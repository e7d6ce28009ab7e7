// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 SUSE LLC

//! Checks that `SMM_Code_Chk_En` is set and locked on every logical CPU.

use crate::access::{MsrAccess, ThreadId};
use crate::error::CheckError;
use crate::module::{CheckModule, ModuleTags, Verdict};
use crate::registers::{SmmFeatureControl, MSR_SMM_FEATURE_CONTROL};

#[derive(Clone, Copy, Debug)]
pub struct SmmCodeChk {
    /// Thread used for the applicability probe. The probe value is
    /// discarded; the full check re-reads every thread including this one.
    probe_thread: ThreadId,
}

impl SmmCodeChk {
    pub const fn new() -> Self {
        Self {
            probe_thread: ThreadId::BSP,
        }
    }

    pub const fn with_probe_thread(probe_thread: ThreadId) -> Self {
        Self { probe_thread }
    }

    fn check_thread(&self, cs: &dyn MsrAccess, thread: ThreadId) -> Result<Verdict, CheckError> {
        let raw = cs.read_msr(MSR_SMM_FEATURE_CONTROL, thread)?;
        let reg = SmmFeatureControl::from(raw);

        reg.log_decoded(thread);

        let verdict = if reg.smm_code_chk_en() {
            if reg.lock() {
                Verdict::Passed
            } else {
                Verdict::Failed
            }
        } else {
            // MSR_SMM_MCA_CAP, the register that reports enhanced SMM
            // capabilities, can only be read from SMM. There is no way to
            // tell from here whether the CPU lacks SMM_Code_Chk_En or the
            // BIOS forgot to enable it, so this branch never claims a
            // provable failure. Either way nothing prevents SMM code from
            // executing outside the SMRR ranges.
            Verdict::Warning
        };

        Ok(verdict)
    }

    fn check_all_threads(&self, cs: &dyn MsrAccess) -> Result<Verdict, CheckError> {
        let mut results = Vec::with_capacity(cs.thread_count());
        for tid in 0..cs.thread_count() {
            results.push(self.check_thread(cs, ThreadId::new(tid as u32))?);
        }

        // MSR_SMM_FEATURE_CONTROL must have the same value on all CPUs.
        // On disagreement the finding is the inconsistency itself; no
        // majority vote over the per-thread results.
        let Some((&first, rest)) = results.split_first() else {
            log::error!("no logical CPUs reported by the platform");
            return Ok(Verdict::Error);
        };
        if rest.iter().any(|r| *r != first) {
            log::error!("MSR_SMM_FEATURE_CONTROL does not have the same value across all CPUs");
            return Ok(Verdict::Error);
        }

        match first {
            Verdict::Failed => {
                log::error!("SMM_Code_Chk_En is enabled but not locked down");
            }
            Verdict::Warning => {
                log::warn!(
                    "SMM_Code_Chk_En is not enabled. This can happen either because \
                     the feature is not supported by the CPU or because the BIOS \
                     forgot to enable it. Consult the Intel SDM to determine whether \
                     this CPU supports SMM_Code_Chk_En."
                );
            }
            _ => {
                log::info!("SMM_Code_Chk_En is enabled and locked down");
            }
        }

        Ok(first)
    }
}

impl Default for SmmCodeChk {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckModule for SmmCodeChk {
    fn name(&self) -> &'static str {
        "smm_code_chk"
    }

    fn tags(&self) -> ModuleTags {
        ModuleTags::BIOS.union(ModuleTags::SMM)
    }

    fn is_supported(&self, cs: &dyn MsrAccess) -> bool {
        // The SDM says MSR_SMM_FEATURE_CONTROL is only accessible from
        // SMM, but in reality many platforms allow the read. Verify the
        // read works before moving on; the value itself is discarded.
        cs.read_msr(MSR_SMM_FEATURE_CONTROL, self.probe_thread)
            .is_ok()
    }

    fn run(&self, cs: &dyn MsrAccess) -> Result<Verdict, CheckError> {
        log::info!("SMM_Code_Chk_En (SMM Call-Out) Protection");
        self.check_all_threads(cs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::AccessError;
    use crate::module::run_module;
    use std::cell::Cell;

    // CODE_CHK_EN is bit 2, LOCK is bit 0.
    const EN_LOCKED: u64 = 0b101;
    const EN_UNLOCKED: u64 = 0b100;
    const DIS_UNLOCKED: u64 = 0b000;
    const DIS_LOCKED: u64 = 0b001;

    struct FakeMsr {
        values: Vec<Result<u64, AccessError>>,
        reads: Cell<usize>,
    }

    impl FakeMsr {
        fn per_thread(values: &[Result<u64, AccessError>]) -> Self {
            Self {
                values: values.to_vec(),
                reads: Cell::new(0),
            }
        }

        fn uniform(threads: usize, raw: u64) -> Self {
            Self::per_thread(&vec![Ok(raw); threads])
        }
    }

    impl MsrAccess for FakeMsr {
        fn read_msr(&self, msr: u32, thread: ThreadId) -> Result<u64, AccessError> {
            assert_eq!(msr, MSR_SMM_FEATURE_CONTROL);
            self.reads.set(self.reads.get() + 1);
            self.values
                .get(thread.index() as usize)
                .copied()
                .unwrap_or(Err(AccessError::Violation))
        }

        fn thread_count(&self) -> usize {
            self.values.len()
        }
    }

    #[test]
    fn test_decision_table() {
        let module = SmmCodeChk::new();
        let cases = [
            (EN_LOCKED, Verdict::Passed),
            (EN_UNLOCKED, Verdict::Failed),
            (DIS_UNLOCKED, Verdict::Warning),
            (DIS_LOCKED, Verdict::Warning),
        ];
        for (raw, expected) in cases {
            let cs = FakeMsr::uniform(1, raw);
            assert_eq!(module.check_thread(&cs, ThreadId::BSP).unwrap(), expected);
        }
    }

    #[test]
    fn test_all_threads_enabled_and_locked() {
        let cs = FakeMsr::uniform(4, EN_LOCKED);
        assert_eq!(run_module(&SmmCodeChk::new(), &cs).unwrap(), Verdict::Passed);
    }

    #[test]
    fn test_all_threads_enabled_not_locked() {
        let cs = FakeMsr::uniform(4, EN_UNLOCKED);
        assert_eq!(run_module(&SmmCodeChk::new(), &cs).unwrap(), Verdict::Failed);
    }

    #[test]
    fn test_mismatch_across_threads() {
        let cs = FakeMsr::per_thread(&[Ok(EN_LOCKED), Ok(EN_UNLOCKED)]);
        assert_eq!(run_module(&SmmCodeChk::new(), &cs).unwrap(), Verdict::Error);
    }

    #[test]
    fn test_single_dissenting_thread() {
        let cs = FakeMsr::per_thread(&[
            Ok(EN_LOCKED),
            Ok(EN_LOCKED),
            Ok(DIS_UNLOCKED),
            Ok(EN_LOCKED),
        ]);
        assert_eq!(run_module(&SmmCodeChk::new(), &cs).unwrap(), Verdict::Error);
    }

    #[test]
    fn test_single_thread_warning() {
        let cs = FakeMsr::uniform(1, DIS_UNLOCKED);
        assert_eq!(run_module(&SmmCodeChk::new(), &cs).unwrap(), Verdict::Warning);
    }

    #[test]
    fn test_probe_failure_is_not_applicable() {
        let cs = FakeMsr::per_thread(&[Err(AccessError::Violation), Ok(EN_LOCKED)]);
        assert_eq!(
            run_module(&SmmCodeChk::new(), &cs).unwrap(),
            Verdict::NotApplicable
        );
        // Only the probe read was attempted; no per-thread evaluation ran.
        assert_eq!(cs.reads.get(), 1);
    }

    #[test]
    fn test_probe_rereads_thread_zero() {
        let cs = FakeMsr::uniform(4, EN_LOCKED);
        run_module(&SmmCodeChk::new(), &cs).unwrap();
        // One probe read plus one evaluation read per thread.
        assert_eq!(cs.reads.get(), 5);
    }

    #[test]
    fn test_late_access_failure_propagates() {
        let cs = FakeMsr::per_thread(&[Ok(EN_LOCKED), Err(AccessError::Violation)]);
        let res = run_module(&SmmCodeChk::new(), &cs);
        assert_eq!(res, Err(CheckError::Access(AccessError::Violation)));
    }

    #[test]
    fn test_repeated_runs_are_stable() {
        let cs = FakeMsr::uniform(2, EN_UNLOCKED);
        let first = run_module(&SmmCodeChk::new(), &cs).unwrap();
        let second = run_module(&SmmCodeChk::new(), &cs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_configurable_probe_thread() {
        let module = SmmCodeChk::with_probe_thread(ThreadId::new(1));
        let cs = FakeMsr::per_thread(&[Ok(EN_LOCKED), Err(AccessError::Violation)]);
        assert!(!module.is_supported(&cs));
    }
}
