// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 SUSE LLC

use crate::module::CheckModule;

pub mod smm_code_chk;

pub use smm_code_chk::SmmCodeChk;

static SMM_CODE_CHK: SmmCodeChk = SmmCodeChk::new();

/// All built-in compliance checks, in the order the front-end runs them.
pub static MODULES: &[&dyn CheckModule] = &[&SMM_CODE_CHK];

pub fn find_module(name: &str) -> Option<&'static dyn CheckModule> {
    MODULES.iter().find(|m| m.name() == name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ModuleTags;

    #[test]
    fn test_registry_lookup() {
        let module = find_module("smm_code_chk").unwrap();
        assert_eq!(module.name(), "smm_code_chk");
        assert!(module.tags().contains(ModuleTags::BIOS | ModuleTags::SMM));
        assert!(find_module("no_such_module").is_none());
    }
}
