/* SPDX-FileCopyrightText: © 2024-2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::fmt;

use rabbitizer::{DisplayFlags, Instruction};

use crate::{
    context::Context,
    metadata::segment_metadata::FindSettings,
    symbols::{processed::FunctionSymProcessed, Symbol},
};

use super::{internal_common::InternalSymDisplSettings, SymCommonDisplaySettings};

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FunctionDisplaySettings {
    display_flags: DisplayFlags,
    common: SymCommonDisplaySettings,
    _gp_rel_hack: bool,
}

impl FunctionDisplaySettings {
    pub fn new(display_flags: DisplayFlags) -> Self {
        Self {
            display_flags,
            common: SymCommonDisplaySettings::new(),
            _gp_rel_hack: false,
        }
    }

    pub(crate) fn line_end(&self) -> &str {
        self.common.line_end()
    }
}

#[derive(Debug, Copy, Clone, Hash, PartialEq)]
pub struct FunctionDisplay<'ctx, 'sym, 'flg> {
    context: &'ctx Context,
    sym: &'sym FunctionSymProcessed,
    settings: &'flg FunctionDisplaySettings,
    #[allow(dead_code)]
    internal_settings: InternalSymDisplSettings,
}

impl<'ctx, 'sym, 'flg> FunctionDisplay<'ctx, 'sym, 'flg> {
    pub(crate) fn new(
        context: &'ctx Context,
        sym: &'sym FunctionSymProcessed,
        settings: &'flg FunctionDisplaySettings,
        internal_settings: InternalSymDisplSettings,
    ) -> Result<Self, super::SymDisplayError> {
        Ok(Self {
            context,
            sym,
            settings,
            internal_settings,
        })
    }

    pub(crate) fn sym(&self) -> &'sym FunctionSymProcessed {
        self.sym
    }

    pub(crate) fn settings_common(&self) -> &SymCommonDisplaySettings {
        &self.settings.common
    }
}

impl FunctionDisplay<'_, '_, '_> {
    fn display_label(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }

    fn display_instruction(
        &self,
        f: &mut fmt::Formatter<'_>,
        instr: &Instruction,
        prev_instr_had_delay_slot: bool,
    ) -> fmt::Result {
        // TODO: imm_override
        let imm_override = None;

        if prev_instr_had_delay_slot {
            write!(f, " ")?;
        }

        write!(
            f,
            "{}{}",
            instr.display(imm_override, &self.settings.display_flags),
            self.settings.line_end()
        )
    }
}

impl<'ctx, 'sym, 'flg> fmt::Display for FunctionDisplay<'ctx, 'sym, 'flg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owned_segment = self
            .context
            .find_owned_segment(self.sym.parent_segment_info())?;
        let find_settings = FindSettings::new().with_allow_addend(false);
        let metadata = owned_segment
            .find_symbol(self.sym.vram_range().start(), find_settings)
            .ok_or(fmt::Error)?;

        let name = metadata.display_name();
        write!(f, ".globl {}{}", name, self.settings.line_end())?;

        write!(f, "{}:{}", name, self.settings.line_end())?;

        let mut prev_instr_had_delay_slot = false;
        for instr in self.sym.instructions() {
            self.display_label(f)?;
            self.display_instruction(f, instr, prev_instr_had_delay_slot)?;

            prev_instr_had_delay_slot = instr.opcode().has_delay_slot();
        }

        write!(f, ".end {}{}", name, self.settings.line_end())
    }
}
