/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::fmt;

use crate::{
    context::Context,
    metadata::segment_metadata::FindSettings,
    symbols::{processed::NobitsSymProcessed, Symbol},
};

use super::{internal_common::InternalSymDisplSettings, SymCommonDisplaySettings, SymDisplayError};

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SymNobitsDisplaySettings {
    common: SymCommonDisplaySettings,
}

impl Default for SymNobitsDisplaySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl SymNobitsDisplaySettings {
    pub fn new() -> Self {
        Self {
            common: SymCommonDisplaySettings::new(),
        }
    }
}

#[derive(Debug, Copy, Clone, Hash, PartialEq)]
pub struct SymNobitsDisplay<'ctx, 'sym, 'flg> {
    context: &'ctx Context,
    sym: &'sym NobitsSymProcessed,
    settings: &'flg SymNobitsDisplaySettings,
    #[allow(dead_code)]
    internal_settings: InternalSymDisplSettings,
}

impl<'ctx, 'sym, 'flg> SymNobitsDisplay<'ctx, 'sym, 'flg> {
    pub(crate) fn new(
        context: &'ctx Context,
        sym: &'sym NobitsSymProcessed,
        settings: &'flg SymNobitsDisplaySettings,
        internal_settings: InternalSymDisplSettings,
    ) -> Result<Self, SymDisplayError> {
        Ok(Self {
            context,
            sym,
            settings,
            internal_settings,
        })
    }

    pub(crate) fn sym(&self) -> &'sym NobitsSymProcessed {
        self.sym
    }

    pub(crate) fn settings_common(&self) -> &SymCommonDisplaySettings {
        &self.settings.common
    }
}

impl fmt::Display for SymNobitsDisplay<'_, '_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owned_segment = self
            .context
            .find_owned_segment(self.sym.parent_segment_info())?;
        let find_settings = FindSettings::new().with_allow_addend(false);
        let metadata = owned_segment
            .find_symbol(self.sym.vram_range().start(), find_settings)
            .ok_or(fmt::Error)?;

        let name = metadata.display_name();

        write!(f, ".globl {}{}", name, self.settings.common.line_end())?;
        write!(f, "{}:{}", name, self.settings.common.line_end())?;

        self.settings.common.display_asm_comment(
            f,
            None,
            self.sym.vram_range().start(),
            None,
        )?;
        write!(
            f,
            ".space {}{}",
            self.sym.size().inner(),
            self.settings.common.line_end()
        )?;

        Ok(())
    }
}
