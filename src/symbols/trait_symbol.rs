/* SPDX-FileCopyrightText: © 2024-2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::collections::btree_map::BTreeMap;
use rabbitizer::Vram;

use crate::{
    addresses::{AddressRange, Rom, RomVramRange, Size},
    context::Context,
    parent_segment_info::ParentSegmentInfo,
    relocation::RelocationInfo,
    section_type::SectionType,
    symbols::{SymbolPostProcessError, SymbolProcessed},
};

pub trait Symbol {
    #[must_use]
    fn vram_range(&self) -> &AddressRange<Vram>;

    #[must_use]
    fn size(&self) -> Size {
        self.vram_range().size()
    }

    #[must_use]
    fn parent_segment_info(&self) -> &ParentSegmentInfo;

    #[must_use]
    fn section_type(&self) -> SectionType;
}

pub trait RomSymbol: Symbol {
    #[must_use]
    fn rom_vram_range(&self) -> &RomVramRange;

    #[must_use]
    fn rom_range(&self) -> &AddressRange<Rom> {
        self.rom_vram_range().rom()
    }

    #[must_use]
    fn rom_size(&self) -> Size {
        self.rom_range().size()
    }
}

/// A symbol that hasn't gone through the post-processing step yet.
pub trait SymbolPreprocessed: Symbol {
    type Output: SymbolProcessed;

    #[doc(hidden)]
    fn post_process(
        self,
        context: &mut Context,
        user_relocs: &BTreeMap<Rom, RelocationInfo>,
    ) -> Result<Self::Output, SymbolPostProcessError>;
}

pub trait RomSymbolPreprocessed: RomSymbol {}

/// A symbol that has already gone through the post-processing step.
pub trait SymbolProcessed: Symbol {}

pub trait RomSymbolProcessed: RomSymbol + SymbolProcessed {
    #[must_use]
    fn relocs(&self) -> &[Option<RelocationInfo>];
}
