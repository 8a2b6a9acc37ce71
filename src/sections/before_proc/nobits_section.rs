/* SPDX-FileCopyrightText: © 2024-2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::{collections::btree_map::BTreeMap, string::String, sync::Arc, vec::Vec};
use core::hash;

use crate::{
    addresses::{AddressRange, Rom, Vram},
    collections::unordered_set::UnorderedSet,
    config::Compiler,
    context::Context,
    metadata::{GeneratedBy, ParentSectionMetadata},
    parent_segment_info::ParentSegmentInfo,
    relocation::RelocationInfo,
    section_type::SectionType,
    sections::{
        processed::NobitsSectionProcessed, Section, SectionCreationError,
        SectionPostProcessError, SectionPreprocessed,
    },
    symbols::{
        before_proc::{nobits_sym::NobitsSymProperties, NobitsSym},
        Symbol, SymbolPreprocessed,
    },
};

const SECTION_TYPE: SectionType = SectionType::Bss;

#[derive(Debug, Clone)]
#[must_use]
pub struct NobitsSection {
    name: String,

    vram_range: AddressRange<Vram>,

    parent_segment_info: ParentSegmentInfo,

    nobits_symbols: Vec<NobitsSym>,

    symbol_vrams: UnorderedSet<Vram>,
}

impl NobitsSection {
    pub(crate) fn new(
        context: &mut Context,
        settings: &NobitsSectionSettings,
        name: String,
        vram_range: AddressRange<Vram>,
        parent_segment_info: ParentSegmentInfo,
    ) -> Result<Self, SectionCreationError> {
        if vram_range.size().inner() == 0 {
            return Err(SectionCreationError::EmptySection {
                name,
                vram: vram_range.start(),
            });
        }

        // Ensure there's a symbol at the beginning of the section.
        context
            .find_owned_segment_mut(&parent_segment_info)?
            .add_symbol(
                vram_range.start(),
                None,
                GeneratedBy::Autogenerated,
                Some(SECTION_TYPE),
                false,
            );

        let owned_segment = context.find_owned_segment(&parent_segment_info)?;

        let boundaries: Vec<Vram> = owned_segment
            .symbols()
            .range(vram_range.start()..vram_range.end())
            .map(|(vram, _)| *vram)
            .collect();

        let mut nobits_symbols = Vec::new();
        let mut symbol_vrams = UnorderedSet::new();

        for (i, sym_vram) in boundaries.iter().enumerate() {
            let end = if i + 1 < boundaries.len() {
                boundaries[i + 1]
            } else {
                vram_range.end()
            };

            symbol_vrams.insert(*sym_vram);

            let properties = NobitsSymProperties {
                parent_metadata: ParentSectionMetadata::new(
                    name.clone(),
                    vram_range.start(),
                    parent_segment_info.clone(),
                ),
                compiler: settings.compiler,
                auto_pad_by: None,
            };

            let sym = NobitsSym::new(
                context,
                AddressRange::new(*sym_vram, end),
                parent_segment_info.clone(),
                properties,
            )?;

            nobits_symbols.push(sym);
        }

        Ok(Self {
            name,
            vram_range,
            parent_segment_info,
            nobits_symbols,
            symbol_vrams,
        })
    }
}

impl NobitsSection {
    pub fn nobits_symbols(&self) -> &[NobitsSym] {
        &self.nobits_symbols
    }
}

impl NobitsSection {
    pub fn post_process(
        self,
        context: &mut Context,
        user_relocs: &BTreeMap<Rom, RelocationInfo>,
    ) -> Result<NobitsSectionProcessed, SectionPostProcessError> {
        let _ = user_relocs;
        NobitsSectionProcessed::new(
            context,
            Arc::from(self.name.as_str()),
            self.vram_range,
            self.parent_segment_info,
            self.nobits_symbols,
            self.symbol_vrams,
        )
    }
}

impl Section for NobitsSection {
    fn name(&self) -> Arc<str> {
        Arc::from(self.name.as_str())
    }

    fn vram_range(&self) -> &AddressRange<Vram> {
        &self.vram_range
    }

    fn parent_segment_info(&self) -> &ParentSegmentInfo {
        &self.parent_segment_info
    }

    #[must_use]
    fn section_type(&self) -> SectionType {
        SECTION_TYPE
    }

    fn symbol_list(&self) -> &[impl Symbol] {
        &self.nobits_symbols
    }

    fn symbols_vrams(&self) -> &UnorderedSet<Vram> {
        &self.symbol_vrams
    }
}
impl SectionPreprocessed for NobitsSection {
    fn symbol_list(&self) -> &[impl SymbolPreprocessed] {
        &self.nobits_symbols
    }
}

impl hash::Hash for NobitsSection {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.parent_segment_info.hash(state);
        self.vram_range.hash(state);
    }
}
impl PartialEq for NobitsSection {
    fn eq(&self, other: &Self) -> bool {
        self.parent_segment_info == other.parent_segment_info && self.vram_range == other.vram_range
    }
}
impl PartialOrd for NobitsSection {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        // Compare segment info first, so symbols get sorted by segment
        match self
            .parent_segment_info
            .partial_cmp(&other.parent_segment_info)
        {
            Some(core::cmp::Ordering::Equal) => {}
            ord => return ord,
        }
        self.vram_range.partial_cmp(&other.vram_range)
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct NobitsSectionSettings {
    compiler: Option<Compiler>,
}

impl NobitsSectionSettings {
    pub fn new(compiler: Option<Compiler>) -> Self {
        Self { compiler }
    }

    pub fn compiler(&self) -> Option<Compiler> {
        self.compiler
    }
}
