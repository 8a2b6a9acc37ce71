/* SPDX-FileCopyrightText: © 2024-2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::{collections::btree_map::BTreeMap, sync::Arc};
use core::hash;
use rabbitizer::Instruction;

use crate::{
    addresses::{AddressRange, Rom, RomVramRange, Size, Vram},
    analysis::InstructionAnalysisResult,
    config::Compiler,
    context::Context,
    metadata::{segment_metadata::FindSettings, GeneratedBy, ParentSectionMetadata, SymbolMetadata, SymbolType},
    parent_segment_info::ParentSegmentInfo,
    relocation::RelocationInfo,
    section_type::SectionType,
    symbols::{processed::FunctionSymProcessed, RomSymbolPreprocessed, SymbolPreprocessed},
};

use crate::symbols::{trait_symbol::RomSymbol, Symbol, SymbolCreationError, SymbolPostProcessError};

const SECTION_TYPE: SectionType = SectionType::Text;

#[derive(Debug, Clone)]
pub struct FunctionSym {
    ranges: RomVramRange,
    instructions: Arc<[Instruction]>,
    parent_segment_info: ParentSegmentInfo,
    instr_analysis: InstructionAnalysisResult,
}

impl FunctionSym {
    pub(crate) fn new(
        context: &mut Context,
        instructions: Arc<[Instruction]>,
        rom: Rom,
        vram: Vram,
        _in_section_offset: usize,
        parent_segment_info: ParentSegmentInfo,
        properties: FunctionSymProperties,
    ) -> Result<Self, SymbolCreationError> {
        let size = Size::new(instructions.len() as u32 * 4);
        let rom_range = AddressRange::new(rom, rom + size);
        let vram_range = AddressRange::new(vram, vram + size);
        let ranges = RomVramRange::new(rom_range, vram_range);

        let instr_analysis = InstructionAnalysisResult::analyze(context, ranges, &instructions);

        let owned_segment = context.find_owned_segment_mut(&parent_segment_info)?;
        let metadata = owned_segment.add_symbol(
            vram,
            Some(rom),
            GeneratedBy::Autogenerated,
            Some(SECTION_TYPE),
            false,
        );
        metadata.set_type(SymbolType::Function, GeneratedBy::Autogenerated);

        if metadata.autodetected_size().is_none() && metadata.user_declared_size().is_none() {
            let padding = count_padding(&instructions, metadata.user_declared_size());
            *metadata.autodetected_size_mut() = Some(Size::new(size.inner() - padding.inner()));
        }

        properties.apply_to_metadata(metadata);

        Self::register_referenced_symbols(context, &instr_analysis, &parent_segment_info, vram);

        Ok(Self {
            ranges,
            instructions,
            parent_segment_info,
            instr_analysis,
        })
    }

    fn register_referenced_symbols(
        context: &mut Context,
        instr_analysis: &InstructionAnalysisResult,
        parent_segment_info: &ParentSegmentInfo,
        self_vram: Vram,
    ) {
        for (&rom, &target_vram) in instr_analysis.func_calls() {
            Self::add_reference(
                context,
                parent_segment_info,
                target_vram,
                self_vram,
                rom,
                Some(SymbolType::Function),
                true,
            );
        }

        for (&rom, &target_vram) in instr_analysis.branch_targets() {
            Self::add_reference(
                context,
                parent_segment_info,
                target_vram,
                self_vram,
                rom,
                None,
                false,
            );
        }

        for (&rom, &target_vram) in instr_analysis.referenced_jumptables() {
            Self::add_reference(
                context,
                parent_segment_info,
                target_vram,
                self_vram,
                rom,
                Some(SymbolType::Jumptable),
                false,
            );
        }

        for (&rom, &target_vram) in instr_analysis.address_per_hi_instr() {
            Self::add_reference(context, parent_segment_info, target_vram, self_vram, rom, None, false);
        }
        for (&rom, &target_vram) in instr_analysis.address_per_lo_instr() {
            Self::add_reference(context, parent_segment_info, target_vram, self_vram, rom, None, false);
        }
    }

    fn add_reference(
        context: &mut Context,
        parent_segment_info: &ParentSegmentInfo,
        target_vram: Vram,
        self_vram: Vram,
        rom: Rom,
        inferred_type: Option<SymbolType>,
        is_call: bool,
    ) {
        let Some(segment) = context.find_referenced_segment_mut(target_vram, parent_segment_info) else {
            return;
        };

        let metadata = segment.add_symbol(target_vram, None, GeneratedBy::Autogenerated, None, false);

        if let (Some(sym_type), true) = (inferred_type, metadata.sym_type().is_none()) {
            metadata.set_type(sym_type, GeneratedBy::Autogenerated);
        }

        if is_call {
            metadata.add_reference_function(self_vram, parent_segment_info.clone(), rom);
        } else {
            metadata.add_reference_symbol(self_vram, parent_segment_info.clone(), rom);
        }
    }
}

impl FunctionSym {
    #[must_use]
    pub fn referenced_vrams(&self) -> &alloc::collections::btree_set::BTreeSet<Vram> {
        self.instr_analysis.referenced_vrams()
    }
}

impl Symbol for FunctionSym {
    fn vram_range(&self) -> &AddressRange<Vram> {
        self.ranges.vram()
    }

    fn parent_segment_info(&self) -> &ParentSegmentInfo {
        &self.parent_segment_info
    }

    #[must_use]
    fn section_type(&self) -> SectionType {
        SECTION_TYPE
    }
}
impl RomSymbol for FunctionSym {
    #[must_use]
    fn rom_vram_range(&self) -> &RomVramRange {
        &self.ranges
    }
}
impl SymbolPreprocessed for FunctionSym {
    type Output = FunctionSymProcessed;

    #[doc(hidden)]
    fn post_process(
        self,
        context: &mut Context,
        user_relocs: &BTreeMap<Rom, RelocationInfo>,
    ) -> Result<Self::Output, SymbolPostProcessError> {
        FunctionSymProcessed::new(
            context,
            self.ranges,
            self.instructions,
            self.parent_segment_info,
            self.instr_analysis,
            user_relocs,
        )
    }
}
impl RomSymbolPreprocessed for FunctionSym {}

impl hash::Hash for FunctionSym {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.parent_segment_info.hash(state);
        self.ranges.hash(state);
    }
}
impl PartialEq for FunctionSym {
    fn eq(&self, other: &Self) -> bool {
        self.parent_segment_info == other.parent_segment_info && self.ranges == other.ranges
    }
}
impl PartialOrd for FunctionSym {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        // Compare segment info first, so symbols get sorted by segment
        match self
            .parent_segment_info
            .partial_cmp(&other.parent_segment_info)
        {
            Some(core::cmp::Ordering::Equal) => {}
            ord => return ord,
        }
        self.ranges.partial_cmp(&other.ranges)
    }
}

#[derive(Debug, Clone, Hash, PartialEq)]
pub(crate) struct FunctionSymProperties {
    pub parent_metadata: ParentSectionMetadata,
    pub compiler: Option<Compiler>,
    pub auto_pad_by: Option<Vram>,
}

impl FunctionSymProperties {
    fn apply_to_metadata(self, metadata: &mut SymbolMetadata) {
        metadata.set_parent_metadata(self.parent_metadata);

        if let Some(compiler) = self.compiler {
            metadata.set_compiler(compiler);
        }

        if let Some(auto_pad_by) = self.auto_pad_by {
            metadata.set_auto_created_pad_by(auto_pad_by);
        }
    }
}

fn count_padding(instructions: &[Instruction], user_declared_size: Option<Size>) -> Size {
    // We don't consider padding if the user specified the size, or if the function is composed of only nops
    if user_declared_size.is_some() || instructions.iter().all(|x| x.is_nop()) {
        return Size::new(0);
    }

    let mut count = 0;

    for pair in instructions.windows(2).rev() {
        let prev_instr = pair[0];
        let instr = pair[1];

        if prev_instr.opcode().has_delay_slot() {
            break;
        }
        if !instr.is_nop() {
            break;
        }

        count += 4;
    }

    Size::new(count)
}
