/* SPDX-FileCopyrightText: © 2024-2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::{collections::btree_map::BTreeMap, string::String, sync::Arc, vec::Vec};
use core::hash;

use crate::{
    addresses::{AddressRange, Rom, RomVramRange, Size, Vram},
    analysis::StringGuesserLevel,
    collections::{unordered_map::UnorderedMap, unordered_set::UnorderedSet},
    config::{Compiler, Endian},
    context::Context,
    metadata::{
        segment_metadata::FindSettings, ParentSectionMetadata, SegmentMetadata, SymbolType,
    },
    parent_segment_info::ParentSegmentInfo,
    relocation::RelocationInfo,
    section_type::SectionType,
    sections::{
        processed::DataSectionProcessed, RomSection, RomSectionPreprocessed, Section,
        SectionCreationError, SectionPostProcessError, SectionPreprocessed,
    },
    str_decoding::Encoding,
    symbols::{
        before_proc::{data_sym::DataSymProperties, DataSym},
        Symbol, SymbolPreprocessed,
    },
};

#[derive(Debug, Clone)]
#[must_use]
pub struct DataSection {
    name: String,

    ranges: RomVramRange,

    parent_segment_info: ParentSegmentInfo,

    // in_section_offset: u32,
    section_type: SectionType,

    //
    data_symbols: Vec<DataSym>,

    symbol_vrams: UnorderedSet<Vram>,
}

impl DataSection {
    // TODO: fix
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        context: &mut Context,
        settings: &DataSectionSettings,
        name: String,
        raw_bytes: &[u8],
        rom: Rom,
        vram: Vram,
        parent_segment_info: ParentSegmentInfo,
        section_type: SectionType,
    ) -> Result<Self, SectionCreationError> {
        if raw_bytes.is_empty() {
            return Err(SectionCreationError::EmptySection { name, vram });
        }
        if (rom.inner() % 4) != (vram.inner() % 4) {
            // TODO: Does this check make sense? It would be weird if this kind of section existed, wouldn't it?
            return Err(SectionCreationError::RomVramAlignmentMismatch {
                name,
                rom,
                vram,
                multiple_of: 4,
            });
        }

        let size = Size::new(raw_bytes.len() as u32);
        let rom_range = AddressRange::new(rom, rom + size);
        let vram_range = AddressRange::new(vram, vram + size);
        let ranges = RomVramRange::new(rom_range, vram_range);

        // Ensure there's a symbol at the beginning of the section.
        context
            .find_owned_segment_mut(&parent_segment_info)?
            .add_symbol(
                vram,
                Some(rom),
                crate::metadata::GeneratedBy::Autogenerated,
                Some(section_type),
                false,
            );

        let owned_segment = context.find_owned_segment(&parent_segment_info)?;

        let (symbols_info_vec, auto_pads) = Self::find_symbols(
            owned_segment,
            settings,
            raw_bytes,
            vram_range,
            section_type,
            context.global_config().endian(),
        );

        let mut data_symbols = Vec::new();
        let mut symbol_vrams = UnorderedSet::new();

        for (i, (new_sym_vram, sym_type)) in symbols_info_vec.iter().enumerate() {
            let start = new_sym_vram.sub_vram(&vram).inner() as usize;
            let end = if i + 1 < symbols_info_vec.len() {
                symbols_info_vec[i + 1].0.sub_vram(&vram).inner() as usize
            } else {
                raw_bytes.len()
            };
            debug_assert!(
                start < end,
                "{:?} {} {} {} {}",
                rom,
                vram,
                start,
                end,
                raw_bytes.len()
            );

            let sym_rom = rom + Size::new(start as u32);

            symbol_vrams.insert(*new_sym_vram);

            let properties = DataSymProperties {
                parent_metadata: ParentSectionMetadata::new(
                    name.clone(),
                    vram,
                    parent_segment_info.clone(),
                ),
                compiler: settings.compiler,
                auto_pad_by: auto_pads.get(new_sym_vram).copied(),
                detected_type: *sym_type,
                encoding: settings.encoding,
            };
            let /*mut*/ sym = DataSym::new(context, raw_bytes[start..end].into(), sym_rom, *new_sym_vram, start, parent_segment_info.clone(), section_type, properties)?;

            data_symbols.push(sym);
        }

        Ok(Self {
            name,
            ranges,
            parent_segment_info,
            section_type,
            data_symbols,
            symbol_vrams,
        })
    }

    /// Scans `raw_bytes` word by word looking for embedded pointers (to split
    /// this section into multiple symbols) and candidate C strings. Returns
    /// the vram of every symbol boundary found (plus the type it was detected
    /// as, if any) together with a map of autogenerated-padding vrams to the
    /// symbol that caused the padding.
    fn find_symbols(
        owned_segment: &SegmentMetadata,
        settings: &DataSectionSettings,
        raw_bytes: &[u8],
        vram_range: AddressRange<Vram>,
        section_type: SectionType,
        endian: Endian,
    ) -> (Vec<(Vram, Option<SymbolType>)>, UnorderedMap<Vram, Vram>) {
        let mut symbols_info = BTreeMap::new();
        symbols_info.insert(vram_range.start(), None);
        let mut auto_pads = UnorderedMap::new();

        if vram_range.start().inner() % 4 != 0 || section_type == SectionType::GccExceptTable {
            // Not word-aligned, so it doesn't make sense to look for pointers.
            // Except tables only ever contain table(s); DataSym produces their labels.
            for (vram, sym) in owned_segment.symbols().range(vram_range.start()..vram_range.end())
            {
                symbols_info.insert(*vram, sym.sym_type().copied());
                if let Some(size) = sym.size() {
                    let next_vram = *vram + size;
                    if vram_range.in_range(next_vram) {
                        symbols_info.insert(next_vram, None);
                        auto_pads.insert(next_vram, *vram);
                    }
                }
            }

            return (symbols_info.into_iter().collect(), auto_pads);
        }

        let mut remaining_string_size: i32 = 0;
        let mut prev_sym_end: Option<Vram> = None;

        for (i, word_bytes) in raw_bytes.chunks_exact(4).enumerate() {
            let local_offset = i * 4;
            let current_vram = vram_range.start() + Size::new(local_offset as u32);

            if remaining_string_size <= 0 {
                let word = endian.word_from_bytes(word_bytes);
                let word_vram = Vram::new(word);

                let current_sym = owned_segment
                    .find_symbol(current_vram, FindSettings::new().with_allow_addend(false));
                let current_type = current_sym.and_then(|x| x.sym_type()).copied();

                let should_search_for_address =
                    current_type.is_none_or(|x| x.can_reference_symbols());

                if should_search_for_address && vram_range.in_range(word_vram) {
                    let word_sym = owned_segment
                        .find_symbol(word_vram, FindSettings::new().with_allow_addend(true));
                    if word_sym.is_none_or(|x| {
                        x.vram() == word_vram || current_type.is_some_and(|t| t.is_table())
                    }) {
                        symbols_info.entry(word_vram).or_default();
                    }
                }

                if let Some((str_len, next_vram)) = Self::try_to_guess_c_string(
                    owned_segment,
                    current_vram,
                    settings,
                    &raw_bytes[local_offset..],
                ) {
                    remaining_string_size = str_len as i32;

                    *symbols_info.entry(current_vram).or_default() = Some(SymbolType::CString);
                    auto_pads.entry(current_vram).or_insert(current_vram);

                    if vram_range.in_range(next_vram) {
                        symbols_info.entry(next_vram).or_default();
                        auto_pads.insert(next_vram, current_vram);
                    }

                    prev_sym_end = Some(next_vram);
                }
            }

            if prev_sym_end.is_some_and(|end| current_vram >= end) {
                prev_sym_end = None;
            }

            remaining_string_size -= 4;
        }

        (symbols_info.into_iter().collect(), auto_pads)
    }

    /// Tries to find a NUL-terminated string starting at `current_vram`, returning its
    /// length (rounded up to a word) and the vram right after it.
    fn try_to_guess_c_string(
        owned_segment: &SegmentMetadata,
        current_vram: Vram,
        settings: &DataSectionSettings,
        sub_raw_bytes: &[u8],
    ) -> Option<(usize, Vram)> {
        let current_sym =
            owned_segment.find_symbol(current_vram, FindSettings::new().with_allow_addend(true));

        // Avoid guessing strings in the middle of other symbols
        if current_sym.is_some_and(|x| x.vram() != current_vram) {
            return None;
        }

        let str_size = settings.string_guesser_level.guess(
            current_sym,
            current_vram,
            sub_raw_bytes,
            settings.encoding,
            owned_segment,
        )?;

        let str_sym_size = str_size.next_multiple_of(4);

        // Make sure there isn't already another symbol inside the guessed range.
        let next_vram = current_vram + Size::new(str_sym_size as u32);
        if owned_segment
            .symbols()
            .range(current_vram + Size::new(1)..next_vram)
            .next()
            .is_some()
        {
            return None;
        }

        Some((str_sym_size, next_vram))
    }
}

impl DataSection {
    pub fn data_symbols(&self) -> &[DataSym] {
        &self.data_symbols
    }
}

impl DataSection {
    pub fn post_process(
        self,
        context: &mut Context,
        user_relocs: &BTreeMap<Rom, RelocationInfo>,
    ) -> Result<DataSectionProcessed, SectionPostProcessError> {
        DataSectionProcessed::new(
            context,
            self.name,
            self.ranges,
            self.parent_segment_info,
            self.section_type,
            self.data_symbols,
            self.symbol_vrams,
            user_relocs,
        )
    }
}

impl Section for DataSection {
    fn name(&self) -> Arc<str> {
        Arc::from(self.name.as_str())
    }

    fn vram_range(&self) -> &AddressRange<Vram> {
        self.ranges.vram()
    }

    fn parent_segment_info(&self) -> &ParentSegmentInfo {
        &self.parent_segment_info
    }

    #[must_use]
    fn section_type(&self) -> SectionType {
        self.section_type
    }

    fn symbol_list(&self) -> &[impl Symbol] {
        &self.data_symbols
    }

    fn symbols_vrams(&self) -> &UnorderedSet<Vram> {
        &self.symbol_vrams
    }
}
impl RomSection for DataSection {
    fn rom_vram_range(&self) -> &RomVramRange {
        &self.ranges
    }
}
impl SectionPreprocessed for DataSection {
    fn symbol_list(&self) -> &[impl SymbolPreprocessed] {
        &self.data_symbols
    }
}
impl RomSectionPreprocessed for DataSection {}

impl hash::Hash for DataSection {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.parent_segment_info.hash(state);
        self.ranges.hash(state);
    }
}
impl PartialEq for DataSection {
    fn eq(&self, other: &Self) -> bool {
        self.parent_segment_info == other.parent_segment_info && self.ranges == other.ranges
    }
}
impl PartialOrd for DataSection {
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

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct DataSectionSettings {
    compiler: Option<Compiler>,
    string_guesser_level: StringGuesserLevel,
    encoding: Encoding,
}

impl DataSectionSettings {
    pub fn new(compiler: Option<Compiler>) -> Self {
        Self {
            compiler,
            string_guesser_level: StringGuesserLevel::default(),
            encoding: Encoding::default(),
        }
    }

    pub fn compiler(&self) -> Option<Compiler> {
        self.compiler
    }

    pub fn string_guesser_level(&self) -> StringGuesserLevel {
        self.string_guesser_level
    }
    pub fn set_string_guesser_level(&mut self, string_guesser_level: StringGuesserLevel) {
        self.string_guesser_level = string_guesser_level;
    }
    pub fn with_string_guesser_level(self, string_guesser_level: StringGuesserLevel) -> Self {
        Self {
            string_guesser_level,
            ..self
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
    pub fn set_encoding(&mut self, encoding: Encoding) {
        self.encoding = encoding;
    }
    pub fn with_encoding(self, encoding: Encoding) -> Self {
        Self { encoding, ..self }
    }
}

