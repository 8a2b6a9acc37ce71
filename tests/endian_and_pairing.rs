/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use std::collections::BTreeMap;

use rabbitizer::{InstructionDisplayFlags, InstructionFlags, IsaVersion};
use matchdisasm::{
    addresses::{AddressRange, Rom, RomVramRange, Size, Vram},
    config::{Endian, GlobalConfig, GpConfig},
    context::{builder::ContextBuilder, Context},
    metadata::SymbolType,
    parent_segment_info::ParentSegmentInfo,
    sections::{
        before_proc::{DataSectionSettings, ExecutableSectionSettings, NobitsSectionSettings},
        processed::{DataSectionProcessed, ExecutableSectionProcessed, NobitsSectionProcessed},
    },
    symbols::display::{FunctionDisplaySettings, SymDataDisplaySettings, SymNobitsDisplaySettings},
};

// Same harness as `tests/multisection.rs`, trimmed to what these cases need.

#[must_use]
struct RawSectionInfo<'a> {
    bytes: &'a [u8],
    rom: Rom,
    vram: Vram,
}
impl<'a> RawSectionInfo<'a> {
    pub fn new(bytes: &'a [u8], rom: Rom, vram: Vram) -> Self {
        Self { bytes, rom, vram }
    }

    pub fn ranges(&self) -> RomVramRange {
        RomVramRange::new(
            AddressRange::new(self.rom, self.rom + Size::new(self.bytes.len() as u32)),
            AddressRange::new(self.vram, self.vram + Size::new(self.bytes.len() as u32)),
        )
    }
}

#[must_use]
struct RawNobitsSectionInfo {
    size: Size,
    vram: Vram,
}
impl RawNobitsSectionInfo {
    pub fn new(size: Size, vram: Vram) -> Self {
        Self { size, vram }
    }

    pub fn ranges(&self) -> RomVramRange {
        RomVramRange::new(
            AddressRange::new(Rom::new(0), Rom::new(0)),
            AddressRange::new(self.vram, self.vram + self.size),
        )
    }
}

struct Sections {
    context: Context,
    text: Option<ExecutableSectionProcessed>,
    data: Option<DataSectionProcessed>,
    rodata: Option<DataSectionProcessed>,
    gcc_except_table: Option<DataSectionProcessed>,
    bss: Option<NobitsSectionProcessed>,
}
impl Sections {
    #[expect(clippy::too_many_arguments)]
    pub fn new(
        endian: Endian,
        text_info: (RawSectionInfo, ExecutableSectionSettings),
        data_info: (RawSectionInfo, DataSectionSettings),
        rodata_info: (RawSectionInfo, DataSectionSettings),
        gcc_except_table_info: (RawSectionInfo, DataSectionSettings),
        bss_info: (RawNobitsSectionInfo, NobitsSectionSettings),
        gp_config: Option<GpConfig>,
    ) -> Self {
        let mut global_ranges = text_info.0.ranges();

        global_ranges.expand_ranges(&data_info.0.ranges());
        global_ranges.expand_ranges(&rodata_info.0.ranges());
        global_ranges.expand_ranges(&gcc_except_table_info.0.ranges());
        global_ranges.expand_ranges(&bss_info.0.ranges());

        let global_config = GlobalConfig::new(endian).with_gp_config(gp_config);

        let mut context = {
            let mut builder = ContextBuilder::new(global_config, global_ranges);

            let finder_heater = builder.process().process();
            let overlays = finder_heater.process();
            overlays.build()
        };

        let parent_info = ParentSegmentInfo::new(global_ranges.rom().start(), None);

        let text = (!text_info.0.bytes.is_empty()).then(|| {
            context
                .create_section_text(
                    &text_info.1,
                    ".text",
                    text_info.0.bytes,
                    text_info.0.rom,
                    text_info.0.vram,
                    parent_info.clone(),
                )
                .unwrap()
        });
        let data = (!data_info.0.bytes.is_empty()).then(|| {
            context
                .create_section_data(
                    &data_info.1,
                    ".data",
                    data_info.0.bytes,
                    data_info.0.rom,
                    data_info.0.vram,
                    parent_info.clone(),
                )
                .unwrap()
        });
        let rodata = (!rodata_info.0.bytes.is_empty()).then(|| {
            context
                .create_section_rodata(
                    &rodata_info.1,
                    ".rodata",
                    rodata_info.0.bytes,
                    rodata_info.0.rom,
                    rodata_info.0.vram,
                    parent_info.clone(),
                )
                .unwrap()
        });
        let gcc_except_table = (!gcc_except_table_info.0.bytes.is_empty()).then(|| {
            context
                .create_section_gcc_except_table(
                    &gcc_except_table_info.1,
                    ".except_table",
                    gcc_except_table_info.0.bytes,
                    gcc_except_table_info.0.rom,
                    gcc_except_table_info.0.vram,
                    parent_info.clone(),
                )
                .unwrap()
        });
        let bss = (!bss_info.0.size.is_empty()).then(|| {
            context
                .create_section_bss(
                    &bss_info.1,
                    ".bss",
                    *bss_info.0.ranges().vram(),
                    parent_info,
                )
                .unwrap()
        });

        let user_relocs = BTreeMap::new();
        let text = text.map(|x| x.post_process(&mut context, &user_relocs).unwrap());
        let data = data.map(|x| x.post_process(&mut context, &user_relocs).unwrap());
        let rodata = rodata.map(|x| x.post_process(&mut context, &user_relocs).unwrap());
        let gcc_except_table =
            gcc_except_table.map(|x| x.post_process(&mut context, &user_relocs).unwrap());
        let bss = bss.map(|x| x.post_process(&mut context).unwrap());

        Self {
            context,
            text,
            data,
            rodata,
            gcc_except_table,
            bss,
        }
    }

    pub fn display_to_string(
        &self,
        text_display_settings: &FunctionDisplaySettings,
        data_display_settings: &SymDataDisplaySettings,
        rodata_display_settings: &SymDataDisplaySettings,
        gcc_except_table_display_settings: &SymDataDisplaySettings,
        bss_display_settings: &SymNobitsDisplaySettings,
    ) -> String {
        let mut out = String::new();

        if let Some(section) = &self.text {
            out.push_str(".section .text\n");
            for sym in section.functions() {
                out.push('\n');
                out.push_str(
                    &sym.display(&self.context, text_display_settings)
                        .unwrap()
                        .to_string(),
                );
            }
        }

        if let Some(section) = &self.data {
            out.push_str("\n.section .data\n");
            for sym in section.data_symbols() {
                out.push('\n');
                out.push_str(
                    &sym.display(&self.context, data_display_settings)
                        .unwrap()
                        .to_string(),
                );
            }
        }

        if let Some(section) = &self.rodata {
            out.push_str("\n.section .rodata\n");
            for sym in section.data_symbols() {
                out.push('\n');
                out.push_str(
                    &sym.display(&self.context, rodata_display_settings)
                        .unwrap()
                        .to_string(),
                );
            }
        }

        if let Some(section) = &self.gcc_except_table {
            out.push_str("\n.section .gcc_except_table\n");
            for sym in section.data_symbols() {
                out.push('\n');
                out.push_str(
                    &sym.display(&self.context, gcc_except_table_display_settings)
                        .unwrap()
                        .to_string(),
                );
            }
        }

        if let Some(section) = &self.bss {
            out.push_str("\n.section .bss\n");
            for sym in section.noload_symbols() {
                out.push('\n');
                out.push_str(
                    &sym.display(&self.context, bss_display_settings)
                        .unwrap()
                        .to_string(),
                );
            }
        }

        out
    }
}

fn empty_settings() -> (
    RawSectionInfo<'static>,
    DataSectionSettings,
    RawNobitsSectionInfo,
    NobitsSectionSettings,
) {
    (
        RawSectionInfo::new(&[], Rom::new(0x1000), Vram::new(0x80002000)),
        DataSectionSettings::new(None),
        RawNobitsSectionInfo::new(Size::new(0), Vram::new(0x80002000)),
        NobitsSectionSettings::new(None),
    )
}

/// `spec.md` §8 seed scenario 1: a `lui`/`addiu` pair with no other user of the
/// upper half reconstructs a 32-bit address that resolves to a known data
/// symbol, and that pair never crosses the function boundary it was found in.
#[test]
fn hi_lo_pair_resolves_to_data_symbol() {
    let text_bytes: [u8; 16] = [
        0x3C, 0x1C, 0x80, 0x00, // lui $gp, 0x8000
        0x27, 0x9C, 0x00, 0x10, // addiu $gp, $gp, 0x10
        0x03, 0xE0, 0x00, 0x08, // jr $ra
        0x00, 0x00, 0x00, 0x00, // nop
    ];
    let text_rom = Rom::new(0x0);
    let text_vram = Vram::new(0x80000000);

    let data_bytes: [u8; 16] = [0; 16];
    let data_rom = Rom::new(0x10);
    let data_vram = Vram::new(0x80000010);

    let executable_settings =
        ExecutableSectionSettings::new(None, InstructionFlags::new(IsaVersion::MIPS_III));
    let data_settings = DataSectionSettings::new(None);

    let (rodata_info, rodata_settings, bss_info, bss_settings) = empty_settings();
    let (except_info, except_settings, _, _) = empty_settings();

    let sections = Sections::new(
        Endian::Big,
        (
            RawSectionInfo::new(&text_bytes, text_rom, text_vram),
            executable_settings,
        ),
        (
            RawSectionInfo::new(&data_bytes, data_rom, data_vram),
            data_settings,
        ),
        (rodata_info, rodata_settings),
        (except_info, except_settings),
        (bss_info, bss_settings),
        None,
    );

    let segment = sections.context.global_segment();

    // The reconstructed address must have produced (or reused) a symbol
    // exactly at 0x80000010, referenced by the pairing.
    let target = segment
        .symbols()
        .get(&Vram::new(0x80000010))
        .expect("hi/lo pair should have created or found a symbol at the combined address");
    assert!(target.reference_counter() >= 1);

    // The function itself must be a single symbol spanning the whole
    // 16-byte body (a whole multiple of 4 bytes, per §3 invariant 2).
    let func = segment
        .symbols()
        .get(&Vram::new(0x80000000))
        .expect("function entry symbol must exist");
    assert_eq!(func.sym_type(), Some(&SymbolType::Function));
    if let Some(size) = func.size() {
        assert_eq!(size.inner() % 4, 0);
    }
}

/// `spec.md` §8 seed scenario 6 and the middle-endian Open Question
/// (`SPEC_FULL.md` §4.A.1): decoding the same logical words through
/// `Endian::Middle`, with each word's two halfwords swapped in storage order,
/// must produce the exact same analysis (and therefore the exact same
/// rendered assembly) as decoding the equivalent `Endian::Big` bytes.
#[test]
fn middle_endian_matches_big_endian_halfword_swap() {
    let text_bytes_be: [u8; 16] = [
        0x3C, 0x1C, 0x80, 0x00, // lui $gp, 0x8000
        0x27, 0x9C, 0x00, 0x10, // addiu $gp, $gp, 0x10
        0x03, 0xE0, 0x00, 0x08, // jr $ra
        0x00, 0x00, 0x00, 0x00, // nop
    ];

    // Swap each word's two halfwords: [b0,b1,b2,b3] -> [b1,b0,b3,b2].
    let mut text_bytes_middle = text_bytes_be;
    for word in text_bytes_middle.chunks_exact_mut(4) {
        word.swap(0, 1);
        word.swap(2, 3);
    }

    let text_rom = Rom::new(0x0);
    let text_vram = Vram::new(0x80000000);

    let data_bytes: [u8; 16] = [0; 16];
    let data_rom = Rom::new(0x10);
    let data_vram = Vram::new(0x80000010);

    let executable_settings =
        ExecutableSectionSettings::new(None, InstructionFlags::new(IsaVersion::MIPS_III));
    let data_settings = DataSectionSettings::new(None);

    let build = |endian: Endian, text_bytes: &[u8]| {
        let (rodata_info, rodata_settings, bss_info, bss_settings) = empty_settings();
        let (except_info, except_settings, _, _) = empty_settings();

        Sections::new(
            endian,
            (
                RawSectionInfo::new(text_bytes, text_rom, text_vram),
                executable_settings,
            ),
            (
                RawSectionInfo::new(&data_bytes, data_rom, data_vram),
                data_settings,
            ),
            (rodata_info, rodata_settings),
            (except_info, except_settings),
            (bss_info, bss_settings),
            None,
        )
    };

    let big = build(Endian::Big, &text_bytes_be);
    let middle = build(Endian::Middle, &text_bytes_middle);

    let instr_display_flags = InstructionDisplayFlags::default();
    let text_display_settings = FunctionDisplaySettings::new(instr_display_flags);
    let data_display_settings = SymDataDisplaySettings::new();
    let bss_display_settings = SymNobitsDisplaySettings::new();

    let big_str = big.display_to_string(
        &text_display_settings,
        &data_display_settings,
        &data_display_settings,
        &data_display_settings,
        &bss_display_settings,
    );
    let middle_str = middle.display_to_string(
        &text_display_settings,
        &data_display_settings,
        &data_display_settings,
        &data_display_settings,
        &bss_display_settings,
    );

    assert_eq!(big_str, middle_str);
}

