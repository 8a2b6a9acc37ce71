/* SPDX-FileCopyrightText: © 2024-2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod reloc_referenced_sym;
mod relocation_info;
mod relocation_type;

pub use reloc_referenced_sym::RelocReferencedSym;
pub use relocation_info::RelocationInfo;
pub use relocation_type::RelocationType;

