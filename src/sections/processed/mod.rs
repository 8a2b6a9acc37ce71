/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod data_section_processed;
mod executable_section_processed;
mod nobits_section_processed;

pub use data_section_processed::DataSectionProcessed;
pub use executable_section_processed::ExecutableSectionProcessed;
pub use nobits_section_processed::NobitsSectionProcessed;
