/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod data_section;
mod executable_section;
mod nobits_section;

pub use data_section::{DataSection, DataSectionSettings};
pub use executable_section::{ExecutableSection, ExecutableSectionSettings};
pub use nobits_section::{NobitsSection, NobitsSectionSettings};
