/* SPDX-FileCopyrightText: © 2024 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use crate::{metadata::OverlayCategoryName, addresses::Rom};

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ParentSegmentInfo {
    segment_rom: Rom,
    overlay_category_name: Option<OverlayCategoryName>,
}
impl ParentSegmentInfo {
    pub const fn new(
        segment_rom: Rom,
        overlay_category_name: Option<OverlayCategoryName>,
    ) -> Self {
        Self {
            segment_rom,
            overlay_category_name,
        }
    }

    pub const fn segment_rom(&self) -> Rom {
        self.segment_rom
    }
    pub const fn overlay_category_name(&self) -> Option<&OverlayCategoryName> {
        self.overlay_category_name.as_ref()
    }
}

