/* SPDX-FileCopyrightText: © 2024 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use crate::{config::GlobalConfig, metadata::SegmentMetadata, addresses::RomVramRange};

use super::{ContextBuilderOverlay, SegmentModifier};

#[derive(Debug, Clone, Hash, PartialEq)]
pub struct ContextBuilder {
    global_config: GlobalConfig,

    global_segment: SegmentMetadata,
}

impl ContextBuilder {
    #[must_use]
    pub fn new(global_config: GlobalConfig, global_ranges: RomVramRange) -> Self {
        let global_segment = SegmentMetadata::new(global_ranges, None);

        Self {
            global_config,
            global_segment,
        }
    }

    #[must_use]
    pub fn global_segment(&mut self) -> SegmentModifier {
        SegmentModifier::new(&mut self.global_segment)
    }

    #[must_use]
    pub fn process(self) -> ContextBuilderOverlay {
        ContextBuilderOverlay::new(self.global_config, self.global_segment)
    }
}

