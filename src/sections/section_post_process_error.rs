/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::{error, fmt};

use crate::{
    context::OwnedSegmentNotFoundError,
    symbols::{
        InvalidRelocForSectionError, OwnedSymbolNotFoundError, SymbolPostProcessError,
        UnalignedUserRelocError,
    },
};

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum SectionPostProcessError {
    OwnedSegmentNotFound(OwnedSegmentNotFoundError),
    OwnedSymbolNotFound(OwnedSymbolNotFoundError),
    UnalignedUserReloc(UnalignedUserRelocError),
    InvalidRelocForSection(InvalidRelocForSectionError),
}

impl fmt::Display for SectionPostProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionPostProcessError::OwnedSegmentNotFound(owned_segment_not_found_error) => {
                write!(f, "{owned_segment_not_found_error}")
            }
            SectionPostProcessError::OwnedSymbolNotFound(owned_symbol_not_found) => {
                write!(f, "{owned_symbol_not_found}")
            }
            SectionPostProcessError::UnalignedUserReloc(unaligned_user_reloc_error) => {
                write!(f, "{unaligned_user_reloc_error}")
            }
            SectionPostProcessError::InvalidRelocForSection(invalid_reloc_for_section_error) => {
                write!(f, "{invalid_reloc_for_section_error}")
            }
        }
    }
}

impl error::Error for SectionPostProcessError {}

impl From<SymbolPostProcessError> for SectionPostProcessError {
    fn from(value: SymbolPostProcessError) -> Self {
        match value {
            SymbolPostProcessError::OwnedSegmentNotFound(owned_segment_not_found_error) => {
                SectionPostProcessError::OwnedSegmentNotFound(owned_segment_not_found_error)
            }
            SymbolPostProcessError::OwnedSymbolNotFound(owned_symbol_not_found) => {
                SectionPostProcessError::OwnedSymbolNotFound(owned_symbol_not_found)
            }
            SymbolPostProcessError::UnalignedUserReloc(unaligned_user_reloc_error) => {
                SectionPostProcessError::UnalignedUserReloc(unaligned_user_reloc_error)
            }
            SymbolPostProcessError::InvalidRelocForSection(invalid_reloc_for_section_error) => {
                SectionPostProcessError::InvalidRelocForSection(invalid_reloc_for_section_error)
            }
        }
    }
}

impl From<OwnedSegmentNotFoundError> for SectionPostProcessError {
    fn from(value: OwnedSegmentNotFoundError) -> Self {
        SectionPostProcessError::OwnedSegmentNotFound(value)
    }
}

