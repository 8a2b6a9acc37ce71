/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::{error, fmt};

use crate::context::OwnedSegmentNotFoundError;

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum SymbolCreationError {
    OwnedSegmentNotFound(OwnedSegmentNotFoundError),
}

impl fmt::Display for SymbolCreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolCreationError::OwnedSegmentNotFound(x) => {
                write!(f, "{}", x)
            }
        }
    }
}

impl error::Error for SymbolCreationError {}

impl From<OwnedSegmentNotFoundError> for SymbolCreationError {
    fn from(value: OwnedSegmentNotFoundError) -> Self {
        SymbolCreationError::OwnedSegmentNotFound(value)
    }
}
