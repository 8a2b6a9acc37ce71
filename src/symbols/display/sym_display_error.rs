/* SPDX-FileCopyrightText: © 2024 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::{error, fmt};

use crate::context::OwnedSegmentNotFoundError;

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum SymDisplayError {
    OwnedSegmentNotFound(OwnedSegmentNotFoundError),
    SelfSymNotFound(),
}

impl fmt::Display for SymDisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymDisplayError::OwnedSegmentNotFound(x) => write!(f, "{}", x),
            SymDisplayError::SelfSymNotFound() => {
                // TODO: more info
                write!(f, "Can't find symbol")
            }
        }
    }
}
impl error::Error for SymDisplayError {}

impl From<OwnedSegmentNotFoundError> for SymDisplayError {
    fn from(value: OwnedSegmentNotFoundError) -> Self {
        SymDisplayError::OwnedSegmentNotFound(value)
    }
}

