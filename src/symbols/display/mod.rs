/* SPDX-FileCopyrightText: © 2024 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod either_func_data_display;
mod function_display;
mod internal_common;
mod sym_common_display;
mod sym_data_display;
mod sym_display_error;
mod sym_nobits_display;

pub use either_func_data_display::EitherFuncDataDisplay;
pub use function_display::{FunctionDisplay, FunctionDisplaySettings};
pub(crate) use internal_common::InternalSymDisplSettings;
pub(crate) use sym_common_display::SymCommonDisplaySettings;
pub use sym_data_display::{SymDataDisplay, SymDataDisplaySettings};
pub use sym_display_error::SymDisplayError;
pub use sym_nobits_display::{SymNobitsDisplay, SymNobitsDisplaySettings};
