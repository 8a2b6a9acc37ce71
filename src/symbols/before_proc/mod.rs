/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

pub(crate) mod data_sym;
mod either_func_data_sym;
pub(crate) mod function_sym;
pub(crate) mod nobits_sym;

pub use data_sym::DataSym;
pub use either_func_data_sym::EitherFuncDataSym;
pub use function_sym::FunctionSym;
pub use nobits_sym::NobitsSym;
