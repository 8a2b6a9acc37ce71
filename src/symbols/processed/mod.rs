/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

pub(crate) mod data_sym_processed;
mod either_func_data_sym_processed;
pub(crate) mod function_sym_processed;
pub(crate) mod nobits_sym_processed;

pub use data_sym_processed::DataSymProcessed;
pub use either_func_data_sym_processed::{
    EitherFuncDataSymProcessed, EitherFuncDataSymProcessedRef,
};
pub use function_sym_processed::FunctionSymProcessed;
pub use nobits_sym_processed::NobitsSymProcessed;
