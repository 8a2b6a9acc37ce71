/* SPDX-FileCopyrightText: © 2024 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod func_rodata_migration;
mod pairing_display;
mod pairing_error;
mod rodata_iterator;

pub use func_rodata_migration::FuncRodataPairing;
pub use pairing_display::FuncRodataPairingDisplay;
pub use pairing_error::PairingError;
pub use rodata_iterator::RodataIterator;
