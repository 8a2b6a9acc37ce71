/* SPDX-FileCopyrightText: © 2024 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::{string::String, vec::Vec};

/// Text encoding used to validate and size candidate C strings found in rodata/data.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
#[non_exhaustive]
pub enum Encoding {
    #[default]
    Ascii,
    Utf8,
    ShiftJis,
}

impl Encoding {
    /// Checks whether `bytes` starts with a NUL-terminated string valid under
    /// this encoding, returning the byte length of the string including the
    /// terminator.
    pub fn check_valid(self, bytes: &[u8]) -> Result<usize, ()> {
        let end = bytes.iter().position(|b| *b == 0).ok_or(())?;
        let candidate = &bytes[..end];

        match self {
            Encoding::Ascii => {
                if candidate
                    .iter()
                    .all(|b| b.is_ascii_graphic() || *b == b' ' || matches!(b, 0x07..=0x0D))
                {
                    Ok(end + 1)
                } else {
                    Err(())
                }
            }
            Encoding::Utf8 => core::str::from_utf8(candidate)
                .map(|_| end + 1)
                .map_err(|_| ()),
            Encoding::ShiftJis => {
                let (_, _, had_errors) = encoding_rs::SHIFT_JIS.decode(candidate);
                if had_errors {
                    Err(())
                } else {
                    Ok(end + 1)
                }
            }
        }
    }
}

// TODO: improve this thingy
pub(crate) fn escape_string(val: &str) -> String {
    let mut escaped_buf = Vec::with_capacity(val.len());
    let bytes = val.as_bytes();

    for b in bytes {
        // The cases of this switch are sorted by ASCII order
        match b {
            0x07 => {
                // \a
                escaped_buf.push(b'\\');
                escaped_buf.push(b'a');
            }
            b'\t' => {
                escaped_buf.push(b'\\');
                escaped_buf.push(b't');
            }
            b'\n' => {
                escaped_buf.push(b'\\');
                escaped_buf.push(b'n');
            }
            0x0C => {
                // \f
                escaped_buf.push(b'\\');
                escaped_buf.push(b'f');
            }
            b'\r' => {
                escaped_buf.push(b'\\');
                escaped_buf.push(b'r');
            }
            b'\"' => {
                escaped_buf.push(b'\\');
                escaped_buf.push(b'"');
            }
            b'\\' => {
                // \a
                escaped_buf.push(b'\\');
                escaped_buf.push(b'\\');
            }
            x => escaped_buf.push(*x),
        }
    }

    String::from_utf8(escaped_buf).unwrap()
}
