// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::error::{CrlError, Result};

/// Outcome of copying a variable-length field into a caller buffer.
///
/// The buffer is either filled with the whole field or left untouched.
/// An empty buffer is the usual way to ask for the size alone.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Fill {
    /// The field was copied to the front of the buffer; holds its length.
    Filled(usize),
    /// Nothing was copied; holds the length the buffer needs.
    TooSmall(usize),
}

impl Fill {
    /// Copies `src` into `buf` if it fits.
    pub fn copy(src: &[u8], buf: &mut [u8]) -> Self {
        match buf.get_mut(..src.len()) {
            Some(dst) => {
                dst.copy_from_slice(src);
                Fill::Filled(src.len())
            }
            None => Fill::TooSmall(src.len()),
        }
    }

    /// Exact length of the field, whether or not it was copied.
    pub fn len(self) -> usize {
        match self {
            Fill::Filled(len) | Fill::TooSmall(len) => len,
        }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    pub fn is_filled(self) -> bool {
        matches!(self, Fill::Filled(..))
    }

    /// Turns [`Fill::TooSmall`] into [`CrlError::ShortBuffer`].
    pub fn filled(self) -> Result<usize> {
        match self {
            Fill::Filled(len) => Ok(len),
            Fill::TooSmall(required) => Err(CrlError::ShortBuffer { required }),
        }
    }
}
