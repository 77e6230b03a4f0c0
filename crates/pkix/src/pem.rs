// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

//! PEM envelope codec for revocation lists.

use std::fmt::{self, Display};

use pem_rfc7468::LineEnding;
use rustls_pemfile::Item;
use tracing::trace;

/// Label of a PEM encoded CRL.
pub const CRL_LABEL: &str = "X509 CRL";

/// Pre-encapsulation boundary of a PEM encoded CRL, up to the label.
pub const CRL_BOUNDARY: &[u8] = b"-----BEGIN X509 CRL";

#[derive(Debug)]
#[non_exhaustive]
pub enum PemError {
    /// No `X509 CRL` block was found.
    Missing,
    /// A block was found but its body could not be decoded.
    Malformed(String),
    Encode(pem_rfc7468::Error),
}

impl Display for PemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PemError::Missing => write!(f, "no `{}` PEM block found", CRL_LABEL),
            PemError::Malformed(message) => write!(f, "malformed PEM block: {}", message),
            PemError::Encode(e) => write!(f, "PEM encoding failed: {}", e),
        }
    }
}

impl std::error::Error for PemError {}

/// Decodes the first [`CRL_LABEL`] block found in `bytes`.
///
/// Blocks with other labels ahead of it are skipped.
pub fn decode(bytes: &[u8]) -> Result<Vec<u8>, PemError> {
    let mut reader = bytes;
    loop {
        let item = rustls_pemfile::read_one(&mut reader)
            .map_err(|e| PemError::Malformed(e.to_string()))?;

        match item {
            Some(Item::Crl(der)) => return Ok(der),
            Some(_) => trace!("skipping PEM block not labelled `{CRL_LABEL}`"),
            None => return Err(PemError::Missing),
        }
    }
}

/// Wraps `der` in a PEM envelope labelled `label`.
pub fn encode(label: &'static str, der: &[u8]) -> Result<String, PemError> {
    pem_rfc7468::encode_string(label, LineEnding::LF, der).map_err(PemError::Encode)
}

/// Finds the next CRL pre-encapsulation boundary at or after `from`.
pub fn find_boundary(bytes: &[u8], from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(CRL_BOUNDARY.len())
        .position(|w| w == CRL_BOUNDARY)
        .map(|pos| from + pos)
}
