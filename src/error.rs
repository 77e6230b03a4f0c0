// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display, Formatter};

use pkix::pem::PemError;

pub type Result<T, E = CrlError> = std::result::Result<T, E>;

#[derive(Debug)]
#[non_exhaustive]
pub enum CrlError {
    /// The handle holds no decoded list.
    InvalidRequest,
    /// An allocation could not be satisfied.
    Memory,
    /// The DER structure was rejected.
    Decode(der::Error),
    /// The PEM envelope could not be located or decoded.
    Base64Decoding(String),
    /// A caller-supplied container is too small; nothing was written.
    ShortBuffer { required: usize },
    /// The requested entry, extension or optional field is absent.
    RequestedDataNotAvailable,
    /// The Authority Key Identifier only carries the issuer name form.
    UnsupportedExtension,
    /// A field is structurally invalid.
    Certificate(&'static str),
    /// Re-encoding the list failed.
    Encode(String),
}

impl CrlError {
    /// The size a retry needs, if this is a short buffer error.
    pub fn required_size(&self) -> Option<usize> {
        match self {
            CrlError::ShortBuffer { required } => Some(*required),
            _ => None,
        }
    }
}

impl Display for CrlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CrlError::InvalidRequest => write!(f, "CRL handle is not initialized"),
            CrlError::Memory => write!(f, "memory allocation failed"),
            CrlError::Decode(e) => write!(f, "ASN.1 DER decoding failed: {}", e),
            CrlError::Base64Decoding(message) => {
                write!(f, "base64 decoding failed: {}", message)
            }
            CrlError::ShortBuffer { required } => {
                write!(f, "buffer too short, {} required", required)
            }
            CrlError::RequestedDataNotAvailable => write!(f, "requested data not available"),
            CrlError::UnsupportedExtension => {
                write!(f, "authority key identifier has no key identifier")
            }
            CrlError::Certificate(message) => write!(f, "invalid CRL: {}", message),
            CrlError::Encode(message) => write!(f, "encoding failed: {}", message),
        }
    }
}

impl std::error::Error for CrlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CrlError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<der::Error> for CrlError {
    fn from(e: der::Error) -> Self {
        CrlError::Decode(e)
    }
}

impl From<PemError> for CrlError {
    fn from(e: PemError) -> Self {
        match e {
            PemError::Encode(e) => CrlError::Encode(e.to_string()),
            e => CrlError::Base64Decoding(e.to_string()),
        }
    }
}

impl From<std::collections::TryReserveError> for CrlError {
    fn from(_: std::collections::TryReserveError) -> Self {
        CrlError::Memory
    }
}
