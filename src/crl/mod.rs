// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

//! The CRL handle and its field accessors.

mod ext;
mod fields;
pub(crate) mod list;
mod tree;


pub use ext::{AuthorityCertIssuer, GeneralNameKind};
pub use fields::RevokedEntry;

use super::error::{CrlError, Result};
use super::fill::Fill;

use pkix::pem::{self, CRL_LABEL};
use serde::Deserialize;
use tracing::debug;
use tree::Tree;

/// Encoding of CRL bytes handed to or produced by a [`Crl`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Der,
    Pem,
}

/// A single decoded certificate revocation list.
///
/// A handle starts out uninitialized and is populated by
/// [`import`](Crl::import). Accessors on an uninitialized handle fail
/// with [`CrlError::InvalidRequest`], timestamps read as `None`. Once
/// imported the list is read only; a later import replaces it wholesale.
#[derive(Debug, Default)]
pub struct Crl {
    inner: Option<Inner>,
}

#[derive(Debug)]
struct Inner {
    der: Vec<u8>,
    tree: Tree,
}

impl Crl {
    /// Creates an uninitialized handle.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_der(der: &[u8]) -> Result<Self> {
        let mut crl = Self::new();
        crl.import(der, Format::Der)?;
        Ok(crl)
    }

    pub fn from_pem(pem: &[u8]) -> Result<Self> {
        let mut crl = Self::new();
        crl.import(pem, Format::Pem)?;
        Ok(crl)
    }

    /// Decodes `data` into this handle.
    ///
    /// PEM input is searched for the first `X509 CRL` block. The list is
    /// decoded once here; accessors only index the result. On failure the
    /// handle keeps whatever it held before.
    pub fn import(&mut self, data: &[u8], format: Format) -> Result<()> {
        let der = match format {
            Format::Der => {
                let mut der = Vec::new();
                der.try_reserve_exact(data.len())?;
                der.extend_from_slice(data);
                der
            }
            Format::Pem => pem::decode(data).map_err(|e| {
                debug!("PEM decoding of CRL failed: {e}");
                CrlError::from(e)
            })?,
        };

        let tree = Tree::decode(&der).map_err(|e| {
            debug!("DER decoding of CRL failed: {e}");
            CrlError::Decode(e)
        })?;

        self.inner = Some(Inner { der, tree });
        Ok(())
    }

    /// Releases the decoded list. Calling this on an uninitialized
    /// handle does nothing.
    pub fn deinit(&mut self) {
        self.inner = None;
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.is_some()
    }

    /// Encodes the list into `buf`.
    pub fn export(&self, format: Format, buf: &mut [u8]) -> Result<Fill> {
        Ok(Fill::copy(&self.export_to_vec(format)?, buf))
    }

    /// Encodes the list into a freshly allocated buffer.
    ///
    /// DER output is the imported encoding, which decoding has already
    /// checked to be DER. PEM output is wrapped in an `X509 CRL` envelope
    /// with LF line endings.
    pub fn export_to_vec(&self, format: Format) -> Result<Vec<u8>> {
        let der = self.der()?;
        match format {
            Format::Der => {
                let mut out = Vec::new();
                out.try_reserve_exact(der.len())?;
                out.extend_from_slice(der);
                Ok(out)
            }
            Format::Pem => Ok(pem::encode(CRL_LABEL, der)?.into_bytes()),
        }
    }

    /// Copies the handle by encoding it and decoding the result.
    pub fn try_clone(&self) -> Result<Self> {
        Self::from_der(&self.export_to_vec(Format::Der)?)
    }

    /// The DER bytes the handle was imported from.
    pub(crate) fn der(&self) -> Result<&[u8]> {
        Ok(&self.inner()?.der)
    }

    pub(crate) fn tree(&self) -> Result<&Tree> {
        Ok(&self.inner()?.tree)
    }

    fn inner(&self) -> Result<&Inner> {
        self.inner.as_ref().ok_or(CrlError::InvalidRequest)
    }
}
