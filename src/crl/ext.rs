// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

//! Decoders for the Authority Key Identifier and CRL Number extensions.

use super::Crl;
use crate::error::{CrlError, Result};
use crate::fill::Fill;

use der::asn1::AnyRef;
use der::{Decode, Encode};
use pkix::crl::integer_content;
use pkix::oids::{ID_CE_AUTHORITY_KEY_IDENTIFIER, ID_CE_CRL_NUMBER};
use pkix::{name, AuthorityKeyIdentifier};
use tracing::debug;
use x509::ext::pkix::name::GeneralName;

/// The form of a `GeneralName`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum GeneralNameKind {
    OtherName,
    Rfc822,
    Dns,
    Directory,
    EdiParty,
    Uri,
    Ip,
    RegisteredId,
}

/// One `authorityCertIssuer` entry of an Authority Key Identifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AuthorityCertIssuer {
    pub kind: GeneralNameKind,
    /// Outcome of copying the name into the caller's name buffer.
    pub name: Fill,
    /// Outcome of copying `authorityCertSerialNumber`, when a serial buffer
    /// was given and the field is present.
    pub serial: Option<Fill>,
    pub critical: bool,
}

/// Flattens a `GeneralName` into its kind and a byte form.
///
/// Strings are returned as is, directory names as RFC 4514 text, IP
/// addresses as raw octets, registered ids as dotted text and the
/// structured forms as DER.
fn general_name(gn: &GeneralName<'_>) -> der::Result<(GeneralNameKind, Vec<u8>)> {
    Ok(match gn {
        GeneralName::OtherName(other) => (GeneralNameKind::OtherName, other.to_vec()?),
        GeneralName::Rfc822Name(s) => (GeneralNameKind::Rfc822, s.to_string().into_bytes()),
        GeneralName::DnsName(s) => (GeneralNameKind::Dns, s.to_string().into_bytes()),
        GeneralName::DirectoryName(dn) => {
            (GeneralNameKind::Directory, name::to_rfc4514(dn)?.into_bytes())
        }
        GeneralName::EdiPartyName(edi) => (GeneralNameKind::EdiParty, edi.to_vec()?),
        GeneralName::UniformResourceIdentifier(s) => {
            (GeneralNameKind::Uri, s.to_string().into_bytes())
        }
        GeneralName::IpAddress(ip) => (GeneralNameKind::Ip, ip.as_bytes().to_vec()),
        GeneralName::RegisteredId(oid) => {
            (GeneralNameKind::RegisteredId, oid.to_string().into_bytes())
        }
    })
}

impl Crl {
    /// Decodes the first Authority Key Identifier extension.
    fn authority_key(&self) -> Result<(AuthorityKeyIdentifier<'_>, bool)> {
        let ext = self
            .tree()?
            .extension_by_oid(ID_CE_AUTHORITY_KEY_IDENTIFIER, 0)
            .ok_or(CrlError::RequestedDataNotAvailable)?;

        if ext.value.is_empty() {
            return Err(CrlError::RequestedDataNotAvailable);
        }

        let aki = AuthorityKeyIdentifier::from_der(&ext.value).map_err(|e| {
            debug!("authority key identifier is malformed: {e}");
            CrlError::Decode(e)
        })?;

        Ok((aki, ext.critical))
    }

    /// The `keyIdentifier` of the Authority Key Identifier extension.
    ///
    /// Extensions that only name the issuer fail with
    /// [`CrlError::UnsupportedExtension`]; use
    /// [`authority_key_gn_serial`](Crl::authority_key_gn_serial) for those.
    pub fn authority_key_id(&self, buf: &mut [u8]) -> Result<(Fill, bool)> {
        let (aki, critical) = self.authority_key()?;
        let id = aki
            .key_identifier
            .ok_or(CrlError::UnsupportedExtension)?;
        Ok((Fill::copy(id.as_bytes(), buf), critical))
    }

    /// The `seq`-th `authorityCertIssuer` name of the Authority Key
    /// Identifier extension, and optionally `authorityCertSerialNumber` as
    /// the content octets of its INTEGER.
    ///
    /// Call with increasing `seq` until
    /// [`CrlError::RequestedDataNotAvailable`] to walk every name.
    pub fn authority_key_gn_serial(
        &self,
        seq: usize,
        name_buf: &mut [u8],
        serial_buf: Option<&mut [u8]>,
    ) -> Result<AuthorityCertIssuer> {
        let (aki, critical) = self.authority_key()?;
        let gn = aki
            .authority_cert_issuer
            .as_deref()
            .unwrap_or(&[])
            .get(seq)
            .ok_or(CrlError::RequestedDataNotAvailable)?;

        let (kind, bytes) = general_name(gn)?;
        let serial = match (serial_buf, aki.authority_cert_serial_number) {
            (Some(buf), Some(serial)) => Some(Fill::copy(serial.as_bytes(), buf)),
            _ => None,
        };

        Ok(AuthorityCertIssuer {
            kind,
            name: Fill::copy(&bytes, name_buf),
            serial,
            critical,
        })
    }

    /// The CRL Number as the content octets of its INTEGER.
    pub fn number(&self, buf: &mut [u8]) -> Result<(Fill, bool)> {
        let ext = self
            .tree()?
            .extension_by_oid(ID_CE_CRL_NUMBER, 0)
            .ok_or(CrlError::RequestedDataNotAvailable)?;

        let number = AnyRef::from_der(&ext.value)
            .and_then(integer_content)
            .map_err(|e| {
                debug!("CRL number is malformed: {e}");
                CrlError::Decode(e)
            })?;

        Ok((Fill::copy(number, buf), ext.critical))
    }
}
