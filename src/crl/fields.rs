// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::Crl;
use crate::error::{CrlError, Result};
use crate::fill::Fill;

use chrono::{DateTime, Utc};
use const_oid::ObjectIdentifier;
use der::Decode;
use pkix::{name, SignAlgorithm};
use x509::name::Name;
use x509::time::Time;

/// An owned copy of one revoked certificate entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevokedEntry {
    /// Two's complement content octets of the serial number.
    pub serial: Vec<u8>,
    pub revocation_date: Option<DateTime<Utc>>,
}

fn timestamp(time: &Time) -> DateTime<Utc> {
    time.to_system_time().into()
}

impl Crl {
    /// The CRL version, counted from one. Lists without a version field
    /// are version 1.
    pub fn version(&self) -> Result<u8> {
        Ok(self.tree()?.version.map_or(1, |v| v as u8 + 1))
    }

    /// `thisUpdate`, or `None` when the handle is empty.
    pub fn this_update(&self) -> Option<DateTime<Utc>> {
        Some(timestamp(&self.tree().ok()?.this_update))
    }

    /// `nextUpdate`, or `None` when it is absent or the handle is empty.
    pub fn next_update(&self) -> Option<DateTime<Utc>> {
        self.tree().ok()?.next_update.as_ref().map(timestamp)
    }

    pub fn signature_algorithm(&self) -> Result<SignAlgorithm> {
        Ok(SignAlgorithm::from(self.tree()?.signature_algorithm))
    }

    /// The signature value. Bit strings that do not end on an octet
    /// boundary are rejected.
    pub fn signature(&self, buf: &mut [u8]) -> Result<Fill> {
        let tree = self.tree()?;
        if tree.unused_bits != 0 {
            return Err(CrlError::Certificate(
                "signature is not a whole number of octets",
            ));
        }
        Ok(Fill::copy(&tree.signature, buf))
    }

    fn issuer(&self) -> Result<Name<'_>> {
        Ok(Name::from_der(self.raw_issuer_dn()?)?)
    }

    /// The issuer name rendered as an RFC 4514 string.
    pub fn issuer_dn(&self, buf: &mut [u8]) -> Result<Fill> {
        Ok(Fill::copy(self.issuer_dn_string()?.as_bytes(), buf))
    }

    pub fn issuer_dn_string(&self) -> Result<String> {
        Ok(name::to_rfc4514(&self.issuer()?)?)
    }

    /// The `index`-th value of attribute `oid` in the issuer name.
    ///
    /// With `raw` set the value's DER encoding is returned. Otherwise
    /// string values come back as text and anything else as `#` followed
    /// by hex.
    pub fn issuer_dn_by_oid(
        &self,
        oid: ObjectIdentifier,
        index: usize,
        raw: bool,
        buf: &mut [u8],
    ) -> Result<Fill> {
        let value = name::attribute_value(&self.issuer()?, oid, index, raw)?
            .ok_or(CrlError::RequestedDataNotAvailable)?;
        Ok(Fill::copy(&value, buf))
    }

    /// Dotted OID of the `index`-th attribute of the issuer name.
    pub fn dn_oid(&self, index: usize, buf: &mut [u8]) -> Result<Fill> {
        let issuer = self.issuer()?;
        let atv = name::attributes(&issuer)
            .nth(index)
            .ok_or(CrlError::RequestedDataNotAvailable)?;
        Ok(Fill::copy(atv.oid.to_string().as_bytes(), buf))
    }

    /// The issuer name exactly as encoded in the signed data.
    pub fn raw_issuer_dn(&self) -> Result<&[u8]> {
        let span = self.tree()?.issuer.clone();
        self.der()?
            .get(span)
            .ok_or(CrlError::Certificate("issuer lies outside the CRL"))
    }

    pub fn raw_issuer_dn_into(&self, buf: &mut [u8]) -> Result<Fill> {
        Ok(Fill::copy(self.raw_issuer_dn()?, buf))
    }

    /// Number of revoked entries; zero when the list has none.
    pub fn crt_count(&self) -> Result<usize> {
        Ok(self.tree()?.revoked.len())
    }

    /// Serial number of the `index`-th revoked entry, as the content
    /// octets of its INTEGER.
    pub fn crt_serial(&self, index: usize, buf: &mut [u8]) -> Result<Fill> {
        let entry = self
            .tree()?
            .entry(index)
            .ok_or(CrlError::RequestedDataNotAvailable)?;
        Ok(Fill::copy(&entry.serial, buf))
    }

    pub fn revocation_time(&self, index: usize) -> Result<DateTime<Utc>> {
        let entry = self
            .tree()?
            .entry(index)
            .ok_or(CrlError::RequestedDataNotAvailable)?;
        Ok(timestamp(&entry.revocation_date))
    }

    pub fn revoked_entries(&self) -> Result<Vec<RevokedEntry>> {
        Ok(self
            .tree()?
            .revoked
            .iter()
            .map(|entry| RevokedEntry {
                serial: entry.serial.clone(),
                revocation_date: Some(timestamp(&entry.revocation_date)),
            })
            .collect())
    }

    /// Dotted OID of the `index`-th CRL extension.
    pub fn extension_oid(&self, index: usize, buf: &mut [u8]) -> Result<Fill> {
        Ok(self.extension_info(index, buf)?.0)
    }

    /// Dotted OID and critical flag of the `index`-th CRL extension.
    ///
    /// Fails with [`CrlError::RequestedDataNotAvailable`] once `index`
    /// reaches the number of extensions, which ends an enumeration.
    pub fn extension_info(&self, index: usize, buf: &mut [u8]) -> Result<(Fill, bool)> {
        let ext = self
            .tree()?
            .extension(index)
            .ok_or(CrlError::RequestedDataNotAvailable)?;
        Ok((Fill::copy(ext.oid.to_string().as_bytes(), buf), ext.critical))
    }

    /// Raw value of the `index`-th CRL extension.
    pub fn extension_data(&self, index: usize, buf: &mut [u8]) -> Result<Fill> {
        let ext = self
            .tree()?
            .extension(index)
            .ok_or(CrlError::RequestedDataNotAvailable)?;
        Ok(Fill::copy(&ext.value, buf))
    }

    /// Raw value and critical flag of the `occurrence`-th extension
    /// identified by `oid`.
    pub fn extension_by_oid(
        &self,
        oid: ObjectIdentifier,
        occurrence: usize,
        buf: &mut [u8],
    ) -> Result<(Fill, bool)> {
        let ext = self
            .tree()?
            .extension_by_oid(oid, occurrence)
            .ok_or(CrlError::RequestedDataNotAvailable)?;
        Ok((Fill::copy(&ext.value, buf), ext.critical))
    }
}
