// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

//! Owned form of a decoded `CertificateList`.

use std::ops::Range;

use const_oid::ObjectIdentifier;
use der::Decode;
use pkix::{issuer_span, CertificateList, TbsCertListExt};
use x509::time::Time;
use x509::Version;

#[derive(Clone, Debug)]
pub(crate) struct Entry {
    pub serial: Vec<u8>,
    pub revocation_date: Time,
}

#[derive(Clone, Debug)]
pub(crate) struct Ext {
    pub oid: ObjectIdentifier,
    pub critical: bool,
    pub value: Vec<u8>,
}

/// Every field the accessors read, decoded once at import.
///
/// The issuer is kept as a byte range into the imported DER and decoded
/// again on request; everything else is indexed directly.
#[derive(Clone, Debug)]
pub(crate) struct Tree {
    pub version: Option<Version>,
    pub issuer: Range<usize>,
    pub this_update: Time,
    pub next_update: Option<Time>,
    pub revoked: Vec<Entry>,
    pub extensions: Vec<Ext>,
    pub signature_algorithm: ObjectIdentifier,
    pub signature: Vec<u8>,
    pub unused_bits: u8,
}

impl Tree {
    pub fn decode(der: &[u8]) -> der::Result<Self> {
        let crl = CertificateList::from_der(der)?;
        let tbs = &crl.tbs_cert_list;

        let revoked = tbs
            .revoked()
            .iter()
            .map(|entry| {
                Ok(Entry {
                    serial: entry.serial()?.to_vec(),
                    revocation_date: entry.revocation_date,
                })
            })
            .collect::<der::Result<Vec<_>>>()?;

        let extensions = tbs
            .extension_list()
            .iter()
            .map(|ext| Ext {
                oid: ext.extn_id,
                critical: ext.critical,
                value: ext.extn_value.to_vec(),
            })
            .collect();

        Ok(Self {
            version: tbs.version,
            issuer: issuer_span(der)?,
            this_update: tbs.this_update,
            next_update: tbs.next_update,
            revoked,
            extensions,
            signature_algorithm: crl.signature_algorithm.oid,
            signature: crl.signature.raw_bytes().to_vec(),
            unused_bits: crl.signature.unused_bits(),
        })
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.revoked.get(index)
    }

    pub fn extension(&self, index: usize) -> Option<&Ext> {
        self.extensions.get(index)
    }

    /// The `occurrence`-th extension carrying `oid`.
    ///
    /// Occurrences are counted from zero among matching extensions only,
    /// so repeated extensions can be walked in turn.
    pub fn extension_by_oid(&self, oid: ObjectIdentifier, occurrence: usize) -> Option<&Ext> {
        self.extensions
            .iter()
            .filter(|ext| ext.oid == oid)
            .nth(occurrence)
    }
}
