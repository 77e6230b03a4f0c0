// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use std::ops::Range;

use der::asn1::{AnyRef, BitStringRef};
use der::{Header, Reader, Sequence, SliceReader, Tag, Tagged};
use spki::AlgorithmIdentifier;
use x509::ext::{Extension, Extensions};
use x509::name::Name;
use x509::time::Time;
use x509::Version;

/// ASN.1
/// CertificateList ::= SEQUENCE {
///     tbsCertList          TBSCertList,
///     signatureAlgorithm   AlgorithmIdentifier,
///     signatureValue       BIT STRING
/// }
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct CertificateList<'a> {
    pub tbs_cert_list: TbsCertList<'a>,
    pub signature_algorithm: AlgorithmIdentifier<'a>,
    pub signature: BitStringRef<'a>,
}

/// ASN.1
/// TBSCertList ::= SEQUENCE {
///     version                 Version OPTIONAL,
///     signature               AlgorithmIdentifier,
///     issuer                  Name,
///     thisUpdate              Time,
///     nextUpdate              Time OPTIONAL,
///     revokedCertificates     SEQUENCE OF SEQUENCE { ... } OPTIONAL,
///     crlExtensions           [0] EXPLICIT Extensions OPTIONAL
/// }
///
/// `version` is optional here: v1 lists routinely omit it.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct TbsCertList<'a> {
    pub version: Option<Version>,
    pub signature: AlgorithmIdentifier<'a>,
    pub issuer: Name<'a>,
    pub this_update: Time,
    pub next_update: Option<Time>,
    pub revoked_certificates: Option<Vec<RevokedCert<'a>>>,

    #[asn1(context_specific = "0", tag_mode = "EXPLICIT", optional = "true")]
    pub crl_extensions: Option<Extensions<'a>>,
}

/// ASN.1
/// RevokedCertificate ::= SEQUENCE {
///     userCertificate         CertificateSerialNumber,
///     revocationDate          Time,
///     crlEntryExtensions      Extensions OPTIONAL
/// }
///
/// The serial is kept as an untyped INTEGER: serials issued in the wild
/// are sometimes negative, which `UIntRef` refuses.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct RevokedCert<'a> {
    pub serial_number: AnyRef<'a>,
    pub revocation_date: Time,
    pub crl_entry_extensions: Option<Extensions<'a>>,
}

impl<'a> RevokedCert<'a> {
    /// Two's complement content octets of the serial number.
    pub fn serial(&self) -> der::Result<&'a [u8]> {
        integer_content(self.serial_number)
    }
}

/// Content octets of a DER INTEGER, sign bit included.
pub fn integer_content(any: AnyRef<'_>) -> der::Result<&[u8]> {
    if any.tag() != Tag::Integer {
        return Err(any.tag().unexpected_error(Some(Tag::Integer)));
    }
    match any.value() {
        [] => Err(Tag::Integer.value_error()),
        bytes => Ok(bytes),
    }
}

pub trait TbsCertListExt<'a> {
    /// All CRL extensions in encoding order.
    fn extension_list(&self) -> &[Extension<'a>];

    /// The revoked entries, empty when the sequence is absent.
    fn revoked(&self) -> &[RevokedCert<'a>];
}

impl<'a> TbsCertListExt<'a> for TbsCertList<'a> {
    fn extension_list(&self) -> &[Extension<'a>] {
        self.crl_extensions.as_deref().unwrap_or(&[])
    }

    fn revoked(&self) -> &[RevokedCert<'a>] {
        self.revoked_certificates.as_deref().unwrap_or(&[])
    }
}

/// Locates `tbsCertList.issuer` inside a DER encoded `CertificateList`.
///
/// The returned range indexes `der` directly and covers the full
/// tag-length-value of the issuer name, exactly as it was signed.
pub fn issuer_span(der: &[u8]) -> der::Result<Range<usize>> {
    let mut reader = SliceReader::new(der)?;

    // Step inside CertificateList and then TBSCertList.
    reader.decode::<Header>()?;
    reader.decode::<Header>()?;

    reader.decode::<Option<Version>>()?;
    reader.decode::<AlgorithmIdentifier<'_>>()?;

    let start = usize::try_from(reader.position())?;
    reader.decode::<Name<'_>>()?;
    let end = usize::try_from(reader.position())?;

    Ok(start..end)
}
