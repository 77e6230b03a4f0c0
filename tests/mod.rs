// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use std::sync::Once;
use std::time::{Duration, Instant};

use crlkit::pkix::const_oid::db::rfc5280::{ID_CE_AUTHORITY_KEY_IDENTIFIER, ID_CE_CRL_NUMBER};
use crlkit::pkix::const_oid::ObjectIdentifier;
use crlkit::pkix::der::asn1::{
    AnyRef, BitStringRef, Ia5StringRef, OctetStringRef, SetOfVec, UIntRef, UtcTime,
};
use crlkit::pkix::der::{Encode, Tag};
use crlkit::pkix::pem::{self, CRL_LABEL};
use crlkit::pkix::spki::AlgorithmIdentifier;
use crlkit::pkix::x509::attr::AttributeTypeAndValue;
use crlkit::pkix::x509::ext::pkix::name::GeneralName;
use crlkit::pkix::x509::ext::Extension;
use crlkit::pkix::x509::name::{Name, RdnSequence, RelativeDistinguishedName};
use crlkit::pkix::x509::time::Time;
use crlkit::pkix::x509::Version;
use crlkit::pkix::{AuthorityKeyIdentifier, CertificateList, RevokedCert, TbsCertList};
use crlkit::{
    import_list, import_list_grow, Crl, CrlError, Fill, Format, GeneralNameKind, ListConfig,
    Overflow,
};
use rstest::rstest;

static TRACING: Once = Once::new();

fn init_tracing() {
    if std::env::var("RUST_LOG_JSON").is_ok() {
        tracing_subscriber::fmt::fmt()
            .json()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }
}

const CN: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");
const SHA256_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");

fn issuer() -> Name<'static> {
    let atv = AttributeTypeAndValue {
        oid: CN,
        value: AnyRef::new(Tag::Utf8String, b"Integration CA").unwrap(),
    };
    RdnSequence(vec![RelativeDistinguishedName(
        SetOfVec::try_from(vec![atv]).unwrap(),
    )])
}

fn time(secs: u64) -> Time {
    Time::UtcTime(UtcTime::from_unix_duration(Duration::from_secs(secs)).unwrap())
}

fn entry(serial: &[u8], secs: u64) -> RevokedCert<'_> {
    RevokedCert {
        serial_number: AnyRef::new(Tag::Integer, serial).unwrap(),
        revocation_date: time(secs),
        crl_entry_extensions: None,
    }
}

/// Encodes a v2 CRL with two revoked entries, a CRL Number of `number`
/// and an optional Authority Key Identifier value.
fn crl_der(number: u16, aki: Option<&[u8]>) -> Vec<u8> {
    let revoked = vec![
        entry(&[0x11, 0x22, 0x33], 1_650_000_000),
        entry(&[0x44], 1_650_000_100),
    ];
    crl_der_with(number, aki, revoked)
}

fn crl_der_with(number: u16, aki: Option<&[u8]>, revoked: Vec<RevokedCert<'_>>) -> Vec<u8> {
    let algorithm = AlgorithmIdentifier {
        oid: SHA256_WITH_RSA,
        parameters: None,
    };
    let number = UIntRef::new(&number.to_be_bytes()).unwrap().to_vec().unwrap();

    let mut extensions = vec![Extension {
        extn_id: ID_CE_CRL_NUMBER,
        critical: false,
        extn_value: &number,
    }];
    if let Some(aki) = aki {
        extensions.push(Extension {
            extn_id: ID_CE_AUTHORITY_KEY_IDENTIFIER,
            critical: false,
            extn_value: aki,
        });
    }

    CertificateList {
        tbs_cert_list: TbsCertList {
            version: Some(Version::V2),
            signature: algorithm,
            issuer: issuer(),
            this_update: time(1_650_000_000),
            next_update: Some(time(1_650_086_400)),
            revoked_certificates: Some(revoked),
            crl_extensions: Some(extensions),
        },
        signature_algorithm: algorithm,
        signature: BitStringRef::from_bytes(&[0x5a; 256]).unwrap(),
    }
    .to_vec()
    .unwrap()
}

fn crl_pem(number: u16) -> String {
    pem::encode(CRL_LABEL, &crl_der(number, None)).unwrap()
}

fn bundle(count: u16) -> String {
    (1..=count).map(crl_pem).collect()
}

fn number_of(crl: &Crl) -> u16 {
    let mut buf = [0u8; 2];
    let len = crl.number(&mut buf).unwrap().0.filled().unwrap();
    buf[..len].iter().fold(0, |n, b| n << 8 | u16::from(*b))
}

type Accessor = fn(&Crl, &mut [u8]) -> crlkit::Result<Fill>;

#[rstest]
#[case::issuer_dn(|crl: &Crl, buf: &mut [u8]| crl.issuer_dn(buf))]
#[case::raw_issuer_dn(|crl: &Crl, buf: &mut [u8]| crl.raw_issuer_dn_into(buf))]
#[case::signature(|crl: &Crl, buf: &mut [u8]| crl.signature(buf))]
#[case::serial(|crl: &Crl, buf: &mut [u8]| crl.crt_serial(0, buf))]
#[case::extension_oid(|crl: &Crl, buf: &mut [u8]| crl.extension_oid(1, buf))]
#[case::extension_value(|crl: &Crl, buf: &mut [u8]| crl.extension_data(0, buf))]
#[case::export(|crl: &Crl, buf: &mut [u8]| crl.export(Format::Pem, buf))]
fn size_negotiation(#[case] accessor: Accessor) {
    let aki = key_id_aki();
    let crl = Crl::from_der(&crl_der(7, Some(&aki))).unwrap();

    let required = match accessor(&crl, &mut []).unwrap() {
        Fill::TooSmall(required) => required,
        Fill::Filled(len) => panic!("empty buffer filled with {len} bytes"),
    };
    assert!(required > 0);

    let mut short = vec![0xeeu8; required - 1];
    let err = accessor(&crl, &mut short).unwrap().filled().unwrap_err();
    assert_eq!(err.required_size(), Some(required));
    assert!(short.iter().all(|b| *b == 0xee));

    let mut exact = vec![0u8; required];
    assert_eq!(accessor(&crl, &mut exact).unwrap(), Fill::Filled(required));
}

#[test]
fn extension_enumeration_ends() {
    let aki = key_id_aki();
    let crl = Crl::from_der(&crl_der(1, Some(&aki))).unwrap();
    let mut buf = [0u8; 32];

    for index in 0..2 {
        assert!(crl.extension_info(index, &mut buf).is_ok());
    }
    assert!(matches!(
        crl.extension_info(2, &mut buf),
        Err(CrlError::RequestedDataNotAvailable)
    ));
}

#[test]
fn imports_bundle_in_order() {
    TRACING.call_once(init_tracing);

    let crls = import_list(bundle(3).as_bytes(), Format::Pem, 3, Overflow::Fail).unwrap();
    assert_eq!(crls.iter().map(number_of).collect::<Vec<_>>(), vec![1, 2, 3]);
    for crl in &crls {
        assert_eq!(crl.crt_count().unwrap(), 2);
        assert_eq!(crl.issuer_dn_string().unwrap(), "CN=Integration CA");
    }
}

#[test]
fn corrupt_block_rolls_back() {
    TRACING.call_once(init_tracing);

    let mut der = crl_der(2, None);
    der.truncate(der.len() / 2);

    let data = [crl_pem(1), pem::encode(CRL_LABEL, &der).unwrap(), crl_pem(3)].concat();

    let result = import_list(data.as_bytes(), Format::Pem, 3, Overflow::Truncate);
    assert!(matches!(result, Err(CrlError::Decode(..))));
}

#[test]
fn grows_past_default_capacity() {
    TRACING.call_once(init_tracing);

    let config = ListConfig::default();
    let count = config.initial_capacity as u16 + 3;

    let crls = import_list_grow(bundle(count).as_bytes(), Format::Pem, &config).unwrap();
    assert_eq!(crls.len(), usize::from(count));
    assert_eq!(number_of(&crls[0]), 1);
    assert_eq!(number_of(crls.last().unwrap()), count);
}

#[test]
fn grows_with_configured_capacity() {
    let config = ListConfig::from_toml("initial_capacity = 1\noverflow = \"fail\"").unwrap();
    assert_eq!(config.overflow, Overflow::Fail);

    let data = bundle(4);
    let err = import_list(data.as_bytes(), Format::Pem, 1, config.overflow).unwrap_err();
    assert_eq!(err.required_size(), Some(4));

    let crls = import_list_grow(data.as_bytes(), Format::Pem, &config).unwrap();
    assert_eq!(crls.len(), 4);
}

fn key_id_aki() -> Vec<u8> {
    AuthorityKeyIdentifier {
        key_identifier: Some(OctetStringRef::new(&[0x01, 0x02, 0x03, 0x04]).unwrap()),
        authority_cert_issuer: None,
        authority_cert_serial_number: None,
    }
    .to_vec()
    .unwrap()
}

#[test]
fn authority_key_identifier_forms() {
    let aki = key_id_aki();
    let crl = Crl::from_der(&crl_der(1, Some(&aki))).unwrap();
    let mut buf = [0u8; 64];
    let (fill, _) = crl.authority_key_id(&mut buf).unwrap();
    assert_eq!(&buf[..fill.filled().unwrap()], &[0x01, 0x02, 0x03, 0x04]);

    let aki = AuthorityKeyIdentifier {
        key_identifier: None,
        authority_cert_issuer: Some(vec![GeneralName::UniformResourceIdentifier(
            Ia5StringRef::new("http://ca.example.com/").unwrap(),
        )]),
        authority_cert_serial_number: Some(OctetStringRef::new(&[0xd6]).unwrap()),
    }
    .to_vec()
    .unwrap();
    let crl = Crl::from_der(&crl_der(1, Some(&aki))).unwrap();

    assert!(matches!(
        crl.authority_key_id(&mut buf),
        Err(CrlError::UnsupportedExtension)
    ));

    let mut serial = [0u8; 4];
    let issuer = crl
        .authority_key_gn_serial(0, &mut buf, Some(&mut serial[..]))
        .unwrap();
    assert_eq!(issuer.kind, GeneralNameKind::Uri);
    assert_eq!(
        &buf[..issuer.name.filled().unwrap()],
        b"http://ca.example.com/"
    );
    assert_eq!(issuer.serial, Some(Fill::Filled(1)));
    assert_eq!(serial[0], 0xd6);
}

#[test]
fn version_is_one_based() {
    let crl = Crl::from_der(&crl_der(1, None)).unwrap();
    assert_eq!(crl.version().unwrap(), 2);
}

#[test]
fn export_round_trips_through_pem() {
    let der = crl_der(9, None);
    let crl = Crl::from_der(&der).unwrap();

    let pem = crl.export_to_vec(Format::Pem).unwrap();
    assert!(pem.starts_with(b"-----BEGIN X509 CRL-----\n"));

    let copy = Crl::from_pem(&pem).unwrap();
    assert_eq!(copy.export_to_vec(Format::Der).unwrap(), der);
    assert_eq!(number_of(&copy), 9);
}

#[test]
fn negative_serials_are_imported() {
    let revoked = vec![
        entry(&[0xff], 1_650_000_000),
        entry(&[0xff, 0x02, 0x03], 1_650_000_001),
    ];
    let crl = Crl::from_der(&crl_der_with(1, None, revoked)).unwrap();

    let entries = crl.revoked_entries().unwrap();
    assert_eq!(entries[0].serial, vec![0xff]);
    assert_eq!(entries[1].serial, vec![0xff, 0x02, 0x03]);
}

#[test]
fn enumerates_large_list() {
    TRACING.call_once(init_tracing);

    let serials = (0u32..30_000)
        .map(|i| [0x01, (i >> 16) as u8, (i >> 8) as u8, i as u8])
        .collect::<Vec<_>>();
    let revoked = serials
        .iter()
        .map(|serial| entry(serial, 1_650_000_000))
        .collect();
    let crl = Crl::from_der(&crl_der_with(1, None, revoked)).unwrap();

    let start = Instant::now();
    let mut buf = [0u8; 4];
    let count = crl.crt_count().unwrap();
    for (index, serial) in serials.iter().enumerate().take(count) {
        assert_eq!(crl.crt_serial(index, &mut buf).unwrap(), Fill::Filled(4));
        assert_eq!(&buf, serial);
        assert!(crl.revocation_time(index).is_ok());
    }
    assert_eq!(count, serials.len());
    assert!(start.elapsed() < Duration::from_secs(5));
}
