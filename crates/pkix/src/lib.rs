// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

//! Structure-level helpers for X.509 certificate revocation lists.
//!
//! This crate owns the DER grammar of a `CertificateList`, the PEM
//! envelope codec and the textual rendering of distinguished names.
//! It knows nothing about handles or caller buffers; see `crlkit` for that.

#![warn(rust_2018_idioms, unused_lifetimes, unused_qualifications, clippy::all)]

pub mod algorithm;
pub mod crl;
pub mod ext;
pub mod name;
pub mod oids;
pub mod pem;

pub use self::algorithm::SignAlgorithm;
pub use self::crl::{issuer_span, CertificateList, RevokedCert, TbsCertList, TbsCertListExt};
pub use self::ext::AuthorityKeyIdentifier;

pub use const_oid;
pub use der;
pub use spki;
pub use x509;
