// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

//! Decoding of X.509 certificate revocation lists.
//!
//! A [`Crl`] owns one decoded `CertificateList` and answers field queries
//! about it. Variable-length fields are copied into caller buffers and
//! report a [`Fill`]: either the field fitted, or the size it needs.
//! [`import_list`] and [`import_list_grow`] decode every CRL of a PEM
//! bundle at once and never leave a partial result behind on error.

#![warn(rust_2018_idioms, unused_lifetimes, unused_qualifications, clippy::all)]

pub mod config;
pub mod crl;
pub mod error;
pub mod fill;

pub use config::{ListConfig, Overflow};
pub use crl::list::{import_list, import_list_grow};
pub use crl::{AuthorityCertIssuer, Crl, Format, GeneralNameKind, RevokedEntry};
pub use error::{CrlError, Result};
pub use fill::Fill;

pub use pkix;
pub use pkix::SignAlgorithm;
