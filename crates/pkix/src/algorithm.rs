// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use super::oids::*;

use std::fmt::{self, Display};

use const_oid::ObjectIdentifier;

/// Signature algorithm named by an `AlgorithmIdentifier`.
///
/// Only the algorithm OID is considered. Parameters, such as those of
/// RSA-PSS, belong to the issuer's key and are not interpreted here.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum SignAlgorithm {
    Unknown,
    RsaMd2,
    RsaMd5,
    RsaSha1,
    RsaSha224,
    RsaSha256,
    RsaSha384,
    RsaSha512,
    RsaRmd160,
    RsaPss,
    DsaSha1,
    DsaSha224,
    DsaSha256,
    EcdsaSha1,
    EcdsaSha224,
    EcdsaSha256,
    EcdsaSha384,
    EcdsaSha512,
    Ed25519,
}

impl From<ObjectIdentifier> for SignAlgorithm {
    fn from(oid: ObjectIdentifier) -> Self {
        match oid {
            RSA_MD2 => Self::RsaMd2,
            RSA_MD5 => Self::RsaMd5,
            RSA_SHA1 | RSA_SHA1_OIW => Self::RsaSha1,
            RSA_SHA224 => Self::RsaSha224,
            RSA_SHA256 => Self::RsaSha256,
            RSA_SHA384 => Self::RsaSha384,
            RSA_SHA512 => Self::RsaSha512,
            RSA_RMD160 => Self::RsaRmd160,
            RSA_PSS => Self::RsaPss,
            DSA_SHA1 => Self::DsaSha1,
            DSA_SHA224 => Self::DsaSha224,
            DSA_SHA256 => Self::DsaSha256,
            ECDSA_SHA1 => Self::EcdsaSha1,
            ECDSA_SHA224 => Self::EcdsaSha224,
            ECDSA_SHA256 => Self::EcdsaSha256,
            ECDSA_SHA384 => Self::EcdsaSha384,
            ECDSA_SHA512 => Self::EcdsaSha512,
            ED25519 => Self::Ed25519,
            _ => Self::Unknown,
        }
    }
}

impl SignAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::RsaMd2 => "RSA-MD2",
            Self::RsaMd5 => "RSA-MD5",
            Self::RsaSha1 => "RSA-SHA1",
            Self::RsaSha224 => "RSA-SHA224",
            Self::RsaSha256 => "RSA-SHA256",
            Self::RsaSha384 => "RSA-SHA384",
            Self::RsaSha512 => "RSA-SHA512",
            Self::RsaRmd160 => "RSA-RMD160",
            Self::RsaPss => "RSA-PSS",
            Self::DsaSha1 => "DSA-SHA1",
            Self::DsaSha224 => "DSA-SHA224",
            Self::DsaSha256 => "DSA-SHA256",
            Self::EcdsaSha1 => "ECDSA-SHA1",
            Self::EcdsaSha224 => "ECDSA-SHA224",
            Self::EcdsaSha256 => "ECDSA-SHA256",
            Self::EcdsaSha384 => "ECDSA-SHA384",
            Self::EcdsaSha512 => "ECDSA-SHA512",
            Self::Ed25519 => "EdDSA-Ed25519",
        }
    }
}

impl Display for SignAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
