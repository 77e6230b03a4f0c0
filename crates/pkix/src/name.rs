// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

//! RFC 4514 rendering of distinguished names.

use std::borrow::Cow;

use super::oids;

use const_oid::ObjectIdentifier;
use der::asn1::AnyRef;
use der::{Encode, Tag, Tagged};
use x509::attr::AttributeTypeAndValue;
use x509::name::Name;

/// Short name of a well known attribute type.
pub fn attribute_name(oid: ObjectIdentifier) -> Option<&'static str> {
    oids::DN_ATTRIBUTES
        .iter()
        .find(|(known, _)| *known == oid)
        .map(|(_, name)| *name)
}

/// Attributes of `name` in encoding order, multi-valued RDNs flattened.
pub fn attributes<'n, 'a>(
    name: &'n Name<'a>,
) -> impl Iterator<Item = &'n AttributeTypeAndValue<'a>> + 'n {
    name.0.iter().flat_map(|rdn| rdn.0.iter())
}

/// Renders `name` as an RFC 4514 string, last RDN first.
pub fn to_rfc4514(name: &Name<'_>) -> der::Result<String> {
    let mut out = String::new();
    for (i, rdn) in name.0.iter().rev().enumerate() {
        if i > 0 {
            out.push(',');
        }
        for (j, atv) in rdn.0.iter().enumerate() {
            if j > 0 {
                out.push('+');
            }
            match attribute_name(atv.oid) {
                Some(key) => out.push_str(key),
                None => out.push_str(&atv.oid.to_string()),
            }
            out.push('=');
            out.push_str(&value_to_string(atv.value)?);
        }
    }
    Ok(out)
}

/// The `index`-th value of attribute `oid` in `name`.
///
/// With `raw` set the complete DER encoding of the value is returned.
/// Otherwise string values are returned as text and everything else as
/// `#` followed by the hex encoded DER.
pub fn attribute_value(
    name: &Name<'_>,
    oid: ObjectIdentifier,
    index: usize,
    raw: bool,
) -> der::Result<Option<Vec<u8>>> {
    let value = match attributes(name).filter(|atv| atv.oid == oid).nth(index) {
        Some(atv) => atv.value,
        None => return Ok(None),
    };

    if raw {
        return value.to_vec().map(Some);
    }

    match string_value(value) {
        Some(text) => Ok(Some(text.into_owned().into_bytes())),
        None => Ok(Some(hex_value(value)?.into_bytes())),
    }
}

fn string_value(value: AnyRef<'_>) -> Option<Cow<'_, str>> {
    match value.tag() {
        Tag::Utf8String
        | Tag::PrintableString
        | Tag::Ia5String
        | Tag::TeletexString
        | Tag::VisibleString
        | Tag::NumericString => std::str::from_utf8(value.value()).ok().map(Cow::Borrowed),
        Tag::BmpString => bmp_string(value.value()).map(Cow::Owned),
        _ => None,
    }
}

/// Decodes UCS-2 big-endian text; surrogate pairs are accepted.
fn bmp_string(bytes: &[u8]) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

fn hex_value(value: AnyRef<'_>) -> der::Result<String> {
    Ok(format!("#{}", hex::encode(value.to_vec()?)))
}

fn value_to_string(value: AnyRef<'_>) -> der::Result<String> {
    match string_value(value) {
        Some(text) => Ok(escape(&text)),
        None => hex_value(value),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let last = text.chars().count().saturating_sub(1);
    for (i, c) in text.chars().enumerate() {
        match c {
            '"' | '+' | ',' | ';' | '<' | '>' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '#' if i == 0 => out.push_str("\\#"),
            ' ' if i == 0 || i == last => out.push_str("\\ "),
            '\0' => out.push_str("\\00"),
            _ => out.push(c),
        }
    }
    out
}
