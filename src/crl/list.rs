// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

//! Importing every CRL found in one buffer.

use super::{Crl, Format};
use crate::config::{ListConfig, Overflow};
use crate::error::{CrlError, Result};

use pkix::pem::find_boundary;
use tracing::debug;

/// Handles created by a single import call.
///
/// Dropping the guard releases every handle it holds; only
/// [`commit`](Pending::commit) hands them to the caller.
struct Pending {
    crls: Vec<Crl>,
}

impl Pending {
    fn with_capacity(capacity: usize) -> Result<Self> {
        let mut crls = Vec::new();
        crls.try_reserve_exact(capacity)?;
        Ok(Self { crls })
    }

    fn push(&mut self, crl: Crl) -> Result<()> {
        self.crls.try_reserve(1)?;
        self.crls.push(crl);
        Ok(())
    }

    fn commit(mut self) -> Vec<Crl> {
        std::mem::take(&mut self.crls)
    }
}

impl Drop for Pending {
    fn drop(&mut self) {
        if !self.crls.is_empty() {
            debug!(
                "releasing {} CRLs imported before the failure",
                self.crls.len()
            );
            self.crls.iter_mut().for_each(Crl::deinit);
        }
    }
}

/// Imports up to `max` CRLs from `data`.
///
/// DER input holds exactly one list. PEM input may hold any number of
/// `X509 CRL` blocks; they are returned in the order they appear. When
/// there are more than `max` blocks, [`Overflow::Truncate`] returns the
/// first `max` and [`Overflow::Fail`] fails with
/// [`CrlError::ShortBuffer`] carrying the total block count.
///
/// Either every handle is returned or, on error, none survive.
pub fn import_list(
    data: &[u8],
    format: Format,
    max: usize,
    overflow: Overflow,
) -> Result<Vec<Crl>> {
    import_into(Pending::with_capacity(0)?, data, format, max, overflow)
}

/// Imports every CRL in `data`, growing the result as needed.
///
/// A first attempt is made with `config.initial_capacity`. If more CRLs
/// are present, the capacity is raised to exactly the reported count and
/// the import is retried once.
pub fn import_list_grow(data: &[u8], format: Format, config: &ListConfig) -> Result<Vec<Crl>> {
    let capacity = config.initial_capacity;
    let pending = Pending::with_capacity(capacity)?;

    match import_into(pending, data, format, capacity, Overflow::Fail) {
        Err(CrlError::ShortBuffer { required }) => {
            debug!("growing CRL list from {capacity} to {required}");
            let pending = Pending::with_capacity(required)?;
            import_into(pending, data, format, required, Overflow::Fail)
        }
        result => result,
    }
}

fn import_into(
    mut pending: Pending,
    data: &[u8],
    format: Format,
    max: usize,
    overflow: Overflow,
) -> Result<Vec<Crl>> {
    if format == Format::Der {
        if max < 1 {
            return Err(CrlError::ShortBuffer { required: 1 });
        }
        pending.push(Crl::from_der(data)?)?;
        return Ok(pending.commit());
    }

    let mut next = find_boundary(data, 0);
    if next.is_none() {
        return Err(CrlError::Base64Decoding(
            "no X509 CRL block found".to_string(),
        ));
    }

    let mut count = 0;
    let mut exceeded = false;
    while let Some(start) = next {
        if count >= max {
            match overflow {
                Overflow::Truncate => {
                    debug!("stopping after {max} CRLs; further blocks are ignored");
                    break;
                }
                Overflow::Fail => exceeded = true,
            }
        }

        if !exceeded {
            let block = &data[start..];
            pending.push(Crl::from_pem(block)?)?;
        }

        next = find_boundary(data, start + 1);
        count += 1;
    }

    if exceeded {
        debug!("{count} CRLs found, room for {max}");
        return Err(CrlError::ShortBuffer { required: count });
    }

    Ok(pending.commit())
}
