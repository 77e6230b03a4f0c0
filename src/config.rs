// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use serde::Deserialize;

/// Initial capacity of the auto-growing list importer.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// What the fixed-capacity importer does when more CRLs exist than fit.
#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    /// Stop at capacity and return what fits.
    #[default]
    Truncate,
    /// Release everything and report the capacity needed.
    Fail,
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ListConfig {
    /// Capacity of the first attempt made by `import_list_grow()`.
    pub initial_capacity: usize,

    /// Overflow policy of `import_list()`.
    pub overflow: Overflow,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            overflow: Overflow::default(),
        }
    }
}

impl ListConfig {
    pub fn from_toml(config: &str) -> Result<Self> {
        toml::from_str(config).context("failed to parse list import config")
    }
}
