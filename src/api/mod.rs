// bluetooth-adapters Source Code File
//
// Copyright 2020 Nonpolynomial Labs LLC. All rights reserved.
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! The `api` module contains the platform-neutral types and the [`BluetoothAdapters`] trait that
//! every platform registry implements. Use [`crate::platform`] to get the implementation for the
//! current target.

pub(crate) mod bdaddr;

pub use self::bdaddr::{BDAddr, ParseBDAddrError};

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_cr as serde;

/// Software version reported for adapters whose firmware can't be introspected.
pub const UNKNOWN_SW_VERSION: &str = "Unknown";

/// Everything known about one local adapter.
///
/// Instances are rebuilt from scratch on every cache rebuild and never modified afterwards.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_cr")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterDetails {
    /// MAC address, upper case and colon separated.
    pub address: String,
    pub sw_version: String,
    pub hw_version: Option<String>,
    /// Whether the adapter can scan passively. `false` when unknown.
    pub passive_scan: bool,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub vendor_id: Option<String>,
    pub product_id: Option<String>,
}

impl AdapterDetails {
    /// Details for an adapter of which only the address is known.
    pub fn with_address(address: impl Into<String>) -> Self {
        AdapterDetails {
            address: address.into(),
            sw_version: UNKNOWN_SW_VERSION.to_string(),
            hw_version: None,
            passive_scan: false,
            manufacturer: None,
            product: None,
            vendor_id: None,
            product_id: None,
        }
    }
}

/// A registry of the local Bluetooth adapters of one platform.
///
/// The registry has a single owner. `refresh` re-reads the inventory from the operating system and
/// drops the cached table, `adapters` rebuilds it on first access afterwards.
#[async_trait]
pub trait BluetoothAdapters: Send + Sync + Debug {
    /// Re-queries the operating system for its adapters. Slow device I/O happens off the calling
    /// task. Never fails: anything that goes wrong only leaves fewer details behind.
    async fn refresh(&mut self);

    /// The adapters found by the last [`refresh`](Self::refresh), keyed by adapter name. Empty
    /// until a refresh has found something.
    fn adapters(&mut self) -> &HashMap<String, AdapterDetails>;

    /// Name of the adapter the platform uses when none is given.
    fn default_adapter(&self) -> &str;
}
