// bluetooth-adapters Source Code File
//
// Copyright 2020 Nonpolynomial Labs LLC. All rights reserved.
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! bluetooth-adapters lists the local Bluetooth controllers of a host and the details that can be
//! learnt about them without talking to the controller itself.
//!
//! The FreeBSD implementation enumerates the netgraph HCI nodes with the raw HCI socket ioctls,
//! then looks the manufacturer up from the OUI part of each controller's address. The result is
//! cached until the next [`refresh`](api::BluetoothAdapters::refresh).
//!
//! # Usage
//!
//! ```rust,no_run
//! # #[cfg(target_os = "freebsd")]
//! # async fn run() {
//! use bluetooth_adapters::api::BluetoothAdapters;
//! use bluetooth_adapters::platform;
//!
//! let mut registry = platform::get_adapters();
//! registry.refresh().await;
//! for (name, details) in registry.adapters() {
//!     println!("{}: {} ({:?})", name, details.address, details.manufacturer);
//! }
//! # }
//! ```

pub mod api;
pub mod config;
pub mod freebsd;
pub mod platform;
#[cfg(feature = "serde")]
pub mod serde;
pub mod vendor;

use std::result;
use std::time::Duration;

/// The main error type returned by most methods in bluetooth-adapters.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("The operation is not supported: {}", _0)]
    NotSupported(String),

    #[error("Timed out after {:?}", _0)]
    TimedOut(Duration),

    #[error("Invalid Bluetooth address: {0}")]
    InvalidBDAddr(#[from] api::ParseBDAddrError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Vendor lookup failed: {}", _0)]
    Vendor(String),

    #[error("Runtime Error: {}", _0)]
    RuntimeError(String),
}

/// Convenience type for a result using the bluetooth-adapters [`Error`] type.
pub type Result<T> = result::Result<T, Error>;
