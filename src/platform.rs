//! The `platform` module re-exports the adapter registry of the current target. Refer to the
//! [`api`] module for how to use it.

#[cfg(target_os = "freebsd")]
pub use crate::freebsd::FreeBsdAdapters as Adapters;

use crate::api::{self, BluetoothAdapters};
use crate::freebsd::FreeBsdAdapters;
use static_assertions::assert_impl_all;

/// The adapter registry of the running platform, reading the kernel's HCI inventory and the
/// embedded OUI registry.
#[cfg(target_os = "freebsd")]
pub fn get_adapters() -> Adapters {
    Adapters::new()
}

// Ensure that the exported types implement all the expected traits.
assert_impl_all!(FreeBsdAdapters: BluetoothAdapters, Default, Send, Sized, Sync);
assert_impl_all!(api::AdapterDetails: Clone, PartialEq, Send, Sync);
assert_impl_all!(api::BDAddr: Copy, std::fmt::Display, std::str::FromStr, std::hash::Hash, Ord);
