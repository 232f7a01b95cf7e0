//! Tunables of the adapter registry.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_cr as serde;

/// Name of the first netgraph HCI node on FreeBSD.
pub const DEFAULT_ADAPTER: &str = "ubt0hci";

/// How long the one-time vendor database load may take before it is abandoned.
pub const DEFAULT_VENDOR_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Manufacturer names longer than this are cut, in characters.
pub const MAX_MANUFACTURER_LEN: usize = 254;

/// Configuration of a [`FreeBsdAdapters`](crate::freebsd::FreeBsdAdapters) registry.
///
/// ```
/// # use bluetooth_adapters::config::Config;
/// # use std::time::Duration;
/// let config = Config::default()
///     .with_default_adapter("ubt1hci")
///     .with_vendor_load_timeout(Duration::from_secs(2));
/// assert_eq!(config.default_adapter, "ubt1hci");
/// assert_eq!(config.max_manufacturer_len, 254);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_cr", default)
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub default_adapter: String,
    pub vendor_load_timeout: Duration,
    pub max_manufacturer_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_adapter: DEFAULT_ADAPTER.to_string(),
            vendor_load_timeout: DEFAULT_VENDOR_LOAD_TIMEOUT,
            max_manufacturer_len: MAX_MANUFACTURER_LEN,
        }
    }
}

impl Config {
    pub fn with_default_adapter(mut self, name: impl Into<String>) -> Self {
        self.default_adapter = name.into();
        self
    }

    pub fn with_vendor_load_timeout(mut self, timeout: Duration) -> Self {
        self.vendor_load_timeout = timeout;
        self
    }

    pub fn with_max_manufacturer_len(mut self, len: usize) -> Self {
        self.max_manufacturer_len = len;
        self
    }
}
