// bluetooth-adapters Source Code File
//
// Copyright 2020 Nonpolynomial Labs LLC. All rights reserved.
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

use super::hci::{HciDevice, HciQuery, SystemHci};
use crate::api::{AdapterDetails, BluetoothAdapters};
use crate::config::Config;
use crate::{Error, Result};
use crate::vendor::{resolve_manufacturer, OuiDatabase, VendorLookup};
use async_trait::async_trait;
use log::{debug, error, info, trace};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Implementation of [`BluetoothAdapters`] for FreeBSD's netgraph Bluetooth stack.
///
/// Firmware versions, passive scan support and USB ids can't be read here, so those fields of
/// [`AdapterDetails`] keep their defaults.
pub struct FreeBsdAdapters {
    hci: Arc<dyn HciQuery>,
    vendors: Arc<dyn VendorLookup>,
    config: Config,
    hci_output: Option<BTreeMap<u16, HciDevice>>,
    adapters: Option<HashMap<String, AdapterDetails>>,
    vendors_requested: bool,
}

impl FreeBsdAdapters {
    /// A registry reading the running kernel, with manufacturers from the embedded OUI registry.
    pub fn new() -> Self {
        Self::with_sources(SystemHci, OuiDatabase::new(), Config::default())
    }

    pub fn with_sources(
        hci: impl HciQuery,
        vendors: impl VendorLookup + 'static,
        config: Config,
    ) -> Self {
        FreeBsdAdapters {
            hci: Arc::new(hci),
            vendors: Arc::new(vendors),
            config,
            hci_output: None,
            adapters: None,
            vendors_requested: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The nodes found by the last refresh, keyed by device id.
    pub fn hci_devices(&self) -> Option<&BTreeMap<u16, HciDevice>> {
        self.hci_output.as_ref()
    }

    async fn query_hci(&self) -> Option<BTreeMap<u16, HciDevice>> {
        let hci = self.hci.clone();
        match tokio::task::spawn_blocking(move || hci.query()).await {
            Ok(nodes) => {
                trace!("HCI query found {} node(s)", nodes.len());
                Some(nodes)
            }
            Err(e) => {
                error!("Unexpected error while getting HCI devices: {}", e);
                None
            }
        }
    }

    async fn load_vendors(&self) -> Result<()> {
        let timeout = self.config.vendor_load_timeout;
        tokio::time::timeout(timeout, self.vendors.load())
            .await
            .map_err(|_| Error::TimedOut(timeout))?
    }

    fn build_adapters(&self) -> HashMap<String, AdapterDetails> {
        let Some(nodes) = &self.hci_output else {
            return HashMap::new();
        };
        nodes
            .values()
            .map(|node| {
                let mut details = AdapterDetails::with_address(node.bdaddr.to_uppercase());
                details.manufacturer = match node.address() {
                    Ok(addr) => resolve_manufacturer(
                        self.vendors.as_ref(),
                        &addr,
                        self.config.max_manufacturer_len,
                    ),
                    Err(e) => {
                        trace!("No vendor for {}: {}", node.devname, e);
                        None
                    }
                };
                (node.devname.clone(), details)
            })
            .collect()
    }
}

impl Default for FreeBsdAdapters {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for FreeBsdAdapters {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("FreeBsdAdapters")
            .field("vendors", &self.vendors)
            .field("config", &self.config)
            .field("hci_output", &self.hci_output)
            .field("adapters", &self.adapters)
            .finish()
    }
}

#[async_trait]
impl BluetoothAdapters for FreeBsdAdapters {
    async fn refresh(&mut self) {
        self.hci_output = self.query_hci().await;
        if !self.vendors_requested {
            self.vendors_requested = true;
            match self.load_vendors().await {
                Ok(()) => debug!("Vendor database ready"),
                Err(e) => info!("Failed to load vendor database: {}", e),
            }
        }
        self.adapters = None;
    }

    fn adapters(&mut self) -> &HashMap<String, AdapterDetails> {
        if self.adapters.is_none() {
            self.adapters = Some(self.build_adapters());
        }
        self.adapters.get_or_insert_with(HashMap::new)
    }

    fn default_adapter(&self) -> &str {
        &self.config.default_adapter
    }
}
