// bluetooth-adapters Source Code File
//
// Copyright 2020 Nonpolynomial Labs LLC. All rights reserved.
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.
//
// Some portions of this file are taken and/or modified from Rumble
// (https://github.com/mwylde/rumble), using a dual MIT/Apache License under the
// following copyright:
//
// Copyright (c) 2014 The Rust Project Developers

//! Raw inventory of the netgraph HCI nodes.
//!
//! Layouts follow `lib/libbluetooth/bluetooth.h` and `sys/netgraph/bluetooth/include/ng_hci.h`.

use crate::api::BDAddr;
use crate::Result;
use bitflags::bitflags;
use log::debug;
use std::collections::BTreeMap;
use std::ffi::CStr;
use std::iter::Take;
use std::slice::Iter;

/// Most nodes a single `HCIGETDEVLIST` reports.
pub const HCI_MAX_DEV: usize = 16;
const NG_NODESIZ: usize = 32;
const NG_HCI_FEATURES_SIZE: usize = 8;

#[derive(Debug, Copy, Clone, Default)]
#[repr(C)]
pub struct HCIDevReq {
    pub dev_id: u16,
    pub dev_opt: u32,
}

#[derive(Debug, Copy, Clone)]
#[repr(C)]
pub struct HCIDevListReq {
    dev_num: u16,
    dev_reqs: [HCIDevReq; HCI_MAX_DEV],
}

impl HCIDevListReq {
    pub fn iter(&self) -> Take<Iter<'_, HCIDevReq>> {
        self.dev_reqs.iter().take(self.dev_num as usize)
    }
}

impl Default for HCIDevListReq {
    fn default() -> Self {
        HCIDevListReq {
            dev_num: HCI_MAX_DEV as u16,
            dev_reqs: [HCIDevReq::default(); HCI_MAX_DEV],
        }
    }
}

/// Traffic counters of a node.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[repr(C)]
pub struct HCIDevStats {
    pub cmd_sent: u32,
    pub evt_recv: u32,
    pub acl_recv: u32,
    pub acl_sent: u32,
    pub sco_recv: u32,
    pub sco_sent: u32,
    pub bytes_recv: u32,
    pub bytes_sent: u32,
}

#[derive(Debug, Copy, Clone, Default)]
#[repr(C)]
pub struct HCIDevInfo {
    pub devname: [u8; NG_NODESIZ],
    /// Little-endian, as on the wire.
    pub bdaddr: [u8; 6],
    pub state: u32,
    pub features: [u8; NG_HCI_FEATURES_SIZE],
    pub packet_type_info: u16,
    pub link_policy_info: u16,
    pub role_switch_info: u16,
    pub acl_size: u16,
    pub acl_pkts: u16,
    pub sco_size: u16,
    pub sco_pkts: u16,
    pub stat: HCIDevStats,
}

bitflags! {
    /// State bits of a netgraph HCI node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeState: u32 {
        const CONNECTED = 1 << 0;
        const INITED = 1 << 1;
        const READY = Self::CONNECTED.bits() | Self::INITED.bits();
        const COMMAND_PENDING = 1 << 2;
    }
}

/// One HCI node as reported by the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HciDevice {
    pub dev_id: u16,
    /// Netgraph node name, e.g. `ubt0hci`.
    pub devname: String,
    /// Address as reported, colon separated.
    pub bdaddr: String,
    pub state: NodeState,
    pub features: [u8; NG_HCI_FEATURES_SIZE],
    pub packet_type: u16,
    pub link_policy: u16,
    pub role_switch: u16,
    pub acl_size: u16,
    pub acl_pkts: u16,
    pub sco_size: u16,
    pub sco_pkts: u16,
    pub stats: HCIDevStats,
}

impl HciDevice {
    /// A node of which only the name and address are known.
    pub fn new(dev_id: u16, devname: impl Into<String>, bdaddr: impl Into<String>) -> Self {
        HciDevice {
            dev_id,
            devname: devname.into(),
            bdaddr: bdaddr.into(),
            state: NodeState::empty(),
            features: [0; NG_HCI_FEATURES_SIZE],
            packet_type: 0,
            link_policy: 0,
            role_switch: 0,
            acl_size: 0,
            acl_pkts: 0,
            sco_size: 0,
            sco_pkts: 0,
            stats: HCIDevStats::default(),
        }
    }

    pub fn from_dev_info(dev_id: u16, di: &HCIDevInfo) -> HciDevice {
        let devname = match CStr::from_bytes_until_nul(&di.devname) {
            Ok(name) => name.to_string_lossy().into_owned(),
            Err(_) => String::from_utf8_lossy(&di.devname).into_owned(),
        };
        HciDevice {
            dev_id,
            devname,
            bdaddr: BDAddr::from_le_bytes(di.bdaddr).to_string(),
            state: NodeState::from_bits_retain(di.state),
            features: di.features,
            packet_type: di.packet_type_info,
            link_policy: di.link_policy_info,
            role_switch: di.role_switch_info,
            acl_size: di.acl_size,
            acl_pkts: di.acl_pkts,
            sco_size: di.sco_size,
            sco_pkts: di.sco_pkts,
            stats: di.stat,
        }
    }

    /// The reported address, parsed.
    pub fn address(&self) -> Result<BDAddr> {
        Ok(self.bdaddr.parse::<BDAddr>()?)
    }

    pub fn is_ready(&self) -> bool {
        self.state.contains(NodeState::READY)
    }
}

/// Something that can list the HCI nodes of the host.
///
/// `query` blocks on device I/O; the registry runs it on the blocking thread pool. It never fails,
/// an error part way through leaves the nodes read so far.
pub trait HciQuery: Send + Sync + 'static {
    fn query(&self) -> BTreeMap<u16, HciDevice>;
}

impl<F> HciQuery for F
where
    F: Fn() -> BTreeMap<u16, HciDevice> + Send + Sync + 'static,
{
    fn query(&self) -> BTreeMap<u16, HciDevice> {
        self()
    }
}

/// Lists nodes through the raw HCI socket of the running kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHci;

impl HciQuery for SystemHci {
    fn query(&self) -> BTreeMap<u16, HciDevice> {
        let mut out = BTreeMap::new();
        if let Err(e) = sys::read_nodes(&mut out) {
            debug!("Error while getting HCI devices: {}", e);
        }
        out
    }
}

#[cfg(target_os = "freebsd")]
mod sys {
    use super::{HCIDevInfo, HCIDevListReq, HciDevice};
    use crate::Result;
    use nix::errno::Errno;
    use std::collections::BTreeMap;
    use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

    // sys/sys/socket.h
    const AF_BLUETOOTH: libc::c_int = 36;
    // sys/netgraph/bluetooth/include/ng_btsocket.h
    const BTPROTO_HCI: libc::c_int = 134;

    // _IOWR('b', NGM_HCI_NODE_LIST_NAMES, ...)
    nix::ioctl_readwrite_bad!(hci_get_dev_list, 0xC010_62C8, HCIDevListReq);
    // _IOWR('b', NGM_HCI_NODE_GET_CON_LIST, ...)
    nix::ioctl_readwrite_bad!(hci_get_dev_info, 0xC010_626F, HCIDevInfo);

    fn open_hci_socket() -> nix::Result<OwnedFd> {
        let fd = Errno::result(unsafe { libc::socket(AF_BLUETOOTH, libc::SOCK_RAW, BTPROTO_HCI) })?;
        Ok(unsafe { OwnedFd::from_raw_fd(fd) })
    }

    pub(super) fn read_nodes(out: &mut BTreeMap<u16, HciDevice>) -> Result<()> {
        let sock = open_hci_socket().map_err(std::io::Error::from)?;

        let mut dev_list = HCIDevListReq::default();
        unsafe { hci_get_dev_list(sock.as_raw_fd(), &mut dev_list) }
            .map_err(std::io::Error::from)?;

        for dev_req in dev_list.iter() {
            let mut di = HCIDevInfo::default();
            unsafe { hci_get_dev_info(sock.as_raw_fd(), &mut di) }
                .map_err(std::io::Error::from)?;
            out.insert(dev_req.dev_id, HciDevice::from_dev_info(dev_req.dev_id, &di));
        }

        Ok(())
    }
}

#[cfg(not(target_os = "freebsd"))]
mod sys {
    use super::HciDevice;
    use crate::{Error, Result};
    use std::collections::BTreeMap;

    pub(super) fn read_nodes(_out: &mut BTreeMap<u16, HciDevice>) -> Result<()> {
        Err(Error::NotSupported(
            "netgraph HCI sockets are only available on FreeBSD".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ParseBDAddrError;

    fn dev_info(name: &[u8], bdaddr: [u8; 6], state: u32) -> HCIDevInfo {
        let mut di = HCIDevInfo::default();
        di.devname[..name.len()].copy_from_slice(name);
        di.bdaddr = bdaddr;
        di.state = state;
        di
    }

    #[test]
    fn converts_kernel_record() {
        let mut di = dev_info(b"ubt0hci", [0x33, 0x22, 0x11, 0xcc, 0xbb, 0xaa], 0b011);
        di.acl_size = 1021;
        di.stat.cmd_sent = 7;
        let dev = HciDevice::from_dev_info(3, &di);
        assert_eq!(dev.dev_id, 3);
        assert_eq!(dev.devname, "ubt0hci");
        assert_eq!(dev.bdaddr, "AA:BB:CC:11:22:33");
        assert!(dev.is_ready());
        assert_eq!(dev.address().unwrap().oui(), [0xaa, 0xbb, 0xcc]);
        assert_eq!(dev.acl_size, 1021);
        assert_eq!(dev.stats.cmd_sent, 7);
    }

    #[test]
    fn unterminated_name_is_kept_whole() {
        let di = dev_info(&[b'a'; NG_NODESIZ], [0; 6], 0);
        let dev = HciDevice::from_dev_info(0, &di);
        assert_eq!(dev.devname.len(), NG_NODESIZ);
        assert!(!dev.is_ready());
        assert_eq!(dev.bdaddr, "00:00:00:00:00:00");
    }

    #[test]
    fn malformed_address_is_an_error() {
        let dev = HciDevice::new(0, "ubt0hci", "aa:bb:cc");
        assert!(matches!(
            dev.address(),
            Err(crate::Error::InvalidBDAddr(ParseBDAddrError::IncorrectByteCount))
        ));
    }

    #[test]
    fn node_state_bits() {
        let state = NodeState::from_bits_retain(NodeState::INITED.bits() | 0x100);
        assert!(!state.contains(NodeState::READY));
        assert!(state.contains(NodeState::INITED));
        assert_eq!(NodeState::READY.bits(), 0b011);
    }

    #[test]
    fn dev_list_only_iterates_reported_nodes() {
        let mut list = HCIDevListReq::default();
        assert_eq!(list.iter().count(), HCI_MAX_DEV);
        list.dev_num = 2;
        list.dev_reqs[1].dev_id = 5;
        let ids: Vec<u16> = list.iter().map(|r| r.dev_id).collect();
        assert_eq!(ids, vec![0, 5]);
    }

    #[test]
    fn closures_are_queries() {
        let query = || {
            let mut out: BTreeMap<u16, HciDevice> = BTreeMap::new();
            out.insert(0, HciDevice::new(0, "ubt0hci", "aa:bb:cc:11:22:33"));
            out
        };
        assert_eq!(query.query().len(), 1);
    }

    #[cfg(not(target_os = "freebsd"))]
    #[test]
    fn system_query_is_empty_elsewhere() {
        assert!(SystemHci.query().is_empty());
    }
}
