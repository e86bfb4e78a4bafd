use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;
use thiserror::Error;
use tracing::debug;

use crate::network::range::{RangeError, SubnetRange};

/// Reasons an interface cannot host a scan. Fatal only for that interface;
/// the caller moves on to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ViabilityError {
    /// The interface has no IPv4 address assigned.
    #[error("no usable IPv4 address")]
    NoIpv4Addr,
    /// The interface has no hardware address to source requests from.
    #[error("no hardware address")]
    NoMacAddress,
    /// Scanning the loopback segment is pointless.
    #[error("loopback interface")]
    Loopback,
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Selects the address block a scan of `intf` should cover.
///
/// The first assigned IPv4 network wins, mirroring how the interface's
/// primary address is reported by the OS.
pub fn usable_subnet(intf: &NetworkInterface) -> Result<SubnetRange, ViabilityError> {
    if intf.mac.is_none() {
        return Err(ViabilityError::NoMacAddress);
    }

    let assigned = intf
        .ips
        .iter()
        .find_map(|net| match net {
            IpNetwork::V4(v4) => Some(*v4),
            IpNetwork::V6(_) => None,
        })
        .ok_or(ViabilityError::NoIpv4Addr)?;

    if assigned.ip().is_loopback() {
        return Err(ViabilityError::Loopback);
    }

    Ok(SubnetRange::new(assigned.ip(), assigned.mask())?)
}

/// Interfaces selected by name, or every enumerated interface for `"all"`.
pub fn matching(name: &str) -> Vec<NetworkInterface> {
    let interfaces = datalink::interfaces();
    debug!("enumerated {} network interface(s)", interfaces.len());

    if name == "all" {
        return interfaces;
    }
    interfaces
        .into_iter()
        .filter(|intf| intf.name == name)
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
