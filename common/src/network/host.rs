use std::fmt;
use std::net::Ipv4Addr;

use pnet::util::MacAddr;

/// One successful resolution: a live host's IPv4 address paired with the
/// hardware address it answered from.
///
/// Immutable once created; this is the only value that crosses the
/// resolver/aggregator boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedHost {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

impl fmt::Display for ResolvedHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ---> {}", self.ip, self.mac)
    }
}
