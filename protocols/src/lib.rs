//! Link-layer frame codecs for the resolution protocol: Ethernet header
//! construction and ARP request build / reply parse.

use thiserror::Error;

pub mod arp;
pub mod ethernet;

/// Smallest Ethernet frame we hand to the wire, FCS excluded.
pub const MIN_ETH_FRAME_NO_FCS: usize = 60;
pub const ETH_HDR_LEN: usize = 14;
pub const ARP_LEN: usize = 28;

#[derive(Debug, Error)]
pub enum PacketError {
    #[error("buffer too small for an ethernet header")]
    EthernetBuffer,
    #[error("buffer too small for an ARP payload")]
    ArpBuffer,
    #[error("frame does not carry ARP")]
    NotArp,
    #[error("truncated or invalid ARP packet (payload len {0})")]
    Truncated(usize),
}
