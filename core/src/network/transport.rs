//! Raw Ethernet transport for the resolution protocol.
//!
//! Sending goes straight out the datalink channel; receiving runs on a
//! dedicated OS thread that parses frames and forwards reply operations into
//! an unbounded queue. The thread unwinds on its own once the engine side of
//! the queue hangs up.

use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, bail};
use async_trait::async_trait;
use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};
use pnet::util::MacAddr;
use tokio::sync::mpsc;
use tracing::{debug, error};

use arpmap_protocols::arp::{self, Operation};

/// Capture read timeout; bounds how long the pump thread lingers after the
/// engine is gone.
const READ_TIMEOUT: Duration = Duration::from_millis(50);

/// A reply frame narrowed to the fields the engine correlates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpReply {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

/// Capability to emit one resolution request toward a candidate address.
///
/// Implementations absorb frame-build failures (logged, not fatal) and only
/// surface errors the caller should treat as a dead transport.
#[async_trait]
pub trait LinkTransport: Send + Sync {
    async fn send_request(&self, target: Ipv4Addr) -> anyhow::Result<()>;
}

/// Paired halves of an open link-layer channel: a shareable sender and the
/// inbound stream of reply frames, already filtered to reply operations.
pub struct TransportHandle {
    pub tx: Arc<dyn LinkTransport>,
    pub rx: mpsc::UnboundedReceiver<ArpReply>,
}

/// Opens the interface's Ethernet channel and starts the reply listener.
pub fn open_channel(intf: &NetworkInterface, src_ip: Ipv4Addr) -> anyhow::Result<TransportHandle> {
    let src_mac = intf
        .mac
        .with_context(|| format!("{} has no hardware address", intf.name))?;

    let cfg = Config {
        read_timeout: Some(READ_TIMEOUT),
        ..Default::default()
    };
    let (tx, rx) = match datalink::channel(intf, cfg)
        .with_context(|| format!("opening capture on {}", intf.name))?
    {
        Channel::Ethernet(tx, rx) => (tx, rx),
        _ => bail!("non-ethernet channel on {}", intf.name),
    };

    let (queue_tx, queue_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || pump_replies(rx, queue_tx));

    Ok(TransportHandle {
        tx: Arc::new(EthernetTransport {
            tx: Mutex::new(tx),
            src_mac,
            src_ip,
        }),
        rx: queue_rx,
    })
}

struct EthernetTransport {
    tx: Mutex<Box<dyn DataLinkSender>>,
    src_mac: MacAddr,
    src_ip: Ipv4Addr,
}

#[async_trait]
impl LinkTransport for EthernetTransport {
    async fn send_request(&self, target: Ipv4Addr) -> anyhow::Result<()> {
        let frame = match arp::request_packet(self.src_mac, self.src_ip, target) {
            Ok(frame) => frame,
            Err(e) => {
                error!("failed to serialize request for {target}: {e}");
                return Ok(());
            }
        };

        let mut tx = self.tx.lock().expect("sender lock poisoned");
        match tx.send_to(&frame, None) {
            Some(Ok(())) => Ok(()),
            Some(Err(e)) => Err(e).with_context(|| format!("sending request for {target}")),
            None => bail!("link-layer sender rejected the frame"),
        }
    }
}

/// Reads frames until the engine hangs up, forwarding reply operations only.
fn pump_replies(mut rx: Box<dyn DataLinkReceiver>, queue: mpsc::UnboundedSender<ArpReply>) {
    loop {
        match rx.next() {
            Ok(frame) => {
                let Ok(seen) = arp::parse_frame(frame) else {
                    continue;
                };
                if seen.operation != Operation::Reply {
                    continue;
                }
                let reply = ArpReply {
                    ip: seen.sender_ip,
                    mac: seen.sender_mac,
                };
                if queue.send(reply).is_err() {
                    break;
                }
            }
            // read timeout tick, or the device went away
            Err(_) => {
                if queue.is_closed() {
                    break;
                }
            }
        }
    }
    debug!("reply listener stopped");
}
