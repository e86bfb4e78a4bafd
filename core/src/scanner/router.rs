use std::collections::HashMap;
use std::net::Ipv4Addr;

use pnet::util::MacAddr;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::network::transport::ArpReply;

enum Command {
    Watch {
        target: Ipv4Addr,
        reply_to: oneshot::Sender<MacAddr>,
    },
    Unwatch {
        target: Ipv4Addr,
    },
}

/// Fan-out point matching inbound replies to the resolver that asked for
/// them.
///
/// A single task owns the watcher map; resolvers and the transport reach it
/// over channels only. The first matching reply wins, replies nobody is
/// watching for are dropped (the owning resolver retransmits anyway).
#[derive(Clone)]
pub(crate) struct ReplyRouter {
    commands: mpsc::UnboundedSender<Command>,
}

impl ReplyRouter {
    pub(crate) fn spawn(mut replies: mpsc::UnboundedReceiver<ArpReply>) -> (Self, JoinHandle<()>) {
        let (commands, mut command_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut watchers: HashMap<Ipv4Addr, oneshot::Sender<MacAddr>> = HashMap::new();
            loop {
                tokio::select! {
                    command = command_rx.recv() => match command {
                        Some(Command::Watch { target, reply_to }) => {
                            watchers.insert(target, reply_to);
                        }
                        Some(Command::Unwatch { target }) => {
                            watchers.remove(&target);
                        }
                        None => break,
                    },
                    reply = replies.recv() => match reply {
                        Some(reply) => {
                            if let Some(watcher) = watchers.remove(&reply.ip) {
                                let _ = watcher.send(reply.mac);
                            }
                        }
                        None => break,
                    },
                }
            }
        });

        (Self { commands }, task)
    }

    /// Registers interest in `target`; the receiver resolves once a matching
    /// reply arrives.
    pub(crate) fn watch(&self, target: Ipv4Addr) -> oneshot::Receiver<MacAddr> {
        let (reply_to, rx) = oneshot::channel();
        let _ = self.commands.send(Command::Watch { target, reply_to });
        rx
    }

    /// Drops the registration of a resolver that gave up on `target`.
    pub(crate) fn unwatch(&self, target: Ipv4Addr) {
        let _ = self.commands.send(Command::Unwatch { target });
    }
}
