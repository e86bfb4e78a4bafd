use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use arpmap_common::network::host::ResolvedHost;

use super::router::ReplyRouter;
use crate::network::transport::LinkTransport;

/// Terminal state of one candidate's resolution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Resolved,
    TimedOut,
    TransportError,
}

/// Owns the request/await cycle for a single candidate address.
///
/// Requests go out immediately and then on every interval tick until a
/// matching reply is routed back or the deadline lapses. Both failure
/// states are silent: a candidate that never answers is simply absent from
/// the result set.
pub(crate) struct Resolver {
    target: Ipv4Addr,
    transport: Arc<dyn LinkTransport>,
    router: ReplyRouter,
    records: UnboundedSender<ResolvedHost>,
    reply_timeout: Duration,
    request_interval: Duration,
}

impl Resolver {
    pub(crate) fn new(
        target: Ipv4Addr,
        transport: Arc<dyn LinkTransport>,
        router: ReplyRouter,
        records: UnboundedSender<ResolvedHost>,
        reply_timeout: Duration,
        request_interval: Duration,
    ) -> Self {
        Self {
            target,
            transport,
            router,
            records,
            reply_timeout,
            request_interval,
        }
    }

    pub(crate) async fn run(self) -> Outcome {
        let reply = self.router.watch(self.target);
        tokio::pin!(reply);

        let deadline = tokio::time::sleep(self.reply_timeout);
        tokio::pin!(deadline);

        let mut retry = tokio::time::interval(self.request_interval);
        retry.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                seen = &mut reply => {
                    return match seen {
                        Ok(mac) => {
                            let _ = self.records.send(ResolvedHost { ip: self.target, mac });
                            Outcome::Resolved
                        }
                        // the reply listener went away mid-scan
                        Err(_) => Outcome::TransportError,
                    };
                }
                _ = &mut deadline => {
                    self.router.unwatch(self.target);
                    return Outcome::TimedOut;
                }
                _ = retry.tick() => {
                    if let Err(e) = self.transport.send_request(self.target).await {
                        debug!("request for {} failed: {e:#}", self.target);
                        self.router.unwatch(self.target);
                        return Outcome::TransportError;
                    }
                }
            }
        }
    }
}
