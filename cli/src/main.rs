mod commands;
mod terminal;
mod vendor;

use std::net::Ipv4Addr;
use std::time::Duration;

use tracing::{debug, error, warn};

use arpmap_common::config::ScanConfig;
use arpmap_common::network::interface;
use arpmap_core::scanner::{self, ScanTarget};
use commands::CommandLine;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CommandLine::parse_args();
    logging::init(args.debug);

    let target = match args.ip.as_str() {
        "all" => ScanTarget::Subnet,
        raw => match raw.parse::<Ipv4Addr>() {
            Ok(ip) => ScanTarget::Single(ip),
            Err(_) => {
                error!("'{raw}' is not a valid IPv4 address");
                return Ok(());
            }
        },
    };

    let interfaces = interface::matching(&args.interface);
    if interfaces.is_empty() {
        error!("no interface matches '{}'", args.interface);
        return Ok(());
    }

    if !is_root::is_root() {
        warn!("not running as root; opening the capture channel will likely fail");
    }

    let cfg = ScanConfig::with_timeout(Duration::from_secs_f64(args.timeout));

    for intf in &interfaces {
        print::interface_header(&intf.name);
        match scanner::scan_interface(intf, target, &cfg).await {
            Ok(records) => print::records(&records),
            Err(e) => {
                // An unusable interface is a skip, not a failure of the run.
                warn!("skipping {}: {e}", intf.name);
                print::no_entry();
            }
        }
        debug!("scan of {} done", intf.name);
    }

    Ok(())
}
