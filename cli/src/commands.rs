use clap::Parser;

#[derive(Parser)]
#[command(name = "arpmap")]
#[command(about = "Map live IPv4 hosts on a LAN segment to their hardware addresses.")]
pub struct CommandLine {
    /// Overall scan timeout per interface, in seconds.
    #[arg(
        short = 't',
        long = "timeout",
        value_name = "SECONDS",
        default_value_t = 1.0
    )]
    pub timeout: f64,

    /// Network interface to scan, or "all" for every interface.
    #[arg(short = 'i', long = "interface", default_value = "all")]
    pub interface: String,

    /// Single IPv4 target, or "all" for the interface's whole subnet.
    #[arg(long = "ip", value_name = "ADDR", default_value = "all")]
    pub ip: String,

    /// Print scan-lifecycle debug logs.
    #[arg(long)]
    pub debug: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
