use colored::*;

use arpmap_common::network::host::ResolvedHost;

use crate::vendor;

/// Interface banner, one per scanned interface.
pub fn interface_header(name: &str) {
    println!("{}:", name.bold());
}

/// Printed whenever a scan produced nothing, instead of silent emptiness.
pub fn no_entry() {
    println!("\t{}", "no entry".dimmed());
}

/// One line per resolved record, decorated with the adapter vendor when the
/// OUI database knows it.
pub fn records(records: &[ResolvedHost]) {
    if records.is_empty() {
        no_entry();
        return;
    }

    for record in records {
        let line = format!("\t{:>15} ---> {}", record.ip.to_string(), record.mac);
        match vendor::describe(record.mac) {
            Some(name) => println!("{line}  {}", name.cyan()),
            None => println!("{line}"),
        }
    }
}
