use std::sync::OnceLock;

use mac_oui::Oui;
use pnet::util::MacAddr;

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

/// The embedded **Organizationally Unique Identifier** database, loaded on
/// first use. A load failure downgrades to undecorated output.
fn oui_db() -> Option<&'static Oui> {
    OUI_DB.get_or_init(|| Oui::default().ok()).as_ref()
}

/// Human-readable note for a MAC address: the registered vendor, or a
/// locally-administered marker when the U/L bit says the address was
/// assigned by software rather than a manufacturer.
pub fn describe(mac: MacAddr) -> Option<String> {
    if mac.0 & 0x02 != 0 {
        return Some("locally administered".to_string());
    }

    let db = oui_db()?;
    match db.lookup_by_mac(&mac.to_string()) {
        Ok(Some(entry)) => Some(entry.company_name.clone()),
        _ => None,
    }
}
