//! Shared domain types for the arpmap workspace: subnet ranges and their
//! candidate enumeration, interface viability checks, resolution records and
//! the scan configuration consumed by the engine.

pub mod config;
pub mod network;
