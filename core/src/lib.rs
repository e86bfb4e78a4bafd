//! The bounded-concurrency resolution engine.
//!
//! Given the candidate addresses of one interface, the engine broadcasts
//! periodic resolution requests per candidate, correlates asynchronous
//! replies back to the candidate that asked, and aggregates the results
//! under an overall deadline. Admission is bounded by a slot pool so a /16
//! sweep never holds more than a fixed number of in-flight resolvers.

pub mod network;
pub mod scanner;
