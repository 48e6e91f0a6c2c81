//! Sidexis bridge connector internals.
//!
//! Library half of the connector binary, exposed so integration tests can
//! drive a session over an in-memory stream.

pub mod config;
pub mod launcher;
pub mod logfile;
pub mod session;
