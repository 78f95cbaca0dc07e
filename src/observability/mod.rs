//! Observability subsystem.
//!
//! # Design Decisions
//! - Library code only emits `tracing` events; installing a subscriber is
//!   left to binaries
//! - Selection itself logs at trace/debug so hot paths stay quiet by default

pub mod logging;
