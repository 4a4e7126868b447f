//! simq-scheduler: Capacity-aware dispatch loop
//!
//! This crate holds the scheduling core:
//! - The capacity probe that attributes load markers to hosts
//! - The round-robin dispatcher state machine

pub mod capacity;
pub mod dispatcher;

pub use capacity::CapacityProbe;
pub use dispatcher::Dispatcher;
