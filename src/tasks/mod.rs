//! Background Tasks Module
//!
//! Contains background tasks that run periodically for the life of the process.
//!
//! # Tasks
//! - Sweeper: evicts expired cache entries that nobody has read

mod sweeper;

pub use sweeper::{Sweeper, SweeperState, DEFAULT_SWEEP_INTERVAL};
