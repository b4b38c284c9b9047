//! Schema module - Configuration and data types for road evolution.

mod config;
mod road;
mod trace;

pub use config::*;
pub use road::*;
pub use trace::*;
