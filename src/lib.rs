//! Frame timing log analysis
//!
//! Reads per-frame timing samples and reports frame rate and jitter
//! statistics against a target frame rate.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod stats;
pub mod ui;
pub mod utils;

pub use crate::core::{analyze, run_analysis, AnalysisOptions};
pub use error::{AnalysisError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
