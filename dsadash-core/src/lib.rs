//! DSA Dashboard Core - Shared data structures, errors, logging and configuration
//!
//! This crate defines the data model shared by the repository walker, the statistics
//! store and the HTTP surface.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tracing;
