//! HTTP request handlers for the dashboard API
//!
//! This module contains all the HTTP request handlers organized by functionality.

pub mod fallback;
pub mod health;
pub mod repository;
pub mod statistics;
pub mod types;

// Re-export all handler functions
pub use fallback::*;
pub use health::*;
pub use repository::*;
pub use statistics::*;

// Re-export all types for convenience
pub use types::*;
