//! Type definitions for handlers
//!
//! This module contains all the request/response types used by the handlers.

pub mod common;
pub mod repository;
pub mod statistics;

// Re-export all types for convenience
pub use common::*;
pub use repository::*;
pub use statistics::*;
