//! DSA Dashboard Statistics - The persisted progress record
//!
//! Storage backends for the single statistics document plus the service that
//! serializes every read-modify-write cycle on it

pub mod mutations;
pub mod service;
pub mod storage;

pub use mutations::*;
pub use service::*;
pub use storage::*;
