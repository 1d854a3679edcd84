//! DSA Dashboard Repository - Walks the problems directory
//!
//! Reads markdown problem files, infers their metadata and builds the nested
//! directory tree served to the dashboard

pub mod filter;
pub mod metadata;
pub mod processor;
pub mod reader;
pub mod tree;

pub use filter::*;
pub use metadata::*;
pub use processor::*;
pub use reader::*;
pub use tree::*;
