//! Shared domain types for the QR code authentication node.
//!
//! Node configuration, the host tree model (shared state, callbacks,
//! actions) and the error enums. No I/O -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod tree;
