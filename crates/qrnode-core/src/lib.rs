//! Core logic of the QR code authentication node.
//!
//! Depends only on `qrnode-types`. The host engine (tree execution, session
//! state, callback transport) stays outside; it is modelled here by
//! `TreeContext` in and `Action` out.

pub mod config;
pub mod node;
pub mod payload;
pub mod render;
