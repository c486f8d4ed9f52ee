//! Observability setup for the QR code node tooling.

pub mod tracing_setup;
