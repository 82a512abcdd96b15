//! Shared utilities for the Waxwing workspace.
//!
//! Currently this only hosts the [`observability`] module, which centralises
//! `tracing` setup so every binary and integration test emits into the same
//! rolling file sink.
pub mod observability;
