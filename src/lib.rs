//! # Message Relay
//!
//! A minimal two-loop message relay: an HTTP front serving pages and
//! accepting form submissions, and a UDP listener persisting each received
//! message to a JSON-backed store under a receipt timestamp.
//!
//! Refer to the included binary for the composed application.
pub mod config;
pub mod front;
pub mod http;
pub mod logging;
pub mod relay;
pub mod runtime;
pub mod store;
