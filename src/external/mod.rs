//! Shared infrastructure for outbound provider calls.

pub mod client;
