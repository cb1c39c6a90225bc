//! REST façade over a single Connect4 game service.
//!
//! The binary in `main.rs` wires these modules together; they are exposed as
//! a library so integration tests (and the client's tests) can drive the
//! router in-process.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
