//! Internal modules for the Connect4 client.
//!
//! This library provides the REST client, console column input and the
//! remote player used by the c4_client binary.

pub mod api_client;
pub mod commands;
pub mod remote;
