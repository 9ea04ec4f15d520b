//! Request handlers.

pub mod forwarder;
pub mod health;
