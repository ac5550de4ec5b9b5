//! Network transport: connection lifecycle and TLS client configuration.

pub mod connection;
pub mod tls;
