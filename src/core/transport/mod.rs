//! Transport layer for the MCP server.
//!
//! | Transport | Feature | Framing |
//! |---|---|---|
//! | STDIO | `stdio` (default) | rmcp over stdin/stdout |
//! | TCP | `tcp` | rmcp over a socket per client |
//! | HTTP | `http` | JSON-RPC 2.0 over `POST`, via axum |
//!
//! `MCP_TRANSPORT` picks one of the compiled-in transports at startup.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
