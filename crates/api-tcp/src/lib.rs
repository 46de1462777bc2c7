//! TCP API Layer
//!
//! Accepts raw TCP connections and answers each with the output of one
//! process execution. Plain text, no framing, one response per connection.

mod connection;
pub mod server;

pub use server::{TcpServer, TcpServerConfig};
