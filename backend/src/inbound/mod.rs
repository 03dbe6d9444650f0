//! Inbound adapters (HTTP, WebSocket) that translate external requests into
//! domain service calls while keeping framework details at the edge.
//!
//! HTTP handlers live under [`http`]; the task change feed lives under
//! [`ws`].

pub mod http;
pub mod ws;
