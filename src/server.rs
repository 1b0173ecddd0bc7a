//! HTTP server, routing, layered settings and graceful shutdown

pub use checklist_server::*;
