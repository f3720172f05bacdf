//! fpso-server: HTTP/JSON registry for vessels and their equipment
//!
//! Vessels are identified by a short business code; equipment carries its
//! own code, a lifecycle status and the code of the vessel it is mounted
//! on. Each request runs in a single SQLite transaction.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DatabaseConfig, DbError};
pub use http::{build_router, run_server, AppState, ServerConfig};
