//! # eli5 HTTP Server Module
//!
//! Thin axum transport in front of the explanation engine.
//!
//! # Endpoints
//!
//! - `POST /process` - Explain one block of text: `{"text": ...}` → `{"result": ...}`
//! - `POST /process/batch` - Explain many: `{"texts": [...]}` → `{"results": [...]}`
//! - `GET /rules` - Loaded rule table
//! - `GET /health`, `GET /api/health` - Health check
//! - `GET /metrics` - Request counters

pub mod config;
pub mod explain_routes;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
