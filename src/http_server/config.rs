//! HTTP Server Configuration
//!
//! Configuration for the HTTP server including host, port, CORS settings and
//! the request text limits.
//!
//! Request body limits are derived from the text limits so that any request
//! whose texts are within `max_text_chars` is always buffered.

use serde::{Deserialize, Serialize};

/// Worst-case JSON encoding of one character (a surrogate pair written as two `\uXXXX` escapes)
pub const MAX_ENCODED_BYTES_PER_CHAR: usize = 12;

/// Allowance for the JSON envelope around the texts
pub const BODY_OVERHEAD_BYTES: usize = 1024;

/// Allowance for quoting and separating one entry of a batch
const BATCH_ENTRY_OVERHEAD_BYTES: usize = 16;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means any origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Longest accepted text, in characters (default: 10000)
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,

    /// Most texts accepted in one batch request (default: 100)
    #[serde(default = "default_max_batch_texts")]
    pub max_batch_texts: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(), // React dev server
        "http://localhost:5173".to_string(), // Vite dev server
        "http://127.0.0.1:5173".to_string(),
    ]
}

fn default_max_text_chars() -> usize {
    10_000
}

fn default_max_batch_texts() -> usize {
    100
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            max_text_chars: default_max_text_chars(),
            max_batch_texts: default_max_batch_texts(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Largest body buffered for a single-text request
    pub fn text_body_limit(&self) -> usize {
        self.max_text_chars
            .saturating_mul(MAX_ENCODED_BYTES_PER_CHAR)
            .saturating_add(BODY_OVERHEAD_BYTES)
    }

    /// Largest body buffered for a batch request
    pub fn batch_body_limit(&self) -> usize {
        self.max_text_chars
            .saturating_mul(MAX_ENCODED_BYTES_PER_CHAR)
            .saturating_add(BATCH_ENTRY_OVERHEAD_BYTES)
            .saturating_mul(self.max_batch_texts)
            .saturating_add(BODY_OVERHEAD_BYTES)
    }
}
