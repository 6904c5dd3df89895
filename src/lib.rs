//! eli5 - Simplified explanations for lecture text
//!
//! A fixed, versioned table of concept rules turns raw lecture text into
//! "explain like I'm five" summaries, served over HTTP or the command line.

pub mod cli;
pub mod engine;
pub mod http_server;
pub mod observability;
