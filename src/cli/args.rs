//! CLI argument definitions using clap
//!
//! Commands:
//! - eli5 serve [--config <path>] [--host <host>] [--port <port>]
//! - eli5 explain [--config <path>] [--text <text>]
//! - eli5 rules [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// eli5 - Simplified explanations for lecture text
#[derive(Parser, Debug)]
#[command(name = "eli5")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (built-in defaults when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to, overrides the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to, overrides the config file
        #[arg(long)]
        port: Option<u16>,
    },

    /// Explain one block of text and exit
    ///
    /// Without --text, reads a JSON request `{"text": ...}` from stdin.
    Explain {
        /// Path to configuration file (built-in defaults when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Text to explain
        #[arg(long)]
        text: Option<String>,
    },

    /// Print the loaded rule table as JSON
    Rules {
        /// Path to configuration file (built-in defaults when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["eli5", "serve", "--port", "8080", "--host", "127.0.0.1"]);
        match cli.command {
            Command::Serve { config, host, port } => {
                assert!(config.is_none());
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_explain_text() {
        let cli = Cli::parse_from(["eli5", "explain", "--text", "machine learning"]);
        match cli.command {
            Command::Explain { text, .. } => assert_eq!(text.as_deref(), Some("machine learning")),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
