//! CLI command implementations
//!
//! Every command follows the same boot sequence: load config, set the log
//! level, build the rule table once. The table is then shared read-only.

use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

use crate::engine::{Explainer, RuleSet};
use crate::http_server::explain_routes::ExplainResponse;
use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event, Logger};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_request_from, write_json_to, write_pretty_to};

/// Run the CLI with process arguments
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, host, port } => serve(config.as_deref(), host, port),
        Command::Explain { config, text } => explain(config.as_deref(), text),
        Command::Rules { config } => rules(config.as_deref()),
    }
}

/// Load configuration and the rule table
fn boot(config_path: Option<&Path>) -> CliResult<(Config, Arc<RuleSet>)> {
    let config = Config::load_or_default(config_path)?;
    Logger::set_min_severity(config.log_level);

    let source = config
        .rules_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "builtin".to_string());

    let rules = match config.rule_set() {
        Ok(rules) => rules,
        Err(e) => {
            log_event_with_fields(
                Event::RulesInvalid,
                &[("source", source.as_str()), ("error", e.message())],
            );
            return Err(e);
        }
    };

    let count = rules.len().to_string();
    let version = rules.version().to_string();
    log_event_with_fields(
        Event::RulesLoaded,
        &[
            ("rules", count.as_str()),
            ("source", source.as_str()),
            ("version", version.as_str()),
        ],
    );

    Ok((config, Arc::new(rules)))
}

/// Start the HTTP server
pub fn serve(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let (config, rules) = boot(config_path)?;
    let config = config.with_overrides(host, port)?;

    let port_field = config.server.port.to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("host", config.server.host.as_str()), ("port", port_field.as_str())],
    );

    let server = HttpServer::with_config(config.server, rules);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Explain one block of text and print `{"result": ...}`
pub fn explain(config_path: Option<&Path>, text: Option<String>) -> CliResult<()> {
    explain_to(config_path, text, &mut io::stdin().lock(), &mut io::stdout())
}

/// Explain `text`, or the request read from `input` when no text is given
fn explain_to<R: Read, W: Write>(
    config_path: Option<&Path>,
    text: Option<String>,
    input: &mut R,
    output: &mut W,
) -> CliResult<()> {
    let (_config, rules) = boot(config_path)?;
    let explainer = Explainer::new(rules);

    let text = match text {
        Some(text) => Some(text),
        None => read_request_from(input)?.text,
    };

    let result = explainer.explain(text.as_deref());
    write_json_to(&ExplainResponse { result }, output)
}

/// Print the loaded rule table
pub fn rules(config_path: Option<&Path>) -> CliResult<()> {
    rules_to(config_path, &mut io::stdout())
}

fn rules_to<W: Write>(config_path: Option<&Path>, output: &mut W) -> CliResult<()> {
    let (_config, rules) = boot(config_path)?;
    write_pretty_to(&*rules, output)
}
