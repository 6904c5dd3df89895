//! JSON I/O handling for CLI
//!
//! - Input: single JSON object via stdin
//! - Output: single JSON object via stdout
//! - UTF-8 only

use std::io::{self, Read, Write};

use serde::Serialize;

use super::errors::CliResult;
use crate::http_server::explain_routes::ExplainRequest;

/// Read an explain request from stdin.
///
/// Parsing is lenient in the same way as the HTTP endpoint: empty or
/// malformed input is an empty request.
pub fn read_request() -> CliResult<ExplainRequest> {
    read_request_from(&mut io::stdin().lock())
}

pub(crate) fn read_request_from<R: Read>(reader: &mut R) -> CliResult<ExplainRequest> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    Ok(ExplainRequest::from_body(input.as_bytes()))
}

/// Write a JSON value to stdout as one line
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    write_json_to(data, &mut io::stdout())
}

/// Write a JSON value to stdout, pretty-printed
pub fn write_pretty<T: Serialize>(data: &T) -> CliResult<()> {
    write_pretty_to(data, &mut io::stdout())
}

pub(crate) fn write_json_to<T: Serialize, W: Write>(data: &T, writer: &mut W) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, data)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub(crate) fn write_pretty_to<T: Serialize, W: Write>(data: &T, writer: &mut W) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *writer, data)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
