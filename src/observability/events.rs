//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in the eli5 service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Rule table loaded and validated
    RulesLoaded,
    /// Rule table could not be loaded (FATAL)
    RulesInvalid,
    /// HTTP listener bound, ready to serve
    ServerListening,
    /// Server stopped
    ShutdownComplete,

    // Explain operations
    /// One or more concepts matched
    ExplainComplete,
    /// Text was absent or blank
    ExplainEmptyInput,
    /// Text matched no concept
    ExplainFallback,
    /// Request rejected by the transport (e.g. text too long)
    RequestRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::RulesLoaded => "RULES_LOADED",
            Event::RulesInvalid => "RULES_INVALID",
            Event::ServerListening => "SERVER_LISTENING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::ExplainComplete => "EXPLAIN_COMPLETE",
            Event::ExplainEmptyInput => "EXPLAIN_EMPTY_INPUT",
            Event::ExplainFallback => "EXPLAIN_FALLBACK",
            Event::RequestRejected => "REQUEST_REJECTED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::RulesInvalid)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
