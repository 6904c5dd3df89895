//! Observability for the eli5 service
//!
//! - Structured logging (JSON lines)
//! - Request counters
//! - Typed lifecycle and request events
//!
//! # Usage
//!
//! ```ignore
//! use eli5::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::RulesLoaded, &[("rules", "5")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_rejected();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

use crate::engine::{Explanation, Outcome};

fn severity_for(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(severity_for(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_for(event), event.as_str(), fields);
}

/// Log how one text was explained
pub fn log_explanation(explanation: &Explanation, input_chars: usize) {
    let chars = input_chars.to_string();
    match &explanation.outcome {
        Outcome::EmptyInput => Logger::trace(Event::ExplainEmptyInput.as_str(), &[]),
        Outcome::Fallback => {
            Logger::trace(Event::ExplainFallback.as_str(), &[("chars", chars.as_str())])
        }
        Outcome::Matched(concepts) => {
            let concepts = concepts.join(",");
            Logger::trace(
                Event::ExplainComplete.as_str(),
                &[("chars", chars.as_str()), ("concepts", concepts.as_str())],
            )
        }
    }
}
