//! # HTTP Server
//!
//! Main HTTP server combining the explain and observability routers.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::explain_routes::{explain_routes, ExplainState};
use super::observability_routes::{observability_routes, ObservabilityState};
use crate::engine::{Explainer, RuleSet};
use crate::observability::{log_event, log_event_with_fields, Event, MetricsRegistry};

/// HTTP Server for the eli5 service
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
    metrics: Arc<MetricsRegistry>,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration and built-in rules
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default(), Arc::new(RuleSet::builtin()))
    }

    /// Create a new HTTP server with custom configuration and rule table
    pub fn with_config(config: HttpServerConfig, rules: Arc<RuleSet>) -> Self {
        let metrics = Arc::new(MetricsRegistry::new());
        let router = Self::build_router(&config, rules, Arc::clone(&metrics));
        Self {
            config,
            router,
            metrics,
        }
    }

    /// Build the combined router
    fn build_router(
        config: &HttpServerConfig,
        rules: Arc<RuleSet>,
        metrics: Arc<MetricsRegistry>,
    ) -> Router {
        let observability_state = Arc::new(ObservabilityState {
            metrics: Arc::clone(&metrics),
            rules_version: rules.version(),
            rule_count: rules.len(),
        });
        let explain_state = Arc::new(ExplainState::new(
            Explainer::new(rules),
            metrics,
            config,
        ));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(observability_routes(observability_state))
            .merge(explain_routes(explain_state))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Shared request counters
    pub fn metrics(&self) -> Arc<MetricsRegistry> {
        Arc::clone(&self.metrics)
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?.to_string();

        log_event_with_fields(
            Event::ServerListening,
            &[
                ("addr", addr.as_str()),
                ("routes", "POST /process, POST /process/batch, GET /rules, GET /health, GET /metrics"),
            ],
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event(Event::ShutdownComplete);
        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    // if the handler cannot be installed, serve until the process is killed
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new();
        assert_eq!(server.socket_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig::with_port(8080);
        let server = HttpServer::with_config(config, Arc::new(RuleSet::builtin()));
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_permissive_cors() {
        let config = HttpServerConfig {
            cors_origins: vec![],
            ..Default::default()
        };
        let server = HttpServer::with_config(config, Arc::new(RuleSet::builtin()));
        assert_eq!(server.metrics().snapshot().requests, 0);
        let _router = server.router();
    }
}
