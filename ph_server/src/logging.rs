//! Structured logging configuration.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging.
///
/// Log levels are configurable via the `RUST_LOG` environment variable;
/// sqlx and hyper are quieted by default.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,hyper=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log a security event with structured data.
///
/// This is where internally-distinct authentication failures (unknown user
/// vs. wrong password) get recorded; the client never sees the distinction.
pub fn log_security_event(event_type: &str, username: Option<&str>, message: &str) {
    tracing::warn!(
        event_type = event_type,
        username = username,
        "SECURITY: {}",
        message
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_security_event() {
        // Just ensure it doesn't panic
        log_security_event("failed_login", Some("alice"), "Incorrect password");
        log_security_event("failed_login", None, "Unknown user");
    }
}
