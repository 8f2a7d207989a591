use super::schema::Config;
use tracing_subscriber::EnvFilter;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Err(e) = EnvFilter::try_new(&config.log_level) {
        errors.push(format!("log_level: invalid filter '{}' - {}", config.log_level, e));
    }

    if config.server.host.trim().is_empty() {
        errors.push("server.host: must not be empty".to_string());
    }

    if config.server.port == 0 {
        errors.push("server.port: must be between 1 and 65535".to_string());
    }

    if config.server.body_limit == 0 {
        errors.push("server.body_limit: must be greater than zero".to_string());
    }

    match config.server.request_timeout() {
        Ok(timeout) if timeout.is_zero() => {
            errors.push("server.request_timeout: must be greater than zero".to_string());
        }
        Ok(_) => {}
        Err(e) => errors.push(format!("server.request_timeout: {:#}", e)),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
