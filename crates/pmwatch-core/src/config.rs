use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can feed a `HashMap`.
/// Every variable is optional; credentials that are absent or blank become
/// `None` and the stages that need them degrade instead of failing.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let sources_path = PathBuf::from(or_default("PMWATCH_SOURCES_PATH", "./config/sources.yaml"));
    let seen_path = PathBuf::from(or_default("PMWATCH_SEEN_PATH", "./seen_jobs.json"));
    let log_level = or_default("PMWATCH_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("PMWATCH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PMWATCH_USER_AGENT", DEFAULT_USER_AGENT);

    let chromium_path = or_default("PMWATCH_CHROMIUM_PATH", "chromium");
    let render_timeout_secs = parse_u64("PMWATCH_RENDER_TIMEOUT_SECS", "60")?;
    let render_settle_ms = parse_u64("PMWATCH_RENDER_SETTLE_MS", "3000")?;

    let score_threshold = parse_score_threshold(&or_default("PMWATCH_SCORE_THRESHOLD", "6"))?;
    let rate_limit_retry_secs = parse_u64("PMWATCH_RATE_LIMIT_RETRY_SECS", "35")?;

    let gemini_api_key = optional("GEMINI_API_KEY");
    let gemini_model = or_default("PMWATCH_GEMINI_MODEL", "gemini-1.5-flash");
    let classifier_model = or_default("PMWATCH_CLASSIFIER_MODEL", "gemini-2.5-flash-lite");

    let smtp_host = or_default("PMWATCH_SMTP_HOST", "smtp.gmail.com");
    let gmail_user = optional("GMAIL_USER");
    let gmail_app_password = optional("GMAIL_APP_PASSWORD");

    Ok(AppConfig {
        sources_path,
        seen_path,
        log_level,
        request_timeout_secs,
        user_agent,
        chromium_path,
        render_timeout_secs,
        render_settle_ms,
        score_threshold,
        rate_limit_retry_secs,
        gemini_api_key,
        gemini_model,
        classifier_model,
        smtp_host,
        gmail_user,
        gmail_app_password,
    })
}

/// Parse the digest score threshold. Scores live on a 1–10 scale.
fn parse_score_threshold(raw: &str) -> Result<u8, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "PMWATCH_SCORE_THRESHOLD".to_string(),
        reason,
    };
    let value = raw.parse::<u8>().map_err(|e| invalid(e.to_string()))?;
    if !(1..=10).contains(&value) {
        return Err(invalid(format!("{value} is outside 1..=10")));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
