use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub sources_path: PathBuf,
    pub seen_path: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub chromium_path: String,
    pub render_timeout_secs: u64,
    pub render_settle_ms: u64,
    pub score_threshold: u8,
    pub rate_limit_retry_secs: u64,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub classifier_model: String,
    pub smtp_host: String,
    pub gmail_user: Option<String>,
    pub gmail_app_password: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("sources_path", &self.sources_path)
            .field("seen_path", &self.seen_path)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("chromium_path", &self.chromium_path)
            .field("render_timeout_secs", &self.render_timeout_secs)
            .field("render_settle_ms", &self.render_settle_ms)
            .field("score_threshold", &self.score_threshold)
            .field("rate_limit_retry_secs", &self.rate_limit_retry_secs)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("classifier_model", &self.classifier_model)
            .field("smtp_host", &self.smtp_host)
            .field("gmail_user", &self.gmail_user)
            .field(
                "gmail_app_password",
                &self.gmail_app_password.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
