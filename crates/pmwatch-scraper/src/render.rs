//! Headless-browser rendering for career pages that build their listings in
//! JavaScript.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Produces the DOM of a page after its scripts have run.
pub trait Renderer {
    /// Returns the serialized DOM of `url`.
    fn render(&self, url: &str) -> impl Future<Output = Result<String, ScraperError>>;
}

/// Renders pages by running a Chromium-family binary with `--dump-dom`.
///
/// The browser gets `settle_ms` of virtual time after load for scripts to
/// populate the page, and the whole process is killed if it outlives
/// `timeout`.
#[derive(Debug, Clone)]
pub struct ChromiumRenderer {
    binary: String,
    user_agent: String,
    timeout: Duration,
    settle_ms: u64,
}

impl ChromiumRenderer {
    #[must_use]
    pub fn new(binary: &str, user_agent: &str, timeout_secs: u64, settle_ms: u64) -> Self {
        Self {
            binary: binary.to_owned(),
            user_agent: user_agent.to_owned(),
            timeout: Duration::from_secs(timeout_secs),
            settle_ms,
        }
    }

    fn args(&self, url: &str) -> Vec<String> {
        vec![
            "--headless=new".to_owned(),
            "--disable-gpu".to_owned(),
            "--no-sandbox".to_owned(),
            "--hide-scrollbars".to_owned(),
            format!("--user-agent={}", self.user_agent),
            format!("--virtual-time-budget={}", self.settle_ms),
            "--dump-dom".to_owned(),
            url.to_owned(),
        ]
    }
}

impl Renderer for ChromiumRenderer {
    async fn render(&self, url: &str) -> Result<String, ScraperError> {
        let render_error = |reason: String| ScraperError::Render {
            url: url.to_owned(),
            reason,
        };

        let mut command = tokio::process::Command::new(&self.binary);
        command.args(self.args(url)).kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| render_error(format!("timed out after {}s", self.timeout.as_secs())))?
            .map_err(|e| render_error(format!("failed to launch {}: {e}", self.binary)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(render_error(format!(
                "browser exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let html = String::from_utf8_lossy(&output.stdout).into_owned();
        if html.trim().is_empty() {
            return Err(render_error("browser returned an empty document".to_owned()));
        }

        tracing::debug!(url, bytes = html.len(), "page rendered");
        Ok(html)
    }
}
