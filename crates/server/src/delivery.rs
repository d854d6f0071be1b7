// crates/server/src/delivery.rs
//! Outbound result delivery.
//!
//! When a job completes, its result is forwarded once to a configured
//! callback endpoint, authenticated with a pre-shared secret header.
//! Delivery is best-effort: every outcome is logged and none of them
//! changes the job's own terminal state.

use std::time::Duration;

use blogsnap_core::Post;
use serde::Serialize;

/// Header carrying the pre-shared callback secret.
pub const SECRET_HEADER: &str = "X-Scraper-Secret";

/// Deadline for the single delivery attempt.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(30);

/// How much of a rejection body to keep in the log.
const BODY_SNIPPET_LEN: usize = 100;

/// Callback endpoint configuration: where to POST and the shared secret.
#[derive(Debug, Clone)]
pub struct CallbackConfig {
    pub url: String,
    pub secret: String,
}

/// One-shot, fire-and-forget forwarder for completed job results.
pub struct ResultDelivery {
    client: reqwest::Client,
    config: Option<CallbackConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CallbackPayload<'a> {
    job_id: &'a str,
    result: &'a [Post],
}

impl ResultDelivery {
    /// Create a delivery handle; `None` disables outbound calls entirely.
    pub fn new(config: Option<CallbackConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Whether a callback endpoint is configured.
    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Attempt delivery of a completed job's result, at most once.
    ///
    /// Failures (transport errors, non-2xx responses) are logged and
    /// swallowed — the job is already `Completed` and stays that way.
    pub async fn deliver(&self, job_id: &str, result: &[Post]) {
        let Some(config) = &self.config else {
            tracing::warn!(job_id = %job_id, "no callback endpoint configured, skipping result delivery");
            return;
        };

        tracing::info!(job_id = %job_id, posts = result.len(), "delivering result to callback");

        let payload = CallbackPayload { job_id, result };
        let response = self
            .client
            .post(&config.url)
            .header(SECRET_HEADER, &config.secret)
            .timeout(DELIVERY_TIMEOUT)
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(job_id = %job_id, status = %resp.status(), "result delivered");
            }
            Ok(resp) => {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                let snippet: String = body.chars().take(BODY_SNIPPET_LEN).collect();
                tracing::error!(job_id = %job_id, status = %status, body = %snippet, "result delivery rejected");
            }
            Err(e) => {
                tracing::error!(job_id = %job_id, error = %e, "result delivery failed");
            }
        }
    }
}
