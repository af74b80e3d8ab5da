use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use super::error::ApiError;
use super::transport::{HttpReply, HttpTransport};
use crate::state::StatusType;

/// Receives the progress lines the client emits while it works.
pub trait StatusReporter: Send + Sync {
    fn report(&self, message: &str, status_type: StatusType);
}

/// How often and how patiently a request is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(2000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
        }
    }

    /// Wait before `attempt` (1-based). The first attempt goes out immediately,
    /// every later one waits twice as long as the one before.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt < 2 {
            return Duration::ZERO;
        }
        let factor = 2u32.checked_pow(attempt - 2).unwrap_or(u32::MAX);
        self.initial_delay.saturating_mul(factor)
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// POSTs JSON and retries rate-limit and server errors with exponential backoff.
#[derive(Clone)]
pub struct RetryingClient {
    transport: Arc<dyn HttpTransport>,
    reporter: Arc<dyn StatusReporter>,
    policy: RetryPolicy,
}

impl RetryingClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        reporter: Arc<dyn StatusReporter>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            reporter,
            policy,
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub async fn post(&self, url: &str, payload: &Value) -> Result<Value, ApiError> {
        let max_retries = self.policy.max_retries;
        let masked_url = mask_api_key(url);

        self.reporter.report("Initializing AI process...", StatusType::Info);

        for attempt in 1..=max_retries {
            log::debug!("POST {} (attempt {}/{})", masked_url, attempt, max_retries);

            let reply = match self.transport.post_json(url, payload).await {
                Ok(reply) => reply,
                Err(e) => {
                    log::error!("Request to {} failed without a response: {}", masked_url, e);
                    return Err(ApiError::Transport(e.0));
                }
            };

            if reply.is_success() {
                let value = serde_json::from_str(&reply.body).map_err(|e| {
                    log::error!("Response from {} is not JSON: {}", masked_url, e);
                    ApiError::InvalidBody(e.to_string())
                })?;
                self.reporter.report("API call successful!", StatusType::Success);
                return Ok(value);
            }

            let error = ApiError::Status {
                status: reply.status,
                message: error_message(&reply),
            };

            if !error.is_transient() {
                log::error!("{} returned {}, not retrying", masked_url, reply.status);
                return Err(error);
            }

            if attempt == max_retries {
                log::error!("{} still failing after {} attempts: {}", masked_url, attempt, error);
                return Err(ApiError::Exhausted {
                    attempts: attempt,
                    last_status: error.status(),
                    reason: error.to_string(),
                });
            }

            let delay = self.policy.delay_before(attempt + 1);
            log::warn!("{} returned {}, retrying in {:?}", masked_url, reply.status, delay);
            self.reporter.report(
                &format!(
                    "Retrying API call (attempt {}/{}, delay {}s)...",
                    attempt + 1,
                    max_retries,
                    delay.as_secs_f64()
                ),
                StatusType::Warning,
            );
            tokio::time::sleep(delay).await;
        }

        Err(ApiError::Exhausted {
            attempts: max_retries,
            last_status: None,
            reason: "No attempts were made.".to_owned(),
        })
    }
}

/// Server-provided message, else the status' reason phrase.
fn error_message(reply: &HttpReply) -> String {
    serde_json::from_str::<ErrorEnvelope>(&reply.body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|error| error.message)
        .filter(|message| !message.is_empty())
        .or_else(|| {
            reqwest::StatusCode::from_u16(reply.status)
                .ok()
                .and_then(|status| status.canonical_reason())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| format!("HTTP error {}", reply.status))
}

/// Hide the `key` query parameter so URLs can be logged.
pub fn mask_api_key(url: &str) -> String {
    let Some(start) = url.find("key=").map(|index| index + "key=".len()) else {
        return url.to_owned();
    };
    let end = url[start..].find('&').map_or(url.len(), |offset| start + offset);
    format!("{}***{}", &url[..start], &url[end..])
}
