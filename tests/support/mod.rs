#![allow(dead_code)]

use std::collections::VecDeque;

use async_trait::async_trait;
use doodle_character::api::{HttpReply, HttpTransport, StatusReporter, TransportError};
use doodle_character::state::StatusType;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::time::Instant;

/// One request as seen by the transport.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub payload: Value,
    pub at: Instant,
}

/// Transport that answers from a script and records every request.
/// Once the script runs out it keeps returning the last reply.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<HttpReply, TransportError>>>,
    last: Mutex<Option<Result<HttpReply, TransportError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<HttpReply, TransportError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn always(reply: HttpReply) -> Self {
        Self::new(vec![Ok(reply)])
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn post_json(&self, url: &str, payload: &Value) -> Result<HttpReply, TransportError> {
        self.calls.lock().push(RecordedCall {
            url: url.to_owned(),
            payload: payload.clone(),
            at: Instant::now(),
        });

        let next = self.replies.lock().pop_front();
        match next {
            Some(reply) => {
                *self.last.lock() = Some(reply.clone());
                reply
            }
            None => self
                .last
                .lock()
                .clone()
                .unwrap_or_else(|| Err(TransportError("script is empty".to_owned()))),
        }
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<(String, StatusType)>>,
}

impl RecordingReporter {
    pub fn reports(&self) -> Vec<(String, StatusType)> {
        self.reports.lock().clone()
    }
}

impl StatusReporter for RecordingReporter {
    fn report(&self, message: &str, status_type: StatusType) {
        self.reports.lock().push((message.to_owned(), status_type));
    }
}

pub fn json_reply(status: u16, body: Value) -> Result<HttpReply, TransportError> {
    Ok(HttpReply::new(status, body.to_string()))
}
