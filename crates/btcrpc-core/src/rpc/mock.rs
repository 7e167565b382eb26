use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::TransportError;

use super::{Auth, Transport, TransportRequest};

/// A request as seen by [`MockTransport`], with the body parsed as JSON.
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub endpoint: String,
    pub body: serde_json::Value,
    pub auth: Option<Auth>,
    pub timeout: Option<Duration>,
}

/// Shared view of the requests a [`MockTransport`] received.
#[derive(Debug, Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<SentRequest>>>);

impl RequestLog {
    pub fn all(&self) -> Vec<SentRequest> {
        self.0.lock().expect("request log lock poisoned").clone()
    }

    /// The single request sent; panics if there were zero or several.
    pub fn only(&self) -> SentRequest {
        let all = self.all();
        assert_eq!(all.len(), 1, "expected exactly one request, got {}", all.len());
        all.into_iter().next().expect("length checked above")
    }

    /// `params` of the single request sent.
    pub fn only_params(&self) -> serde_json::Value {
        self.only().body["params"].clone()
    }
}

/// A mock transport for testing. Replays canned HTTP outcomes in order and
/// records every request, populated via the builder pattern.
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Vec<u8>, (StatusCode, String)>>>,
    log: RequestLog,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            responses: VecDeque::new(),
        }
    }

    pub fn log(&self) -> RequestLog {
        self.log.clone()
    }
}

pub struct MockTransportBuilder {
    responses: VecDeque<Result<Vec<u8>, (StatusCode, String)>>,
}

impl MockTransportBuilder {
    /// Queue a 200 response with the given body.
    pub fn with_body(mut self, body: String) -> Self {
        self.responses.push_back(Ok(body.into_bytes()));
        self
    }

    /// Queue a non-2xx response.
    pub fn with_status(mut self, status: StatusCode, body: &str) -> Self {
        self.responses.push_back(Err((status, body.to_owned())));
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            responses: Mutex::new(self.responses),
            log: RequestLog::default(),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest<'_>) -> Result<Vec<u8>, TransportError> {
        let body = serde_json::from_slice(&request.body).expect("client must send JSON");
        self.log
            .0
            .lock()
            .expect("request log lock poisoned")
            .push(SentRequest {
                endpoint: request.endpoint.to_owned(),
                body,
                auth: request.auth.cloned(),
                timeout: request.timeout,
            });

        let next = self
            .responses
            .lock()
            .expect("response queue lock poisoned")
            .pop_front();
        match next {
            Some(Ok(body)) => Ok(body),
            Some(Err((status, body))) => Err(TransportError::Status { status, body }),
            None => Err(TransportError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "mock transport has no queued response".to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_responses_in_order_and_records_requests() {
        let transport = MockTransport::builder()
            .with_body("first".to_owned())
            .with_status(StatusCode::UNAUTHORIZED, "")
            .build();
        let log = transport.log();

        let request = |endpoint| TransportRequest {
            endpoint,
            body: br#"{"method":"x"}"#.to_vec(),
            auth: None,
            timeout: None,
        };

        let first = transport.send(request("http://a")).await.expect("first is ok");
        assert_eq!(first, b"first");
        assert!(transport.send(request("http://b")).await.is_err());
        assert!(transport.send(request("http://c")).await.is_err());

        let endpoints: Vec<_> = log.all().into_iter().map(|r| r.endpoint).collect();
        assert_eq!(endpoints, ["http://a", "http://b", "http://c"]);
    }
}
