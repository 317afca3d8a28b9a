// SPDX-FileCopyrightText: 2026 Flowsketch Authors
// SPDX-License-Identifier: MIT

//! Remote diagram-code generation.
//!
//! One POST per request to the generation service, JSON in and out. The
//! service is a black box: any transport failure, non-2xx status, or
//! malformed body is a uniform [`GenerateError`], and a successful body's
//! `mermaid_code` field is stored verbatim with no validation.
//!
//! The [`GenerateWorker`] keeps the UI thread non-blocking: jobs and outcomes
//! move over channels to a dedicated thread that owns a current-thread tokio
//! runtime. Each job carries a sequence number so overlapping requests can be
//! resolved by dropping stale outcomes.

use std::fmt;
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/generate-diagram";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    text: &'a str,
    diagram_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    mermaid_code: String,
}

#[derive(Debug)]
pub enum GenerateError {
    Encode { source: serde_json::Error },
    Http { source: reqwest::Error },
    Status { status: reqwest::StatusCode },
    Body { source: reqwest::Error },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode { source } => write!(f, "cannot encode request body: {source}"),
            Self::Http { source } => write!(f, "request failed: {source}"),
            Self::Status { status } => write!(f, "generation service answered {status}"),
            Self::Body { source } => write!(f, "cannot decode response body: {source}"),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode { source } => Some(source),
            Self::Http { source } | Self::Body { source } => Some(source),
            Self::Status { .. } => None,
        }
    }
}

/// HTTP client for the generation service.
#[derive(Debug, Clone)]
pub struct GenerateClient {
    endpoint: String,
    http: reqwest::Client,
}

impl GenerateClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), http: reqwest::Client::new() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POSTs `{"text": <text>, "diagram_type": ""}` and returns the response's
    /// `mermaid_code` field verbatim.
    pub async fn generate(&self, text: &str) -> Result<String, GenerateError> {
        let body = serde_json::to_vec(&GenerateRequest { text, diagram_type: "" })
            .map_err(|source| GenerateError::Encode { source })?;

        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|source| GenerateError::Http { source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::Status { status });
        }

        let parsed: GenerateResponse =
            response.json().await.map_err(|source| GenerateError::Body { source })?;
        Ok(parsed.mermaid_code)
    }
}

#[derive(Debug)]
struct GenerateJob {
    seq: u64,
    text: String,
}

/// Result of one generation request, tagged with its job's sequence number.
#[derive(Debug)]
pub struct GenerateOutcome {
    pub seq: u64,
    pub result: Result<String, GenerateError>,
}

/// Worker thread running generation requests off the UI thread.
///
/// Requests are processed one at a time in submission order, so outcomes
/// arrive in order too. The caller compares an outcome's sequence number
/// against [`GenerateWorker::latest_seq`] and drops anything older; an
/// in-flight request is never cancelled.
#[derive(Debug)]
pub struct GenerateWorker {
    job_tx: mpsc::Sender<GenerateJob>,
    outcome_rx: mpsc::Receiver<GenerateOutcome>,
    next_seq: u64,
}

impl GenerateWorker {
    pub fn spawn(client: GenerateClient) -> io::Result<Self> {
        let (job_tx, job_rx) = mpsc::channel::<GenerateJob>();
        let (outcome_tx, outcome_rx) = mpsc::channel();

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        thread::Builder::new().name("flowsketch-generate".to_owned()).spawn(move || {
            while let Ok(job) = job_rx.recv() {
                let result = runtime.block_on(client.generate(&job.text));
                if outcome_tx.send(GenerateOutcome { seq: job.seq, result }).is_err() {
                    break;
                }
            }
        })?;

        Ok(Self { job_tx, outcome_rx, next_seq: 0 })
    }

    /// Queues a request and returns its sequence number.
    pub fn submit(&mut self, text: String) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        let _ = self.job_tx.send(GenerateJob { seq, text });
        seq
    }

    /// Sequence number of the most recently submitted request.
    pub fn latest_seq(&self) -> u64 {
        self.next_seq
    }

    pub fn try_recv(&self) -> Option<GenerateOutcome> {
        self.outcome_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<GenerateOutcome> {
        self.outcome_rx.recv_timeout(timeout).ok()
    }
}
