//! One-shot record fetching
//!
//! The collection is fetched once per distinct endpoint. A [`FetchTicket`]
//! names each request so a result that arrives for an endpoint we already
//! moved away from is dropped instead of overwriting newer state.
//!
//! The fetch runs on its own tokio task and reports back through a oneshot
//! channel. Dropping the [`PendingFetch`] aborts the task.

use crate::model::Record;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Fetch failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure (DNS, connect, timeout)
    Network(String),
    /// Server answered with a non-success status
    Status { status: u16, message: String },
    /// Body was not a JSON array of records
    Decode(String),
    /// The fetch task ended without reporting a result
    Interrupted,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status { status, message } => {
                if message.is_empty() {
                    write!(f, "Request failed with status code {}", status)
                } else {
                    write!(f, "Request failed with status code {}: {}", status, message)
                }
            }
            Self::Decode(msg) => write!(f, "Invalid response: {}", msg),
            Self::Interrupted => write!(f, "Fetch was interrupted"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Anything that can produce the full record collection for an endpoint
pub trait RecordSource: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    fn fetch_all(
        &self,
        endpoint: &str,
    ) -> impl Future<Output = Result<Vec<Record>, FetchError>> + Send;
}

// ═══════════════════════════════════════════════════════════════════════════
// HTTP source
// ═══════════════════════════════════════════════════════════════════════════

/// Fetches `GET <base_url><endpoint>` and decodes a JSON array
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }
}

impl RecordSource for HttpSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_all(&self, endpoint: &str) -> Result<Vec<Record>, FetchError> {
        let url = self.url_for(endpoint);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: message.trim().to_string(),
            });
        }

        response
            .json::<Vec<Record>>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Fetch state
// ═══════════════════════════════════════════════════════════════════════════

/// Loading / error / data as seen by the UI
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    /// Nothing requested yet
    #[default]
    Idle,
    Loading,
    Ready(Vec<Record>),
    Failed(String),
}

impl FetchState {
    pub fn loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&[Record]> {
        match self {
            Self::Ready(records) => Some(records),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one fetch request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    endpoint: String,
    generation: u64,
}

/// Tracks the one fetch for the current endpoint
#[derive(Debug, Default)]
pub struct RecordFetcher {
    endpoint: Option<String>,
    generation: u64,
    state: FetchState,
}

impl RecordFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Ask for `endpoint`; returns a ticket only when a fetch should start
    ///
    /// Asking again for the endpoint already requested is a no-op, whatever
    /// its outcome was. Failures are not retried.
    pub fn request(&mut self, endpoint: &str) -> Option<FetchTicket> {
        if self.endpoint.as_deref() == Some(endpoint) {
            return None;
        }
        self.generation += 1;
        self.endpoint = Some(endpoint.to_string());
        self.state = FetchState::Loading;
        Some(FetchTicket {
            endpoint: endpoint.to_string(),
            generation: self.generation,
        })
    }

    /// Record the outcome of `ticket`; returns false for stale tickets
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<Record>, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!("Discarding stale result for {}", ticket.endpoint);
            return false;
        }
        self.state = match result {
            Ok(records) => {
                tracing::info!("Fetched {} records from {}", records.len(), ticket.endpoint);
                FetchState::Ready(records)
            }
            Err(e) => {
                tracing::error!("Fetch from {} failed: {}", ticket.endpoint, e);
                FetchState::Failed(e.to_string())
            }
        };
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Background task
// ═══════════════════════════════════════════════════════════════════════════

/// A fetch running on a tokio task
pub struct PendingFetch {
    ticket: FetchTicket,
    rx: oneshot::Receiver<Result<Vec<Record>, FetchError>>,
    handle: JoinHandle<()>,
}

impl PendingFetch {
    pub fn ticket(&self) -> &FetchTicket {
        &self.ticket
    }

    /// Wait for the result
    pub async fn wait(&mut self) -> Result<Vec<Record>, FetchError> {
        (&mut self.rx).await.unwrap_or(Err(FetchError::Interrupted))
    }
}

impl Drop for PendingFetch {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start fetching `ticket` from `source` in the background
pub fn spawn_fetch<S>(source: Arc<S>, ticket: FetchTicket) -> PendingFetch
where
    S: RecordSource + 'static,
{
    let (tx, rx) = oneshot::channel();
    let endpoint = ticket.endpoint.clone();
    tracing::debug!("Starting {} fetch for {}", source.name(), endpoint);

    let handle = tokio::spawn(async move {
        let result = source.fetch_all(&endpoint).await;
        // Receiver gone means the consumer was torn down; drop the result
        if tx.send(result).is_err() {
            tracing::debug!("Fetch for {} finished after consumer left", endpoint);
        }
    });

    PendingFetch { ticket, rx, handle }
}
