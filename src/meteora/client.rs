use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, log};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::meteora::error::FetchError;
use crate::meteora::fallback::fallback_records;
use crate::meteora::locate::locate;
use crate::meteora::normalize::normalize_at;
use crate::models::NormalizedPool;
use crate::monitoring::{LogEntry, LogLevel, LogSink};
use crate::strategy::AdmissionCriteria;

/// Fetches the raw body behind one endpoint
#[async_trait]
pub trait PayloadSource: Send + Sync {
    async fn fetch(&self, endpoint: &str) -> Result<String, FetchError>;
}

/// [`PayloadSource`] backed by a reqwest client
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PayloadSource for HttpSource {
    async fn fetch(&self, endpoint: &str) -> Result<String, FetchError> {
        debug!("GET {}", endpoint);
        let response = self.client.get(endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16() });
        }

        Ok(response.text().await?)
    }
}

/// Which source produced a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolOrigin {
    Endpoint(String),
    Fallback,
}

impl fmt::Display for PoolOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolOrigin::Endpoint(url) => write!(f, "live ({})", url),
            PoolOrigin::Fallback => f.write_str("bundled fallback"),
        }
    }
}

/// An endpoint that was tried and skipped
#[derive(Debug, Clone, PartialEq)]
pub struct SoftFailure {
    pub endpoint: String,
    pub error: FetchError,
}

/// Result of one [`PoolFetcher::fetch_all`] run
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub pools: Vec<NormalizedPool>,
    pub origin: PoolOrigin,
    pub failures: Vec<SoftFailure>,
}

impl FetchOutcome {
    pub fn is_fallback(&self) -> bool {
        self.origin == PoolOrigin::Fallback
    }
}

/// Walks the endpoint list in priority order and returns the first
/// admissible batch, or the bundled dataset when every endpoint fails.
pub struct PoolFetcher<S> {
    source: S,
    endpoints: Vec<String>,
    criteria: AdmissionCriteria,
    sink: Option<Arc<dyn LogSink>>,
}

impl PoolFetcher<HttpSource> {
    /// Build an HTTP-backed fetcher from the application configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = HttpSource::new(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self::new(source, config.endpoints.clone(), config.admission()))
    }
}

impl<S: PayloadSource> PoolFetcher<S> {
    pub fn new(source: S, endpoints: Vec<String>, criteria: AdmissionCriteria) -> Self {
        Self {
            source,
            endpoints,
            criteria,
            sink: None,
        }
    }

    /// Mirror diagnostics into `sink` as well as the process log
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch pools. Never fails; the worst case is the bundled dataset.
    pub async fn fetch_all(&self) -> FetchOutcome {
        self.fetch_all_at(Utc::now(), &mut fastrand::Rng::new()).await
    }

    /// [`fetch_all`](Self::fetch_all) with an explicit clock and randomness source
    pub async fn fetch_all_at(&self, now: DateTime<Utc>, rng: &mut fastrand::Rng) -> FetchOutcome {
        let mut failures = Vec::new();

        for endpoint in &self.endpoints {
            match self.try_endpoint(endpoint, now, rng).await {
                Ok(pools) => {
                    self.emit(
                        LogLevel::Log,
                        format!("Loaded {} pools from {}", pools.len(), endpoint),
                    );
                    return FetchOutcome {
                        pools,
                        origin: PoolOrigin::Endpoint(endpoint.clone()),
                        failures,
                    };
                }
                Err(error) => {
                    self.emit(LogLevel::Warn, format!("Endpoint {} skipped: {}", endpoint, error));
                    failures.push(SoftFailure {
                        endpoint: endpoint.clone(),
                        error,
                    });
                }
            }
        }

        let pools = self.fallback_pools(now, rng);
        self.emit(
            LogLevel::Warn,
            format!(
                "All {} endpoints failed; serving {} bundled pools",
                self.endpoints.len(),
                pools.len()
            ),
        );

        FetchOutcome {
            pools,
            origin: PoolOrigin::Fallback,
            failures,
        }
    }

    async fn try_endpoint(
        &self,
        endpoint: &str,
        now: DateTime<Utc>,
        rng: &mut fastrand::Rng,
    ) -> Result<Vec<NormalizedPool>, FetchError> {
        let body = self.source.fetch(endpoint).await?;
        let payload: Value = serde_json::from_str(&body)?;
        self.admit_batch(locate(&payload), now, rng)
    }

    /// Normalize and filter one located batch
    fn admit_batch(
        &self,
        records: &[Value],
        now: DateTime<Utc>,
        rng: &mut fastrand::Rng,
    ) -> Result<Vec<NormalizedPool>, FetchError> {
        if records.is_empty() {
            return Err(FetchError::NoCollection);
        }

        let normalized: Vec<NormalizedPool> = records
            .iter()
            .filter_map(|raw| normalize_at(raw, now, rng))
            .collect();
        if normalized.is_empty() {
            return Err(FetchError::NoneNormalized { raw: records.len() });
        }

        let dropped = records.len() - normalized.len();
        if dropped > 0 {
            debug!("Dropped {} records without pool identity", dropped);
        }

        let count = normalized.len();
        let admitted = self.criteria.apply(normalized);
        if admitted.is_empty() {
            return Err(FetchError::NoneAdmitted { normalized: count });
        }

        Ok(admitted)
    }

    fn fallback_pools(&self, now: DateTime<Utc>, rng: &mut fastrand::Rng) -> Vec<NormalizedPool> {
        let normalized = fallback_records(now)
            .iter()
            .filter_map(|raw| normalize_at(raw, now, rng))
            .collect();
        self.criteria.apply(normalized)
    }

    fn emit(&self, level: LogLevel, message: String) {
        log!(log::Level::from(level), "{}", message);
        if let Some(sink) = &self.sink {
            sink.record(LogEntry::new(level, message));
        }
    }
}
