// Rate limited HTTP transport shared by every platform adapter

use anyhow::Result;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// User-Agent string for all HTTP requests
const USER_AGENT: &str = concat!("mmm/", env!("CARGO_PKG_VERSION"));

/// Minimum spacing between outbound requests. Both platforms quota by
/// requests per minute, so one global interval covers them.
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(200);

/// A response reduced to what the adapters need: a success flag and the raw
/// body to deserialize. Anything else (status codes, headers) stays inside
/// the transport.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub ok: bool,
    body: String,
}

impl FetchResponse {
    pub fn new(ok: bool, body: impl Into<String>) -> Self {
        Self {
            ok,
            body: body.into(),
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// The fetch capability the adapters are built against. Production code uses
/// [`RateLimitedTransport`]; tests script responses.
#[async_trait::async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str, headers: &[(&'static str, String)]) -> Result<FetchResponse>;
}

/// Paces outbound requests so platform quotas are respected globally, no
/// matter how many resolutions run concurrently.
pub struct RateLimitedTransport {
    client: Client,
    min_interval: Duration,
    next_slot: Mutex<Instant>,
}

impl RateLimitedTransport {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            min_interval,
            next_slot: Mutex::new(Instant::now()),
        }
    }

    /// Waits for the next request slot. The lock is held across the sleep so
    /// concurrent callers queue up instead of stampeding.
    async fn pace(&self) {
        let mut next_slot = self.next_slot.lock().await;
        let now = Instant::now();
        if *next_slot > now {
            tokio::time::sleep_until(*next_slot).await;
        }
        *next_slot = Instant::now() + self.min_interval;
    }
}

#[async_trait::async_trait]
impl Fetch for RateLimitedTransport {
    async fn fetch(&self, url: &str, headers: &[(&'static str, String)]) -> Result<FetchResponse> {
        self.pace().await;

        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let response = request.send().await?;
        let ok = response.status().is_success();
        let body = response.text().await.unwrap_or_default();
        Ok(FetchResponse::new(ok, body))
    }
}

lazy_static::lazy_static! {
    static ref SHARED: Arc<RateLimitedTransport> =
        Arc::new(RateLimitedTransport::new(MIN_REQUEST_INTERVAL));
}

/// The process-wide transport. Every resolution must go through this one
/// instance so pacing is enforced across concurrent batch updates.
pub fn shared_transport() -> Arc<dyn Fetch> {
    SHARED.clone()
}
