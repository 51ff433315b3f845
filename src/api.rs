// API client module: the request helper every seeding stage goes through.
// It joins endpoints onto the configured base address, sends JSON with a
// fixed `Content-Type`, retries transient failures and turns any status
// >= 400 into a `SeedError::Api` for the caller to propagate.

use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use crate::config::SeedConfig;
use crate::error::{SeedError, SeedResult};
use crate::output;

const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// HTTP verbs the helper knows how to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }

    /// Whether sending the same request twice leaves the service in the
    /// same state. PUT replaces the full tag set, so it qualifies.
    pub fn is_idempotent(self) -> bool {
        matches!(self, Method::Get | Method::Put)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Method::Get),
            "post" => Ok(Method::Post),
            "put" => Ok(Method::Put),
            _ => Err(format!("Unsupported method: {}", s)),
        }
    }
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Moves one request over the wire. `HttpTransport` is the real thing;
/// tests plug in an in-memory server.
pub trait Transport {
    fn send(&self, method: Method, url: &str, body: Option<&Value>) -> SeedResult<RawResponse>;
}

/// Blocking reqwest transport.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> SeedResult<Self> {
        // reqwest's blocking client defaults to a 30s timeout; `None` here
        // means wait as long as the server takes.
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, method: Method, url: &str, body: Option<&Value>) -> SeedResult<RawResponse> {
        let mut req = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
        };
        req = req.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            req = req.body(serde_json::to_vec(body)?);
        }

        let res = req.send()?;
        let status = res.status().as_u16();
        let body = res.text().unwrap_or_else(|_| "".into());
        Ok(RawResponse { status, body })
    }
}

/// Request helper bound to one base address and retry policy.
pub struct ApiClient<T = HttpTransport> {
    transport: T,
    config: SeedConfig,
}

impl ApiClient<HttpTransport> {
    /// Create an ApiClient talking HTTP to the configured base address.
    pub fn new(config: SeedConfig) -> SeedResult<Self> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(ApiClient { transport, config })
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(config: SeedConfig, transport: T) -> Self {
        ApiClient { transport, config }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Loosely typed entry point taking the verb as text. An unsupported
    /// verb is reported and yields `Ok(None)` without touching the network.
    pub fn request<P: Serialize>(&self, method: &str, endpoint: &str, payload: Option<&P>) -> SeedResult<Option<Value>> {
        match method.parse::<Method>() {
            Ok(method) => self.send(method, endpoint, payload),
            Err(msg) => {
                output::error(msg);
                Ok(None)
            }
        }
    }

    pub fn get(&self, endpoint: &str) -> SeedResult<Option<Value>> {
        self.send::<Value>(Method::Get, endpoint, None)
    }

    pub fn post<P: Serialize>(&self, endpoint: &str, payload: &P) -> SeedResult<Option<Value>> {
        self.send(Method::Post, endpoint, Some(payload))
    }

    pub fn put<P: Serialize>(&self, endpoint: &str, payload: &P) -> SeedResult<Option<Value>> {
        self.send(Method::Put, endpoint, Some(payload))
    }

    /// Send one request. Returns `None` for 204 (and any empty 2xx body),
    /// the parsed JSON body otherwise. Status >= 400 is an error; transient
    /// failures are retried according to the configuration first.
    pub fn send<P: Serialize>(&self, method: Method, endpoint: &str, payload: Option<&P>) -> SeedResult<Option<Value>> {
        let url = self.config.url_for(endpoint);
        let body = payload.map(serde_json::to_value).transpose()?;

        tracing::info!(%method, %url, "making request");
        if let Some(body) = &body {
            tracing::info!(payload = %body, "request data");
        }

        let mut attempt = 0;
        loop {
            match self.attempt(method, &url, body.as_ref()) {
                Err(err) if attempt < self.config.max_retries && self.should_retry(method, &err) => {
                    let delay = self.backoff(attempt);
                    attempt += 1;
                    tracing::warn!(
                        %method,
                        %url,
                        attempt,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient failure, retrying"
                    );
                    thread::sleep(delay);
                }
                result => return result,
            }
        }
    }

    fn attempt(&self, method: Method, url: &str, body: Option<&Value>) -> SeedResult<Option<Value>> {
        let res = self.transport.send(method, url, body)?;
        if res.status >= 400 {
            return Err(SeedError::api(res.status, res.body));
        }
        if res.status == 204 || res.body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&res.body)?))
    }

    // A POST that reached the server may have created the record, so only
    // connection failures are safe to repeat for it.
    fn should_retry(&self, method: Method, err: &SeedError) -> bool {
        if method.is_idempotent() {
            err.is_transient()
        } else {
            err.is_connect()
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.config
            .retry_delay
            .checked_mul(factor)
            .map_or(MAX_BACKOFF, |d| d.min(MAX_BACKOFF))
    }
}
