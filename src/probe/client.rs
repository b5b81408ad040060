//! Probe request client.

use log::trace;
use reqwest::header::ORIGIN;
use reqwest::Method;

use crate::config::{
    Config, HEADER_ACCESS_CONTROL_ALLOW_CREDENTIALS, HEADER_ACCESS_CONTROL_ALLOW_ORIGIN,
};
use crate::error_handling::InitializationError;
use crate::initialization::init_probe_client;

/// The CORS response headers of one probe. Status and body are irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResponse {
    /// `Access-Control-Allow-Origin`, if present.
    pub acao: Option<String>,
    /// `Access-Control-Allow-Credentials`, if present.
    pub acac: Option<String>,
}

impl ProbeResponse {
    /// Extracts the CORS headers; only the first value of each header counts.
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let get = |name: &str| {
            headers
                .get(name)
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        };
        Self {
            acao: get(HEADER_ACCESS_CONTROL_ALLOW_ORIGIN),
            acac: get(HEADER_ACCESS_CONTROL_ALLOW_CREDENTIALS),
        }
    }

    /// `true` when ACAO is byte-identical to the origin that was sent.
    pub fn reflects(&self, origin: &str) -> bool {
        self.acao.as_deref() == Some(origin)
    }
}

/// Sends one request per candidate origin. Owned by a single worker.
#[derive(Debug, Clone)]
pub struct ProbeClient {
    client: reqwest::Client,
    method: Method,
}

impl ProbeClient {
    pub fn new(client: reqwest::Client, method: Method) -> Self {
        Self { client, method }
    }

    /// Builds a client from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError` for an invalid method, header, or proxy.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        Ok(Self::new(init_probe_client(config)?, config.http_method()?))
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Sends the configured method to `url` with `Origin: origin`.
    ///
    /// The body is drained and discarded; a failure while draining does not
    /// invalidate headers that were already received.
    ///
    /// # Errors
    ///
    /// Returns the transport error (timeout, connect, TLS handshake, ...). The
    /// caller decides whether to skip the candidate.
    pub async fn send(&self, url: &str, origin: &str) -> Result<ProbeResponse, reqwest::Error> {
        let response = self
            .client
            .request(self.method.clone(), url)
            .header(ORIGIN, origin)
            .send()
            .await?;

        trace!("{} {} (Origin: {origin}) -> {}", self.method, url, response.status());

        let probe = ProbeResponse::from_headers(response.headers());
        if let Err(e) = response.bytes().await {
            trace!("Discarding unreadable body from {url}: {e}");
        }
        Ok(probe)
    }
}
