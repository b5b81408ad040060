//! HTTP client initialization.
//!
//! Every worker builds its own probe client from the shared configuration,
//! so no client state is shared between workers.

use std::time::Duration;

use reqwest::{redirect, ClientBuilder, Proxy};

use crate::config::{Config, POOL_IDLE_TIMEOUT, TCP_CONNECT_TIMEOUT_SECS};
use crate::error_handling::InitializationError;

/// Initializes a probe HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - Request timeout from the config, connect timeout capped at `TCP_CONNECT_TIMEOUT_SECS`
/// - Certificate verification disabled, so self-signed and misconfigured hosts can be probed
/// - Redirects disabled: the first response's CORS headers are the ones evaluated
/// - The configured proxy, or no proxy at all (environment proxies are ignored)
/// - User-Agent and extra headers from the config on every request
///
/// # Errors
///
/// Returns `InitializationError` if a header or the proxy URL is invalid or the
/// client cannot be built.
pub fn init_probe_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let timeout = Duration::from_secs(config.timeout_seconds);
    let connect_timeout = Duration::from_secs(config.timeout_seconds.min(TCP_CONNECT_TIMEOUT_SECS));

    let mut builder = ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .danger_accept_invalid_certs(true)
        .redirect(redirect::Policy::none())
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .user_agent(config.user_agent.clone())
        .default_headers(config.request_headers()?);

    builder = match &config.proxy {
        Some(proxy) => builder.proxy(Proxy::all(proxy)?),
        None => builder.no_proxy(),
    };

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_probe_client_default() {
        let config = Config::default();
        assert!(init_probe_client(&config).is_ok());
    }

    #[test]
    fn test_init_probe_client_with_proxy() {
        let config = Config {
            proxy: Some("http://127.0.0.1:8080".to_string()),
            ..Default::default()
        };
        assert!(init_probe_client(&config).is_ok());
    }

    #[tokio::test]
    async fn test_configured_proxy_carries_probe_requests() {
        use crate::probe::ProbeClient;
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let proxy = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("Access-Control-Allow-Origin", "null"),
            )
            .mount(&proxy)
            .await;

        let config = Config {
            proxy: Some(proxy.uri()),
            ..Default::default()
        };
        let client = ProbeClient::from_config(&config).unwrap();
        let response = client.send("http://target.invalid/", "null").await.unwrap();
        assert!(response.reflects("null"));

        let received = proxy.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(
            received[0].headers.get("origin").and_then(|v| v.to_str().ok()),
            Some("null")
        );
    }

    #[test]
    fn test_init_probe_client_rejects_bad_header() {
        let config = Config {
            headers: vec!["missing-colon".to_string()],
            ..Default::default()
        };
        let err = init_probe_client(&config).unwrap_err();
        assert!(matches!(err, InitializationError::InvalidConfig(_)));
    }
}
