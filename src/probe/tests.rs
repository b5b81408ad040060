// Probe evaluation tests against a local mock server.

use super::*;
use crate::config::{Config, SPECIAL_CHARS};
use crate::error_handling::{ErrorType, ProcessingStats};
use crate::origins::{generate_origins, STRUCTURAL_CANDIDATES};
use crate::target::TargetUrl;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const TOTAL_CANDIDATES: usize = STRUCTURAL_CANDIDATES + SPECIAL_CHARS.len();

fn evaluator(all_origins: bool) -> TargetEvaluator {
    let config = Config {
        delay_ms: 0,
        timeout_seconds: 5,
        all_origins,
        ..Default::default()
    };
    TargetEvaluator::from_config(&config).expect("Failed to build evaluator")
}

fn origin_of(req: &Request) -> Option<String> {
    req.headers
        .get("origin")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn sent_origins(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("Request recording should be enabled")
        .iter()
        .filter_map(origin_of)
        .collect()
}

/// Mounts a responder that reflects the request Origin when `allow` says so.
async fn mount_reflector<F>(server: &MockServer, allow: F, acac: Option<&'static str>)
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    Mock::given(method("GET"))
        .respond_with(move |req: &Request| {
            let mut response = ResponseTemplate::new(200).set_body_string("ok");
            if let Some(origin) = origin_of(req) {
                if allow(&origin) {
                    response =
                        response.insert_header("Access-Control-Allow-Origin", origin.as_str());
                    if let Some(acac) = acac {
                        response =
                            response.insert_header("Access-Control-Allow-Credentials", acac);
                    }
                }
            }
            response
        })
        .mount(server)
        .await;
}

fn target(server: &MockServer) -> TargetUrl {
    TargetUrl::parse(&server.uri()).unwrap()
}

#[tokio::test]
async fn test_wildcard_hit_stops_after_first_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Access-Control-Allow-Origin", "*"),
        )
        .mount(&server)
        .await;

    let mut stats = ProcessingStats::new();
    let result = evaluator(false)
        .evaluate(&target(&server), &mut stats)
        .await
        .expect("Wildcard should be recorded");

    assert_eq!(result.acao, vec!["*".to_string()]);
    assert_eq!(result.acac, None);
    assert!(!result.is_exploitable());
    assert_eq!(stats.requests(), 1);
    assert_eq!(sent_origins(&server).await, vec!["*".to_string()]);
}

#[tokio::test]
async fn test_all_mode_sends_every_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Access-Control-Allow-Origin", "*"),
        )
        .mount(&server)
        .await;

    let target = target(&server);
    let mut stats = ProcessingStats::new();
    let result = evaluator(true).evaluate(&target, &mut stats).await.unwrap();

    // Only the candidate "*" equals the static "*" header
    assert_eq!(result.acao, vec!["*".to_string()]);
    assert_eq!(stats.requests(), TOTAL_CANDIDATES);

    let expected: Vec<String> = generate_origins(&target)
        .into_iter()
        .map(|c| c.origin)
        .collect();
    assert_eq!(sent_origins(&server).await, expected);
}

#[tokio::test]
async fn test_null_origin_with_credentials() {
    let server = MockServer::start().await;
    mount_reflector(&server, |origin| origin == "null", Some("true")).await;

    let mut stats = ProcessingStats::new();
    let result = evaluator(false)
        .evaluate(&target(&server), &mut stats)
        .await
        .unwrap();

    assert_eq!(result.url, server.uri());
    assert_eq!(result.acao, vec!["null".to_string()]);
    assert_eq!(result.acac.as_deref(), Some("true"));
    assert!(result.is_exploitable());
    // "*" then "null", then the short-circuit fires
    assert_eq!(stats.requests(), 2);
}

#[tokio::test]
async fn test_all_mode_records_every_reflection_in_order() {
    let server = MockServer::start().await;
    mount_reflector(&server, |_| true, Some("true")).await;

    let target = target(&server);
    let mut stats = ProcessingStats::new();
    let result = evaluator(true).evaluate(&target, &mut stats).await.unwrap();

    let expected: Vec<String> = generate_origins(&target)
        .into_iter()
        .map(|c| c.origin)
        .collect();
    assert_eq!(result.acao, expected);
    assert_eq!(result.acac.as_deref(), Some("true"));
}

#[tokio::test]
async fn test_acac_comes_from_latest_hit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(|req: &Request| match origin_of(req).as_deref() {
            Some("null") => ResponseTemplate::new(200)
                .insert_header("Access-Control-Allow-Origin", "null")
                .insert_header("Access-Control-Allow-Credentials", "true"),
            Some("http://corsmisc.com") => ResponseTemplate::new(200)
                .insert_header("Access-Control-Allow-Origin", "http://corsmisc.com"),
            _ => ResponseTemplate::new(200)
                .insert_header("Access-Control-Allow-Credentials", "true"),
        })
        .mount(&server)
        .await;

    let mut stats = ProcessingStats::new();
    let result = evaluator(true)
        .evaluate(&target(&server), &mut stats)
        .await
        .unwrap();

    assert_eq!(
        result.acao,
        vec!["null".to_string(), "http://corsmisc.com".to_string()]
    );
    // The second hit carried no ACAC; later non-hit responses never count
    assert_eq!(result.acac, None);
}

#[tokio::test]
async fn test_case_mismatch_is_not_a_hit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(|req: &Request| {
            let upper = origin_of(req).unwrap_or_default().to_uppercase();
            ResponseTemplate::new(200).insert_header("Access-Control-Allow-Origin", upper.as_str())
        })
        .mount(&server)
        .await;

    let mut stats = ProcessingStats::new();
    let result = evaluator(false).evaluate(&target(&server), &mut stats).await;

    // "*" has no case, so it is the only candidate that still matches
    assert_eq!(result.unwrap().acao, vec!["*".to_string()]);

    let mut stats = ProcessingStats::new();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(|req: &Request| {
            let origin = origin_of(req).unwrap_or_default();
            let header = if origin == "*" { "-".to_string() } else { origin.to_uppercase() };
            ResponseTemplate::new(200).insert_header("Access-Control-Allow-Origin", header.as_str())
        })
        .mount(&server)
        .await;
    let result = evaluator(false).evaluate(&target(&server), &mut stats).await;
    assert!(result.is_none());
    assert_eq!(stats.requests(), TOTAL_CANDIDATES);
}

#[tokio::test]
async fn test_no_reflection_yields_no_result() {
    let server = MockServer::start().await;
    mount_reflector(&server, |_| false, None).await;

    let mut stats = ProcessingStats::new();
    let result = evaluator(false).evaluate(&target(&server), &mut stats).await;

    assert!(result.is_none());
    assert_eq!(stats.requests(), TOTAL_CANDIDATES);
    assert_eq!(stats.failed_requests(), 0);
}

#[tokio::test]
async fn test_connection_failures_do_not_abort_target() {
    // Bind then drop a listener so the port refuses connections
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let target = TargetUrl::parse(&format!("http://{addr}/")).unwrap();
    let mut stats = ProcessingStats::new();
    let result = evaluator(false).evaluate(&target, &mut stats).await;

    assert!(result.is_none());
    assert_eq!(stats.requests(), TOTAL_CANDIDATES);
    assert_eq!(stats.failed_requests(), TOTAL_CANDIDATES);
    assert_eq!(
        stats.get_error_count(ErrorType::HttpRequestConnectError),
        TOTAL_CANDIDATES
    );
}

#[tokio::test]
async fn test_timed_out_candidate_is_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(|req: &Request| match origin_of(req).as_deref() {
            Some("*") => ResponseTemplate::new(200)
                .insert_header("Access-Control-Allow-Origin", "*")
                .set_delay(Duration::from_secs(3)),
            Some("null") => {
                ResponseTemplate::new(200).insert_header("Access-Control-Allow-Origin", "null")
            }
            _ => ResponseTemplate::new(200),
        })
        .mount(&server)
        .await;

    let config = Config {
        delay_ms: 0,
        timeout_seconds: 1,
        ..Default::default()
    };
    let evaluator = TargetEvaluator::from_config(&config).unwrap();
    let mut stats = ProcessingStats::new();
    let result = evaluator.evaluate(&target(&server), &mut stats).await.unwrap();

    // The timed-out "*" is never credited, even though its response would match
    assert_eq!(result.acao, vec!["null".to_string()]);
    assert_eq!(stats.requests(), 2);
    assert_eq!(stats.get_error_count(ErrorType::HttpRequestTimeoutError), 1);
}

#[tokio::test]
async fn test_redirects_are_not_followed() {
    let server = MockServer::start().await;
    let final_url = format!("{}/final", server.uri());
    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", final_url.as_str()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Access-Control-Allow-Origin", "*"),
        )
        .mount(&server)
        .await;

    let target = TargetUrl::parse(&format!("{}/start", server.uri())).unwrap();
    let mut stats = ProcessingStats::new();
    let result = evaluator(false).evaluate(&target, &mut stats).await;

    assert!(result.is_none());
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() == "/start"));
}

#[tokio::test]
async fn test_request_targets_original_url_with_configured_method_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("OPTIONS"))
        .and(path("/api/v1"))
        .respond_with(|req: &Request| {
            let origin = origin_of(req).unwrap_or_default();
            let mut response = ResponseTemplate::new(204);
            if origin == "null" && req.headers.get("x-api-key").is_some() {
                response = response.insert_header("Access-Control-Allow-Origin", "null");
            }
            response
        })
        .mount(&server)
        .await;

    let config = Config {
        delay_ms: 0,
        method: "OPTIONS".to_string(),
        headers: vec!["X-Api-Key: secret".to_string()],
        ..Default::default()
    };
    let evaluator = TargetEvaluator::from_config(&config).unwrap();
    let url = format!("{}/api/v1?x=1", server.uri());
    let mut stats = ProcessingStats::new();
    let result = evaluator
        .evaluate_url(&url, &mut stats)
        .await
        .expect("URL should parse")
        .expect("null should be reflected");

    assert_eq!(result.url, url);
    assert_eq!(result.acao, vec!["null".to_string()]);
    let requests = server.received_requests().await.unwrap();
    assert!(requests
        .iter()
        .all(|r| r.url.path() == "/api/v1" && r.url.query() == Some("x=1")));
}

#[tokio::test]
async fn test_evaluate_url_rejects_unparseable_target() {
    let mut stats = ProcessingStats::new();
    let err = evaluator(false)
        .evaluate_url("not a url", &mut stats)
        .await
        .unwrap_err();
    assert!(matches!(err, crate::error_handling::TargetError::InvalidUrl { .. }));
    assert_eq!(stats.requests(), 0);
}

#[tokio::test]
async fn test_delay_applies_before_each_request() {
    let server = MockServer::start().await;
    mount_reflector(&server, |origin| origin == "null", None).await;

    let config = Config {
        delay_ms: 50,
        ..Default::default()
    };
    let evaluator = TargetEvaluator::from_config(&config).unwrap();
    let mut stats = ProcessingStats::new();
    let start = std::time::Instant::now();
    evaluator.evaluate(&target(&server), &mut stats).await.unwrap();

    // Two requests, each preceded by the delay
    assert!(start.elapsed() >= Duration::from_millis(100));
}
