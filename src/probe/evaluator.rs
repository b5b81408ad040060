//! Per-target evaluation.
//!
//! Walks the candidate origins for one target in generator order, sends one
//! request per candidate and records every candidate echoed back verbatim in
//! `Access-Control-Allow-Origin`.

use std::time::Duration;

use log::{debug, info};

use crate::config::Config;
use crate::error_handling::{
    categorize_reqwest_error, InitializationError, ProcessingStats, TargetError,
};
use crate::models::ScanResult;
use crate::origins::generate_origins;
use crate::target::TargetUrl;

use super::client::ProbeClient;

/// Drives the probe client over one target's candidate origins.
#[derive(Debug, Clone)]
pub struct TargetEvaluator {
    client: ProbeClient,
    delay: Duration,
    all_origins: bool,
}

impl TargetEvaluator {
    pub fn new(client: ProbeClient, delay: Duration, all_origins: bool) -> Self {
        Self {
            client,
            delay,
            all_origins,
        }
    }

    /// Builds an evaluator with its own probe client.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError` if the probe client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        Ok(Self::new(
            ProbeClient::from_config(config)?,
            config.delay(),
            config.all_origins,
        ))
    }

    /// Parses `raw` and evaluates it.
    ///
    /// # Errors
    ///
    /// Returns `TargetError` only when the URL cannot be parsed; request
    /// failures never abort a target.
    pub async fn evaluate_url(
        &self,
        raw: &str,
        stats: &mut ProcessingStats,
    ) -> Result<Option<ScanResult>, TargetError> {
        let target = TargetUrl::parse(raw)?;
        Ok(self.evaluate(&target, stats).await)
    }

    /// Probes every candidate origin for `target`.
    ///
    /// Unless all origins are requested, probing stops before the next request
    /// once one reflection is recorded; the first candidate is always sent.
    /// Failed requests are counted in `stats` and skipped.
    ///
    /// Returns `None` when no candidate was reflected.
    pub async fn evaluate(
        &self,
        target: &TargetUrl,
        stats: &mut ProcessingStats,
    ) -> Option<ScanResult> {
        let mut reflected: Vec<String> = Vec::new();
        let mut acac: Option<String> = None;

        for candidate in generate_origins(target) {
            if !self.all_origins && !reflected.is_empty() {
                break;
            }

            tokio::time::sleep(self.delay).await;

            stats.record_request();
            let response = match self.client.send(target.as_str(), &candidate.origin).await {
                Ok(response) => response,
                Err(e) => {
                    let error_type = categorize_reqwest_error(&e);
                    stats.increment_error(error_type);
                    debug!(
                        "{} with Origin '{}' failed ({error_type}): {e}",
                        target, candidate.origin
                    );
                    continue;
                }
            };

            if response.reflects(&candidate.origin) {
                info!(
                    "{} reflects {} origin '{}' (ACAC: {})",
                    target,
                    candidate.class,
                    candidate.origin,
                    response.acac.as_deref().unwrap_or("-")
                );
                reflected.push(candidate.origin);
                acac = response.acac;
            }
        }

        if reflected.is_empty() {
            return None;
        }
        Some(ScanResult {
            url: target.as_str().to_string(),
            acao: reflected,
            acac,
        })
    }
}
