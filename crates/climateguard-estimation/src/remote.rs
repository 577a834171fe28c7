//! HTTP client for the remote estimation authority.
//!
//! Spend-based requests: an emission factor plus an amount of money. The
//! authority answers with `co2e` in tonnes.

use std::fmt;
use std::time::Duration;

use climateguard_core::config::EstimationConfig;
use climateguard_core::constants::KG_PER_TONNE;
use climateguard_core::errors::EstimationResult;
use climateguard_core::traits::{EstimateRequest, IRemoteEstimator};
use climateguard_core::{ClimateGuardError, ClimateGuardResult, EstimationError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

/// Async client for the estimation authority. The credential is held only
/// inside the default headers and never shows up in `Debug` output.
#[derive(Clone)]
pub struct ClimatiqClient {
    client: Client,
    endpoint: String,
}

impl ClimatiqClient {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> ClimateGuardResult<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ClimateGuardError::Config(
                "remote estimator credential is empty".into(),
            ));
        }
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
            ClimateGuardError::Config("remote estimator credential is not a valid header".into())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ClimateGuardError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim().to_string(),
        })
    }

    /// Build a client from config and the credential in the environment.
    /// `Ok(None)` when remote estimation is disabled or no credential is set.
    pub fn from_config(config: &EstimationConfig) -> ClimateGuardResult<Option<Self>> {
        if !config.remote_enabled {
            info!("remote estimation disabled by config");
            return Ok(None);
        }
        let Some(api_key) = config.resolve_api_key() else {
            info!(
                env = %config.api_key_env,
                "no remote estimator credential configured, running local-only"
            );
            return Ok(None);
        };
        Self::new(&config.endpoint, &api_key, config.timeout()).map(Some)
    }
}

impl fmt::Debug for ClimatiqClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClimatiqClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl IRemoteEstimator for ClimatiqClient {
    async fn estimate(&self, request: &EstimateRequest) -> EstimationResult<f64> {
        debug!(
            factor = request.emission_factor.id,
            money = request.parameters.money,
            "submitting remote estimate"
        );
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| EstimationError::unavailable(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EstimationError::unavailable(format!("authority returned {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| EstimationError::unavailable(format!("body read failed: {e}")))?;
        parse_co2e_kg(&body)
    }
}

/// Extract the `co2e` figure (tonnes) from a response body, in kilograms.
pub fn parse_co2e_kg(body: &str) -> EstimationResult<f64> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| EstimationError::malformed(format!("body is not JSON: {e}")))?;
    let tonnes = value
        .get("co2e")
        .and_then(Value::as_f64)
        .ok_or_else(|| EstimationError::malformed("missing or non-numeric co2e"))?;
    if !tonnes.is_finite() || tonnes < 0.0 {
        return Err(EstimationError::malformed(format!("co2e out of range: {tonnes}")));
    }
    Ok(tonnes * KG_PER_TONNE)
}
