//! Remote-first carbon estimation with a local fallback.
//!
//! Callers never see an error: any remote failure is logged at `warn` and
//! the local heuristic answers instead.

use std::time::Duration;

use climateguard_core::config::EstimationConfig;
use climateguard_core::errors::{EstimationResult, RecoveryAction};
use climateguard_core::models::clamp_carbon;
use climateguard_core::traits::{EstimateRequest, IRemoteEstimator};
use climateguard_core::{
    CarbonEstimate, ClimateGuardResult, EmissionFactor, EstimationError, PageSignal,
};
use tracing::{debug, warn};

use crate::classifier::classify;
use crate::heuristic::LocalHeuristic;
use crate::price::estimate_price;
use crate::remote::ClimatiqClient;

pub struct CarbonEstimationService<R> {
    remote: Option<R>,
    heuristic: LocalHeuristic,
    timeout: Duration,
    currency: String,
}

impl CarbonEstimationService<ClimatiqClient> {
    /// Build from config. Without a credential in the environment the service
    /// runs local-only.
    pub fn from_config(config: &EstimationConfig) -> ClimateGuardResult<Self> {
        let remote = ClimatiqClient::from_config(config)?;
        Ok(Self::new(remote, config))
    }
}

impl<R: IRemoteEstimator> CarbonEstimationService<R> {
    pub fn new(remote: Option<R>, config: &EstimationConfig) -> Self {
        Self {
            remote,
            heuristic: LocalHeuristic::new(config.rng_seed),
            timeout: config.timeout(),
            currency: config.currency.clone(),
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Ask the remote authority about the primary product.
    pub async fn estimate_remote(&self, signal: &PageSignal) -> EstimationResult<CarbonEstimate> {
        let Some(remote) = self.remote.as_ref() else {
            return Err(EstimationError::unavailable("no remote estimator configured"));
        };
        let Some(primary) = signal.primary_product() else {
            return Err(EstimationError::NoProductSignal);
        };

        let category = classify(Some(primary));
        let price_usd = estimate_price(signal);
        let request =
            EstimateRequest::new(EmissionFactor::for_category(category), price_usd, &self.currency);

        let kg = match tokio::time::timeout(self.timeout, remote.estimate(&request)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(EstimationError::unavailable(format!(
                    "timed out after {}ms",
                    self.timeout.as_millis()
                )))
            }
        };

        Ok(CarbonEstimate {
            carbon_kg: clamp_carbon(kg),
            sourced_from_remote: true,
            category,
            price_usd,
        })
    }

    /// Keyword-table estimate. Never fails.
    pub fn estimate_local(&self, signal: &PageSignal) -> CarbonEstimate {
        CarbonEstimate {
            carbon_kg: self.heuristic.estimate(signal),
            sourced_from_remote: false,
            category: classify(signal.primary_product()),
            price_usd: estimate_price(signal),
        }
    }

    /// Remote first, local on any failure.
    pub async fn estimate(&self, signal: &PageSignal) -> CarbonEstimate {
        if self.remote.is_none() {
            return self.estimate_local(signal);
        }
        match self.estimate_remote(signal).await {
            Ok(estimate) => {
                debug!(
                    site = %signal.site_host,
                    carbon_kg = estimate.carbon_kg,
                    category = %estimate.category,
                    "remote estimate"
                );
                estimate
            }
            Err(e) => {
                warn!(
                    site = %signal.site_host,
                    kind = e.kind(),
                    error = %e,
                    recovery = %RecoveryAction::for_estimation(&e),
                    "remote estimation failed, using local heuristic"
                );
                self.estimate_local(signal)
            }
        }
    }
}
