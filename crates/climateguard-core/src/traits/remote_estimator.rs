use std::future::Future;

use serde::Serialize;

use crate::errors::EstimationResult;
use crate::models::EmissionFactor;

/// One spend-based estimation request, in the authority's wire shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateRequest {
    pub emission_factor: EmissionFactor,
    pub parameters: SpendParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendParameters {
    pub money: f64,
    pub money_unit: String,
}

impl EstimateRequest {
    pub fn new(emission_factor: EmissionFactor, money: f64, money_unit: impl Into<String>) -> Self {
        Self {
            emission_factor,
            parameters: SpendParameters {
                money,
                money_unit: money_unit.into(),
            },
        }
    }
}

/// The remote estimation authority.
pub trait IRemoteEstimator: Send + Sync {
    /// Submit a request and return the authority's figure in kilograms,
    /// before any clamping.
    fn estimate(
        &self,
        request: &EstimateRequest,
    ) -> impl Future<Output = EstimationResult<f64>> + Send;
}
