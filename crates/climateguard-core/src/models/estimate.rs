use serde::{Deserialize, Serialize};

use super::EmissionCategory;
use crate::constants::{KG_PER_MILE, KG_PER_TREE, USD_PER_KG};

/// Result of one carbon estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonEstimate {
    pub carbon_kg: f64,
    pub sourced_from_remote: bool,
    pub category: EmissionCategory,
    pub price_usd: f64,
}

impl CarbonEstimate {
    pub fn equivalents(&self) -> ImpactEquivalents {
        ImpactEquivalents::from_kg(self.carbon_kg)
    }
}

/// Human-scale figures for a carbon mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactEquivalents {
    pub trees: f64,
    pub donation_usd: f64,
    pub miles_driven: f64,
}

impl ImpactEquivalents {
    pub fn from_kg(carbon_kg: f64) -> Self {
        Self {
            trees: carbon_kg / KG_PER_TREE,
            donation_usd: carbon_kg * USD_PER_KG,
            miles_driven: carbon_kg / KG_PER_MILE,
        }
    }
}
