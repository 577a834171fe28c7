use serde::{Deserialize, Serialize};

use crate::constants::{KG_PER_TREE, USD_PER_KG};

/// Cumulative totals over every offset ever recorded.
///
/// Pruning and the history cap never touch these.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AggregateStats {
    pub total_carbon_kg: f64,
    pub total_trees_equivalent: f64,
    pub total_offset_count: u64,
    pub total_donated_usd: f64,
}

impl AggregateStats {
    /// Fold one offset into the totals. Derived figures are recomputed from
    /// the carbon total so they never drift through accumulated rounding.
    pub fn fold(&mut self, carbon_kg: f64) {
        self.total_carbon_kg += carbon_kg;
        self.total_offset_count += 1;
        self.refresh_derived();
    }

    pub fn refresh_derived(&mut self) {
        self.total_trees_equivalent = self.total_carbon_kg / KG_PER_TREE;
        self.total_donated_usd = self.total_carbon_kg * USD_PER_KG;
    }
}
