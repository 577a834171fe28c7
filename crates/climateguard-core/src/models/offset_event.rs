use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{AUTO_PRODUCT_PLACEHOLDER, MANUAL_PRODUCT_PLACEHOLDER, MIN_CARBON_KG};

/// Tiebreak for offsets created within the same millisecond.
static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Clamp a carbon mass to the recordable minimum. NaN and negatives become
/// the minimum; infinities are not recordable either.
pub fn clamp_carbon(carbon_kg: f64) -> f64 {
    if carbon_kg.is_finite() {
        carbon_kg.max(MIN_CARBON_KG)
    } else {
        MIN_CARBON_KG
    }
}

/// Offset identity, totally ordered by creation.
///
/// Serialized as `"<created_ms>-<seq>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OffsetId {
    pub created_ms: i64,
    pub seq: u64,
}

impl OffsetId {
    pub fn new(created_ms: i64, seq: u64) -> Self {
        Self { created_ms, seq }
    }

    /// Fresh id for an offset created at `created_at`.
    pub fn next(created_at: DateTime<Utc>) -> Self {
        Self {
            created_ms: created_at.timestamp_millis(),
            seq: NEXT_SEQ.fetch_add(1, Ordering::Relaxed),
        }
    }
}

impl fmt::Display for OffsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.created_ms, self.seq)
    }
}

impl FromStr for OffsetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ms, seq) = s
            .rsplit_once('-')
            .ok_or_else(|| format!("offset id '{s}' has no sequence part"))?;
        let created_ms = ms
            .parse()
            .map_err(|e| format!("offset id '{s}': bad timestamp: {e}"))?;
        let seq = seq
            .parse()
            .map_err(|e| format!("offset id '{s}': bad sequence: {e}"))?;
        Ok(Self { created_ms, seq })
    }
}

impl TryFrom<String> for OffsetId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OffsetId> for String {
    fn from(id: OffsetId) -> Self {
        id.to_string()
    }
}

/// Who triggered the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetKind {
    Manual,
    Auto,
}

impl OffsetKind {
    pub fn placeholder_label(&self) -> &'static str {
        match self {
            Self::Manual => MANUAL_PRODUCT_PLACEHOLDER,
            Self::Auto => AUTO_PRODUCT_PLACEHOLDER,
        }
    }
}

/// One recorded offset. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetEvent {
    pub id: OffsetId,
    pub kind: OffsetKind,
    pub carbon_kg: f64,
    pub site_host: String,
    pub product_label: String,
    pub created_at: DateTime<Utc>,
    pub sourced_from_remote: bool,
}

impl OffsetEvent {
    pub fn new(
        kind: OffsetKind,
        carbon_kg: f64,
        site_host: impl Into<String>,
        product_label: Option<String>,
        created_at: DateTime<Utc>,
        sourced_from_remote: bool,
    ) -> Self {
        let product_label = product_label
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| kind.placeholder_label().to_string());
        Self {
            id: OffsetId::next(created_at),
            kind,
            carbon_kg: clamp_carbon(carbon_kg),
            site_host: site_host.into(),
            product_label,
            created_at,
            sourced_from_remote,
        }
    }

    /// Re-apply construction invariants to an event read back from storage.
    pub fn normalized(mut self) -> Self {
        self.carbon_kg = clamp_carbon(self.carbon_kg);
        if self.product_label.trim().is_empty() {
            self.product_label = self.kind.placeholder_label().to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carbon_is_clamped_at_construction() {
        let now = Utc::now();
        for raw in [f64::NAN, -3.0, 0.0, 4.99, f64::INFINITY] {
            let e = OffsetEvent::new(OffsetKind::Manual, raw, "x", None, now, false);
            assert_eq!(e.carbon_kg, 5.0, "raw = {raw}");
        }
        let e = OffsetEvent::new(OffsetKind::Manual, 42.0, "x", None, now, false);
        assert_eq!(e.carbon_kg, 42.0);
    }

    #[test]
    fn placeholders_depend_on_kind() {
        let now = Utc::now();
        let m = OffsetEvent::new(OffsetKind::Manual, 10.0, "x", Some("  ".into()), now, false);
        let a = OffsetEvent::new(OffsetKind::Auto, 10.0, "x", None, now, false);
        assert_eq!(m.product_label, "Unknown Product");
        assert_eq!(a.product_label, "Auto Purchase");
    }

    #[test]
    fn ids_are_ordered_within_one_millisecond() {
        let now = Utc::now();
        let a = OffsetId::next(now);
        let b = OffsetId::next(now);
        assert!(a < b);
    }

    #[test]
    fn id_round_trips_through_json() {
        let id = OffsetId::new(1_700_000_000_000, 7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"1700000000000-7\"");
        let back: OffsetId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!("nope".parse::<OffsetId>().is_err());
    }
}
