//! Closed message set between the scan surface, the display surface and the
//! ledger authority. JSON is decoded only here; everything past this module
//! matches on the enums exhaustively.

use chrono::{DateTime, Utc};
use climateguard_core::{
    AggregateStats, CarbonEstimate, ClimateGuardError, ClimateGuardResult, ImpactEquivalents,
    OffsetEvent, OffsetKind, PageSignal,
};
use serde::{Deserialize, Serialize};

/// Offset details supplied by the surface that triggered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetRequest {
    pub carbon_amount: f64,
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default, alias = "usedAPI")]
    pub used_api: bool,
}

impl OffsetRequest {
    pub fn into_event(self, kind: OffsetKind, now: DateTime<Utc>) -> OffsetEvent {
        OffsetEvent::new(
            kind,
            self.carbon_amount,
            self.site_name,
            self.product_name,
            now,
            self.used_api,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
    ManualOffset(OffsetRequest),
    AutoOffset(OffsetRequest),
    GetRecentOffsets,
    SetAutoOffset { enabled: bool },
    GetStats,
    CalculateCarbon { page_data: PageSignal },
}

impl Request {
    /// Decode one JSON message. Unknown actions are rejected here.
    pub fn decode(raw: &str) -> ClimateGuardResult<Self> {
        serde_json::from_str(raw).map_err(|e| ClimateGuardError::Message(e.to_string()))
    }

    pub fn action(&self) -> &'static str {
        match self {
            Self::ManualOffset(_) => "manualOffset",
            Self::AutoOffset(_) => "autoOffset",
            Self::GetRecentOffsets => "getRecentOffsets",
            Self::SetAutoOffset { .. } => "setAutoOffset",
            Self::GetStats => "getStats",
            Self::CalculateCarbon { .. } => "calculateCarbon",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Response {
    Recorded {
        event: OffsetEvent,
        stats: AggregateStats,
    },
    RecentOffsets {
        offsets: Vec<OffsetEvent>,
    },
    AutoOffset {
        enabled: bool,
    },
    Stats {
        stats: AggregateStats,
        auto_offset_enabled: bool,
    },
    Carbon {
        estimate: CarbonEstimate,
        equivalents: ImpactEquivalents,
    },
    Error {
        message: String,
    },
}

impl Response {
    pub fn error(err: &ClimateGuardError) -> Self {
        Self::Error {
            message: err.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Recorded { .. } => "recorded",
            Self::RecentOffsets { .. } => "recentOffsets",
            Self::AutoOffset { .. } => "autoOffset",
            Self::Stats { .. } => "stats",
            Self::Carbon { .. } => "carbon",
            Self::Error { .. } => "error",
        }
    }
}
