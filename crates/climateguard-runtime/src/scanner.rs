//! Scan surface: turns page signals into carbon estimates via the authority
//! and triggers offsets for the current page.
//!
//! Every scan takes a generation ticket. If the page is rescanned while an
//! estimate is in flight, the older completion is discarded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use climateguard_core::{
    AggregateStats, CarbonEstimate, ClimateGuardError, ClimateGuardResult, ImpactEquivalents,
    OffsetKind, PageSignal,
};
use climateguard_estimation::{ScanGeneration, ScanTicket};
use tracing::{debug, info};

use crate::authority::AuthorityHandle;
use crate::messages::{OffsetRequest, Request, Response};

#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    pub ticket: ScanTicket,
    pub signal: PageSignal,
    pub estimate: CarbonEstimate,
    pub equivalents: ImpactEquivalents,
}

impl ScanOutcome {
    fn offset_request(&self, kind: OffsetKind) -> OffsetRequest {
        OffsetRequest {
            carbon_amount: self.estimate.carbon_kg,
            site_name: self.signal.display_site().to_string(),
            product_name: Some(
                self.signal
                    .primary_product()
                    .unwrap_or(kind.placeholder_label())
                    .to_string(),
            ),
            used_api: self.estimate.sourced_from_remote,
        }
    }
}

fn unexpected(response: &Response, wanted: &str) -> ClimateGuardError {
    ClimateGuardError::Message(format!("expected {wanted} response, got {}", response.kind()))
}

pub struct ScanSurface {
    authority: AuthorityHandle,
    generation: ScanGeneration,
    current: Mutex<Option<ScanOutcome>>,
    auto_offset: AtomicBool,
}

impl ScanSurface {
    pub fn new(authority: AuthorityHandle) -> Self {
        Self {
            authority,
            generation: ScanGeneration::new(),
            current: Mutex::new(None),
            auto_offset: AtomicBool::new(false),
        }
    }

    /// Pull the persisted auto-offset flag from the authority.
    pub async fn sync_settings(&self) -> ClimateGuardResult<bool> {
        match self.authority.request(Request::GetStats).await? {
            Response::Stats {
                auto_offset_enabled,
                ..
            } => {
                self.auto_offset.store(auto_offset_enabled, Ordering::Release);
                Ok(auto_offset_enabled)
            }
            other => Err(unexpected(&other, "stats")),
        }
    }

    /// Estimate carbon for a page. `Ok(None)` for pages with no shopping
    /// content and for scans superseded before their estimate arrived.
    pub async fn scan(&self, signal: PageSignal) -> ClimateGuardResult<Option<ScanOutcome>> {
        if !signal.has_shopping_content() {
            debug!(site = %signal.site_host, "no shopping content, skipping scan");
            return Ok(None);
        }
        let ticket = self.generation.begin();
        let response = self
            .authority
            .request(Request::CalculateCarbon {
                page_data: signal.clone(),
            })
            .await?;
        let (estimate, equivalents) = match response {
            Response::Carbon {
                estimate,
                equivalents,
            } => (estimate, equivalents),
            other => return Err(unexpected(&other, "carbon")),
        };

        if !self.generation.is_current(ticket) {
            debug!(ticket = ticket.value(), "scan superseded, dropping result");
            return Ok(None);
        }
        let outcome = ScanOutcome {
            ticket,
            signal,
            estimate,
            equivalents,
        };
        if let Ok(mut current) = self.current.lock() {
            *current = Some(outcome.clone());
        }
        Ok(Some(outcome))
    }

    pub fn current(&self) -> Option<ScanOutcome> {
        self.current.lock().ok().and_then(|c| c.clone())
    }

    /// Offset the current page's estimate on the user's request.
    pub async fn offset_now(&self) -> ClimateGuardResult<Option<AggregateStats>> {
        self.offset_current(OffsetKind::Manual).await
    }

    /// Checkout detected: offset automatically if the user opted in.
    pub async fn checkout(&self) -> ClimateGuardResult<Option<AggregateStats>> {
        if !self.auto_offset_enabled() {
            return Ok(None);
        }
        self.offset_current(OffsetKind::Auto).await
    }

    pub async fn set_auto_offset(&self, enabled: bool) -> ClimateGuardResult<()> {
        match self
            .authority
            .request(Request::SetAutoOffset { enabled })
            .await?
        {
            Response::AutoOffset { enabled } => {
                self.auto_offset.store(enabled, Ordering::Release);
                Ok(())
            }
            other => Err(unexpected(&other, "autoOffset")),
        }
    }

    pub fn auto_offset_enabled(&self) -> bool {
        self.auto_offset.load(Ordering::Acquire)
    }

    async fn offset_current(&self, kind: OffsetKind) -> ClimateGuardResult<Option<AggregateStats>> {
        let Some(outcome) = self.current() else {
            return Ok(None);
        };
        let offset = outcome.offset_request(kind);
        let request = match kind {
            OffsetKind::Manual => Request::ManualOffset(offset),
            OffsetKind::Auto => Request::AutoOffset(offset),
        };
        match self.authority.request(request).await? {
            Response::Recorded { event, stats } => {
                info!(id = %event.id, kind = ?kind, carbon_kg = event.carbon_kg, "offset confirmed");
                Ok(Some(stats))
            }
            other => Err(unexpected(&other, "recorded")),
        }
    }
}
