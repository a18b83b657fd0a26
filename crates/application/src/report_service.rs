use std::sync::Arc;

use chrono::{DateTime, Utc};

use govex_domain::Bundle;

use crate::governance_ports::GovernanceSource;
use crate::transforms::{
    bundle_owner, compute_last_updated, current_stage_assignee, days_in_current_stage_at,
};

mod all_bundles;
mod history;
mod metrics;

pub use metrics::STAGNATION_CHART_SIZE;

/// Number of bundles requested from the source for every report.
pub const DEFAULT_BUNDLE_LIMIT: usize = 1000;

/// Builds the three governance report views from a [`GovernanceSource`].
#[derive(Clone)]
pub struct ReportService {
    source: Arc<dyn GovernanceSource>,
    bundle_limit: usize,
}

impl ReportService {
    /// Creates a report service that fetches [`DEFAULT_BUNDLE_LIMIT`] bundles.
    #[must_use]
    pub fn new(source: Arc<dyn GovernanceSource>) -> Self {
        Self {
            source,
            bundle_limit: DEFAULT_BUNDLE_LIMIT,
        }
    }

    /// Overrides the bundle fetch limit.
    #[must_use]
    pub fn with_bundle_limit(mut self, bundle_limit: usize) -> Self {
        self.bundle_limit = bundle_limit;
        self
    }

    async fn fetch_bundles(&self) -> Vec<Bundle> {
        self.source.fetch_bundles(self.bundle_limit).await
    }
}

/// Fields shared by the overview and stagnation rows.
struct BundleSummary<'a> {
    name: &'a str,
    current_stage: &'a str,
    current_stage_assignee: &'a str,
    owner: &'a str,
    last_updated: Option<DateTime<Utc>>,
    days_in_stage: i64,
}

impl<'a> BundleSummary<'a> {
    fn of(bundle: &'a Bundle, now: DateTime<Utc>) -> Self {
        Self {
            name: bundle.name(),
            current_stage: bundle.stage(),
            current_stage_assignee: current_stage_assignee(bundle),
            owner: bundle_owner(bundle),
            last_updated: compute_last_updated(bundle),
            days_in_stage: days_in_current_stage_at(bundle, now),
        }
    }
}
