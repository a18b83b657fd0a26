use std::path::PathBuf;

use async_trait::async_trait;
use govex_application::{AuditEventQuery, GovernanceSource};
use govex_core::{AppError, AppResult};
use govex_domain::{AuditEventPage, Bundle};
use serde_json::Value;
use tracing::warn;

/// File holding a `{"data": [...]}` bundle listing.
pub const SAMPLE_BUNDLES_FILE: &str = "sample_bundles.json";

/// File holding one audit event page.
pub const SAMPLE_EVENTS_FILE: &str = "sample_events.json";

/// Offline governance source reading JSON fixtures from a directory.
///
/// The fixtures are returned as stored: neither the bundle limit nor the
/// audit query narrows them.
#[derive(Debug, Clone)]
pub struct FixtureGovernanceSource {
    fixture_dir: PathBuf,
}

impl FixtureGovernanceSource {
    /// Creates a source reading fixtures from `fixture_dir`.
    #[must_use]
    pub fn new(fixture_dir: impl Into<PathBuf>) -> Self {
        Self {
            fixture_dir: fixture_dir.into(),
        }
    }

    async fn read_fixture(&self, file_name: &str) -> AppResult<Value> {
        let path = self.fixture_dir.join(file_name);
        let contents = tokio::fs::read_to_string(&path).await.map_err(|error| {
            AppError::NotFound(format!("fixture '{}' unreadable: {error}", path.display()))
        })?;

        serde_json::from_str(&contents).map_err(|error| {
            AppError::Decode(format!("fixture '{}' is not JSON: {error}", path.display()))
        })
    }
}

#[async_trait]
impl GovernanceSource for FixtureGovernanceSource {
    async fn fetch_bundles(&self, _limit: usize) -> Vec<Bundle> {
        match self.read_fixture(SAMPLE_BUNDLES_FILE).await {
            Ok(mut body) => {
                let listing = body.get_mut("data").map(Value::take).unwrap_or(Value::Null);
                Bundle::decode_list(listing)
            }
            Err(error) => {
                warn!(%error, "offline bundles unavailable");
                Vec::new()
            }
        }
    }

    async fn fetch_audit_events(&self, _query: &AuditEventQuery) -> AuditEventPage {
        match self.read_fixture(SAMPLE_EVENTS_FILE).await {
            Ok(body) => AuditEventPage::decode(body),
            Err(error) => {
                warn!(%error, "offline audit events unavailable");
                AuditEventPage::default()
            }
        }
    }
}
