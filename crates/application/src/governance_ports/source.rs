use async_trait::async_trait;

use govex_domain::{AuditEventPage, Bundle};

use super::query::AuditEventQuery;

/// Read port over the governance system of record.
///
/// Implementations fail soft: an unreachable or misbehaving backend yields
/// an empty result, never an error.
#[async_trait]
pub trait GovernanceSource: Send + Sync {
    /// Fetches up to `limit` bundles in unspecified order.
    async fn fetch_bundles(&self, limit: usize) -> Vec<Bundle>;

    /// Fetches one page of audit events matching the query.
    async fn fetch_audit_events(&self, query: &AuditEventQuery) -> AuditEventPage;
}
