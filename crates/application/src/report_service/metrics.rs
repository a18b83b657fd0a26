use super::*;

use crate::report_ports::{StagnationBar, StagnationReport, StagnationRow};

/// Maximum number of bars in the stagnation chart.
pub const STAGNATION_CHART_SIZE: usize = 15;

impl ReportService {
    /// Returns days-in-stage for every bundle, longest first.
    pub async fn stagnation_metrics(&self) -> StagnationReport {
        self.stagnation_metrics_at(Utc::now()).await
    }

    /// Same as [`ReportService::stagnation_metrics`] with an explicit clock.
    pub async fn stagnation_metrics_at(&self, now: DateTime<Utc>) -> StagnationReport {
        let bundles = self.fetch_bundles().await;
        let mut rows: Vec<StagnationRow> = bundles
            .iter()
            .map(|bundle| stagnation_row(bundle, now))
            .collect();

        // Unknown durations (-1) sort after every known one.
        rows.sort_by_key(|row| std::cmp::Reverse(row.days_in_current_stage));

        let top = rows
            .iter()
            .filter(|row| row.days_in_current_stage >= 0)
            .take(STAGNATION_CHART_SIZE)
            .map(|row| StagnationBar {
                bundle_name: row.bundle_name.clone(),
                days: row.days_in_current_stage,
            })
            .collect();

        StagnationReport { rows, top }
    }
}

fn stagnation_row(bundle: &Bundle, now: DateTime<Utc>) -> StagnationRow {
    let summary = BundleSummary::of(bundle, now);

    StagnationRow {
        bundle_name: summary.name.to_owned(),
        project_name: bundle.project_name().to_owned(),
        policy_name: bundle.policy_name().to_owned(),
        current_stage: summary.current_stage.to_owned(),
        current_stage_assignee: summary.current_stage_assignee.to_owned(),
        days_in_current_stage: summary.days_in_stage,
    }
}
