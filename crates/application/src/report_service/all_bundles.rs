use super::*;

use govex_domain::BundleStage;

use crate::report_ports::BundleOverviewRow;
use crate::transforms::{
    UNASSIGNED, format_timestamp, order_stages_like_humans, parse_timestamp,
    safe_branch_from_attachments, stage_assignee_for_name, stage_names,
};

const STAGE_COLUMNS: usize = 4;

impl ReportService {
    /// Returns one overview row per bundle, ordered by lower-cased name.
    pub async fn all_bundles_report(&self) -> Vec<BundleOverviewRow> {
        self.all_bundles_report_at(Utc::now()).await
    }

    /// Same as [`ReportService::all_bundles_report`] with an explicit clock.
    pub async fn all_bundles_report_at(&self, now: DateTime<Utc>) -> Vec<BundleOverviewRow> {
        let mut bundles = self.fetch_bundles().await;
        bundles.sort_by_cached_key(|bundle| bundle.name().to_lowercase());

        bundles
            .iter()
            .map(|bundle| overview_row(bundle, now))
            .collect()
    }
}

fn overview_row(bundle: &Bundle, now: DateTime<Utc>) -> BundleOverviewRow {
    let summary = BundleSummary::of(bundle, now);
    let [stage_1, stage_2, stage_3, stage_4] = stage_columns(bundle);

    BundleOverviewRow {
        bundle_name: summary.name.to_owned(),
        state: bundle.state().to_owned(),
        current_stage: summary.current_stage.to_owned(),
        current_stage_assignee: summary.current_stage_assignee.to_owned(),
        last_updated: format_timestamp(summary.last_updated),
        project_name: bundle.project_name().to_owned(),
        policy_name: bundle.policy_name().to_owned(),
        created: format_timestamp(parse_timestamp(bundle.created_at())),
        owner: summary.owner.to_owned(),
        stage_1_name: stage_1.0,
        stage_1_assignee: stage_1.1,
        stage_2_name: stage_2.0,
        stage_2_assignee: stage_2.1,
        stage_3_name: stage_3.0,
        stage_3_assignee: stage_3.1,
        stage_4_name: stage_4.0,
        stage_4_assignee: stage_4.1,
        repo_branch: safe_branch_from_attachments(bundle.attachments()).to_owned(),
        bundle_id: bundle.id().unwrap_or_default().to_owned(),
        days_in_stage: summary.days_in_stage,
    }
}

/// `(name, assignee)` for the first four distinct stages, padded with
/// unassigned blanks.
fn stage_columns(bundle: &Bundle) -> [(String, String); STAGE_COLUMNS] {
    let stages: &[BundleStage] = bundle.stages();
    let mut ordered = order_stages_like_humans(stage_names(bundle)).into_iter();

    std::array::from_fn(|_| match ordered.next() {
        Some(name) => {
            let assignee = stage_assignee_for_name(stages, &name).to_owned();
            (name, assignee)
        }
        None => (String::new(), UNASSIGNED.to_owned()),
    })
}
