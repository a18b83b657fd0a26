use std::cmp::Reverse;
use std::collections::HashSet;

use chrono::{DateTime, Utc};

use govex_domain::{Attachment, Bundle, BundleStage};

use super::timestamps::parse_timestamp;

/// Display value used whenever a stage has nobody assigned.
pub const UNASSIGNED: &str = "Unassigned";

/// Days-in-stage value for bundles without any parseable timestamp.
pub const UNKNOWN_DAYS_IN_STAGE: i64 = -1;

/// De-duplicates stage names keeping first occurrences in their original order.
///
/// Empty names are dropped.
#[must_use]
pub fn order_stages_like_humans<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();

    for name in names {
        let name = name.as_ref();
        if !name.is_empty() && seen.insert(name.to_owned()) {
            ordered.push(name.to_owned());
        }
    }

    ordered
}

/// Returns the non-empty stage names of a bundle's stage entries, in order.
#[must_use]
pub fn stage_names(bundle: &Bundle) -> Vec<&str> {
    bundle
        .stages()
        .iter()
        .filter_map(BundleStage::stage_name)
        .collect()
}

/// Returns the assignee of the first stage entry named `stage_name`.
#[must_use]
pub fn stage_assignee_for_name<'a>(stages: &'a [BundleStage], stage_name: &str) -> &'a str {
    stages
        .iter()
        .find(|entry| entry.stage_name() == Some(stage_name))
        .and_then(BundleStage::assignee_name)
        .unwrap_or(UNASSIGNED)
}

/// Returns the assignee of the bundle's current stage.
#[must_use]
pub fn current_stage_assignee(bundle: &Bundle) -> &str {
    stage_assignee_for_name(bundle.stages(), bundle.stage())
}

/// Latest parseable timestamp among the bundle and its attachments.
#[must_use]
pub fn compute_last_updated(bundle: &Bundle) -> Option<DateTime<Utc>> {
    std::iter::once(bundle.created_at())
        .chain(bundle.attachments().iter().map(Attachment::created_at))
        .filter_map(parse_timestamp)
        .max()
}

/// Whole days the bundle has spent since its last update, as of now.
#[must_use]
pub fn days_in_current_stage(bundle: &Bundle) -> i64 {
    days_in_current_stage_at(bundle, Utc::now())
}

/// Whole days between the bundle's last update and `now`.
///
/// Returns [`UNKNOWN_DAYS_IN_STAGE`] when no timestamp parses. Updates
/// dated after `now` count as zero days.
#[must_use]
pub fn days_in_current_stage_at(bundle: &Bundle, now: DateTime<Utc>) -> i64 {
    let Some(last_updated) = compute_last_updated(bundle) else {
        return UNKNOWN_DAYS_IN_STAGE;
    };

    (now - last_updated).num_days().max(0)
}

/// Branch of the most recent attachment that records one.
///
/// Attachments with unparseable timestamps rank as the oldest.
#[must_use]
pub fn safe_branch_from_attachments(attachments: &[Attachment]) -> &str {
    let mut ordered: Vec<&Attachment> = attachments.iter().collect();
    ordered.sort_by_key(|attachment| {
        Reverse(parse_timestamp(attachment.created_at()).unwrap_or(DateTime::<Utc>::MIN_UTC))
    });

    ordered
        .into_iter()
        .find_map(Attachment::branch)
        .unwrap_or_default()
}

/// Explicit project owner, else the creator's username, else empty.
#[must_use]
pub fn bundle_owner(bundle: &Bundle) -> &str {
    bundle
        .project_owner()
        .or_else(|| bundle.created_by_user_name())
        .unwrap_or_default()
}
