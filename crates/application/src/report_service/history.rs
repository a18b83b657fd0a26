use super::*;

use std::collections::BTreeSet;

use govex_domain::{AuditEvent, GOVERNANCE_EVENT_CATALOG};

use crate::governance_ports::AuditEventQuery;
use crate::report_ports::{BundleHistoryOutcome, BundleHistoryRow, HistoryOptions, HistoryRequest};
use crate::transforms::{
    DayBound, before_after, bundle_name_from_targets, format_timestamp, parse_timestamp,
    pull_stage_name, range_bound, raw_field_changes,
};

impl ReportService {
    /// Returns the values offered by the history filters.
    pub async fn history_options(&self) -> HistoryOptions {
        let bundles = self.fetch_bundles().await;

        let mut bundle_names: Vec<String> = distinct(bundles.iter().map(Bundle::name))
            .into_iter()
            .collect();
        bundle_names.sort_by_cached_key(|name| (name.to_lowercase(), name.clone()));

        HistoryOptions {
            bundle_names,
            project_names: distinct(bundles.iter().map(Bundle::project_name))
                .into_iter()
                .collect(),
            event_names: GOVERNANCE_EVENT_CATALOG
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
        }
    }

    /// Returns the filtered audit trail of the bundle named in `request`.
    pub async fn bundle_history(&self, request: &HistoryRequest) -> BundleHistoryOutcome {
        let bundles = self.fetch_bundles().await;
        let Some(bundle_id) = resolve_bundle_id(&bundles, request.bundle_name()) else {
            return BundleHistoryOutcome::BundleNotFound;
        };

        let mut query = AuditEventQuery::for_bundle(bundle_id);
        query.since = request
            .start()
            .and_then(|start| range_bound(start, DayBound::Start));
        query.until = request.end().and_then(|end| range_bound(end, DayBound::End));

        let page = self.source.fetch_audit_events(&query).await;
        let rows = page
            .events
            .iter()
            .filter(|event| matches_filters(event, request))
            .map(history_row)
            .collect();

        BundleHistoryOutcome::Events {
            bundle_id: bundle_id.to_owned(),
            rows,
            estimated_matches: page.estimated_matches,
        }
    }
}

/// Id of the most recently created bundle called `name`.
///
/// Unparseable creation times rank lowest and ties keep the earliest bundle.
fn resolve_bundle_id<'a>(bundles: &'a [Bundle], name: &str) -> Option<&'a str> {
    let mut latest: Option<(&Bundle, Option<DateTime<Utc>>)> = None;

    for bundle in bundles.iter().filter(|bundle| bundle.name() == name) {
        let created = parse_timestamp(bundle.created_at());
        // Option orders None below every Some, matching "unparseable is oldest".
        if latest.is_none_or(|(_, best)| created > best) {
            latest = Some((bundle, created));
        }
    }

    latest.and_then(|(bundle, _)| bundle.id())
}

fn matches_filters(event: &AuditEvent, request: &HistoryRequest) -> bool {
    let event_ok = request.event_names().is_empty()
        || request
            .event_names()
            .iter()
            .any(|name| name == event.event_name());
    let project_ok = request.project_names().is_empty()
        || request
            .project_names()
            .iter()
            .any(|name| name == event.project_name());

    event_ok && project_ok
}

fn history_row(event: &AuditEvent) -> BundleHistoryRow {
    let change = before_after(event);

    BundleHistoryRow {
        time: format_timestamp(parse_timestamp(event.timestamp())),
        action: event.event_name().to_owned(),
        stage: pull_stage_name(event),
        user: event.actor_name().to_owned(),
        project: event.project_name().to_owned(),
        bundle: bundle_name_from_targets(event).to_owned(),
        before: change.before,
        after: change.after,
        change: change.field,
        notes: String::new(),
        raw_field_changes: raw_field_changes(event),
    }
}

fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> BTreeSet<String> {
    names
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
