//! Application services and ports.

#![forbid(unsafe_code)]

mod governance_ports;
mod report_ports;
mod report_service;
mod transforms;

pub use governance_ports::{
    AUDIT_EVENT_PAGE_LIMIT, AuditEventQuery, GovernanceSource, NEWEST_FIRST_SORT,
};
pub use report_ports::{
    BundleHistoryOutcome, BundleHistoryRow, BundleOverviewRow, HistoryOptions, HistoryRequest,
    StagnationBar, StagnationReport, StagnationRow, TabularRow,
};
pub use report_service::{DEFAULT_BUNDLE_LIMIT, ReportService, STAGNATION_CHART_SIZE};
pub use transforms::{
    BeforeAfter, DayBound, UNASSIGNED, UNKNOWN_DAYS_IN_STAGE, before_after,
    bundle_name_from_targets, bundle_owner, compute_last_updated, current_stage_assignee,
    days_in_current_stage, days_in_current_stage_at, format_timestamp, order_stages_like_humans,
    parse_timestamp, parse_timestamp_str, pull_stage_name, range_bound, raw_field_changes,
    safe_branch_from_attachments, stage_assignee_for_name, stage_names,
};
