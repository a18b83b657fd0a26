mod bundles;
mod events;
mod timestamps;

pub use bundles::{
    UNASSIGNED, UNKNOWN_DAYS_IN_STAGE, bundle_owner, compute_last_updated, current_stage_assignee,
    days_in_current_stage, days_in_current_stage_at, order_stages_like_humans,
    safe_branch_from_attachments, stage_assignee_for_name, stage_names,
};
pub use events::{
    BeforeAfter, before_after, bundle_name_from_targets, pull_stage_name, raw_field_changes,
};
pub use timestamps::{DayBound, format_timestamp, parse_timestamp, parse_timestamp_str, range_bound};
