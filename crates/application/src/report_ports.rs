use govex_core::{AppResult, NonEmptyString};
use serde::Serialize;

/// Row shape shared by the plain-text table renderers.
pub trait TabularRow {
    /// Column headers in display order.
    fn headers() -> &'static [&'static str];

    /// Cell values in the same order as [`TabularRow::headers`].
    fn cells(&self) -> Vec<String>;
}

/// Current state of one bundle in the all-bundles view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleOverviewRow {
    /// Bundle display name.
    #[serde(rename = "Bundle Name")]
    pub bundle_name: String,
    /// Lifecycle state.
    #[serde(rename = "State")]
    pub state: String,
    /// Current stage name.
    #[serde(rename = "Current Stage")]
    pub current_stage: String,
    /// Assignee of the current stage.
    #[serde(rename = "Current Stage Assignee")]
    pub current_stage_assignee: String,
    /// Latest bundle or attachment timestamp, ISO-8601 UTC.
    #[serde(rename = "Last Updated")]
    pub last_updated: String,
    /// Owning project.
    #[serde(rename = "Project Name")]
    pub project_name: String,
    /// Governing policy.
    #[serde(rename = "Policy Name")]
    pub policy_name: String,
    /// Bundle creation time, ISO-8601 UTC.
    #[serde(rename = "Date bundle created")]
    pub created: String,
    /// Project owner or bundle creator.
    #[serde(rename = "Owner of bundle")]
    pub owner: String,
    /// First distinct stage name.
    #[serde(rename = "Stage 1 Name")]
    pub stage_1_name: String,
    /// Assignee of the first stage.
    #[serde(rename = "Stage 1 Assignee")]
    pub stage_1_assignee: String,
    /// Second distinct stage name.
    #[serde(rename = "Stage 2 Name")]
    pub stage_2_name: String,
    /// Assignee of the second stage.
    #[serde(rename = "Stage 2 Assignee")]
    pub stage_2_assignee: String,
    /// Third distinct stage name.
    #[serde(rename = "Stage 3 Name")]
    pub stage_3_name: String,
    /// Assignee of the third stage.
    #[serde(rename = "Stage 3 Assignee")]
    pub stage_3_assignee: String,
    /// Fourth distinct stage name.
    #[serde(rename = "Stage 4 Name")]
    pub stage_4_name: String,
    /// Assignee of the fourth stage.
    #[serde(rename = "Stage 4 Assignee")]
    pub stage_4_assignee: String,
    /// Branch of the most recent attachment.
    #[serde(rename = "Repo Branch")]
    pub repo_branch: String,
    /// Bundle identifier.
    #[serde(rename = "Bundle ID")]
    pub bundle_id: String,
    /// Days since last update, `-1` when unknown. Not displayed.
    #[serde(skip)]
    pub days_in_stage: i64,
}

impl TabularRow for BundleOverviewRow {
    fn headers() -> &'static [&'static str] {
        &[
            "Bundle Name",
            "State",
            "Current Stage",
            "Current Stage Assignee",
            "Last Updated",
            "Project Name",
            "Policy Name",
            "Date bundle created",
            "Owner of bundle",
            "Stage 1 Name",
            "Stage 1 Assignee",
            "Stage 2 Name",
            "Stage 2 Assignee",
            "Stage 3 Name",
            "Stage 3 Assignee",
            "Stage 4 Name",
            "Stage 4 Assignee",
            "Repo Branch",
            "Bundle ID",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.bundle_name.clone(),
            self.state.clone(),
            self.current_stage.clone(),
            self.current_stage_assignee.clone(),
            self.last_updated.clone(),
            self.project_name.clone(),
            self.policy_name.clone(),
            self.created.clone(),
            self.owner.clone(),
            self.stage_1_name.clone(),
            self.stage_1_assignee.clone(),
            self.stage_2_name.clone(),
            self.stage_2_assignee.clone(),
            self.stage_3_name.clone(),
            self.stage_3_assignee.clone(),
            self.stage_4_name.clone(),
            self.stage_4_assignee.clone(),
            self.repo_branch.clone(),
            self.bundle_id.clone(),
        ]
    }
}

/// Filter values offered by the history view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryOptions {
    /// Distinct bundle names, case-insensitively sorted.
    pub bundle_names: Vec<String>,
    /// Distinct project names, sorted.
    pub project_names: Vec<String>,
    /// Governance action names accepted by the event filter.
    pub event_names: Vec<String>,
}

/// Parameters of one bundle history render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    bundle_name: NonEmptyString,
    event_names: Vec<String>,
    project_names: Vec<String>,
    start: Option<String>,
    end: Option<String>,
}

impl HistoryRequest {
    /// Creates an unfiltered request for the named bundle.
    pub fn new(bundle_name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            bundle_name: NonEmptyString::new(bundle_name)?,
            event_names: Vec::new(),
            project_names: Vec::new(),
            start: None,
            end: None,
        })
    }

    /// Keeps only events whose action name is listed.
    #[must_use]
    pub fn with_event_names(mut self, event_names: Vec<String>) -> Self {
        self.event_names = event_names;
        self
    }

    /// Keeps only events recorded in one of the listed projects.
    #[must_use]
    pub fn with_project_names(mut self, project_names: Vec<String>) -> Self {
        self.project_names = project_names;
        self
    }

    /// Sets the inclusive start date, `YYYY/MM/DD`.
    #[must_use]
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Sets the inclusive end date, `YYYY/MM/DD`.
    #[must_use]
    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Returns the requested bundle name.
    #[must_use]
    pub fn bundle_name(&self) -> &str {
        self.bundle_name.as_str()
    }

    /// Returns the action-name filter; empty keeps every event.
    #[must_use]
    pub fn event_names(&self) -> &[String] {
        self.event_names.as_slice()
    }

    /// Returns the project filter; empty keeps every event.
    #[must_use]
    pub fn project_names(&self) -> &[String] {
        self.project_names.as_slice()
    }

    /// Returns the raw start input.
    #[must_use]
    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// Returns the raw end input.
    #[must_use]
    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }
}

/// One audit event in the history view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleHistoryRow {
    /// Event time, ISO-8601 UTC.
    #[serde(rename = "Time (UTC)")]
    pub time: String,
    /// Governance action name.
    #[serde(rename = "Action")]
    pub action: String,
    /// Affected stage or stage transition.
    #[serde(rename = "Stage")]
    pub stage: String,
    /// Acting user.
    #[serde(rename = "User")]
    pub user: String,
    /// Containing project.
    #[serde(rename = "Project")]
    pub project: String,
    /// Bundle named by the event target.
    #[serde(rename = "Bundle")]
    pub bundle: String,
    /// Value before the change.
    #[serde(rename = "Before")]
    pub before: String,
    /// Value after the change.
    #[serde(rename = "After")]
    pub after: String,
    /// Changed field.
    #[serde(rename = "Change")]
    pub change: String,
    /// Free-form notes, currently always empty.
    #[serde(rename = "Notes")]
    pub notes: String,
    /// Pretty-printed field changes, hidden from the table by default.
    #[serde(rename = "Raw Field Changes")]
    pub raw_field_changes: String,
}

impl TabularRow for BundleHistoryRow {
    fn headers() -> &'static [&'static str] {
        &[
            "Time (UTC)",
            "Action",
            "Stage",
            "User",
            "Project",
            "Bundle",
            "Before",
            "After",
            "Change",
            "Notes",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.time.clone(),
            self.action.clone(),
            self.stage.clone(),
            self.user.clone(),
            self.project.clone(),
            self.bundle.clone(),
            self.before.clone(),
            self.after.clone(),
            self.change.clone(),
            self.notes.clone(),
        ]
    }
}

/// Result of a bundle history render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleHistoryOutcome {
    /// No bundle with the requested name has an identifier.
    BundleNotFound,
    /// Events of the resolved bundle after local filtering.
    Events {
        /// Identifier the name resolved to.
        bundle_id: String,
        /// Rows in API order, newest first.
        rows: Vec<BundleHistoryRow>,
        /// Server-side estimate of all matching events.
        estimated_matches: u64,
    },
}

/// Time spent in the current stage for one bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagnationRow {
    /// Bundle display name.
    #[serde(rename = "Bundle Name")]
    pub bundle_name: String,
    /// Owning project.
    #[serde(rename = "Project Name")]
    pub project_name: String,
    /// Governing policy.
    #[serde(rename = "Policy Name")]
    pub policy_name: String,
    /// Current stage name.
    #[serde(rename = "Current Stage")]
    pub current_stage: String,
    /// Assignee of the current stage.
    #[serde(rename = "Current Stage Assignee")]
    pub current_stage_assignee: String,
    /// Whole days since the last update, `-1` when unknown.
    #[serde(rename = "Days in Current Stage")]
    pub days_in_current_stage: i64,
}

impl TabularRow for StagnationRow {
    fn headers() -> &'static [&'static str] {
        &[
            "Bundle Name",
            "Project Name",
            "Policy Name",
            "Current Stage",
            "Current Stage Assignee",
            "Days in Current Stage",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.bundle_name.clone(),
            self.project_name.clone(),
            self.policy_name.clone(),
            self.current_stage.clone(),
            self.current_stage_assignee.clone(),
            self.days_in_current_stage.to_string(),
        ]
    }
}

/// Stagnation metrics over all bundles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StagnationReport {
    /// Every bundle, longest in stage first, unknown durations last.
    pub rows: Vec<StagnationRow>,
    /// Up to fifteen bundles with known durations for the bar chart.
    pub top: Vec<StagnationBar>,
}

/// One bar of the stagnation chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagnationBar {
    /// Bar label.
    pub bundle_name: String,
    /// Bar length in days.
    pub days: i64,
}
