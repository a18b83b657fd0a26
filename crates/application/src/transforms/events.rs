use serde_json::Value;

use govex_domain::{
    AffectedEntity, AuditEvent, EventTarget, FieldChange, GOVERNANCE_BUNDLE_ENTITY_TYPE,
    GOVERNANCE_POLICY_STAGE_ENTITY_TYPE, NamedRef, TargetEntity,
};

use super::bundles::UNASSIGNED;

/// Before/after pair of the first recognized field change of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeforeAfter {
    /// Value before the change.
    pub before: String,
    /// Value after the change.
    pub after: String,
    /// Changed field: `stage`, `state`, `assignee`, or empty.
    pub field: String,
}

impl BeforeAfter {
    fn new(before: impl Into<String>, after: impl Into<String>, field: &str) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
            field: field.to_owned(),
        }
    }
}

/// Extracts the first `stage`, `state` or `assignee` change of an event.
#[must_use]
pub fn before_after(event: &AuditEvent) -> BeforeAfter {
    for change in field_changes(event) {
        match change.field_name() {
            Some(field @ ("stage" | "state")) => {
                return BeforeAfter::new(
                    display_value(change.before()),
                    display_value(change.after()),
                    field,
                );
            }
            Some("assignee") => {
                return BeforeAfter::new(
                    first_name(change.removed()),
                    first_name(change.added()),
                    "assignee",
                );
            }
            _ => {}
        }
    }

    BeforeAfter::default()
}

/// Stage label of an event.
///
/// Prefers a named affected policy stage, then a `before → after` stage change.
#[must_use]
pub fn pull_stage_name(event: &AuditEvent) -> String {
    if let Some(name) = event
        .affecting()
        .iter()
        .filter(|entity| entity.entity_type() == Some(GOVERNANCE_POLICY_STAGE_ENTITY_TYPE))
        .find_map(AffectedEntity::name)
    {
        return name.to_owned();
    }

    field_changes(event)
        .find(|change| change.field_name() == Some("stage"))
        .map(|change| {
            format!(
                "{} → {}",
                display_value(change.before()),
                display_value(change.after())
            )
        })
        .unwrap_or_default()
}

/// Name of the bundle an event targets, empty when no target names one.
#[must_use]
pub fn bundle_name_from_targets(event: &AuditEvent) -> &str {
    event
        .targets()
        .iter()
        .filter_map(EventTarget::entity)
        .filter(|entity| entity.entity_type() == Some(GOVERNANCE_BUNDLE_ENTITY_TYPE))
        .filter_map(TargetEntity::name)
        .last()
        .unwrap_or_default()
}

/// Pretty-printed JSON array of every target's field changes as received.
#[must_use]
pub fn raw_field_changes(event: &AuditEvent) -> String {
    let per_target: Vec<&Value> = event
        .targets()
        .iter()
        .map(EventTarget::raw_field_changes)
        .collect();

    serde_json::to_string_pretty(&per_target).unwrap_or_else(|_| "[]".to_owned())
}

fn field_changes(event: &AuditEvent) -> impl Iterator<Item = &FieldChange> {
    event
        .targets()
        .iter()
        .flat_map(EventTarget::field_changes)
}

fn first_name(refs: &[NamedRef]) -> &str {
    refs.first().and_then(NamedRef::name).unwrap_or(UNASSIGNED)
}

/// Blank for absent and falsy values (null, false, 0, "", [], {}).
fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => String::new(),
        Some(Value::Number(number)) if number.as_f64().is_some_and(|number| number == 0.0) => {
            String::new()
        }
        Some(Value::Array(items)) if items.is_empty() => String::new(),
        Some(Value::Object(entries)) if entries.is_empty() => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use govex_domain::AuditEvent;
    use serde_json::{Value, json};

    use super::{
        BeforeAfter, before_after, bundle_name_from_targets, pull_stage_name, raw_field_changes,
    };

    fn event(value: Value) -> AuditEvent {
        serde_json::from_value(value).unwrap_or_default()
    }

    #[test]
    fn assignee_change_defaults_to_unassigned() {
        let event = event(json!({
            "targets": [{
                "fieldChanges": [{"fieldName": "assignee", "removed": [], "added": [{"name": "Alice"}]}]
            }]
        }));

        assert_eq!(
            before_after(&event),
            BeforeAfter {
                before: "Unassigned".to_owned(),
                after: "Alice".to_owned(),
                field: "assignee".to_owned(),
            }
        );
    }

    #[test]
    fn first_recognized_change_wins() {
        let event = event(json!({
            "targets": [
                {"fieldChanges": [{"fieldName": "description", "before": "a", "after": "b"}]},
                {"fieldChanges": [
                    {"fieldName": "state", "before": "Active", "after": null},
                    {"fieldName": "stage", "before": "Draft", "after": "Review"}
                ]}
            ]
        }));

        assert_eq!(
            before_after(&event),
            BeforeAfter {
                before: "Active".to_owned(),
                after: String::new(),
                field: "state".to_owned(),
            }
        );
    }

    #[test]
    fn unrecognized_changes_yield_empty_triple() {
        let event = event(json!({
            "targets": [{"fieldChanges": [{"fieldName": "policy", "before": "x", "after": "y"}]}]
        }));

        assert_eq!(before_after(&event), BeforeAfter::default());
        assert_eq!(before_after(&AuditEvent::default()), BeforeAfter::default());
    }

    #[test]
    fn stage_name_prefers_affected_stage() {
        let event = event(json!({
            "affecting": [
                {"entityType": "governancePolicyStage"},
                {"entityType": "governanceBundle", "name": "Model"},
                {"entityType": "governancePolicyStage", "name": "Validation"}
            ],
            "targets": [{"fieldChanges": [{"fieldName": "stage", "before": "Draft", "after": "Review"}]}]
        }));

        assert_eq!(pull_stage_name(&event), "Validation");
    }

    #[test]
    fn stage_name_falls_back_to_transition() {
        let transition = event(json!({
            "targets": [{"fieldChanges": [{"fieldName": "stage", "before": null, "after": "Review"}]}]
        }));

        assert_eq!(pull_stage_name(&transition), " → Review");
        assert_eq!(pull_stage_name(&AuditEvent::default()), "");
    }

    #[test]
    fn bundle_name_comes_from_last_named_bundle_target() {
        let event = event(json!({
            "targets": [
                {"entity": {"entityType": "governanceBundle", "name": "First"}},
                {"entity": {"entityType": "governancePolicy", "name": "Policy"}},
                {"entity": {"entityType": "governanceBundle", "name": "Second"}},
                {"entity": {"entityType": "governanceBundle"}}
            ]
        }));

        assert_eq!(bundle_name_from_targets(&event), "Second");
        assert_eq!(bundle_name_from_targets(&AuditEvent::default()), "");
    }

    #[test]
    fn raw_dump_lists_changes_per_target() {
        let event = event(json!({
            "targets": [
                {"fieldChanges": [{"fieldName": "stage", "before": "Draft", "after": "Review"}]},
                {}
            ]
        }));

        let dumped: Value = serde_json::from_str(&raw_field_changes(&event)).unwrap_or_default();
        assert_eq!(
            dumped,
            json!([[{"fieldName": "stage", "before": "Draft", "after": "Review"}], []])
        );
        assert!(raw_field_changes(&event).contains("\n  "));
    }

    #[test]
    fn raw_dump_keeps_nulls_empty_lists_and_key_order() {
        let changes = json!([{
            "fieldName": "assignee",
            "removed": [],
            "added": [{"name": "Alice"}],
            "before": null,
            "zeta": 1,
            "alpha": 2
        }]);
        let event = event(json!({"targets": [{"fieldChanges": changes.clone()}]}));

        let rendered = raw_field_changes(&event);
        let dumped: Value = serde_json::from_str(&rendered).unwrap_or_default();
        assert_eq!(dumped, json!([changes]));

        let zeta = rendered.find("\"zeta\"");
        let alpha = rendered.find("\"alpha\"");
        assert!(zeta.is_some() && alpha.is_some());
        assert!(zeta < alpha);
    }

    #[test]
    fn falsy_values_render_blank() {
        let event = event(json!({
            "targets": [{"fieldChanges": [{"fieldName": "state", "before": 0, "after": false}]}]
        }));
        let stage = event_with_stage(json!({}), json!([]));

        assert_eq!(
            before_after(&event),
            BeforeAfter {
                before: String::new(),
                after: String::new(),
                field: "state".to_owned(),
            }
        );
        assert_eq!(pull_stage_name(&stage), " → ");
    }

    #[test]
    fn non_falsy_values_render_as_json() {
        let event = event(json!({
            "targets": [{"fieldChanges": [{"fieldName": "stage", "before": 2, "after": true}]}]
        }));

        assert_eq!(before_after(&event).before, "2");
        assert_eq!(before_after(&event).after, "true");
    }

    fn event_with_stage(before: Value, after: Value) -> AuditEvent {
        event(json!({
            "targets": [{"fieldChanges": [{"fieldName": "stage", "before": before, "after": after}]}]
        }))
    }
}
