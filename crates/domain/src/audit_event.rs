use serde::Deserialize;
use serde_json::Value;

use crate::lenient;

/// Entity type tag of governance bundles in audit payloads.
pub const GOVERNANCE_BUNDLE_ENTITY_TYPE: &str = "governanceBundle";

/// Entity type tag of policy stages in audit payloads.
pub const GOVERNANCE_POLICY_STAGE_ENTITY_TYPE: &str = "governancePolicyStage";

/// Recognized governance action names, in catalog order.
pub const GOVERNANCE_EVENT_CATALOG: [&str; 12] = [
    "Create Governance Bundle",
    "Change Governance Bundle Stage",
    "Change Governance Bundle State",
    "Create Governance Bundle Stage Approval Request",
    "Accept Governance Bundle Stage Approval Request",
    "Update Governance Bundle Stage Assignee",
    "Add Policy to Governance Bundle",
    "Deactivate Policy in Governance Bundle",
    "Add Attachment to Bundle",
    "Remove Attachment from Bundle",
    "Submit Results in a Bundle",
    "Copy Governance Bundle results from another Bundle",
];

/// Returns whether the action name belongs to the governance catalog.
#[must_use]
pub fn is_governance_event(event_name: &str) -> bool {
    GOVERNANCE_EVENT_CATALOG.contains(&event_name)
}

/// One page of audit events as returned by the audit trail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEventPage {
    /// Events in the order the API returned them.
    #[serde(default, deserialize_with = "lenient::list")]
    pub events: Vec<AuditEvent>,
    /// Server-side estimate of the total number of matching events.
    #[serde(default, deserialize_with = "lenient::count")]
    pub estimated_matches: u64,
}

impl AuditEventPage {
    /// Decodes a page, treating anything but a JSON object as an empty page.
    #[must_use]
    pub fn decode(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }

        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Immutable record of one change made to a governance resource.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuditEvent {
    #[serde(default, deserialize_with = "lenient::raw")]
    timestamp: Option<Value>,
    #[serde(default, deserialize_with = "lenient::object")]
    action: Option<EventAction>,
    #[serde(default, deserialize_with = "lenient::object")]
    actor: Option<NamedRef>,
    #[serde(rename = "in", default, deserialize_with = "lenient::object")]
    container: Option<NamedRef>,
    #[serde(default, deserialize_with = "lenient::list")]
    affecting: Vec<AffectedEntity>,
    #[serde(default, deserialize_with = "lenient::list")]
    targets: Vec<EventTarget>,
}

impl AuditEvent {
    /// Returns the raw event timestamp.
    #[must_use]
    pub fn timestamp(&self) -> Option<&Value> {
        self.timestamp.as_ref()
    }

    /// Returns the action name, empty when absent.
    #[must_use]
    pub fn event_name(&self) -> &str {
        self.action
            .as_ref()
            .and_then(|action| action.event_name.as_deref())
            .unwrap_or_default()
    }

    /// Returns the acting user's name, empty when absent.
    #[must_use]
    pub fn actor_name(&self) -> &str {
        self.actor
            .as_ref()
            .and_then(NamedRef::name)
            .unwrap_or_default()
    }

    /// Returns the containing project's name, empty when absent.
    #[must_use]
    pub fn project_name(&self) -> &str {
        self.container
            .as_ref()
            .and_then(NamedRef::name)
            .unwrap_or_default()
    }

    /// Returns entities affected by the change.
    #[must_use]
    pub fn affecting(&self) -> &[AffectedEntity] {
        self.affecting.as_slice()
    }

    /// Returns changed targets with their field-level changes.
    #[must_use]
    pub fn targets(&self) -> &[EventTarget] {
        self.targets.as_slice()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventAction {
    #[serde(default, deserialize_with = "lenient::string")]
    event_name: Option<String>,
}

/// Reference carrying only a display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NamedRef {
    #[serde(default, deserialize_with = "lenient::string")]
    name: Option<String>,
}

impl NamedRef {
    /// Returns the name when present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        lenient::non_empty(&self.name)
    }
}

/// Entity touched by an audit event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedEntity {
    #[serde(default, deserialize_with = "lenient::string")]
    entity_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    name: Option<String>,
}

impl AffectedEntity {
    /// Returns the entity type tag.
    #[must_use]
    pub fn entity_type(&self) -> Option<&str> {
        lenient::non_empty(&self.entity_type)
    }

    /// Returns the entity name when present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        lenient::non_empty(&self.name)
    }
}

/// Target of an audit event with its field changes.
///
/// The `fieldChanges` payload is kept verbatim next to its decoded form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "EventTargetPayload")]
pub struct EventTarget {
    entity: Option<TargetEntity>,
    field_changes: Vec<FieldChange>,
    raw_field_changes: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventTargetPayload {
    #[serde(default, deserialize_with = "lenient::object")]
    entity: Option<TargetEntity>,
    #[serde(default)]
    field_changes: Value,
}

impl Default for EventTarget {
    fn default() -> Self {
        Self {
            entity: None,
            field_changes: Vec::new(),
            raw_field_changes: Value::Array(Vec::new()),
        }
    }
}

impl From<EventTargetPayload> for EventTarget {
    fn from(payload: EventTargetPayload) -> Self {
        // Absent, null and other falsy payloads all read as no changes.
        let raw_field_changes = if lenient::is_falsy(&payload.field_changes) {
            Value::Array(Vec::new())
        } else {
            payload.field_changes
        };

        Self {
            entity: payload.entity,
            field_changes: lenient::decode_list(raw_field_changes.clone()),
            raw_field_changes,
        }
    }
}

impl EventTarget {
    /// Returns the target entity when present.
    #[must_use]
    pub fn entity(&self) -> Option<&TargetEntity> {
        self.entity.as_ref()
    }

    /// Returns field-level changes in payload order.
    #[must_use]
    pub fn field_changes(&self) -> &[FieldChange] {
        self.field_changes.as_slice()
    }

    /// Returns `fieldChanges` exactly as received, `[]` when it was empty or absent.
    #[must_use]
    pub fn raw_field_changes(&self) -> &Value {
        &self.raw_field_changes
    }
}

/// Entity descriptor of an event target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetEntity {
    #[serde(default, deserialize_with = "lenient::string")]
    entity_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    name: Option<String>,
}

impl TargetEntity {
    /// Returns the entity type tag.
    #[must_use]
    pub fn entity_type(&self) -> Option<&str> {
        lenient::non_empty(&self.entity_type)
    }

    /// Returns the entity identifier.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        lenient::non_empty(&self.id)
    }

    /// Returns the entity name when present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        lenient::non_empty(&self.name)
    }
}

/// Field-level before/after change on an event target.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    #[serde(default, deserialize_with = "lenient::string")]
    field_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::raw")]
    before: Option<Value>,
    #[serde(default, deserialize_with = "lenient::raw")]
    after: Option<Value>,
    #[serde(default, deserialize_with = "lenient::list")]
    added: Vec<NamedRef>,
    #[serde(default, deserialize_with = "lenient::list")]
    removed: Vec<NamedRef>,
}

impl FieldChange {
    /// Returns the changed field's name.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        lenient::non_empty(&self.field_name)
    }

    /// Returns the value before the change.
    #[must_use]
    pub fn before(&self) -> Option<&Value> {
        self.before.as_ref()
    }

    /// Returns the value after the change.
    #[must_use]
    pub fn after(&self) -> Option<&Value> {
        self.after.as_ref()
    }

    /// Returns references added by the change, e.g. new assignees.
    #[must_use]
    pub fn added(&self) -> &[NamedRef] {
        self.added.as_slice()
    }

    /// Returns references removed by the change.
    #[must_use]
    pub fn removed(&self) -> &[NamedRef] {
        self.removed.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{AuditEventPage, EventTarget, is_governance_event};

    #[test]
    fn page_decodes_events_and_estimate() {
        let page = AuditEventPage::decode(json!({
            "events": [{
                "timestamp": "2024-03-01T12:00:00Z",
                "action": {"eventName": "Change Governance Bundle Stage"},
                "actor": {"name": "ada"},
                "in": {"name": "credit-risk"},
                "affecting": [{"entityType": "governancePolicyStage", "name": "Review"}],
                "targets": [{
                    "entity": {"entityType": "governanceBundle", "id": "b-1", "name": "Model"},
                    "fieldChanges": [{"fieldName": "stage", "before": "Draft", "after": "Review"}]
                }]
            }],
            "estimatedMatches": 37
        }));

        assert_eq!(page.estimated_matches, 37);
        assert_eq!(page.events.len(), 1);
        let event = &page.events[0];
        assert_eq!(event.event_name(), "Change Governance Bundle Stage");
        assert_eq!(event.actor_name(), "ada");
        assert_eq!(event.project_name(), "credit-risk");
        assert_eq!(event.affecting()[0].name(), Some("Review"));
        let target = &event.targets()[0];
        assert_eq!(target.entity().and_then(|entity| entity.id()), Some("b-1"));
        assert_eq!(target.field_changes()[0].field_name(), Some("stage"));
    }

    #[test]
    fn page_of_wrong_shape_is_empty() {
        assert_eq!(AuditEventPage::decode(json!([1, 2])), AuditEventPage::default());

        let page = AuditEventPage::decode(json!({"events": {}, "estimatedMatches": "many"}));
        assert!(page.events.is_empty());
        assert_eq!(page.estimated_matches, 0);
    }

    #[test]
    fn target_keeps_field_changes_verbatim() {
        let payload = json!([
            {
                "fieldName": "assignee",
                "removed": [],
                "added": [{"name": "Alice"}],
                "before": null,
                "zeta": 1,
                "alpha": 2
            },
            "not a change"
        ]);
        let target: EventTarget =
            serde_json::from_value(json!({"fieldChanges": payload.clone()})).unwrap_or_default();

        assert_eq!(target.raw_field_changes(), &payload);
        assert_eq!(target.field_changes().len(), 1);
        assert_eq!(target.field_changes()[0].added()[0].name(), Some("Alice"));
        assert_eq!(target.field_changes()[0].before(), None);
    }

    #[test]
    fn missing_or_null_field_changes_read_as_empty_list() {
        for target in [json!({}), json!({"fieldChanges": null}), json!({"fieldChanges": {}})] {
            let target: EventTarget = serde_json::from_value(target).unwrap_or_default();
            assert_eq!(target.raw_field_changes(), &json!([]));
            assert!(target.field_changes().is_empty());
        }
    }

    #[test]
    fn catalog_lookup_is_exact() {
        assert!(is_governance_event("Add Attachment to Bundle"));
        assert!(!is_governance_event("add attachment to bundle"));
    }
}
