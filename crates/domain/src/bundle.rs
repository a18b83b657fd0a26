use serde::Deserialize;
use serde_json::Value;

use crate::lenient;

/// Governance workflow record as returned by the bundles endpoint.
///
/// Every field is optional on the wire. Accessors return empty strings or
/// `None` for absent values so report code never has to branch on shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(default, deserialize_with = "lenient::string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    state: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    stage: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    project_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    policy_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::raw")]
    created_at: Option<Value>,
    #[serde(default, deserialize_with = "lenient::string")]
    project_owner: Option<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    created_by: Option<UserRef>,
    #[serde(default, deserialize_with = "lenient::list")]
    stages: Vec<BundleStage>,
    #[serde(default, deserialize_with = "lenient::list")]
    attachments: Vec<Attachment>,
}

impl Bundle {
    /// Decodes a JSON array of bundles, skipping elements that are not objects.
    #[must_use]
    pub fn decode_list(value: Value) -> Vec<Self> {
        lenient::decode_list(value)
    }

    /// Returns the bundle identifier when present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        lenient::non_empty(&self.id)
    }

    /// Returns the bundle name, empty when absent.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Returns the lifecycle state, empty when absent.
    #[must_use]
    pub fn state(&self) -> &str {
        self.state.as_deref().unwrap_or_default()
    }

    /// Returns the current stage name, empty when absent.
    #[must_use]
    pub fn stage(&self) -> &str {
        self.stage.as_deref().unwrap_or_default()
    }

    /// Returns the project name, empty when absent.
    #[must_use]
    pub fn project_name(&self) -> &str {
        self.project_name.as_deref().unwrap_or_default()
    }

    /// Returns the policy name, empty when absent.
    #[must_use]
    pub fn policy_name(&self) -> &str {
        self.policy_name.as_deref().unwrap_or_default()
    }

    /// Returns the raw creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> Option<&Value> {
        self.created_at.as_ref()
    }

    /// Returns the explicit project owner when set.
    #[must_use]
    pub fn project_owner(&self) -> Option<&str> {
        lenient::non_empty(&self.project_owner)
    }

    /// Returns the creator's username when set.
    #[must_use]
    pub fn created_by_user_name(&self) -> Option<&str> {
        self.created_by
            .as_ref()
            .and_then(|user| lenient::non_empty(&user.user_name))
    }

    /// Returns stage entries in workflow order.
    #[must_use]
    pub fn stages(&self) -> &[BundleStage] {
        self.stages.as_slice()
    }

    /// Returns bundle attachments.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        self.attachments.as_slice()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRef {
    #[serde(default, deserialize_with = "lenient::string")]
    user_name: Option<String>,
}

/// One stage entry of a bundle workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BundleStage {
    #[serde(default, deserialize_with = "lenient::object")]
    stage: Option<StageRef>,
    #[serde(default, deserialize_with = "lenient::object")]
    assignee: Option<Assignee>,
}

impl BundleStage {
    /// Returns the stage name when present.
    #[must_use]
    pub fn stage_name(&self) -> Option<&str> {
        self.stage
            .as_ref()
            .and_then(|stage| lenient::non_empty(&stage.name))
    }

    /// Returns the assignee display name when present.
    #[must_use]
    pub fn assignee_name(&self) -> Option<&str> {
        self.assignee
            .as_ref()
            .and_then(|assignee| lenient::non_empty(&assignee.name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct StageRef {
    #[serde(default, deserialize_with = "lenient::string")]
    name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct Assignee {
    #[serde(default, deserialize_with = "lenient::string")]
    name: Option<String>,
}

/// Attachment linked to a bundle, such as a report or model artifact.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default, deserialize_with = "lenient::raw")]
    created_at: Option<Value>,
    #[serde(default, deserialize_with = "lenient::object")]
    identifier: Option<AttachmentIdentifier>,
}

impl Attachment {
    /// Returns the raw creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> Option<&Value> {
        self.created_at.as_ref()
    }

    /// Returns the source branch recorded for the attachment.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        self.identifier
            .as_ref()
            .and_then(|identifier| lenient::non_empty(&identifier.branch))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct AttachmentIdentifier {
    #[serde(default, deserialize_with = "lenient::string")]
    branch: Option<String>,
}
