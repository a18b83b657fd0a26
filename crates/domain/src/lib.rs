//! Governance record shapes and their decoding rules.

#![forbid(unsafe_code)]

mod audit_event;
mod bundle;
mod lenient;

pub use audit_event::{
    AffectedEntity, AuditEvent, AuditEventPage, EventTarget, FieldChange,
    GOVERNANCE_BUNDLE_ENTITY_TYPE, GOVERNANCE_EVENT_CATALOG, GOVERNANCE_POLICY_STAGE_ENTITY_TYPE,
    NamedRef, TargetEntity, is_governance_event,
};
pub use bundle::{Attachment, Bundle, BundleStage};
