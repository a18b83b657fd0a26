mod query;
mod source;

pub use query::{AUDIT_EVENT_PAGE_LIMIT, AuditEventQuery, NEWEST_FIRST_SORT};
pub use source::GovernanceSource;
