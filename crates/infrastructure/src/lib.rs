//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod fixture_governance_source;
mod http_governance_source;

pub use fixture_governance_source::{
    FixtureGovernanceSource, SAMPLE_BUNDLES_FILE, SAMPLE_EVENTS_FILE,
};
pub use http_governance_source::HttpGovernanceSource;
