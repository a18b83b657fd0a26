use govex_domain::GOVERNANCE_BUNDLE_ENTITY_TYPE;

/// Maximum number of audit events requested for one bundle history.
pub const AUDIT_EVENT_PAGE_LIMIT: usize = 500;

/// Sort parameter asking the audit API for newest events first.
pub const NEWEST_FIRST_SORT: &str = "-timestamp";

/// Query parameters for the audit trail endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEventQuery {
    /// Entity type of the audited target.
    pub target_type: String,
    /// Identifier of the audited target.
    pub target_id: String,
    /// Maximum number of events returned.
    pub limit: usize,
    /// Sort expression understood by the API.
    pub sort: String,
    /// Inclusive lower time bound in ISO-8601 UTC.
    pub since: Option<String>,
    /// Inclusive upper time bound in ISO-8601 UTC.
    pub until: Option<String>,
}

impl AuditEventQuery {
    /// Creates a newest-first query scoped to one governance bundle.
    #[must_use]
    pub fn for_bundle(bundle_id: impl Into<String>) -> Self {
        Self {
            target_type: GOVERNANCE_BUNDLE_ENTITY_TYPE.to_owned(),
            target_id: bundle_id.into(),
            limit: AUDIT_EVENT_PAGE_LIMIT,
            sort: NEWEST_FIRST_SORT.to_owned(),
            since: None,
            until: None,
        }
    }

    /// Returns URL query pairs using the API's parameter names.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("targetType", self.target_type.clone()),
            ("targetId", self.target_id.clone()),
            ("limit", self.limit.to_string()),
            ("sort", self.sort.clone()),
        ];

        if let Some(since) = &self.since {
            pairs.push(("since", since.clone()));
        }

        if let Some(until) = &self.until {
            pairs.push(("until", until.clone()));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::AuditEventQuery;

    #[test]
    fn bounds_are_only_sent_when_present() {
        let mut query = AuditEventQuery::for_bundle("b-1");
        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("targetType", "governanceBundle".to_owned()),
                ("targetId", "b-1".to_owned()),
                ("limit", "500".to_owned()),
                ("sort", "-timestamp".to_owned()),
            ]
        );

        query.until = Some("2024-01-31T23:59:59Z".to_owned());
        let pairs = query.to_query_pairs();
        assert_eq!(pairs.len(), 5);
        assert_eq!(pairs[4], ("until", "2024-01-31T23:59:59Z".to_owned()));
    }
}
