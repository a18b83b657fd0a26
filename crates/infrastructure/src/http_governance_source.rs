use async_trait::async_trait;
use govex_application::{AuditEventQuery, GovernanceSource};
use govex_core::{ApiKey, AppError, AppResult};
use govex_domain::{AuditEventPage, Bundle};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

const BUNDLES_PATH: &str = "/api/governance/v1/bundles";
const AUDIT_EVENTS_PATH: &str = "/api/audittrail/v1/auditevents";
const API_KEY_HEADER: &str = "X-Domino-Api-Key";

/// Governance source backed by the remote REST API.
pub struct HttpGovernanceSource {
    http_client: reqwest::Client,
    api_host: String,
    api_key: ApiKey,
}

impl HttpGovernanceSource {
    /// Creates a source for `api_host`, authenticating with `api_key`.
    #[must_use]
    pub fn new(http_client: reqwest::Client, api_host: impl Into<String>, api_key: ApiKey) -> Self {
        let api_host = api_host.into().trim_end_matches('/').to_owned();

        Self {
            http_client,
            api_host,
            api_key,
        }
    }

    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> AppResult<Value> {
        let endpoint = format!("{}{path}", self.api_host);
        let url = Url::parse_with_params(&endpoint, params).map_err(|error| {
            AppError::Validation(format!("invalid governance API url '{endpoint}': {error}"))
        })?;

        debug!(%url, "requesting governance API");
        let response = self
            .http_client
            .get(url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| {
                AppError::Transport(format!("governance API request to '{path}' failed: {error}"))
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AppError::Transport(format!(
                "governance API '{path}' responded with status {status}"
            )));
        }

        response.json::<Value>().await.map_err(|error| {
            AppError::Decode(format!(
                "governance API '{path}' returned an unreadable body: {error}"
            ))
        })
    }

    async fn try_fetch_bundles(&self, limit: usize) -> AppResult<Vec<Bundle>> {
        let mut body = self
            .get_json(BUNDLES_PATH, &[("limit", limit.to_string())])
            .await?;

        Ok(Bundle::decode_list(bundle_list(&mut body)))
    }
}

/// Takes the bundle array from `data`, falling back to `bundles`.
fn bundle_list(body: &mut Value) -> Value {
    let has_data = body
        .get("data")
        .and_then(Value::as_array)
        .is_some_and(|data| !data.is_empty());
    let key = if has_data { "data" } else { "bundles" };

    body.get_mut(key).map(Value::take).unwrap_or(Value::Null)
}

#[async_trait]
impl GovernanceSource for HttpGovernanceSource {
    async fn fetch_bundles(&self, limit: usize) -> Vec<Bundle> {
        match self.try_fetch_bundles(limit).await {
            Ok(bundles) => bundles,
            Err(error) => {
                warn!(%error, "bundle fetch failed, continuing with no bundles");
                Vec::new()
            }
        }
    }

    async fn fetch_audit_events(&self, query: &AuditEventQuery) -> AuditEventPage {
        match self
            .get_json(AUDIT_EVENTS_PATH, &query.to_query_pairs())
            .await
        {
            Ok(body) => AuditEventPage::decode(body),
            Err(error) => {
                warn!(%error, target_id = %query.target_id, "audit event fetch failed");
                AuditEventPage::default()
            }
        }
    }
}
