//! Governance explorer command-line reports.

#![forbid(unsafe_code)]

mod command;
mod explorer_config;
mod render;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use govex_application::{BundleHistoryOutcome, GovernanceSource, ReportService};
use govex_core::AppError;
use govex_infrastructure::{FixtureGovernanceSource, HttpGovernanceSource};
use tracing::{info, warn};

use crate::command::{Cli, Command};
use crate::explorer_config::{ExplorerConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = ExplorerConfig::load()?;
    let service = ReportService::new(build_source(&config)?).with_bundle_limit(config.bundle_limit);

    let output = run(&service, cli.command).await?;
    print!("{output}");

    Ok(())
}

fn build_source(config: &ExplorerConfig) -> Result<Arc<dyn GovernanceSource>, AppError> {
    if config.offline {
        info!(fixture_dir = %config.fixture_dir.display(), "reading offline fixtures");
        return Ok(Arc::new(FixtureGovernanceSource::new(
            config.fixture_dir.clone(),
        )));
    }

    if config.api_key.is_empty() {
        warn!("DOMINO_USER_API_KEY is not set, requests will be unauthenticated");
    }

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

    info!(api_host = %config.api_host, "using governance API");
    Ok(Arc::new(HttpGovernanceSource::new(
        http_client,
        config.api_host.clone(),
        config.api_key.clone(),
    )))
}

async fn run(service: &ReportService, command: Command) -> Result<String, AppError> {
    match command {
        Command::Bundles(args) => {
            let rows = service.all_bundles_report().await;
            if args.json {
                render::json(&rows)
            } else if rows.is_empty() {
                Ok(message("No bundles returned."))
            } else {
                Ok(render::table(&rows))
            }
        }
        Command::History(args) => {
            let request = args.to_request()?;
            match service.bundle_history(&request).await {
                BundleHistoryOutcome::BundleNotFound => Ok(message("Couldn't find that bundle.")),
                BundleHistoryOutcome::Events {
                    bundle_id,
                    rows,
                    estimated_matches,
                } => {
                    info!(%bundle_id, shown = rows.len(), estimated_matches, "rendering bundle history");
                    if args.json {
                        render::json(&rows)
                    } else if rows.is_empty() {
                        Ok(message(
                            "No audit trail events found for this bundle with the current filters.",
                        ))
                    } else if args.raw {
                        Ok(format!(
                            "{}\n{}",
                            render::table(&rows),
                            render::raw_field_changes(&rows)
                        ))
                    } else {
                        Ok(render::table(&rows))
                    }
                }
            }
        }
        Command::Options(args) => {
            let options = service.history_options().await;
            if args.json {
                render::json(&options)
            } else {
                Ok(render::history_options(&options))
            }
        }
        Command::Metrics(args) => {
            let report = service.stagnation_metrics().await;
            if args.json {
                render::json(&report)
            } else if report.rows.is_empty() {
                Ok(message("No bundles available."))
            } else if report.top.is_empty() {
                Ok(render::table(&report.rows))
            } else {
                Ok(format!(
                    "{}\n{}",
                    render::table(&report.rows),
                    render::bar_chart(&report.top)
                ))
            }
        }
    }
}

fn message(text: &str) -> String {
    format!("{text}\n")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use govex_application::ReportService;
    use govex_core::AppError;
    use govex_infrastructure::FixtureGovernanceSource;

    use super::run;
    use crate::command::{Command, FormatArgs, HistoryArgs};

    fn fixture_service(dir: PathBuf) -> ReportService {
        ReportService::new(Arc::new(FixtureGovernanceSource::new(dir)))
    }

    fn shipped() -> ReportService {
        fixture_service(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data"))
    }

    fn missing() -> ReportService {
        fixture_service(PathBuf::from("/nonexistent/govex/fixtures"))
    }

    fn table() -> FormatArgs {
        FormatArgs { json: false }
    }

    fn history(bundle_name: Option<&str>, projects: &[&str]) -> Command {
        Command::History(HistoryArgs {
            bundle_name: bundle_name.map(str::to_owned),
            events: Vec::new(),
            projects: projects.iter().map(|project| (*project).to_owned()).collect(),
            start: None,
            end: None,
            raw: false,
            json: false,
        })
    }

    #[tokio::test]
    async fn empty_sources_print_informational_messages() {
        let bundles = run(&missing(), Command::Bundles(table())).await;
        assert_eq!(bundles.ok().as_deref(), Some("No bundles returned.\n"));

        let metrics = run(&missing(), Command::Metrics(table())).await;
        assert_eq!(metrics.ok().as_deref(), Some("No bundles available.\n"));

        let history = run(&missing(), history(Some("Credit Risk Scorecard"), &[])).await;
        assert_eq!(history.ok().as_deref(), Some("Couldn't find that bundle.\n"));
    }

    #[tokio::test]
    async fn history_without_bundle_name_is_rejected() {
        let output = run(&shipped(), history(None, &[])).await;

        assert!(matches!(
            output,
            Err(AppError::Validation(message)) if message == "Pick a bundle to see its audit trail."
        ));
    }

    #[tokio::test]
    async fn project_filter_can_empty_fixture_history() {
        let output = run(
            &shipped(),
            history(Some("Credit Risk Scorecard"), &["no-such-project"]),
        )
        .await;

        assert_eq!(
            output.ok().as_deref(),
            Some("No audit trail events found for this bundle with the current filters.\n")
        );
    }

    #[tokio::test]
    async fn metrics_table_includes_chart() {
        let output = run(&shipped(), Command::Metrics(table()))
            .await
            .unwrap_or_default();

        assert!(output.starts_with("Bundle Name"));
        assert!(output.contains(" | #"));
    }

    #[tokio::test]
    async fn bundles_render_as_json() {
        let output = run(&shipped(), Command::Bundles(FormatArgs { json: true }))
            .await
            .unwrap_or_default();

        let rows: serde_json::Value = serde_json::from_str(&output).unwrap_or_default();
        assert_eq!(rows.as_array().map(Vec::len), Some(5));
        assert_eq!(rows[0]["Bundle Name"], "churn predictor");
        assert!(rows[0].get("days_in_stage").is_none());
    }
}
