use clap::{Args, Parser, Subcommand};
use govex_application::HistoryRequest;
use govex_core::{AppError, AppResult};
use govex_domain::is_governance_event;

const PICK_BUNDLE_MESSAGE: &str = "Pick a bundle to see its audit trail.";

const AFTER_HELP: &str = "DATE is YYYY/MM/DD, YYYY-MM-DD or an ISO-8601 timestamp.
Set OFFLINE=true to read fixtures from EXPLORER_FIXTURE_DIR (default: data).";

#[derive(Debug, Parser)]
#[command(name = "govex-explorer")]
#[command(about = "Read-only reports over governance bundles and their audit trail")]
#[command(after_help = AFTER_HELP, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Current state of every bundle
    Bundles(FormatArgs),
    /// Audit trail of one bundle
    History(HistoryArgs),
    /// Values accepted by the history filters
    Options(FormatArgs),
    /// Days each bundle has spent in its current stage
    Metrics(FormatArgs),
}

#[derive(Debug, PartialEq, Eq, Args)]
pub struct FormatArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, PartialEq, Eq, Args)]
pub struct HistoryArgs {
    /// Bundle name; the most recently created bundle wins on duplicates
    pub bundle_name: Option<String>,

    /// Keep only this governance action (repeatable)
    #[arg(long = "event", value_name = "NAME", value_parser = governance_event)]
    pub events: Vec<String>,

    /// Keep only events recorded in this project (repeatable)
    #[arg(long = "project", value_name = "NAME")]
    pub projects: Vec<String>,

    /// Inclusive start date
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,

    /// Inclusive end date
    #[arg(long, value_name = "DATE")]
    pub end: Option<String>,

    /// Also print the raw field changes of every event
    #[arg(long)]
    pub raw: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl HistoryArgs {
    /// Builds the history request, rejecting a missing or blank bundle name.
    pub fn to_request(&self) -> AppResult<HistoryRequest> {
        let bundle_name = self
            .bundle_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::Validation(PICK_BUNDLE_MESSAGE.to_owned()))?;

        let mut request = HistoryRequest::new(bundle_name)?
            .with_event_names(self.events.clone())
            .with_project_names(self.projects.clone());
        if let Some(start) = &self.start {
            request = request.with_start(start.as_str());
        }
        if let Some(end) = &self.end {
            request = request.with_end(end.as_str());
        }

        Ok(request)
    }
}

fn governance_event(value: &str) -> Result<String, String> {
    if is_governance_event(value) {
        Ok(value.to_owned())
    } else {
        Err(format!(
            "'{value}' is not a governance event, run 'options' for the list"
        ))
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};
    use govex_application::HistoryRequest;
    use govex_core::AppError;

    use super::{Cli, Command, FormatArgs, HistoryArgs};

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("govex-explorer").chain(args.iter().copied()))
            .map(|cli| cli.command)
    }

    fn history(args: &[&str]) -> HistoryArgs {
        match parse(args) {
            Ok(Command::History(history)) => history,
            _ => unreachable!(),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(
            parse(&["bundles"]).ok(),
            Some(Command::Bundles(FormatArgs { json: false }))
        );
        assert_eq!(
            parse(&["metrics", "--json"]).ok(),
            Some(Command::Metrics(FormatArgs { json: true }))
        );
        assert!(parse(&["options", "--verbose"]).is_err());
        assert!(parse(&["deploy"]).is_err());
    }

    #[test]
    fn missing_subcommand_shows_help() {
        let error = parse(&[]).err().map(|error| error.kind());
        assert_eq!(
            error,
            Some(ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand)
        );
    }

    #[test]
    fn parses_history_filters() {
        assert!(matches!(
            parse(&["history", "B", "--event", "Create Governance Bundle"]),
            Ok(Command::History(_))
        ));

        let args = history(&[
            "history",
            "--event",
            "Change Governance Bundle Stage",
            "Credit Risk Scorecard",
            "--project",
            "credit-risk",
            "--project",
            "fraud",
            "--start",
            "2024/01/01",
            "--end",
            "2024-03-31",
            "--raw",
        ]);
        assert!(args.raw);
        assert!(!args.json);

        let expected = HistoryRequest::new("Credit Risk Scorecard").map(|request| {
            request
                .with_event_names(vec!["Change Governance Bundle Stage".to_owned()])
                .with_project_names(vec!["credit-risk".to_owned(), "fraud".to_owned()])
                .with_start("2024/01/01")
                .with_end("2024-03-31")
        });
        assert!(expected.is_ok());
        assert_eq!(args.to_request().ok(), expected.ok());
    }

    #[test]
    fn history_requires_bundle_name() {
        let missing = history(&["history", "--json"]).to_request();
        assert!(matches!(
            missing,
            Err(AppError::Validation(message)) if message == "Pick a bundle to see its audit trail."
        ));
        assert!(history(&["history", "  "]).to_request().is_err());
        assert!(parse(&["history", "a", "b"]).is_err());
    }

    #[test]
    fn history_rejects_unknown_events_and_dangling_flags() {
        let unknown = parse(&["history", "B", "--event", "Delete Everything"]);
        assert_eq!(
            unknown.err().map(|error| error.kind()),
            Some(ErrorKind::ValueValidation)
        );

        let dangling = parse(&["history", "B", "--start"]);
        assert!(dangling.is_err());
    }
}
