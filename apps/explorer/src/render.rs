use std::fmt::Write as _;

use govex_application::{BundleHistoryRow, HistoryOptions, StagnationBar, TabularRow};
use govex_core::{AppError, AppResult};
use serde::Serialize;

const MAX_BAR_WIDTH: i64 = 40;
const COLUMN_GAP: &str = "  ";

/// Renders rows as a left-aligned plain-text table.
pub fn table<R: TabularRow>(rows: &[R]) -> String {
    let headers = R::headers();
    let cells: Vec<Vec<String>> = rows.iter().map(TabularRow::cells).collect();

    let mut widths: Vec<usize> = headers.iter().map(|header| display_width(header)).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(cell));
        }
    }

    let mut output = String::new();
    push_line(&mut output, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_line(&mut output, rule.iter().map(String::as_str), &widths);
    for row in &cells {
        push_line(&mut output, row.iter().map(String::as_str), &widths);
    }

    output
}

/// Renders the raw field changes of every history row.
pub fn raw_field_changes(rows: &[BundleHistoryRow]) -> String {
    let mut output = String::new();

    for row in rows {
        let _ = writeln!(output, "== {} {}", row.time, row.action);
        let _ = writeln!(output, "{}", row.raw_field_changes);
    }

    output
}

/// Renders a horizontal bar chart of days in stage.
pub fn bar_chart(bars: &[StagnationBar]) -> String {
    let label_width = bars
        .iter()
        .map(|bar| display_width(&bar.bundle_name))
        .max()
        .unwrap_or_default();
    let longest = bars.iter().map(|bar| bar.days).max().unwrap_or_default();

    let mut output = String::new();
    for bar in bars {
        let length = scaled_length(bar.days, longest);
        let padding = label_width.saturating_sub(display_width(&bar.bundle_name));
        let _ = writeln!(
            output,
            "{}{} | {} {}",
            bar.bundle_name,
            " ".repeat(padding),
            "#".repeat(length),
            bar.days
        );
    }

    output
}

/// Renders the history filter values.
pub fn history_options(options: &HistoryOptions) -> String {
    let mut output = String::new();

    for (title, values) in [
        ("Bundles", &options.bundle_names),
        ("Projects", &options.project_names),
        ("Events", &options.event_names),
    ] {
        let _ = writeln!(output, "{title}:");
        for value in values {
            let _ = writeln!(output, "  {value}");
        }
    }

    output
}

/// Serializes any report value as pretty JSON.
pub fn json<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|error| AppError::Internal(format!("failed to serialize report: {error}")))
}

fn push_line<'a>(output: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();

    for (index, (cell, width)) in cells.zip(widths).enumerate() {
        if index > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(display_width(cell))));
    }

    output.push_str(line.trim_end());
    output.push('\n');
}

fn scaled_length(days: i64, longest: i64) -> usize {
    if days <= 0 || longest <= 0 {
        return 0;
    }

    let width = (days.saturating_mul(MAX_BAR_WIDTH) + longest - 1) / longest;
    usize::try_from(width.min(MAX_BAR_WIDTH)).unwrap_or_default()
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}
