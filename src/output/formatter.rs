use std::io::IsTerminal;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use terminal_size::{terminal_size, Width};

use crate::scanner::{Check, CheckStatus, Grade, ResultSummary, ScanResult};

/// How `scan` prints a completed result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Render `result` in the requested format.
pub fn render(result: &ScanResult, format: OutputFormat, use_colors: bool) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(format_report(result, use_colors)),
        OutputFormat::Tsv => Ok(format_tsv(result)),
        OutputFormat::Json => format_json(result),
    }
}

/// "[15/20]"
pub fn format_score(check: &Check) -> String {
    format!("[{}/{}]", check.score, check.max_score)
}

fn status_marker(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pending => "[ ]",
        CheckStatus::Running => "[~]",
        CheckStatus::Passed => "[+]",
        CheckStatus::Warning => "[!]",
        CheckStatus::Failed => "[x]",
    }
}

/// Format one check as a single line: marker, name, score, details.
/// Unresolved checks show their description instead of a score.
pub fn format_check_line(check: &Check, use_colors: bool) -> String {
    let marker = status_marker(check.status);
    let name = format!("{:<18}", check.name());

    if !check.status.is_terminal() {
        let line = format!("{} {} {:>9}  {}", marker, name, "", check.description());
        return if use_colors { line.dimmed().to_string() } else { line };
    }

    let score = format!("{:>9}", format_score(check));
    let details = check.details.as_deref().unwrap_or_else(|| check.description());

    if use_colors {
        let marker = match check.status {
            CheckStatus::Passed => marker.green().to_string(),
            CheckStatus::Warning => marker.yellow().to_string(),
            _ => marker.red().to_string(),
        };
        format!("{} {} {}  {}", marker, name.bold(), score.dimmed(), details)
    } else {
        format!("{} {} {}  {}", marker, name, score, details)
    }
}

fn colored_grade(grade: Grade) -> String {
    let text = format!(" {} ", grade);
    match grade {
        Grade::A | Grade::B => text.black().on_green().bold().to_string(),
        Grade::C => text.black().on_yellow().bold().to_string(),
        Grade::D | Grade::F => text.white().on_red().bold().to_string(),
    }
}

/// Width of the horizontal rule, capped for wide terminals and pipes.
fn rule_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| (w as usize).min(72))
        .unwrap_or(72)
}

/// Format a completed result as a multi-line report.
pub fn format_report(result: &ScanResult, use_colors: bool) -> String {
    let rule = "-".repeat(rule_width());
    let summary = result.summary();
    let grade = if use_colors {
        colored_grade(result.grade())
    } else {
        result.grade().to_string()
    };

    let mut lines = Vec::with_capacity(result.checks.len() + 6);
    lines.push(format!(
        "Security posture scan {} ({})",
        result.run_id,
        result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    lines.push(rule.clone());
    lines.extend(result.checks.iter().map(|c| format_check_line(c, use_colors)));
    lines.push(rule);
    lines.push(format!(
        "Grade: {}  Score: {}/{} ({:.0}%)",
        grade,
        result.total_score,
        result.max_score,
        result.percentage()
    ));
    lines.push(format_summary(summary, use_colors));
    lines.join("\n")
}

fn format_summary(summary: ResultSummary, use_colors: bool) -> String {
    if use_colors {
        format!(
            "{} passed, {} warnings, {} failed",
            summary.passed.green(),
            summary.warnings.yellow(),
            summary.failed.red()
        )
    } else {
        format!(
            "{} passed, {} warnings, {} failed",
            summary.passed, summary.warnings, summary.failed
        )
    }
}

/// Format checks as tab-separated values for scripting
/// Columns: id, status, score, max_score, details (no headers, no colors)
/// The final line is the total: "total", grade, score, max, percentage
pub fn format_tsv(result: &ScanResult) -> String {
    let mut lines: Vec<String> = result
        .checks
        .iter()
        .map(|c| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                c.id,
                c.status.as_str(),
                c.score,
                c.max_score,
                c.details.as_deref().unwrap_or("")
            )
        })
        .collect();
    lines.push(format!(
        "total\t{}\t{}\t{}\t{:.0}",
        result.grade(),
        result.total_score,
        result.max_score,
        result.percentage()
    ));
    lines.join("\n")
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    id: &'a str,
    name: &'a str,
    status: CheckStatus,
    score: u32,
    max_score: u32,
    details: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ScanReport<'a> {
    run_id: u64,
    grade: Grade,
    percentage: f64,
    total_score: u32,
    max_score: u32,
    timestamp: DateTime<Utc>,
    summary: ResultSummary,
    checks: Vec<CheckReport<'a>>,
}

/// Format a result as pretty-printed JSON with names and the derived grade.
pub fn format_json(result: &ScanResult) -> Result<String> {
    let report = ScanReport {
        run_id: result.run_id.0,
        grade: result.grade(),
        percentage: result.percentage(),
        total_score: result.total_score,
        max_score: result.max_score,
        timestamp: result.timestamp,
        summary: result.summary(),
        checks: result
            .checks
            .iter()
            .map(|c| CheckReport {
                id: c.id.as_str(),
                name: c.name(),
                status: c.status,
                score: c.score,
                max_score: c.max_score,
                details: c.details.as_deref(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize scan report")
}
