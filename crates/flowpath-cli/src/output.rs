// Rust guideline compliant 2026-10-12

//! Output formatting module for the Flowpath CLI.
//!
//! This module provides functionality for formatting command results
//! in various output formats (JSON, table, plain text).

use flowpath_app::{
    DiscoveryResult, ErrorEnvelope, SuccessEnvelope, TransitionList, TransitionResult,
    WorkflowPath, WorkflowSummary,
};
use flowpath_core::{OutputFormat, Transition, WorkflowGraph};
use serde::Serialize;
use serde_json::json;
use std::io::Write;
use tabled::{builder::Builder, settings::Style};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Output formatter trait.
///
/// Defines the interface for formatting command results in different output formats.
pub trait OutputFormatter {
    /// Formats the transitions currently available on an issue.
    fn format_transitions(&self, list: &TransitionList) -> String;

    /// Formats the result of a transition or dry run.
    fn format_transition(&self, result: &TransitionResult) -> String;

    /// Formats the result of a discovery run.
    fn format_discovery(&self, result: &DiscoveryResult) -> String;

    /// Formats cached workflow summaries.
    fn format_workflows(&self, summaries: &[WorkflowSummary]) -> String;

    /// Formats a single cached workflow.
    fn format_workflow(&self, graph: &WorkflowGraph) -> String;

    /// Formats an offline path query.
    fn format_path(&self, path: &WorkflowPath) -> String;

    /// Formats confirmation that a cached workflow was removed.
    fn format_deleted(&self, issue_type: &str) -> String;

    /// Formats an error for display.
    ///
    /// # Arguments
    /// * `error` - The error envelope to format
    ///
    /// # Returns
    /// A formatted error string
    fn format_error(&self, error: &ErrorEnvelope) -> String;
}

/// JSON output formatter.
///
/// Wraps results in a success envelope for machine consumption.
pub struct JsonFormatter;

impl JsonFormatter {
    fn envelope<T: Serialize>(&self, result: T) -> String {
        serde_json::to_string_pretty(&SuccessEnvelope::new(result)).unwrap_or_else(|e| {
            json!({ "status": "error", "code": "json_error", "message": e.to_string() })
                .to_string()
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_transitions(&self, list: &TransitionList) -> String {
        self.envelope(list)
    }

    fn format_transition(&self, result: &TransitionResult) -> String {
        self.envelope(result)
    }

    fn format_discovery(&self, result: &DiscoveryResult) -> String {
        self.envelope(result)
    }

    fn format_workflows(&self, summaries: &[WorkflowSummary]) -> String {
        self.envelope(json!({
            "workflows": summaries,
            "total": summaries.len(),
        }))
    }

    fn format_workflow(&self, graph: &WorkflowGraph) -> String {
        self.envelope(graph)
    }

    fn format_path(&self, path: &WorkflowPath) -> String {
        self.envelope(path)
    }

    fn format_deleted(&self, issue_type: &str) -> String {
        self.envelope(json!({ "deleted": issue_type }))
    }

    fn format_error(&self, error: &ErrorEnvelope) -> String {
        serde_json::to_string_pretty(error).unwrap_or_else(|_| {
            json!({ "status": "error", "message": error.message }).to_string()
        })
    }
}

/// Table output formatter.
///
/// Formats results as human-readable tables.
pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    /// Creates a new table formatter.
    ///
    /// # Arguments
    /// * `use_color` - Whether to use colored output
    ///
    /// # Returns
    /// A new TableFormatter instance
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn error_prefix(&self) -> String {
        if !self.use_color {
            return "Error: ".to_string();
        }
        let mut buffer = Buffer::ansi();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
        let _ = write!(buffer, "Error: ");
        let _ = buffer.reset();
        String::from_utf8_lossy(buffer.as_slice()).to_string()
    }
}

fn steps_table(transitions: &[Transition]) -> String {
    let mut builder = Builder::default();
    builder.push_record(vec!["#", "Transition", "ID", "To"]);
    for (i, t) in transitions.iter().enumerate() {
        builder.push_record(vec![
            (i + 1).to_string(),
            t.name.clone(),
            t.id.clone(),
            t.to.clone(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::modern());
    table.to_string()
}

fn plain_steps(transitions: &[Transition]) -> String {
    transitions
        .iter()
        .map(|t| format!("{}\t{}\t{}\n", t.id, t.name, t.to))
        .collect()
}

fn outcome_line(result: &TransitionResult) -> String {
    let outcome = &result.outcome;
    let verb = if outcome.dry_run {
        "would move"
    } else {
        "moved"
    };
    if outcome.transitions.is_empty() {
        format!(
            "{} is already in '{}'.",
            outcome.issue_key, outcome.final_status
        )
    } else {
        format!(
            "{} {} from '{}' to '{}' in {} step(s).",
            outcome.issue_key, verb, outcome.from_status, outcome.final_status, result.steps
        )
    }
}

fn discovery_line(result: &DiscoveryResult) -> String {
    let report = &result.report;
    let mut line = format!(
        "Discovered {} status(es) for '{}' in {} hop(s); issue left in '{}'.",
        report.graph.all_states().len(),
        report.graph.issue_type,
        report.hops.len(),
        report.final_status
    );
    if let Some(stuck_at) = &report.stuck_at {
        line.push_str(&format!(" Stuck at '{}'; workflow is incomplete.", stuck_at));
    } else if !report.complete {
        line.push_str(" Hop limit reached; workflow is incomplete.");
    }
    if result.saved {
        line.push_str(" Saved.");
    }
    line
}

impl OutputFormatter for TableFormatter {
    fn format_transitions(&self, list: &TransitionList) -> String {
        let mut output = format!(
            "{} ({}) is in '{}'\n",
            list.issue_key, list.issue_type, list.status
        );
        if list.transitions.is_empty() {
            output.push_str("No transitions available.");
            return output;
        }

        let mut builder = Builder::default();
        builder.push_record(vec!["ID", "Transition", "To"]);
        for t in &list.transitions {
            builder.push_record(vec![t.id.as_str(), t.name.as_str(), t.to.as_str()]);
        }
        let mut table = builder.build();
        table.with(Style::modern());
        output.push_str(&table.to_string());
        output
    }

    fn format_transition(&self, result: &TransitionResult) -> String {
        let mut output = outcome_line(result);
        if !result.outcome.transitions.is_empty() {
            output.push('\n');
            output.push_str(&steps_table(&result.outcome.transitions));
        }
        output
    }

    fn format_discovery(&self, result: &DiscoveryResult) -> String {
        format!("{}\n{}", discovery_line(result), result.report.graph.to_table())
    }

    fn format_workflows(&self, summaries: &[WorkflowSummary]) -> String {
        if summaries.is_empty() {
            return "No cached workflows.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(vec![
            "Issue Type",
            "ID",
            "States",
            "Transitions",
            "Discovered From",
            "Discovered At",
        ]);
        for s in summaries {
            builder.push_record(vec![
                s.issue_type.clone(),
                s.issue_type_id.clone(),
                s.states.to_string(),
                s.transitions.to_string(),
                s.discovered_from.clone().unwrap_or_else(|| "-".to_string()),
                s.discovered_at.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    fn format_workflow(&self, graph: &WorkflowGraph) -> String {
        format!(
            "Workflow: {} ({})\n{}",
            graph.issue_type,
            graph.issue_type_id,
            graph.to_table()
        )
    }

    fn format_path(&self, path: &WorkflowPath) -> String {
        if path.transitions.is_empty() {
            return format!("'{}' is already '{}'.", path.from, path.to);
        }
        format!(
            "{}: '{}' to '{}' in {} step(s)\n{}",
            path.issue_type,
            path.from,
            path.to,
            path.steps,
            steps_table(&path.transitions)
        )
    }

    fn format_deleted(&self, issue_type: &str) -> String {
        format!("Deleted cached workflow for '{}'.", issue_type)
    }

    fn format_error(&self, error: &ErrorEnvelope) -> String {
        let mut output = format!("{}{}", self.error_prefix(), error.message);
        if let Some(hint) = &error.hint {
            output.push_str(&format!("\nHint: {}", hint));
        }
        output
    }
}

/// Plain text output formatter.
///
/// Formats results as simple tab-separated lines without colors or tables.
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_transitions(&self, list: &TransitionList) -> String {
        plain_steps(&list.transitions)
    }

    fn format_transition(&self, result: &TransitionResult) -> String {
        format!(
            "{}\n{}",
            outcome_line(result),
            plain_steps(&result.outcome.transitions)
        )
    }

    fn format_discovery(&self, result: &DiscoveryResult) -> String {
        format!("{}\n{}", discovery_line(result), result.report.graph.to_ascii())
    }

    fn format_workflows(&self, summaries: &[WorkflowSummary]) -> String {
        summaries
            .iter()
            .map(|s| {
                format!(
                    "{}\t{}\t{}\t{}\n",
                    s.issue_type, s.issue_type_id, s.states, s.transitions
                )
            })
            .collect()
    }

    fn format_workflow(&self, graph: &WorkflowGraph) -> String {
        graph.to_ascii()
    }

    fn format_path(&self, path: &WorkflowPath) -> String {
        plain_steps(&path.transitions)
    }

    fn format_deleted(&self, issue_type: &str) -> String {
        format!("Deleted {}", issue_type)
    }

    fn format_error(&self, error: &ErrorEnvelope) -> String {
        format!("Error: {}", error.message)
    }
}

/// Factory function to create an appropriate formatter.
///
/// # Arguments
/// * `format` - The desired output format
/// * `use_color` - Whether to use colored output (table only)
///
/// # Returns
/// A boxed OutputFormatter instance
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter::new(use_color)),
        OutputFormat::Plain => Box::new(PlainFormatter),
    }
}
