//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::{Color, Colorize};
use rolecheck_extractor::{Answer, ClearOutcome, IndexSummary};
use rolecheck_reconciler::{RoleReport, Verdict};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a reconciliation report.
    pub fn format_report(&self, report: &RoleReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Quiet => Ok(verdict_code(report.verdict).to_string()),
        }
    }

    fn format_report_table(&self, report: &RoleReport) -> String {
        let mut summary = Builder::default();
        summary.push_record(["", "Count"]);
        summary.push_record([
            "Authoritative roles (XML)".to_string(),
            report.authoritative_count.to_string(),
        ]);
        summary.push_record([
            "Roles found in document".to_string(),
            report.candidate_count.to_string(),
        ]);
        summary.push_record(["Matched".to_string(), report.matched_roles.len().to_string()]);
        summary.push_record(["Incorrect".to_string(), report.incorrect_roles.len().to_string()]);

        let mut sections = vec![styled(summary)];

        if !report.matched_roles.is_empty() {
            sections.push(role_table("Matched Role", &report.matched_roles));
        }
        if !report.incorrect_roles.is_empty() {
            sections.push(role_table("Incorrect Role", &report.incorrect_roles));
        }

        let verdict = report.verdict.to_string();
        sections.push(match report.verdict {
            Verdict::Correct => self.success(&verdict),
            Verdict::Incorrect => self.error(&verdict),
            Verdict::NoRolesFound => self.warning(&verdict),
        });

        sections.join("\n\n")
    }

    /// Format a list of authoritative roles.
    pub fn format_roles(&self, roles: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(roles)?),
            OutputFormat::Quiet => Ok(roles.join("\n")),
            OutputFormat::Table => {
                if roles.is_empty() {
                    return Ok(self.warning("No roles found."));
                }
                let mut builder = Builder::default();
                builder.push_record(["#", "Role"]);
                for (i, role) in roles.iter().enumerate() {
                    builder.push_record([(i + 1).to_string(), role.clone()]);
                }
                Ok(styled(builder))
            }
        }
    }

    /// Format the answer to a question.
    pub fn format_answer(&self, question: &str, answer: &Answer) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "question": question,
                "answer": answer,
            }))?),
            OutputFormat::Quiet => Ok(answer.to_string()),
            OutputFormat::Table => Ok(match answer {
                Answer::Answered(text) => format!("{}\n{}", self.info(question), text.trim()),
                other => self.warning(&other.to_string()),
            }),
        }
    }

    /// Format an indexing summary.
    pub fn format_index_summary(&self, summary: &IndexSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            OutputFormat::Quiet => Ok(summary.upserted.to_string()),
            OutputFormat::Table if summary.upserted == 0 => Ok(self.warning(&format!(
                "Nothing indexed for '{}'",
                summary.document_id
            ))),
            OutputFormat::Table => {
                let mut message = format!(
                    "Indexed {} chunk(s) of '{}'",
                    summary.upserted, summary.document_id
                );
                if summary.skipped > 0 {
                    message.push_str(&format!(" ({} skipped without embedding)", summary.skipped));
                }
                Ok(self.success(&message))
            }
        }
    }

    /// Format the outcome of clearing a document.
    pub fn format_clear(&self, document_id: &str, outcome: &ClearOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "document_id": document_id,
                "outcome": outcome,
            }))?),
            OutputFormat::Quiet => Ok(match outcome {
                ClearOutcome::Cleared => "cleared",
                ClearOutcome::NothingToClear => "nothing_to_clear",
                ClearOutcome::Failed(_) => "failed",
            }
            .to_string()),
            OutputFormat::Table => Ok(match outcome {
                ClearOutcome::Cleared => self.success(&format!("Cleared '{}'", document_id)),
                ClearOutcome::NothingToClear => {
                    self.info(&format!("No vectors stored for '{}'", document_id))
                }
                ClearOutcome::Failed(reason) => {
                    self.error(&format!("Could not clear '{}': {}", document_id, reason))
                }
            }),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), Color::Green)
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), Color::Red)
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), Color::Blue)
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), Color::Yellow)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: Color) -> String {
        if self.color_enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Stable machine-readable verdict for quiet output.
pub fn verdict_code(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Correct => "correct",
        Verdict::Incorrect => "incorrect",
        Verdict::NoRolesFound => "no_roles_found",
    }
}

fn role_table(header: &str, roles: &[String]) -> String {
    let mut builder = Builder::default();
    builder.push_record([header]);
    for role in roles {
        builder.push_record([role.as_str()]);
    }
    styled(builder)
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
