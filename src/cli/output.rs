//! Output formatting for pipeline reports
//!
//! Reports go to stdout in either JSON (for schedulers and scripts) or a short
//! human-readable summary. Logs are written to stderr separately.

use anyhow::{Context, Result};
use std::fmt::Write;

use crate::config::EtlConfig;
use crate::pipeline::stages::{
    ArchiveReport, ExtractReport, LoadOutcome, LoadReport, TransformOutcome,
};
use crate::pipeline::{RunReport, StageReport};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_run(&self, report: &RunReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize run report to JSON")
            }
            OutputFormat::Human => {
                let mut out = String::new();
                writeln!(
                    out,
                    "Pipeline run started {} ({} ms)",
                    report.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
                    report.duration_ms
                )?;
                human_extract(&mut out, &report.extract)?;
                human_load(&mut out, &report.load)?;
                human_transform(&mut out, &report.transform)?;
                human_archive(&mut out, &report.archive)?;
                Ok(out)
            }
        }
    }

    pub fn format_stage(&self, report: &StageReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .context("Failed to serialize stage report to JSON"),
            OutputFormat::Human => {
                let mut out = String::new();
                match report {
                    StageReport::Extract(r) => human_extract(&mut out, r)?,
                    StageReport::Load(r) => human_load(&mut out, r)?,
                    StageReport::Transform(r) => human_transform(&mut out, r)?,
                    StageReport::Archive(r) => human_archive(&mut out, r)?,
                }
                Ok(out)
            }
        }
    }

    pub fn format_config(&self, config: &EtlConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&config.to_display_map())
                .context("Failed to serialize config to JSON"),
            OutputFormat::Human => Ok(config.to_string()),
        }
    }
}

fn human_extract(out: &mut String, report: &ExtractReport) -> std::fmt::Result {
    writeln!(out, "Extract:")?;
    for file in &report.files {
        writeln!(
            out,
            "  {} -> {} ({} bytes)",
            file.dataset,
            file.path.display(),
            file.bytes
        )?;
    }
    Ok(())
}

fn human_load(out: &mut String, report: &LoadReport) -> std::fmt::Result {
    writeln!(out, "Load:")?;
    for file in &report.files {
        let summary = match &file.outcome {
            LoadOutcome::Inserted { count } => format!("inserted {} documents", count),
            LoadOutcome::Created { id } => format!("created document {}", id),
            LoadOutcome::Replaced { id } => format!("replaced document {}", id),
            LoadOutcome::Skipped { reason } => format!("skipped ({})", reason),
        };
        writeln!(out, "  {}: {}", file.path.display(), summary)?;
    }
    Ok(())
}

fn human_transform(out: &mut String, outcome: &TransformOutcome) -> std::fmt::Result {
    match outcome {
        TransformOutcome::MissingDocument => {
            writeln!(out, "Transform: no top scorers document, nothing changed")
        }
        TransformOutcome::Updated {
            document,
            players,
            contributions,
        } => writeln!(
            out,
            "Transform: document {} updated, contribution set on {}/{} players",
            document,
            contributions.len(),
            players
        ),
    }
}

fn human_archive(out: &mut String, report: &ArchiveReport) -> std::fmt::Result {
    writeln!(out, "Archive (bucket {}):", report.bucket)?;
    for key in &report.uploaded {
        writeln!(out, "  uploaded {}", key)?;
    }
    for failure in &report.failures {
        writeln!(out, "  FAILED {}: {}", failure.key, failure.error)?;
    }
    Ok(())
}
