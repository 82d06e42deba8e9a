//! Output formatting and persistence for the dashboard view.
//!
//! Supports a plain-text report, JSON serialization, and CSV append of the
//! store comparison.

use anyhow::Result;
use std::fmt::Write;
use tracing::debug;

use crate::analyzers::types::{AggregateView, StoreSummary};
use crate::record::SurveyRecord;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs the view using Rust's debug pretty-print format.
pub fn print_pretty(view: &AggregateView) {
    debug!("{:#?}", view);
}

/// Prints the view to stdout as pretty-printed JSON.
pub fn print_json(view: &AggregateView) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

/// Renders the view as a plain-text report.
pub fn render_report(view: &AggregateView) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Customer Satisfaction");
    let _ = writeln!(
        output,
        "{} of {} reviews match the current filter",
        view.total, view.total_loaded
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "Service:        {:.1}", view.mean_service);
    let _ = writeln!(output, "Recommendation: {:.1}", view.mean_recommendation);
    let _ = writeln!(
        output,
        "NPS:            {} ({} promoters, {} neutrals, {} detractors)",
        view.nps.score, view.nps.promoters, view.nps.neutrals, view.nps.detractors
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Stores");
    for s in &view.stores {
        let _ = writeln!(
            output,
            "- {}: {} reviews, service {:.1}, recommendation {:.1}, overall {:.1}",
            s.store, s.total, s.mean_service, s.mean_recommendation, s.mean_overall
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Rating distribution");
    for b in &view.histogram {
        let _ = writeln!(
            output,
            "- {}★: service {}, recommendation {}",
            b.rating, b.service, b.recommendation
        );
    }

    write_ranking(&mut output, "Critical reviews", &view.worst);
    write_ranking(&mut output, "Top reviews", &view.best);

    if !view.trend.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Daily trend");
        for p in &view.trend {
            let _ = writeln!(
                output,
                "- {}: {} reviews, service {:.1}, recommendation {:.1}",
                p.date, p.total, p.mean_service, p.mean_recommendation
            );
        }
    }

    output
}

fn write_ranking(output: &mut String, title: &str, records: &[SurveyRecord]) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {title}");

    if records.is_empty() {
        let _ = writeln!(output, "No reviews.");
        return;
    }

    for r in records {
        let _ = writeln!(
            output,
            "- {:.1}★ {} ({}, {}) at {} on {}",
            r.combined_score(),
            r.customer_name(),
            r.phone(),
            r.email(),
            r.store(),
            r.submitted_at()
        );
        if r.has_comment() {
            let _ = writeln!(output, "  \"{}\"", r.comment());
        }
    }
}

/// Appends the store comparison rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_store_summaries(path: &str, summaries: &[StoreSummary]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = summaries.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for summary in summaries {
        writer.serialize(summary)?;
    }
    writer.flush()?;

    Ok(())
}
