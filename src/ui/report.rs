//! Rendering of frame statistics for the terminal.

use clap::ValueEnum;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};

use crate::error::Result;
use crate::stats::FrameStatistics;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The classic summary lines
    #[default]
    Text,
    /// A table including percentiles and deadline misses
    Table,
    /// Pretty-printed JSON
    Json,
}

pub fn render(stats: &FrameStatistics, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(stats)),
        OutputFormat::Table => Ok(render_table(stats)),
        OutputFormat::Json => render_json(stats),
    }
}

/// Summary in the same layout the capture tooling has always printed.
pub fn render_text(stats: &FrameStatistics) -> String {
    let mut lines = Vec::with_capacity(10);
    lines.push(format!("Total frames: {}", stats.frame_count));
    lines.push(format!("Total sec: {:5.3}", stats.total_secs));
    lines.push(format!("{}", "Frame Rates: ".bold().yellow()));
    lines.push(format!("    Avg: {:5.3} fps", stats.fps.avg));
    lines.push(format!("    Min: {:5.3} fps", stats.fps.min));
    lines.push(format!("    Max: {:5.3} fps", stats.fps.max));
    lines.push(format!("{}", "Jitter (target_ms - actual_ms): ".bold().yellow()));
    lines.push(format!("    Avg: {:5.3} msec", stats.jitter_ms.avg));
    lines.push(format!("    Min: {:5.3} msec", stats.jitter_ms.min));
    lines.push(format!("    Max: {:5.3} msec", stats.jitter_ms.max));
    lines.join("\n")
}

pub fn render_table(stats: &FrameStatistics) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value"]);

    let rows: Vec<(&str, String)> = vec![
        ("Total frames", stats.frame_count.to_string()),
        ("Total sec", format!("{:.3}", stats.total_secs)),
        ("Target", format!("{:.3} fps ({:.3} msec)", stats.target_fps, stats.target_interval_ms)),
        ("Avg frame rate", format!("{:.3} fps", stats.fps.avg)),
        ("Min frame rate", format!("{:.3} fps", stats.fps.min)),
        ("Max frame rate", format!("{:.3} fps", stats.fps.max)),
        ("Frame time median", format!("{:.3} msec", stats.frame_time_ms.median)),
        ("Frame time p95", format!("{:.3} msec", stats.frame_time_ms.p95)),
        ("Frame time p99", format!("{:.3} msec", stats.frame_time_ms.p99)),
        ("Avg jitter", format!("{:.3} msec", stats.jitter_ms.avg)),
        ("Min jitter", format!("{:.3} msec", stats.jitter_ms.min)),
        ("Max jitter", format!("{:.3} msec", stats.jitter_ms.max)),
        ("Jitter stdev", format!("{:.3} msec", stats.jitter_ms.stdev)),
        (
            "Deadline misses",
            format!(
                "{} ({:.1}%)",
                stats.deadline_misses,
                stats.deadline_miss_ratio * 100.0
            ),
        ),
    ];
    for (metric, value) in rows {
        table.add_row(vec![metric.to_string(), value]);
    }
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    table.to_string()
}

pub fn render_json(stats: &FrameStatistics) -> Result<String> {
    Ok(serde_json::to_string_pretty(stats)?)
}
