use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::config::AnalysisSettings;
use crate::error::{AnalysisError, Result};
use crate::stats::{FrameLog, FrameStatistics};
use crate::ui::export::save_statistics_csv;
use crate::ui::plot::plot_frame_times;
use crate::ui::report::{render, OutputFormat};

// ============================================================================
// COMMAND LINE
// ============================================================================

/// Summarize a per-frame timing log: frame rates and jitter against a target frame rate.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct AnalysisOptions {
    /// Frame timing log, one comma-separated record per frame.
    #[arg(default_value = "stats.txt")]
    pub input: PathBuf,

    /// Target frame rate the capture loop was aiming for.
    #[arg(long, short = 't')]
    pub target_fps: Option<f64>,

    /// Zero-based column holding the frame time in msec.
    #[arg(long, short = 'c')]
    pub column: Option<usize>,

    /// Field delimiter.
    #[arg(long, short = 'd')]
    pub delimiter: Option<char>,

    /// Skip malformed records instead of failing.
    #[arg(long)]
    pub skip_invalid: bool,

    /// JSON settings file. Ignored if it does not exist.
    #[arg(long, default_value = "frame_stats.json")]
    pub config: PathBuf,

    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write an SVG chart of frame times.
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Write the statistics as CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// More diagnostics on stderr (repeatable).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,
}

// ============================================================================
// SETTINGS
// ============================================================================

/// Settings file values with command-line overrides applied on top.
pub fn resolve_settings(options: &AnalysisOptions) -> Result<AnalysisSettings> {
    let mut settings = AnalysisSettings::load(&options.config)?;

    if let Some(target_fps) = options.target_fps {
        settings.target_fps = target_fps;
    }
    if let Some(column) = options.column {
        settings.frame_time_column = column;
    }
    if let Some(delimiter) = options.delimiter {
        settings.delimiter = delimiter;
    }
    if options.skip_invalid {
        settings.skip_invalid = true;
    }

    settings.validate()?;
    log::debug!("effective settings: {:?}", settings);
    Ok(settings)
}

// ============================================================================
// ANALYSIS
// ============================================================================

pub struct Analysis {
    pub settings: AnalysisSettings,
    pub frame_log: FrameLog,
    pub statistics: FrameStatistics,
}

pub fn analyze(options: &AnalysisOptions) -> Result<Analysis> {
    let settings = resolve_settings(options)?;
    let frame_log = FrameLog::from_path(&options.input, &settings)?;
    if frame_log.skipped() > 0 {
        log::warn!(
            "{} malformed record(s) skipped in {}",
            frame_log.skipped(),
            options.input.display()
        );
    }

    let statistics = FrameStatistics::from_frame_times(frame_log.frame_times_ms(), settings.target_fps)?;
    Ok(Analysis {
        settings,
        frame_log,
        statistics,
    })
}

pub fn run_analysis(options: &AnalysisOptions) -> Result<()> {
    if options.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    let analysis = analyze(options)?;

    let rendered = render(&analysis.statistics, options.format)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered).map_err(|e| AnalysisError::io("<stdout>", e))?;

    if let Some(path) = &options.plot {
        plot_frame_times(
            path,
            analysis.frame_log.frame_times_ms(),
            analysis.settings.target_interval_ms(),
        )?;
    }
    if let Some(path) = &options.export {
        save_statistics_csv(&analysis.statistics, path)?;
    }

    Ok(())
}
