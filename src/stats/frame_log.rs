//! Frame timing log reader.
//!
//! The capture loop logs one line per frame, e.g.
//! `"kernel: frame, 118, 33.47"`. Only the frame time column is used, and
//! only that field has to be valid UTF-8.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::config::AnalysisSettings;
use crate::error::{AnalysisError, Result};
use crate::utils::helpers::parse_frame_time_ms;

const PROGRESS_STEP: u64 = 4096;

/// Frame times parsed from a log, in file order.
#[derive(Debug, Clone, Default)]
pub struct FrameLog {
    frame_times_ms: Vec<f64>,
    skipped: usize,
}

impl FrameLog {
    pub fn from_path(path: &Path, settings: &AnalysisSettings) -> Result<Self> {
        let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
        log::info!("reading frame log {}", path.display());
        Self::parse(BufReader::new(file), settings, path)
    }

    pub fn from_reader<R: Read>(reader: R, settings: &AnalysisSettings) -> Result<Self> {
        Self::parse(BufReader::new(reader), settings, Path::new("<reader>"))
    }

    fn parse<R: BufRead>(mut reader: R, settings: &AnalysisSettings, source: &Path) -> Result<Self> {
        settings.validate()?;

        let delimiter = settings.delimiter as u8;
        let column = settings.frame_time_column;

        let mut frames = FrameLog::default();
        let mut spinner: Option<ProgressBar> = None;
        let mut buf = Vec::new();
        let mut line: u64 = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| AnalysisError::io(source, e))?;
            if read == 0 {
                break;
            }
            line += 1;

            let raw = buf.trim_ascii();
            if raw.is_empty() {
                continue;
            }

            match parse_record(raw, delimiter, column) {
                Ok(ms) => {
                    frames.frame_times_ms.push(ms);
                    let count = frames.frame_times_ms.len() as u64;
                    if count % PROGRESS_STEP == 0 {
                        spinner.get_or_insert_with(start_spinner).set_position(count);
                    }
                }
                Err(reason) if settings.skip_invalid => {
                    log::warn!("skipping line {}: {}", line, reason);
                    frames.skipped += 1;
                }
                Err(reason) => {
                    if let Some(spinner) = &spinner {
                        spinner.finish_and_clear();
                    }
                    return Err(AnalysisError::Malformed { line, reason });
                }
            }
        }
        if let Some(spinner) = &spinner {
            spinner.finish_and_clear();
        }

        log::debug!(
            "parsed {} frame samples ({} skipped)",
            frames.frame_times_ms.len(),
            frames.skipped
        );
        Ok(frames)
    }

    pub fn frame_times_ms(&self) -> &[f64] {
        &self.frame_times_ms
    }

    pub fn len(&self) -> usize {
        self.frame_times_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_times_ms.is_empty()
    }

    /// Number of malformed records dropped under `skip_invalid`.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Extract the frame time from one non-blank line.
fn parse_record(raw: &[u8], delimiter: u8, column: usize) -> std::result::Result<f64, String> {
    let field = raw
        .split(|&b| b == delimiter)
        .nth(column)
        .ok_or_else(|| {
            format!(
                "expected at least {} fields, found {}",
                column + 1,
                raw.split(|&b| b == delimiter).count()
            )
        })?;
    let field = std::str::from_utf8(field)
        .map_err(|_| "frame time field is not valid UTF-8".to_string())?;
    parse_frame_time_ms(field)
}

fn start_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} frames read {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str, settings: &AnalysisSettings) -> Result<FrameLog> {
        FrameLog::from_reader(input.as_bytes(), settings)
    }

    fn malformed_line(err: AnalysisError) -> u64 {
        match err {
            AnalysisError::Malformed { line, .. } => line,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reads_third_column_by_default() {
        let input = "Jun 12 kernel: frame, 1, 33.10\nJun 12 kernel: frame, 2, 34.90\n";
        let log = read(input, &AnalysisSettings::default()).unwrap();
        assert_eq!(log.frame_times_ms(), &[33.10, 34.90]);
        assert_eq!(log.skipped(), 0);
    }

    #[test]
    fn ignores_blank_lines() {
        let input = "a, 1, 10.0\n\n   \na, 2, 20.0\n\n";
        let log = read(input, &AnalysisSettings::default()).unwrap();
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn missing_final_newline_is_fine() {
        let log = read("a, 1, 10.0\na, 2, 20.0", &AnalysisSettings::default()).unwrap();
        assert_eq!(log.frame_times_ms(), &[10.0, 20.0]);
    }

    #[test]
    fn crlf_line_endings() {
        let log = read("a, 1, 10.0\r\na, 2, 20.0\r\n", &AnalysisSettings::default()).unwrap();
        assert_eq!(log.frame_times_ms(), &[10.0, 20.0]);
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let input = "a, 1, 10.0\na, 2, oops\na, 3, 30.0\n";
        match read(input, &AnalysisSettings::default()).unwrap_err() {
            AnalysisError::Malformed { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("oops"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn line_numbers_count_blank_lines() {
        let err = read("a, 1, 10.0\n\n\na, 2, oops\n", &AnalysisSettings::default()).unwrap_err();
        assert_eq!(malformed_line(err), 4);

        let err = read("\n  \na, 1\n", &AnalysisSettings::default()).unwrap_err();
        assert_eq!(malformed_line(err), 3);
    }

    #[test]
    fn delimiter_only_line_is_malformed() {
        let err = read("a, 1, 10.0\n,,\na, 2, 20.0\n", &AnalysisSettings::default()).unwrap_err();
        assert_eq!(malformed_line(err), 2);

        let settings = AnalysisSettings {
            skip_invalid: true,
            ..AnalysisSettings::default()
        };
        let log = read("a, 1, 10.0\n , , \na, 2, 20.0\n", &settings).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.skipped(), 1);
    }

    #[test]
    fn non_utf8_prefix_is_ignored() {
        let input: &[u8] = b"a, 1, 10.0\n\xff\xfe, 2, 20.0\n";
        let log = FrameLog::from_reader(input, &AnalysisSettings::default()).unwrap();
        assert_eq!(log.frame_times_ms(), &[10.0, 20.0]);
    }

    #[test]
    fn non_utf8_frame_time_is_malformed() {
        let input: &[u8] = b"a, 1, 10.0\na, 2, 2\xff.0\na, 3, 30.0\n";
        let err = FrameLog::from_reader(input, &AnalysisSettings::default()).unwrap_err();
        assert_eq!(malformed_line(err), 2);

        let settings = AnalysisSettings {
            skip_invalid: true,
            ..AnalysisSettings::default()
        };
        let log = FrameLog::from_reader(input, &settings).unwrap();
        assert_eq!(log.frame_times_ms(), &[10.0, 30.0]);
        assert_eq!(log.skipped(), 1);
    }

    #[test]
    fn short_record_is_malformed() {
        let err = read("a, 1\n", &AnalysisSettings::default()).unwrap_err();
        assert!(err.to_string().contains("expected at least 3 fields, found 2"));
    }

    #[test]
    fn skip_invalid_counts_dropped_lines() {
        let settings = AnalysisSettings {
            skip_invalid: true,
            ..AnalysisSettings::default()
        };
        let input = "a, 1, 10.0\na, 2, -1\na, 3\na, 4, 40.0\n";
        let log = read(input, &settings).unwrap();
        assert_eq!(log.frame_times_ms(), &[10.0, 40.0]);
        assert_eq!(log.skipped(), 2);
    }

    #[test]
    fn custom_delimiter_and_column() {
        let settings = AnalysisSettings {
            delimiter: ';',
            frame_time_column: 0,
            ..AnalysisSettings::default()
        };
        let log = read("12.5;x\n25.0;y\n", &settings).unwrap();
        assert_eq!(log.frame_times_ms(), &[12.5, 25.0]);
    }

    #[test]
    fn large_log_past_progress_step() {
        let input: String = (0..PROGRESS_STEP * 2 + 7)
            .map(|i| format!("a, {}, 16.5\n", i))
            .collect();
        let log = read(&input, &AnalysisSettings::default()).unwrap();
        assert_eq!(log.len() as u64, PROGRESS_STEP * 2 + 7);
    }

    #[test]
    fn empty_input_gives_empty_log() {
        let log = read("", &AnalysisSettings::default()).unwrap();
        assert!(log.is_empty());
    }
}
