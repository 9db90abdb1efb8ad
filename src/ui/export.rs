//! CSV export of computed statistics, one `metric,value` row each.

use std::io::Write;
use std::path::Path;

use crate::error::{AnalysisError, Result};
use crate::stats::FrameStatistics;

pub fn save_statistics_csv(stats: &FrameStatistics, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| AnalysisError::io(path, e))?;
    write_statistics_csv(stats, file, path)?;
    log::info!("saved statistics to {}", path.display());
    Ok(())
}

/// Write the statistics CSV to `writer`; `path` names the destination in errors.
pub fn write_statistics_csv<W: Write>(stats: &FrameStatistics, writer: W, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["metric", "value"])?;

    let rows: [(&str, String); 17] = [
        ("frame_count", stats.frame_count.to_string()),
        ("total_secs", format!("{:.6}", stats.total_secs)),
        ("target_fps", format!("{:.6}", stats.target_fps)),
        ("target_interval_ms", format!("{:.6}", stats.target_interval_ms)),
        ("fps_avg", format!("{:.6}", stats.fps.avg)),
        ("fps_min", format!("{:.6}", stats.fps.min)),
        ("fps_max", format!("{:.6}", stats.fps.max)),
        ("jitter_avg_ms", format!("{:.6}", stats.jitter_ms.avg)),
        ("jitter_min_ms", format!("{:.6}", stats.jitter_ms.min)),
        ("jitter_max_ms", format!("{:.6}", stats.jitter_ms.max)),
        ("jitter_stdev_ms", format!("{:.6}", stats.jitter_ms.stdev)),
        ("frame_time_median_ms", format!("{:.6}", stats.frame_time_ms.median)),
        ("frame_time_p95_ms", format!("{:.6}", stats.frame_time_ms.p95)),
        ("frame_time_p99_ms", format!("{:.6}", stats.frame_time_ms.p99)),
        ("frame_time_mean_ms", format!("{:.6}", stats.frame_time_ms.mean)),
        ("deadline_misses", stats.deadline_misses.to_string()),
        ("deadline_miss_ratio", format!("{:.6}", stats.deadline_miss_ratio)),
    ];
    for (metric, value) in &rows {
        writer.write_record([*metric, value.as_str()])?;
    }

    writer
        .flush()
        .map_err(|e| AnalysisError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let stats = FrameStatistics::from_frame_times(&[20.0, 40.0], 30.0).unwrap();
        let mut out = Vec::new();
        write_statistics_csv(&stats, &mut out, Path::new("stats.csv")).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("metric,value"));
        assert_eq!(lines.next(), Some("frame_count,2"));
        assert!(text.contains("fps_min,25.000000"));
        assert!(text.contains("deadline_misses,1"));
        assert_eq!(text.lines().count(), 18);
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_names_export_path() {
        let stats = FrameStatistics::from_frame_times(&[20.0, 40.0], 30.0).unwrap();
        let target = Path::new("/tmp/frame_stats_export.csv");
        match write_statistics_csv(&stats, FullDisk, target).unwrap_err() {
            AnalysisError::Io { path, .. } => assert_eq!(path, target),
            other => panic!("unexpected error: {other}"),
        }
    }
}
