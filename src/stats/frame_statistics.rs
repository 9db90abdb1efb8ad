//! Descriptive statistics over a frame timing log.
//!
//! Frame rates are derived from frame times (msec); jitter is measured
//! against the target interval `1000 / target_fps`.

use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// Aggregates for one frame log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameStatistics {
    pub frame_count: usize,
    pub total_secs: f64,
    pub target_fps: f64,
    pub target_interval_ms: f64,
    pub fps: FrameRates,
    pub jitter_ms: Jitter,
    pub frame_time_ms: FrameTimeDistribution,
    pub deadline_misses: usize,
    pub deadline_miss_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameRates {
    pub avg: f64,
    pub min: f64, // from the slowest frame
    pub max: f64, // from the fastest frame
}

/// Jitter is `target_ms - actual_ms`; negative values are late frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Jitter {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub stdev: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameTimeDistribution {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub p95: f64,
    pub p99: f64,
}

impl FrameStatistics {
    /// Compute statistics from frame times in milliseconds.
    ///
    /// Fails with [`AnalysisError::EmptyLog`] when there are no samples, and
    /// with [`AnalysisError::Config`] for a non-positive target frame rate.
    pub fn from_frame_times(frame_times_ms: &[f64], target_fps: f64) -> Result<Self> {
        if frame_times_ms.is_empty() {
            return Err(AnalysisError::EmptyLog);
        }
        if !target_fps.is_finite() || target_fps <= 0.0 {
            return Err(AnalysisError::Config(format!(
                "target fps must be a positive number, got {}",
                target_fps
            )));
        }

        let n = frame_times_ms.len() as f64;
        let target_interval_ms = 1000.0 / target_fps;

        let total_ms: f64 = frame_times_ms.iter().sum();
        let min_ms = frame_times_ms.iter().copied().fold(f64::INFINITY, f64::min);
        let max_ms = frame_times_ms.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean_ms = total_ms / n;

        let fps = FrameRates {
            avg: 1000.0 * n / total_ms,
            min: 1000.0 / max_ms,
            max: 1000.0 / min_ms,
        };

        let jitter: Vec<f64> = frame_times_ms
            .iter()
            .map(|ms| target_interval_ms - ms)
            .collect();
        let jitter_avg = jitter.iter().sum::<f64>() / n;
        let jitter_variance = jitter
            .iter()
            .map(|j| (j - jitter_avg).powi(2))
            .sum::<f64>()
            / n;
        let jitter_ms = Jitter {
            avg: jitter_avg,
            min: jitter.iter().copied().fold(f64::INFINITY, f64::min),
            max: jitter.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            stdev: jitter_variance.sqrt(),
        };

        let mut sorted = frame_times_ms.to_vec();
        sorted.sort_by(f64::total_cmp);
        let frame_time_ms = FrameTimeDistribution {
            mean: mean_ms,
            min: min_ms,
            max: max_ms,
            median: percentile(&sorted, 50.0),
            p95: percentile(&sorted, 95.0),
            p99: percentile(&sorted, 99.0),
        };

        let deadline_misses = jitter.iter().filter(|&&j| j < 0.0).count();

        Ok(Self {
            frame_count: frame_times_ms.len(),
            total_secs: total_ms / 1000.0,
            target_fps,
            target_interval_ms,
            fps,
            jitter_ms,
            frame_time_ms,
            deadline_misses,
            deadline_miss_ratio: deadline_misses as f64 / n,
        })
    }
}

/// Nearest-rank percentile of sorted data.
pub fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    let idx = (p / 100.0 * (sorted_data.len() - 1) as f64).round() as usize;
    sorted_data[idx.min(sorted_data.len() - 1)]
}
