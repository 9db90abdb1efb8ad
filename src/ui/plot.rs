//! SVG chart of frame times against the target interval.

use std::path::Path;

use plotters::prelude::*;

use crate::error::{AnalysisError, Result};

const CHART_SIZE: (u32, u32) = (1024, 480);

pub fn plot_frame_times(path: &Path, frame_times_ms: &[f64], target_interval_ms: f64) -> Result<()> {
    if frame_times_ms.is_empty() {
        return Err(AnalysisError::EmptyLog);
    }
    draw(path, frame_times_ms, target_interval_ms)
        .map_err(|e| AnalysisError::Plot(format!("{}: {}", path.display(), e)))?;
    log::info!("wrote frame time chart to {}", path.display());
    Ok(())
}

fn draw(
    path: &Path,
    frame_times_ms: &[f64],
    target_interval_ms: f64,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let frames = frame_times_ms.len();
    let y_max = frame_times_ms
        .iter()
        .copied()
        .fold(target_interval_ms, f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Frame time per frame", ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0usize..frames.max(2) - 1, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("frame")
        .y_desc("msec")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            frame_times_ms.iter().copied().enumerate(),
            &BLUE,
        ))?
        .label("frame time")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart
        .draw_series(LineSeries::new(
            [(0, target_interval_ms), (frames.max(2) - 1, target_interval_ms)],
            &RED,
        ))?
        .label("target interval")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_svg() {
        let path = std::env::temp_dir().join(format!("frame_stats_plot_{}.svg", std::process::id()));
        plot_frame_times(&path, &[30.0, 35.0, 31.5, 40.0], 1000.0 / 30.0).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn empty_series_is_rejected() {
        let path = std::env::temp_dir().join("frame_stats_plot_empty.svg");
        assert!(matches!(
            plot_frame_times(&path, &[], 33.3),
            Err(AnalysisError::EmptyLog)
        ));
    }
}
