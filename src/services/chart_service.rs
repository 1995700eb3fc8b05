use tracing::debug;

use crate::models::{PathCommand, Point, SmoothPath};
use crate::utils::SeriesError;

/// Share of the canvas height the curve may use, measured up from the bottom
const CURVE_BAND: f64 = 0.5;

fn check_input(values: &[f64], width: f64, height: f64) -> Result<(), SeriesError> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(SeriesError::InvalidBounds { width, height });
    }
    if values.len() < 2 {
        return Err(SeriesError::TooFewSamples(values.len()));
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(SeriesError::NonFinite { index });
    }
    Ok(())
}

/// Map samples to canvas points
///
/// x is spread evenly over the width; y is min-max normalized into the
/// bottom half of the canvas (larger value, smaller y). A flat series is
/// drawn as a horizontal line in the middle of that band.
pub fn control_points(values: &[f64], width: f64, height: f64) -> Result<Vec<Point>, SeriesError> {
    check_input(values, width, height)?;

    let min_value = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Halved so that ranges near f64::MAX do not overflow to infinity
    let half_difference = max_value / 2.0 - min_value / 2.0;
    let step = width / (values.len() - 1) as f64;
    let band = height * CURVE_BAND;

    let points = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let normalized = if half_difference > 0.0 {
                (v / 2.0 - min_value / 2.0) / half_difference
            } else {
                0.5
            };
            Point::new(step * i as f64, height - normalized * band)
        })
        .collect();

    Ok(points)
}

/// Build the closed, smoothed fill region for a series
///
/// Starts at the bottom-left corner, rises to the first sample, joins each
/// pair of neighbouring samples with two quadratic curves meeting at their
/// midpoint, then drops to the bottom-right corner and closes.
pub fn build_smooth_path(values: &[f64], width: f64, height: f64) -> Result<SmoothPath, SeriesError> {
    let points = control_points(values, width, height)?;

    let mut commands = Vec::with_capacity(2 * points.len() + 2);
    commands.push(PathCommand::MoveTo(Point::new(0.0, height)));
    commands.push(PathCommand::LineTo(points[0]));

    for pair in points.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        let avg = current.midpoint(&next);
        let cp1 = Point::new((avg.x + current.x) / 2.0, current.y);
        let cp2 = Point::new((avg.x + next.x) / 2.0, next.y);
        commands.push(PathCommand::QuadTo { control: cp1, to: avg });
        commands.push(PathCommand::QuadTo { control: cp2, to: next });
    }

    commands.push(PathCommand::LineTo(Point::new(width, height)));
    commands.push(PathCommand::Close);

    let path = SmoothPath {
        width,
        height,
        control_points: points,
        commands,
    };
    debug!(
        "Built smooth path: {} samples, {} curves, {} lines",
        path.control_points.len(),
        path.curve_count(),
        path.line_count()
    );

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn all_coords(path: &SmoothPath) -> Vec<Point> {
        path.commands
            .iter()
            .flat_map(|c| match *c {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![p],
                PathCommand::QuadTo { control, to } => vec![control, to],
                PathCommand::Close => vec![],
            })
            .collect()
    }

    #[test]
    fn test_reference_scenario() {
        let path = build_smooth_path(&[10.0, 20.0, 15.0, 30.0], 100.0, 100.0).unwrap();

        let xs: Vec<f64> = path.control_points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = path.control_points.iter().map(|p| p.y).collect();
        for (x, expected) in xs.iter().zip([0.0, 100.0 / 3.0, 200.0 / 3.0, 100.0]) {
            assert!(approx(*x, expected), "x {} != {}", x, expected);
        }
        assert_eq!(ys, vec![100.0, 75.0, 87.5, 50.0]);

        assert_eq!(path.commands[0], PathCommand::MoveTo(Point::new(0.0, 100.0)));
        assert_eq!(path.commands[1], PathCommand::LineTo(Point::new(0.0, 100.0)));
        assert_eq!(path.curve_count(), 6);
        assert_eq!(path.commands[8], PathCommand::LineTo(Point::new(100.0, 100.0)));
        assert_eq!(path.commands[9], PathCommand::Close);
        assert_eq!(path.commands.len(), 10);
    }

    #[test]
    fn test_first_segment_handles() {
        let path = build_smooth_path(&[10.0, 20.0, 15.0, 30.0], 100.0, 100.0).unwrap();
        // p0 = (0, 100), p1 = (33.3, 75), avg = (16.67, 87.5)
        match (path.commands[2], path.commands[3]) {
            (
                PathCommand::QuadTo { control: cp1, to: avg },
                PathCommand::QuadTo { control: cp2, to: next },
            ) => {
                assert!(approx(avg.x, 100.0 / 6.0));
                assert!(approx(avg.y, 87.5));
                assert!(approx(cp1.x, 100.0 / 12.0));
                assert_eq!(cp1.y, 100.0);
                assert!(approx(cp2.x, (100.0 / 6.0 + 100.0 / 3.0) / 2.0));
                assert_eq!(cp2.y, 75.0);
                assert_eq!(next, path.control_points[1]);
            }
            other => panic!("unexpected commands {:?}", other),
        }
    }

    #[test]
    fn test_counts_for_various_lengths() {
        for n in 2..12usize {
            let values: Vec<f64> = (0..n).map(|i| ((i * 7) % 5) as f64).collect();
            let path = build_smooth_path(&values, 320.0, 180.0).unwrap();
            assert_eq!(path.control_points.len(), n);
            assert_eq!(path.curve_count(), 2 * (n - 1));
            assert_eq!(path.line_count(), 2);
        }
    }

    #[test]
    fn test_path_starts_and_ends_on_bottom_edge() {
        for (w, h) in [(1.0, 1.0), (1200.0, 600.0), (37.5, 912.25)] {
            let path = build_smooth_path(&[3.0, -1.0, 8.0, 2.0, 2.5], w, h).unwrap();
            assert_eq!(path.commands.first(), Some(&PathCommand::MoveTo(Point::new(0.0, h))));
            assert_eq!(path.commands[path.commands.len() - 2], PathCommand::LineTo(Point::new(w, h)));
            assert_eq!(path.commands.last(), Some(&PathCommand::Close));
        }
    }

    #[test]
    fn test_increasing_series_gives_decreasing_y() {
        let values = [1.0, 2.0, 4.0, 8.0, 16.0, 32.0];
        let points = control_points(&values, 100.0, 100.0).unwrap();
        assert!(points.windows(2).all(|w| w[1].y < w[0].y));
        // curve stays in the bottom half
        assert!(points.iter().all(|p| p.y >= 50.0 && p.y <= 100.0));
    }

    #[test]
    fn test_scale_invariance() {
        let values = [4.0, 9.0, 1.0, 7.5, 3.0];
        let scaled: Vec<f64> = values.iter().map(|v| v * 1000.0).collect();
        let a = build_smooth_path(&values, 200.0, 100.0).unwrap();
        let b = build_smooth_path(&scaled, 200.0, 100.0).unwrap();
        for (p, q) in all_coords(&a).iter().zip(all_coords(&b).iter()) {
            assert!(approx(p.x, q.x) && approx(p.y, q.y));
        }
    }

    #[test]
    fn test_flat_series_is_finite() {
        let path = build_smooth_path(&[5.0, 5.0, 5.0], 90.0, 100.0).unwrap();
        assert!(all_coords(&path).iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert!(path.control_points.iter().all(|p| p.y == 75.0));
    }

    #[test]
    fn test_extreme_range_stays_finite() {
        let path = build_smooth_path(&[-1e308, 0.0, 1e308], 100.0, 100.0).unwrap();
        assert!(all_coords(&path).iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        let ys: Vec<f64> = path.control_points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![100.0, 75.0, 50.0]);
    }

    #[test]
    fn test_degenerate_input_rejected() {
        assert_eq!(build_smooth_path(&[], 10.0, 10.0), Err(SeriesError::TooFewSamples(0)));
        assert_eq!(build_smooth_path(&[1.0], 10.0, 10.0), Err(SeriesError::TooFewSamples(1)));
        assert_eq!(
            build_smooth_path(&[1.0, f64::NAN, 2.0], 10.0, 10.0),
            Err(SeriesError::NonFinite { index: 1 })
        );
        assert!(matches!(
            build_smooth_path(&[1.0, 2.0], 0.0, 10.0),
            Err(SeriesError::InvalidBounds { .. })
        ));
    }
}
