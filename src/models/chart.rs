//! Chart geometry models

/// A point in canvas pixels; y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// One drawing command of a path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, to: Point },
    Close,
}

/// Closed, smoothed fill region built from a sample series
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothPath {
    pub width: f64,
    pub height: f64,
    /// One point per sample, in series order
    pub control_points: Vec<Point>,
    pub commands: Vec<PathCommand>,
}

impl SmoothPath {
    pub fn curve_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::QuadTo { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::LineTo(_)))
            .count()
    }

    /// Approximate the path with a polyline, sampling every quadratic
    /// curve at `segments_per_curve` evenly spaced parameters.
    pub fn flatten(&self, segments_per_curve: usize) -> Vec<Point> {
        let steps = segments_per_curve.max(1);
        let mut points: Vec<Point> = Vec::new();

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => points.push(p),
                PathCommand::QuadTo { control, to } => {
                    let from = points.last().copied().unwrap_or(control);
                    for step in 1..=steps {
                        let t = step as f64 / steps as f64;
                        points.push(quad_point(from, control, to, t));
                    }
                }
                PathCommand::Close => {}
            }
        }

        points
    }
}

/// Evaluate a quadratic Bézier at `t`
fn quad_point(from: Point, control: Point, to: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    Point::new(
        mt * mt * from.x + 2.0 * mt * t * control.x + t * t * to.x,
        mt * mt * from.y + 2.0 * mt * t * control.y + t * t * to.y,
    )
}
