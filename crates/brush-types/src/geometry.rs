use crate::StrokeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A contact point in device coordinate units.
///
/// Serialized as a two-element array `[x, y]`, the shape the outline
/// stages produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An ordered, open path of at least two points.
///
/// Construction validates the outline contract: at least two points and no
/// two identical consecutive points. The path is never closed implicitly;
/// the last point does not connect back to the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    /// Validate and wrap a list of points.
    pub fn new(points: Vec<Point>) -> crate::Result<Self> {
        if points.len() < 2 {
            return Err(StrokeError::InvalidPolyline(format!(
                "needs at least 2 points, got {}",
                points.len()
            )));
        }
        if let Some(i) = points.windows(2).position(|w| w[0] == w[1]) {
            return Err(StrokeError::InvalidPolyline(format!(
                "points {i} and {} are both {}",
                i + 1,
                points[i]
            )));
        }
        Ok(Self { points })
    }

    /// Convenience constructor from `(x, y)` pairs.
    pub fn from_coords(coords: &[(i32, i32)]) -> crate::Result<Self> {
        Self::new(coords.iter().copied().map(Point::from).collect())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn first(&self) -> Point {
        self.points[0]
    }

    /// Number of edges (always `points().len() - 1`).
    pub fn edge_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Consecutive `(v0, v1)` pairs in draw order.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total path length.
    pub fn length(&self) -> f64 {
        self.edges().map(|(a, b)| a.distance(b)).sum()
    }

    /// Subdivide every edge of length `max_edge_length` or more with evenly
    /// spaced integer points, so that each resulting edge is shorter than
    /// `max_edge_length`.
    ///
    /// An edge that cannot be split that finely on the integer grid is kept
    /// as it is. The result still holds the polyline invariants.
    pub fn split_long_edges(&self, max_edge_length: f64) -> Polyline {
        let mut points = vec![self.first()];
        for (a, b) in self.edges() {
            points.extend(split_edge(a, b, max_edge_length));
            points.push(b);
        }
        Self { points }
    }
}

/// Interior points that cut `a → b` into pieces shorter than `max`, or
/// nothing if the edge is short enough already or cannot be cut.
fn split_edge(a: Point, b: Point, max: f64) -> Vec<Point> {
    let length = a.distance(b);
    if length < max {
        return Vec::new();
    }
    // Rounding to the grid can stretch a piece, so retry with more cuts.
    // At one cut per unit of length every piece is at most one grid step.
    let limit = length.ceil() as usize;
    let mut cuts = (length / max).floor() as usize;
    loop {
        let mut chain = Vec::with_capacity(cuts + 2);
        chain.push(a);
        chain.extend((1..=cuts).map(|j| lerp(a, b, j as f64 / (cuts as f64 + 1.0))));
        chain.push(b);
        chain.dedup();
        if chain.windows(2).all(|w| w[0].distance(w[1]) < max) {
            return chain[1..chain.len() - 1].to_vec();
        }
        if cuts >= limit {
            return Vec::new();
        }
        cuts = (cuts + 1 + cuts / 8).min(limit);
    }
}

fn lerp(a: Point, b: Point, t: f64) -> Point {
    let axis = |from: i32, to: i32| {
        (f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as i32
    };
    Point::new(axis(a.x, b.x), axis(a.y, b.y))
}

impl TryFrom<Vec<Point>> for Polyline {
    type Error = StrokeError;

    fn try_from(points: Vec<Point>) -> crate::Result<Self> {
        Self::new(points)
    }
}

impl From<Polyline> for Vec<Point> {
    fn from(p: Polyline) -> Self {
        p.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(Point::new(0, 0).distance(Point::new(3, 4)), 5.0);
        assert_eq!(Point::new(-3, 0).distance(Point::new(0, -4)), 5.0);
        assert_eq!(Point::new(7, 7).distance(Point::new(7, 7)), 0.0);
    }

    #[test]
    fn test_polyline_needs_two_points() {
        assert!(matches!(
            Polyline::from_coords(&[]),
            Err(StrokeError::InvalidPolyline(_))
        ));
        assert!(matches!(
            Polyline::from_coords(&[(1, 1)]),
            Err(StrokeError::InvalidPolyline(_))
        ));
        assert!(Polyline::from_coords(&[(1, 1), (2, 2)]).is_ok());
    }

    #[test]
    fn test_polyline_rejects_duplicate_consecutive_points() {
        let err = Polyline::from_coords(&[(0, 0), (5, 5), (5, 5), (9, 9)]).unwrap_err();
        assert_eq!(
            err,
            StrokeError::InvalidPolyline("points 1 and 2 are both (5, 5)".into())
        );
    }

    #[test]
    fn test_polyline_allows_revisiting_non_consecutive_points() {
        let p = Polyline::from_coords(&[(0, 0), (10, 0), (0, 0)]).unwrap();
        assert_eq!(p.edge_count(), 2);
    }

    #[test]
    fn test_polyline_edges_and_length() {
        let p = Polyline::from_coords(&[(0, 0), (3, 4), (3, 10)]).unwrap();
        let edges: Vec<_> = p.edges().collect();
        assert_eq!(
            edges,
            vec![
                (Point::new(0, 0), Point::new(3, 4)),
                (Point::new(3, 4), Point::new(3, 10)),
            ]
        );
        assert_eq!(p.length(), 11.0);
        assert_eq!(p.first(), Point::new(0, 0));
    }

    #[test]
    fn test_split_long_edges() {
        let p = Polyline::from_coords(&[(0, 0), (500, 0), (520, 0)]).unwrap();
        let split = p.split_long_edges(100.0);
        assert_eq!(
            split.points(),
            &[
                Point::new(0, 0),
                Point::new(83, 0),
                Point::new(167, 0),
                Point::new(250, 0),
                Point::new(333, 0),
                Point::new(417, 0),
                Point::new(500, 0),
                Point::new(520, 0),
            ]
        );
        // An edge exactly at the limit is split too.
        let p = Polyline::from_coords(&[(0, 0), (0, 100)]).unwrap();
        assert_eq!(p.split_long_edges(100.0).edge_count(), 2);
    }

    #[test]
    fn test_split_edges_stay_below_limit() {
        let p = Polyline::from_coords(&[(0, 0), (997, 13), (-400, -2901), (-399, -2900)])
            .unwrap();
        for max in [7.5, 100.0, 333.3, 1000.0] {
            let split = p.split_long_edges(max);
            assert_eq!(split.first(), p.first());
            assert_eq!(split.points().last(), p.points().last());
            assert!(split.points().windows(2).all(|w| w[0] != w[1]));
            for (a, b) in split.edges() {
                assert!(a.distance(b) < max, "{a} -> {b} not below {max}");
            }
        }
    }

    #[test]
    fn test_split_keeps_unsplittable_edges() {
        // No grid point lies strictly between these two.
        let p = Polyline::from_coords(&[(0, 0), (1, 1)]).unwrap();
        assert_eq!(p.split_long_edges(1.0), p);
    }

    #[test]
    fn test_polyline_json_shape() {
        let p: Polyline = serde_json::from_str("[[0, 0], [100, -20]]").unwrap();
        assert_eq!(p.points(), &[Point::new(0, 0), Point::new(100, -20)]);
        assert_eq!(serde_json::to_string(&p).unwrap(), "[[0,0],[100,-20]]");

        let bad = serde_json::from_str::<Polyline>("[[0, 0]]");
        assert!(bad.is_err());
    }
}
