use std::{
    fmt,
    ops::{Add, Div},
};

/// An immutable point in the plane.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Returns a new `Point`.
    ///
    /// # Arguments
    /// * `x` - The horizontal coordinate.
    /// * `y` - The vertical coordinate.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// The square of the x coordinate.
    pub fn x_sq(&self) -> f64 {
        self.x * self.x
    }

    /// The product of both coordinates.
    pub fn xy(&self) -> f64 {
        self.x * self.y
    }

    /// Whether both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Computes the euclidean distance between `self` and `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Finds the candidate closest to this point.
    ///
    /// # Arguments
    /// * `candidates` - The points to compare against, in order.
    ///
    /// # Returns
    /// The index of the closest candidate, the lowest one when several are equally close, or
    /// `None` if there are no candidates. Candidates at an undefined distance are ignored.
    pub fn nearest(&self, candidates: &[Point]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;

        for (i, candidate) in candidates.iter().enumerate() {
            let d = self.distance(candidate);
            if d.is_nan() {
                continue;
            }

            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((i, d)),
            }
        }

        best.map(|(i, _)| i)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn add_and_divide_work_per_component() {
        let sum = Point::new(1.0, 2.0) + Point::new(3.0, 6.0);
        assert_eq!(sum, Point::new(4.0, 8.0));
        assert_eq!(sum / 2.0, Point::new(2.0, 4.0));
    }

    #[test]
    fn nearest_picks_the_lowest_index_on_ties() {
        let p = Point::new(0.0, 0.0);
        let candidates = [
            Point::new(5.0, 5.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(-1.0, 0.0),
        ];
        assert_eq!(p.nearest(&candidates), Some(1));
    }

    #[test]
    fn nearest_on_no_candidates_is_none() {
        assert_eq!(Point::new(1.0, 1.0).nearest(&[]), None);
    }

    #[test]
    fn nearest_skips_undefined_candidates() {
        let p = Point::new(0.0, 0.0);
        let candidates = [Point::new(f64::NAN, f64::NAN), Point::new(2.0, 0.0)];
        assert_eq!(p.nearest(&candidates), Some(1));
    }

    #[test]
    fn derived_scalars() {
        let p = Point::new(3.0, -2.0);
        assert_eq!(p.x_sq(), 9.0);
        assert_eq!(p.xy(), -6.0);
        assert!(p.is_finite());
        assert!(!Point::new(f64::INFINITY, 0.0).is_finite());
    }
}
