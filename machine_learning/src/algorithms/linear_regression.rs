use log::debug;

use super::Algorithm;
use crate::{Dataset, MlErr, Point, Result};

/// Ordinary least squares fit of a line `y = slope * x + intercept`.
///
/// The fit is closed form, computed from the sums of x, y, x² and xy over the dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinearRegression {
    slope: f64,
    intercept: f64,
    fitted: bool,
}

/// Running sums over the points of a dataset.
#[derive(Debug, Default)]
struct Sums {
    n: f64,
    x: f64,
    y: f64,
    x_sq: f64,
    xy: f64,
}

impl Sums {
    fn over(points: &[Point]) -> Self {
        points.iter().fold(Self::default(), |acc, p| Self {
            n: acc.n + 1.0,
            x: acc.x + p.x(),
            y: acc.y + p.y(),
            x_sq: acc.x_sq + p.x_sq(),
            xy: acc.xy + p.xy(),
        })
    }
}

/// Whether every point shares the same x. The sums alone can't tell, since `n * S_xx - S_x²`
/// keeps rounding noise for x values like `0.1`.
fn has_constant_x(points: &[Point]) -> bool {
    points
        .split_first()
        .is_none_or(|(first, rest)| rest.iter().all(|p| p.x() == first.x()))
}

impl LinearRegression {
    /// Returns a new, unfitted `LinearRegression`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Whether the last `execute` call succeeded.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Evaluates the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl Algorithm for LinearRegression {
    fn execute(&mut self, data: &Dataset) -> Result<()> {
        *self = Self::default();

        if data.is_empty() {
            return Err(MlErr::EmptyDataset);
        }
        data.ensure_finite()?;

        let points = data.points();
        let s = Sums::over(points);
        let d = s.n * s.x_sq - s.x * s.x;
        // rounding in the sums grows with n
        let noise = s.n * s.n * s.x_sq * f64::EPSILON;
        if !d.is_finite() || has_constant_x(points) || d.abs() <= noise {
            return Err(MlErr::DegenerateRegression { denominator: d });
        }

        let slope = (s.n * s.xy - s.x * s.y) / d;
        let intercept = (s.y * s.x_sq - s.x * s.xy) / d;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(MlErr::DegenerateRegression { denominator: d });
        }

        debug!(slope = slope, intercept = intercept; "fitted over {} points", s.n);
        *self = Self {
            slope,
            intercept,
            fitted: true,
        };

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(points: &[(f64, f64)]) -> Dataset {
        points.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn collinear_points_give_the_exact_line() {
        let data = dataset(&[(0.0, 0.0), (1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]);
        let mut reg = LinearRegression::new();

        data.accept(&mut reg).unwrap();

        assert!((reg.slope() - 2.0).abs() < 1e-9, "slope {}", reg.slope());
        assert!(reg.intercept().abs() < 1e-9, "intercept {}", reg.intercept());
        assert!(reg.is_fitted());
    }

    #[test]
    fn noisy_points_give_least_squares_fit() {
        // y = x + 1 with symmetric noise
        let data = dataset(&[(0.0, 1.5), (1.0, 1.5), (2.0, 3.5), (3.0, 3.5)]);
        let mut reg = LinearRegression::new();

        data.accept(&mut reg).unwrap();

        assert!((reg.slope() - 0.8).abs() < 1e-9, "slope {}", reg.slope());
        assert!((reg.intercept() - 1.3).abs() < 1e-9);
        assert!((reg.predict(10.0) - 9.3).abs() < 1e-9);
    }

    #[test]
    fn vertical_points_are_degenerate() {
        let data = dataset(&[(5.0, 1.0), (5.0, 2.0), (5.0, 3.0)]);
        let mut reg = LinearRegression::new();

        let err = data.accept(&mut reg).unwrap_err();

        assert_eq!(err, MlErr::DegenerateRegression { denominator: 0.0 });
        assert!(err.is_degenerate());
        assert!(!reg.is_fitted());
    }

    #[test]
    fn vertical_points_off_the_binary_grid_are_degenerate() {
        let points: Vec<_> = (0..7).map(|i| (0.1, i as f64)).collect();
        let data = dataset(&points);
        let mut reg = LinearRegression::new();

        let err = data.accept(&mut reg).unwrap_err();

        assert!(matches!(err, MlErr::DegenerateRegression { .. }), "got {err:?}");
        assert!(!reg.is_fitted());
    }

    #[test]
    fn nearly_vertical_points_below_precision_are_degenerate() {
        let data = dataset(&[(1.0, 0.0), (1.0 + 1e-12, 1.0), (1.0, 2.0)]);
        let mut reg = LinearRegression::new();
        assert!(matches!(
            data.accept(&mut reg),
            Err(MlErr::DegenerateRegression { .. })
        ));
    }

    #[test]
    fn small_but_distinct_spread_still_fits() {
        let data = dataset(&[(0.001, 1.0), (0.002, 2.0), (0.003, 3.0)]);
        let mut reg = LinearRegression::new();

        data.accept(&mut reg).unwrap();

        assert!((reg.slope() - 1000.0).abs() < 1e-6, "slope {}", reg.slope());
        assert!(reg.intercept().abs() < 1e-9);
    }

    #[test]
    fn single_point_is_degenerate() {
        let data = dataset(&[(2.0, 7.0)]);
        let mut reg = LinearRegression::new();
        assert!(matches!(
            data.accept(&mut reg),
            Err(MlErr::DegenerateRegression { .. })
        ));
    }

    #[test]
    fn failed_fit_clears_previous_result() {
        let mut reg = LinearRegression::new();
        dataset(&[(0.0, 1.0), (1.0, 2.0)]).accept(&mut reg).unwrap();
        assert!(reg.is_fitted());

        assert_eq!(Dataset::new().accept(&mut reg), Err(MlErr::EmptyDataset));
        assert!(!reg.is_fitted());
        assert_eq!(reg.slope(), 0.0);
    }
}
