use super::{Algorithm, KMeans, LinearRegression};
use crate::{Dataset, Result};

/// Every algorithm a dataset can be fitted with.
///
/// The engine is chosen and configured up front and then handed to `Dataset::accept`, which
/// dispatches to the concrete algorithm.
pub enum Engine {
    KMeans(KMeans),
    LinearRegression(LinearRegression),
}

impl Engine {
    /// Returns a k-means engine with `k` clusters.
    ///
    /// # Errors
    /// `MlErr::InvalidClusterCount` if `k` isn't positive.
    pub fn kmeans(k: i64, seed: Option<u64>) -> Result<Self> {
        let kmeans = match seed {
            Some(seed) => KMeans::seeded(k, seed)?,
            None => KMeans::new(k)?,
        };

        Ok(Self::KMeans(kmeans))
    }

    pub fn linear_regression() -> Self {
        Self::LinearRegression(LinearRegression::new())
    }

    /// Returns a stable identifier for the engine kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::KMeans(_) => "kmeans",
            Self::LinearRegression(_) => "linear_regression",
        }
    }
}

impl Algorithm for Engine {
    fn execute(&mut self, data: &Dataset) -> Result<()> {
        match self {
            Self::KMeans(e) => e.execute(data),
            Self::LinearRegression(e) => e.execute(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MlErr, Point};

    #[test]
    fn dispatches_to_the_selected_variant() {
        let data: Dataset = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)]
            .into_iter()
            .map(Point::from)
            .collect();

        let mut engine = Engine::linear_regression();
        data.accept(&mut engine).unwrap();
        let Engine::LinearRegression(reg) = &engine else {
            panic!("expected a regression, got {}", engine.kind());
        };
        assert!((reg.slope() - 2.0).abs() < 1e-9);

        let mut engine = Engine::kmeans(2, Some(9)).unwrap();
        data.accept(&mut engine).unwrap();
        let Engine::KMeans(kmeans) = &engine else {
            panic!("expected k-means, got {}", engine.kind());
        };
        assert!(kmeans.check_clusters(&data));
    }

    #[test]
    fn kmeans_configuration_is_validated() {
        assert!(matches!(
            Engine::kmeans(0, None),
            Err(MlErr::InvalidClusterCount { k: 0 })
        ));
    }
}
