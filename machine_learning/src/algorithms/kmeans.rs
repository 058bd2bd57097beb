use log::{debug, trace, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::Algorithm;
use crate::{Dataset, MlErr, Point, Result};

const DEFAULT_TOLERANCE: f64 = 1e-4;
const DEFAULT_MAX_ITERATIONS: usize = 200;

/// Where the last fit of a `KMeans` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// `execute` was never called.
    Unfitted,
    /// The relative change of the error fell under the tolerance.
    Converged { iterations: usize },
    /// The iteration cap was hit before converging.
    IterationLimit { iterations: usize },
    /// The last fit returned an error, its results must not be used.
    Failed,
}

/// K-means clustering of points in the plane.
///
/// Centers are seeded with distinct points of the dataset, drawn at random from `rng`. Then the
/// algorithm alternates assigning every point to its closest center and moving each center to
/// the mean of its points, until the mean distance between points and their centers stabilizes.
pub struct KMeans<R: Rng = StdRng> {
    k: usize,
    tolerance: f64,
    max_iterations: usize,
    rng: R,

    centers: Vec<Point>,
    clusters: Vec<usize>,
    error: f64,
    status: Status,
}

impl KMeans<StdRng> {
    /// Returns a new `KMeans` drawing its initial centers from OS entropy.
    ///
    /// # Arguments
    /// * `k` - The amount of clusters.
    ///
    /// # Errors
    /// `MlErr::InvalidClusterCount` if `k` isn't positive.
    pub fn new(k: i64) -> Result<Self> {
        Self::with_rng(k, StdRng::from_os_rng())
    }

    /// Returns a new `KMeans` whose center initialization is reproducible.
    ///
    /// # Arguments
    /// * `k` - The amount of clusters.
    /// * `seed` - The seed of the random number generator.
    ///
    /// # Errors
    /// `MlErr::InvalidClusterCount` if `k` isn't positive.
    pub fn seeded(k: i64, seed: u64) -> Result<Self> {
        Self::with_rng(k, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> KMeans<R> {
    /// Returns a new `KMeans` drawing its initial centers from `rng`.
    ///
    /// # Arguments
    /// * `k` - The amount of clusters.
    /// * `rng` - A random number generator.
    ///
    /// # Errors
    /// `MlErr::InvalidClusterCount` if `k` isn't positive.
    pub fn with_rng(k: i64, rng: R) -> Result<Self> {
        let k = usize::try_from(k)
            .ok()
            .filter(|&k| k > 0)
            .ok_or(MlErr::InvalidClusterCount { k })?;

        Ok(Self {
            k,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            rng,
            centers: Vec::with_capacity(k),
            clusters: Vec::new(),
            error: f64::INFINITY,
            status: Status::Unfitted,
        })
    }

    /// Sets the relative error change under which the fit is considered converged.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum amount of assign/update rounds per fit.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// The centers of the last fit, the i-th one belonging to cluster i.
    pub fn centers(&self) -> &[Point] {
        &self.centers
    }

    /// The cluster of every point of the last fitted dataset, in the dataset's order.
    pub fn clusters(&self) -> &[usize] {
        &self.clusters
    }

    /// The mean distance between the points and their centers after the last iteration.
    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Checks every point is assigned to the center closest to it.
    ///
    /// This only checks the assignment is consistent with the final centers, it's false as well
    /// for unfitted or failed runs, for any undefined center and for a dataset of another size.
    ///
    /// # Arguments
    /// * `data` - The dataset the last fit ran on.
    pub fn check_clusters(&self, data: &Dataset) -> bool {
        if matches!(self.status, Status::Unfitted | Status::Failed)
            || self.centers.len() != self.k
            || self.clusters.len() != data.len()
            || self.centers.iter().any(|c| !c.is_finite())
        {
            return false;
        }

        data.points()
            .iter()
            .zip(&self.clusters)
            .all(|(p, &cluster)| p.nearest(&self.centers) == Some(cluster))
    }

    fn reset(&mut self) {
        self.centers.clear();
        self.clusters.clear();
        self.error = f64::INFINITY;
        self.status = Status::Unfitted;
    }

    /// Picks `k` distinct points of the dataset as the initial centers.
    ///
    /// The caller must make sure there are at least `k` distinct points.
    fn init_centers(&mut self, points: &[Point]) {
        while self.centers.len() < self.k {
            let candidate = points[self.rng.random_range(0..points.len())];
            if !self.centers.contains(&candidate) {
                self.centers.push(candidate);
            }
        }

        debug!(k = self.k; "initial centers: {:?}", self.centers);
    }

    fn assign(&mut self, points: &[Point]) {
        if self.clusters.len() != points.len() {
            self.clusters = vec![0; points.len()];
        }

        for (cluster, p) in self.clusters.iter_mut().zip(points) {
            // centers is never empty here
            *cluster = p.nearest(&self.centers).unwrap_or(0);
        }
    }

    fn update_centers(&mut self, points: &[Point], iteration: usize) -> Result<()> {
        let mut sums = vec![Point::default(); self.k];
        let mut sizes = vec![0usize; self.k];

        for (p, &cluster) in points.iter().zip(&self.clusters) {
            sums[cluster] = sums[cluster] + *p;
            sizes[cluster] += 1;
        }

        if let Some(cluster) = sizes.iter().position(|&size| size == 0) {
            return Err(MlErr::EmptyCluster { cluster, iteration });
        }

        for ((center, sum), size) in self.centers.iter_mut().zip(sums).zip(sizes) {
            *center = sum / size as f64;
        }

        Ok(())
    }

    fn mean_distance(&self, points: &[Point]) -> f64 {
        let total: f64 = points
            .iter()
            .zip(&self.clusters)
            .map(|(p, &cluster)| p.distance(&self.centers[cluster]))
            .sum();

        total / points.len() as f64
    }

    fn fit(&mut self, data: &Dataset) -> Result<()> {
        if data.is_empty() {
            return Err(MlErr::EmptyDataset);
        }
        data.ensure_finite()?;

        let distinct = data.distinct_len();
        if distinct < self.k {
            return Err(MlErr::NotEnoughDistinctPoints {
                distinct,
                k: self.k,
            });
        }

        let points = data.points();
        self.init_centers(points);

        let mut iteration = 0;
        while iteration < self.max_iterations {
            self.assign(points);
            self.update_centers(points, iteration)?;

            let error = self.mean_distance(points);
            let change = if self.error.is_infinite() {
                // the first round only sets the baseline
                error
            } else if self.error == 0.0 {
                0.0
            } else {
                (error - self.error).abs() / self.error
            };

            trace!(iteration = iteration, error = error; "relative change {change}");
            self.error = error;
            iteration += 1;

            if change < self.tolerance && (iteration > 1 || error == 0.0) {
                self.status = Status::Converged {
                    iterations: iteration,
                };
                debug!(iterations = iteration, error = error; "converged");
                return Ok(());
            }
        }

        warn!(
            max_iterations = self.max_iterations, error = self.error;
            "k-means stopped at the iteration limit"
        );
        self.status = Status::IterationLimit {
            iterations: iteration,
        };

        Ok(())
    }
}

impl<R: Rng> Algorithm for KMeans<R> {
    fn execute(&mut self, data: &Dataset) -> Result<()> {
        self.reset();

        let result = self.fit(data);
        if result.is_err() {
            self.status = Status::Failed;
        }

        result
    }
}
