use crate::{Algorithm, MlErr, Point, Result};

/// An ordered collection of points, only growing by appending.
///
/// The position of every point is meaningful: per point results (such as the cluster assignments
/// of k-means) are indexed the same way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<Point>,
}

/// The extremes of every coordinate in a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Dataset {
    /// Creates a new empty `Dataset`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dataset pairing consecutive values as the coordinates of a point.
    ///
    /// # Arguments
    /// * `values` - A flat list of coordinates `x0, y0, x1, y1, ...`.
    ///
    /// # Errors
    /// `MlErr::OddValueCount` if the values can't be split in pairs.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.len() % 2 != 0 {
            return Err(MlErr::OddValueCount { got: values.len() });
        }

        let points = values
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect();

        Ok(Self { points })
    }

    /// Appends a point at the end of the dataset.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Counts the points with different coordinates.
    pub fn distinct_len(&self) -> usize {
        let mut seen: Vec<Point> = Vec::with_capacity(self.points.len());
        for p in &self.points {
            if !seen.contains(p) {
                seen.push(*p);
            }
        }

        seen.len()
    }

    /// Fails on the first point with a non finite coordinate.
    pub fn ensure_finite(&self) -> Result<()> {
        match self.points.iter().position(|p| !p.is_finite()) {
            Some(index) => Err(MlErr::NonFinitePoint { index }),
            None => Ok(()),
        }
    }

    /// Returns the extremes of both coordinates, or `None` for an empty dataset.
    pub fn bounds(&self) -> Option<Bounds> {
        let (first, rest) = self.points.split_first()?;

        let init = Bounds {
            min_x: first.x(),
            max_x: first.x(),
            min_y: first.y(),
            max_y: first.y(),
        };

        Some(rest.iter().fold(init, |b, p| Bounds {
            min_x: b.min_x.min(p.x()),
            max_x: b.max_x.max(p.x()),
            min_y: b.min_y.min(p.y()),
            max_y: b.max_y.max(p.y()),
        }))
    }

    /// Runs `algorithm` over the current contents of this dataset.
    ///
    /// The algorithm only sees the points as they are during the call, it keeps its results but
    /// never a handle to the dataset, so later appends don't reach it.
    ///
    /// # Arguments
    /// * `algorithm` - The algorithm to execute.
    ///
    /// # Returns
    /// Whatever error the algorithm reports on this data.
    pub fn accept<A>(&self, algorithm: &mut A) -> Result<()>
    where
        A: Algorithm + ?Sized,
    {
        algorithm.execute(self)
    }
}

impl FromIterator<Point> for Dataset {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl Extend<Point> for Dataset {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_values_pairs_in_order() {
        let ds = Dataset::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(0), Some(Point::new(1.0, 2.0)));
        assert_eq!(ds.get(1), Some(Point::new(3.0, 4.0)));
    }

    #[test]
    fn from_values_rejects_odd_counts() {
        let err = Dataset::from_values(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, MlErr::OddValueCount { got: 3 });
    }

    #[test]
    fn bounds_cover_every_point() {
        let ds: Dataset = [(3.0, -1.0), (-2.0, 5.0), (7.0, 0.0)]
            .into_iter()
            .map(Point::from)
            .collect();

        let b = ds.bounds().unwrap();
        assert_eq!(
            b,
            Bounds {
                min_x: -2.0,
                max_x: 7.0,
                min_y: -1.0,
                max_y: 5.0
            }
        );
        assert!(Dataset::new().bounds().is_none());
    }

    #[test]
    fn distinct_len_compares_values() {
        let mut ds = Dataset::new();
        ds.push(Point::new(1.0, 1.0));
        ds.push(Point::new(1.0, 1.0));
        ds.push(Point::new(1.0, 2.0));
        assert_eq!(ds.distinct_len(), 2);
    }
}
