use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum MlErr {
    /// The amount of clusters requested for k-means is not positive.
    InvalidClusterCount { k: i64 },
    /// A dataset was built from a flat value list that can't be split in pairs.
    OddValueCount { got: usize },
    /// An algorithm was executed over a dataset without points.
    EmptyDataset,
    /// A point of the dataset has an infinite or undefined coordinate.
    NonFinitePoint { index: usize },
    /// There are less distinct points in the dataset than requested centers.
    NotEnoughDistinctPoints { distinct: usize, k: usize },
    /// A cluster ended an assignment step without members.
    EmptyCluster { cluster: usize, iteration: usize },
    /// The regression's denominator vanished, every x coordinate is the same.
    DegenerateRegression { denominator: f64 },
}

impl MlErr {
    /// Returns whether the error was caused by the shape of the data rather than by a bad
    /// configuration or malformed input.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            MlErr::EmptyDataset
                | MlErr::NotEnoughDistinctPoints { .. }
                | MlErr::EmptyCluster { .. }
                | MlErr::DegenerateRegression { .. }
        )
    }
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MlErr::InvalidClusterCount { k } => {
                format!("The amount of clusters must be positive, got {k}")
            }
            MlErr::OddValueCount { got } => {
                format!("Can't pair {got} values into points, the amount must be even")
            }
            MlErr::EmptyDataset => "The dataset has no points".to_string(),
            MlErr::NonFinitePoint { index } => {
                format!("The point at {index} has a coordinate that isn't a finite number")
            }
            MlErr::NotEnoughDistinctPoints { distinct, k } => format!(
                "Can't pick {k} distinct centers from a dataset with {distinct} distinct points"
            ),
            MlErr::EmptyCluster { cluster, iteration } => format!(
                "Cluster {cluster} was left without points at iteration {iteration}"
            ),
            MlErr::DegenerateRegression { denominator } => format!(
                "The regression is undefined, the denominator is {denominator} (all x are equal)"
            ),
        };

        write!(f, "{s}")
    }
}

impl Error for MlErr {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_errors_are_told_apart() {
        assert!(MlErr::EmptyDataset.is_degenerate());
        assert!(MlErr::DegenerateRegression { denominator: 0.0 }.is_degenerate());
        assert!(
            MlErr::EmptyCluster {
                cluster: 1,
                iteration: 0
            }
            .is_degenerate()
        );
        assert!(!MlErr::InvalidClusterCount { k: 0 }.is_degenerate());
        assert!(!MlErr::OddValueCount { got: 3 }.is_degenerate());
        assert!(!MlErr::NonFinitePoint { index: 0 }.is_degenerate());
    }

    #[test]
    fn display_names_the_offending_values() {
        let err = MlErr::NotEnoughDistinctPoints { distinct: 2, k: 3 };
        let msg = err.to_string();
        assert!(msg.contains('2') && msg.contains('3'), "got: {msg}");
    }
}
