use crate::{Dataset, Result};

/// A unit of work configured apart from the data it runs on.
///
/// Implementors keep their results as internal state, readable through their own accessors once
/// `execute` returns. Running an algorithm again replaces the previous results.
pub trait Algorithm {
    /// Runs the algorithm over `data`.
    ///
    /// # Arguments
    /// * `data` - The points to work on.
    ///
    /// # Errors
    /// Any `MlErr` describing why the data can't be fitted.
    fn execute(&mut self, data: &Dataset) -> Result<()>;
}
