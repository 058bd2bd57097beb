pub mod algorithms;
pub mod dataset;
pub mod error;
pub mod point;

pub use algorithms::{Algorithm, Engine, KMeans, LinearRegression, Status};
pub use dataset::{Bounds, Dataset};
pub use error::{MlErr, Result};
pub use point::Point;
