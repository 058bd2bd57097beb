mod algorithm;
mod engine;
mod kmeans;
mod linear_regression;

pub use algorithm::Algorithm;
pub use engine::Engine;
pub use kmeans::{KMeans, Status};
pub use linear_regression::LinearRegression;
