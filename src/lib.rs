pub mod batch;
pub mod config;
pub mod input;
pub mod output;
pub mod plot;

pub use batch::{Outcome, Summary, process_file, run};
pub use config::DriverConfig;
