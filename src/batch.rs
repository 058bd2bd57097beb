use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use machine_learning::Engine;

use crate::{
    config::DriverConfig,
    input::{self, Job},
    output::FileSink,
    plot,
};

/// What became of a single data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An image was written at the given path.
    Rendered(PathBuf),
    /// Nothing was written, for the given reason.
    Skipped(String),
}

/// Counters of a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub rendered: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Fits and plots every data file of the configured directory.
///
/// Files are independent: one failing is logged and counted, the rest are still processed.
///
/// # Errors
/// Only if the data directory can't be listed.
pub fn run(config: &DriverConfig) -> Result<Summary> {
    let files = input::list_files(&config.data_dir)?;
    info!(
        "processing {} file(s) from {}",
        files.len(),
        config.data_dir.display()
    );

    let mut summary = Summary::default();
    for path in files {
        match process_file(&path, config) {
            Ok(Outcome::Rendered(_)) => summary.rendered += 1,
            Ok(Outcome::Skipped(reason)) => {
                debug!("skipped {}: {reason}", path.display());
                summary.skipped += 1;
            }
            Err(e) => {
                warn!("{}: {e:#}", path.display());
                summary.failed += 1;
            }
        }
    }

    info!(
        "{} rendered, {} skipped, {} failed",
        summary.rendered, summary.skipped, summary.failed
    );

    Ok(summary)
}

/// Fits and plots a single data file.
///
/// The job comes from the file name, see `input::infer_job`. Clusterings whose assignment
/// doesn't match their final centers are not plotted.
///
/// # Errors
/// If the file can't be read, the fit fails, the image would be too large or it can't be
/// written.
pub fn process_file(path: &Path, config: &DriverConfig) -> Result<Outcome> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let stem = name.split('.').next().unwrap_or_default();

    let Some(job) = input::infer_job(stem)? else {
        return Ok(Outcome::Skipped("the name matches no job".to_string()));
    };

    let data = input::read_dataset(path)?;
    let mut engine = match job {
        Job::Cluster { k } => Engine::kmeans(k, config.seed)?,
        Job::Line => Engine::linear_regression(),
    };

    data.accept(&mut engine)
        .with_context(|| format!("{} over {} points", engine.kind(), data.len()))?;

    let canvas = match &engine {
        Engine::KMeans(kmeans) => {
            if !kmeans.check_clusters(&data) {
                warn!("{name}: the result is not good, clusters don't match their centers");
                return Ok(Outcome::Skipped("inconsistent clusters".to_string()));
            }
            plot::clusters(&data, kmeans.clusters())?
        }
        Engine::LinearRegression(fit) => {
            info!(
                "{name}: y = {} * x + {}",
                fit.slope(),
                fit.intercept()
            );
            plot::line(&data, fit)?
        }
    };

    let out = config
        .out_dir
        .join(format!("{stem}.{}", config.format.extension()));
    let mut sink = FileSink::new(&out);
    canvas
        .render(&mut sink, config.format)
        .with_context(|| format!("cannot write '{}'", out.display()))?;

    Ok(Outcome::Rendered(out))
}
