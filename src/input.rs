use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use machine_learning::Dataset;

/// What to do with a data file, as told by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    /// K-means with `k` clusters.
    Cluster { k: i64 },
    /// A least squares line fit.
    Line,
}

/// Infers the job for a data file from its stem.
///
/// Stems containing `cluster` are k-means jobs, `k` being the digits of the stem read as a
/// single number (`cluster3` is `k = 3`). Otherwise stems containing `line` are regressions.
///
/// # Returns
/// The job, or `None` if the name matches no job.
///
/// # Errors
/// If a cluster stem has no digits or too many of them.
pub fn infer_job(stem: &str) -> Result<Option<Job>> {
    if stem.contains("cluster") {
        let digits: String = stem.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            bail!("'{stem}' names a clustering but carries no cluster count");
        }

        let k = digits
            .parse()
            .with_context(|| format!("cluster count '{digits}' is out of range"))?;
        return Ok(Some(Job::Cluster { k }));
    }

    if stem.contains("line") {
        return Ok(Some(Job::Line));
    }

    Ok(None)
}

/// Parses whitespace separated numbers.
///
/// # Errors
/// On the first token that isn't a number.
pub fn parse_values(text: &str) -> Result<Vec<f64>> {
    text.split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            token
                .parse()
                .map_err(|_| anyhow!("token {i} ('{token}') is not a number"))
        })
        .collect()
}

/// Reads a data file as a dataset, taking its numbers in pairs.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let text =
        fs::read_to_string(path).with_context(|| format!("cannot read '{}'", path.display()))?;
    let values = parse_values(&text)?;

    Ok(Dataset::from_values(&values)?)
}

/// Lists the regular files of `dir`, sorted by name.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("cannot list '{}'", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();

    Ok(files)
}
