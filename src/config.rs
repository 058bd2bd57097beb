use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};
use plotter::ImageFormat;
use serde::Deserialize;

/// The variable naming an optional JSON configuration file.
pub const CONFIG_VAR: &str = "POINT_FIT_CONFIG";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_OUT_DIR: &str = "visitor_graph";

/// Settings of a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    /// Directory scanned for data files.
    pub data_dir: PathBuf,
    /// Directory the images are written to.
    pub out_dir: PathBuf,
    pub format: ImageFormat,
    /// Seed for the k-means center initialization, random when missing.
    pub seed: Option<u64>,
}

/// The shape of the JSON configuration file, every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    format: Option<String>,
    seed: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            format: ImageFormat::default(),
            seed: None,
        }
    }
}

impl DriverConfig {
    /// Loads the configuration from the process environment.
    ///
    /// Defaults are overridden by the JSON file named by `POINT_FIT_CONFIG`, if any, and then by
    /// the `DATA_DIR`, `OUT_DIR`, `IMAGE_FORMAT` and `SEED` variables.
    ///
    /// # Errors
    /// If the configuration file can't be read or any value is malformed.
    pub fn load() -> Result<Self> {
        let file = match env::var(CONFIG_VAR) {
            Ok(path) => Some(
                fs::read_to_string(&path).with_context(|| format!("cannot read '{path}'"))?,
            ),
            Err(_) => None,
        };

        Self::from_sources(file.as_deref(), |key| env::var(key).ok())
    }

    /// Builds the configuration out of a JSON document and a variable lookup.
    ///
    /// # Arguments
    /// * `file` - The contents of the configuration file, if there's one.
    /// * `var` - Looks up an environment variable.
    pub fn from_sources<F>(file: Option<&str>, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(content) = file {
            let file: ConfigFile =
                serde_json::from_str(content).context("invalid configuration file")?;
            config.apply(file)?;
        }

        config.apply(ConfigFile {
            data_dir: var("DATA_DIR").map(PathBuf::from),
            out_dir: var("OUT_DIR").map(PathBuf::from),
            format: var("IMAGE_FORMAT"),
            seed: var("SEED")
                .map(|s| s.parse().with_context(|| format!("invalid SEED '{s}'")))
                .transpose()?,
        })?;

        Ok(config)
    }

    fn apply(&mut self, overrides: ConfigFile) -> Result<()> {
        if let Some(data_dir) = overrides.data_dir {
            self.data_dir = data_dir;
        }
        if let Some(out_dir) = overrides.out_dir {
            self.out_dir = out_dir;
        }
        if let Some(format) = overrides.format {
            self.format = format.parse()?;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_vars(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_match_the_original_layout() {
        let config = DriverConfig::from_sources(None, no_vars).unwrap();
        assert_eq!(config, DriverConfig::default());
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.out_dir, PathBuf::from("visitor_graph"));
        assert_eq!(config.format, ImageFormat::Ppm);
    }

    #[test]
    fn variables_override_the_file() {
        let file = r#"{ "data_dir": "in", "out_dir": "out", "format": "pam", "seed": 3 }"#;
        let var = |key: &str| match key {
            "OUT_DIR" => Some("elsewhere".to_string()),
            "SEED" => Some("11".to_string()),
            _ => None,
        };

        let config = DriverConfig::from_sources(Some(file), var).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("in"));
        assert_eq!(config.out_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.format, ImageFormat::Pam);
        assert_eq!(config.seed, Some(11));
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(DriverConfig::from_sources(Some("{ \"colour\": 1 }"), no_vars).is_err());
        assert!(DriverConfig::from_sources(Some("not json"), no_vars).is_err());

        let bad_seed = |key: &str| (key == "SEED").then(|| "abc".to_string());
        assert!(DriverConfig::from_sources(None, bad_seed).is_err());

        let bad_format = |key: &str| (key == "IMAGE_FORMAT").then(|| "gif".to_string());
        assert!(DriverConfig::from_sources(None, bad_format).is_err());
    }
}
