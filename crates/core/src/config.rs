use crate::filter::{ImageFileFilter, DEFAULT_EXTENSION};
use crate::naming::MissingDatePolicy;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub extensions: Vec<String>,
    pub missing_date: MissingDatePolicy,
    pub threads: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            missing_date: MissingDatePolicy::default(),
            threads: None,
        }
    }
}

impl AppConfig {
    pub fn filter(&self) -> ImageFileFilter {
        ImageFileFilter::new(&self.extensions)
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_path: PathBuf,
}

pub fn app_paths() -> Result<AppPaths> {
    let proj = ProjectDirs::from("com", "exif-date-renamer", "exif-date-renamer")
        .context("could not determine the OS configuration directory")?;
    let config_dir = proj.config_dir().to_path_buf();
    Ok(AppPaths {
        config_path: config_dir.join("config.toml"),
        config_dir,
    })
}

/// A missing file yields the defaults.
pub fn load_config() -> Result<AppConfig> {
    let paths = app_paths()?;
    load_config_from(&paths.config_path)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("could not read config file: {}", path.display()))?;
    parse_config(&raw).with_context(|| format!("could not parse config file: {}", path.display()))
}

pub fn parse_config(raw: &str) -> Result<AppConfig> {
    let config = toml::from_str::<AppConfig>(raw)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::{load_config_from, parse_config, AppConfig};
    use crate::naming::MissingDatePolicy;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().expect("tempdir");
        let config = load_config_from(&temp.path().join("config.toml")).expect("defaults");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.extensions, ["jpg"]);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = parse_config("missing_date = \"file-modified\"\n").expect("parse");
        assert_eq!(config.missing_date, MissingDatePolicy::FileModified);
        assert_eq!(config.extensions, ["jpg"]);
        assert_eq!(config.threads, None);
    }

    #[test]
    fn full_file_is_read() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "extensions = [\"jpg\", \"jpeg\"]\nmissing_date = \"skip\"\nthreads = 2\n",
        )
        .expect("write config");

        let config = load_config_from(&path).expect("parse");
        assert_eq!(config.extensions, ["jpg", "jpeg"]);
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.filter().extensions(), ["jpg", "jpeg"]);
    }

    #[test]
    fn invalid_file_reports_path() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "threads = \"many\"").expect("write config");

        let err = load_config_from(&path).expect_err("should fail");
        assert!(err.to_string().contains("config.toml"));
    }
}
