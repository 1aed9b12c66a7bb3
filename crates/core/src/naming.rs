use crate::error::RenameError;
use crate::exif_reader::{extract_creation_timestamp, file_name_of};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// `Ok(None)` means the strategy has no date for this file.
pub trait NamingStrategy: Send + Sync {
    fn target_name(&self, path: &Path) -> Result<Option<String>, RenameError>;

    fn label(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MissingDatePolicy {
    #[default]
    Skip,
    FileModified,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExifCreationDate {
    pub missing_date: MissingDatePolicy,
}

impl ExifCreationDate {
    pub fn new(missing_date: MissingDatePolicy) -> Self {
        Self { missing_date }
    }
}

impl NamingStrategy for ExifCreationDate {
    fn target_name(&self, path: &Path) -> Result<Option<String>, RenameError> {
        match extract_creation_timestamp(path)? {
            Some(name) => Ok(Some(name)),
            None => match self.missing_date {
                MissingDatePolicy::Skip => Ok(None),
                MissingDatePolicy::FileModified => FileModified.target_name(path),
            },
        }
    }

    fn label(&self) -> &'static str {
        "exif-creation-date"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileModified;

impl NamingStrategy for FileModified {
    fn target_name(&self, path: &Path) -> Result<Option<String>, RenameError> {
        let modified = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(|source| RenameError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;
        let local: DateTime<Local> = DateTime::from(modified);
        Ok(Some(format!(
            "{}_{}",
            local.format("%Y%m%d_%H%M%S"),
            file_name_of(path)
        )))
    }

    fn label(&self) -> &'static str {
        "file-modified"
    }
}
