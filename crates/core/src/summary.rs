use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RenameOutcome {
    Renamed { from: PathBuf, to: PathBuf },
    Failed { file: PathBuf, reason: String },
}

impl RenameOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RenameOutcome::Renamed { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    NoFilesFound,
    Aborted(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub directory_name: String,
    pub total: usize,
    pub renamed: usize,
    pub failed: usize,
    pub status: RunStatus,
    pub outcomes: Vec<RenameOutcome>,
}

impl RunSummary {
    pub fn from_outcomes(directory_name: String, outcomes: Vec<RenameOutcome>) -> Self {
        let renamed = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            directory_name,
            total: outcomes.len(),
            renamed,
            failed: outcomes.len() - renamed,
            status: RunStatus::Completed,
            outcomes,
        }
    }

    pub fn no_files_found(directory: &Path) -> Self {
        Self {
            directory_name: directory_name_of(directory),
            total: 0,
            renamed: 0,
            failed: 0,
            status: RunStatus::NoFilesFound,
            outcomes: Vec::new(),
        }
    }

    /// An interrupted run reports nothing as renamed, whatever already moved.
    pub fn aborted(directory_name: String, total: usize, reason: String) -> Self {
        Self {
            directory_name,
            total,
            renamed: 0,
            failed: total,
            status: RunStatus::Aborted(reason),
            outcomes: Vec::new(),
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self.status, RunStatus::Aborted(_))
    }

    pub fn message(&self) -> String {
        match self.renamed {
            0 => format!(
                "No files were renamed in directory: {}.",
                self.directory_name
            ),
            1 => format!(
                "One file in directory {} was renamed successfully.",
                self.directory_name
            ),
            n => format!(
                "{} files in directory {} were renamed.",
                n, self.directory_name
            ),
        }
    }
}

pub(crate) fn directory_name_of(directory: &Path) -> String {
    directory
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| directory.display().to_string())
}
