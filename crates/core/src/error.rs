use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("not a directory: {0}")]
    InvalidDirectory(String),
    #[error("no matching image files in directory: {}", .0.display())]
    NoFilesFound(PathBuf),
    #[error("could not read EXIF metadata from {}: {source}", .path.display())]
    MetadataExtraction {
        path: PathBuf,
        #[source]
        source: exif::Error,
    },
    #[error("could not read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid creation date {value:?}: {reason}")]
    MetadataValidation { value: String, reason: String },
    #[error("could not rename {} to {}: {source}", .from.display(), .to.display())]
    RenameIo {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("rename batch aborted: {0}")]
    UnexpectedBatch(String),
}
