mod config;
mod error;
mod exif_reader;
mod filter;
mod metadata;
mod naming;
mod progress;
mod renamer;
mod summary;
#[cfg(test)]
mod test_support;

pub use config::{app_paths, load_config, load_config_from, parse_config, AppConfig, AppPaths};
pub use error::RenameError;
pub use exif_reader::{extract_creation_timestamp, read_creation_date, CREATION_DATE_TAG};
pub use filter::{ImageFileFilter, DEFAULT_EXTENSION};
pub use metadata::{compact_creation_date, MetadataRecord};
pub use naming::{ExifCreationDate, FileModified, MissingDatePolicy, NamingStrategy};
pub use progress::{ChannelSink, ProgressEvent, ProgressSink, SilentSink};
pub use renamer::{rename_directory, BatchRenamer, PlannedName, RenameJob, RunOptions};
pub use summary::{RenameOutcome, RunStatus, RunSummary};
