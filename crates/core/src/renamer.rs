use crate::config::AppConfig;
use crate::error::RenameError;
use crate::exif_reader::file_name_of;
use crate::filter::ImageFileFilter;
use crate::naming::{ExifCreationDate, NamingStrategy};
use crate::progress::{ChannelSink, ProgressEvent, ProgressSink};
use crate::summary::{directory_name_of, RenameOutcome, RunSummary};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Worker threads; `None` uses one per available core.
    pub threads: Option<usize>,
}

impl From<&AppConfig> for RunOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            threads: config.threads,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedName {
    pub original_path: PathBuf,
    pub target_path: Option<PathBuf>,
    pub reason: Option<String>,
}

enum WorkerMessage {
    Processing(String),
    Done(RenameOutcome),
}

/// The file list is taken once in [`BatchRenamer::prepare`] and never
/// refreshed.
#[derive(Debug, Clone)]
pub struct BatchRenamer {
    directory: PathBuf,
    files: Vec<PathBuf>,
}

impl BatchRenamer {
    pub fn prepare(
        directory: Option<&Path>,
        filter: &ImageFileFilter,
    ) -> Result<Self, RenameError> {
        let Some(directory) = directory else {
            return Err(RenameError::InvalidDirectory(
                "no directory given".to_string(),
            ));
        };
        if !directory.is_dir() {
            return Err(RenameError::InvalidDirectory(
                directory.display().to_string(),
            ));
        }

        let files = filter.list(directory).map_err(|err| {
            RenameError::InvalidDirectory(format!("{}: {err}", directory.display()))
        })?;
        if files.is_empty() {
            return Err(RenameError::NoFilesFound(directory.to_path_buf()));
        }

        Ok(Self {
            directory: directory.to_path_buf(),
            files,
        })
    }

    /// Renames every file and blocks until all of them are done.
    ///
    /// The sink is only called from the current thread. Worker panics and
    /// thread pool failures end in an aborted summary; `on_finished` is
    /// called in every case.
    pub fn run(
        &self,
        strategy: &dyn NamingStrategy,
        options: RunOptions,
        sink: &mut dyn ProgressSink,
    ) -> RunSummary {
        let total = self.files.len();
        let directory_name = directory_name_of(&self.directory);
        info!(
            directory = %self.directory.display(),
            total,
            strategy = strategy.label(),
            "starting rename batch"
        );
        sink.on_start(total);

        let summary = match self.rename_all(strategy, options, sink) {
            Ok(outcomes) => RunSummary::from_outcomes(directory_name, outcomes),
            Err(err) => {
                let reason = err.to_string();
                error!(directory = %self.directory.display(), %reason, "rename batch aborted");
                sink.on_failed(&reason);
                RunSummary::aborted(directory_name, total, reason)
            }
        };

        info!(
            renamed = summary.renamed,
            failed = summary.failed,
            "rename batch finished"
        );
        sink.on_finished(&summary);
        summary
    }

    pub fn spawn<S>(self, strategy: S, options: RunOptions) -> RenameJob
    where
        S: NamingStrategy + 'static,
    {
        let (sender, events) = mpsc::channel();
        let handle = thread::spawn(move || {
            let mut sink = ChannelSink::new(sender);
            self.run(&strategy, options, &mut sink)
        });
        RenameJob { events, handle }
    }

    pub fn preview(
        &self,
        strategy: &dyn NamingStrategy,
        options: RunOptions,
    ) -> Result<Vec<PlannedName>, RenameError> {
        let pool = build_pool(options)?;
        Ok(pool.install(|| {
            self.files
                .par_iter()
                .map(|path| plan_one(path, strategy))
                .collect()
        }))
    }

    fn rename_all(
        &self,
        strategy: &dyn NamingStrategy,
        options: RunOptions,
        sink: &mut dyn ProgressSink,
    ) -> Result<Vec<RenameOutcome>, RenameError> {
        let pool = build_pool(options)?;
        let files = &self.files;
        let (tx, rx) = mpsc::channel::<WorkerMessage>();

        thread::scope(|scope| {
            let worker = scope.spawn(move || {
                pool.install(|| {
                    files.par_iter().for_each_with(tx, |sender, path| {
                        rename_one(path, strategy, sender);
                    });
                });
            });

            let mut processed = 0usize;
            let mut outcomes = Vec::with_capacity(files.len());
            for message in rx {
                match message {
                    WorkerMessage::Processing(file_name) => {
                        processed += 1;
                        sink.on_file_processed(&file_name, processed);
                    }
                    WorkerMessage::Done(outcome) => outcomes.push(outcome),
                }
            }

            worker
                .join()
                .map_err(|payload| RenameError::UnexpectedBatch(panic_message(payload.as_ref())))?;
            Ok(outcomes)
        })
    }
}

pub struct RenameJob {
    events: Receiver<ProgressEvent>,
    handle: JoinHandle<RunSummary>,
}

impl RenameJob {
    pub fn events(&self) -> &Receiver<ProgressEvent> {
        &self.events
    }

    pub fn join(self) -> Result<RunSummary, RenameError> {
        self.handle
            .join()
            .map_err(|payload| RenameError::UnexpectedBatch(panic_message(payload.as_ref())))
    }
}

/// A directory without matching files is a zero summary, not an error.
pub fn rename_directory(
    directory: Option<&Path>,
    config: &AppConfig,
    sink: &mut dyn ProgressSink,
) -> Result<RunSummary, RenameError> {
    let renamer = match BatchRenamer::prepare(directory, &config.filter()) {
        Ok(renamer) => renamer,
        Err(RenameError::NoFilesFound(dir)) => {
            warn!(directory = %dir.display(), "no matching image files");
            let summary = RunSummary::no_files_found(&dir);
            sink.on_finished(&summary);
            return Ok(summary);
        }
        Err(err) => return Err(err),
    };

    let strategy = ExifCreationDate::new(config.missing_date);
    Ok(renamer.run(&strategy, RunOptions::from(config), sink))
}

const NO_CREATION_DATE: &str = "no creation date in EXIF metadata";

fn build_pool(options: RunOptions) -> Result<ThreadPool, RenameError> {
    ThreadPoolBuilder::new()
        .num_threads(options.threads.unwrap_or(0))
        .build()
        .map_err(|err| RenameError::UnexpectedBatch(err.to_string()))
}

fn plan_one(path: &Path, strategy: &dyn NamingStrategy) -> PlannedName {
    let planned = |target_path: Option<PathBuf>, reason: Option<String>| PlannedName {
        original_path: path.to_path_buf(),
        target_path,
        reason,
    };
    match strategy.target_name(path) {
        Ok(Some(name)) => match target_path_for(path, &name) {
            Ok(target) => planned(Some(target), None),
            Err(err) => planned(None, Some(err.to_string())),
        },
        Ok(None) => planned(None, Some(NO_CREATION_DATE.to_string())),
        Err(err) => planned(None, Some(err.to_string())),
    }
}

fn rename_one(path: &Path, strategy: &dyn NamingStrategy, sender: &mut Sender<WorkerMessage>) {
    let target_name = strategy.target_name(path);
    let _ = sender.send(WorkerMessage::Processing(file_name_of(path)));

    let outcome = match target_name {
        Ok(Some(name)) => match rename_in_place(path, &name) {
            Ok(target) => {
                info!(from = %path.display(), to = %target.display(), "renamed");
                RenameOutcome::Renamed {
                    from: path.to_path_buf(),
                    to: target,
                }
            }
            Err(err) => failed(path, err.to_string()),
        },
        Ok(None) => failed(path, NO_CREATION_DATE.to_string()),
        Err(err) => failed(path, err.to_string()),
    };
    let _ = sender.send(WorkerMessage::Done(outcome));
}

fn failed(path: &Path, reason: String) -> RenameOutcome {
    warn!(file = %path.display(), %reason, "unable to rename");
    RenameOutcome::Failed {
        file: path.to_path_buf(),
        reason,
    }
}

fn rename_in_place(path: &Path, target_name: &str) -> Result<PathBuf, RenameError> {
    let target = target_path_for(path, target_name)?;
    // fs::rename replaces an existing file on Unix.
    if fs::symlink_metadata(&target).is_ok() {
        return Err(RenameError::RenameIo {
            from: path.to_path_buf(),
            to: target,
            source: io::Error::new(io::ErrorKind::AlreadyExists, "target already exists"),
        });
    }
    fs::rename(path, &target).map_err(|source| RenameError::RenameIo {
        from: path.to_path_buf(),
        to: target.clone(),
        source,
    })?;
    Ok(target)
}

fn target_path_for(path: &Path, target_name: &str) -> Result<PathBuf, RenameError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let target = parent.join(target_name);

    let mut components = Path::new(target_name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single_normal {
        return Err(RenameError::RenameIo {
            from: path.to_path_buf(),
            to: target,
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "target name is not a plain file name",
            ),
        });
    }
    Ok(target)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker thread panicked".to_string()
    }
}
