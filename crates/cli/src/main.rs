use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use exif_date_renamer_core::{
    app_paths, load_config, load_config_from, AppConfig, BatchRenamer, ExifCreationDate,
    MissingDatePolicy, PlannedName, ProgressEvent, RenameError, RenameOutcome, RunOptions,
    RunSummary,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "exif-date-renamer")]
#[command(about = "Prefixes JPEG file names with their EXIF creation date")]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Rename(RenameArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct RenameArgs {
    /// Directory holding the photos
    directory: Option<PathBuf>,
    /// Extension to include; repeat for more (default from config: jpg)
    #[arg(long = "ext")]
    extensions: Vec<String>,
    #[arg(long, value_enum)]
    missing_date: Option<MissingDateArg>,
    #[arg(long)]
    threads: Option<usize>,
    /// Show the new names without renaming anything
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MissingDateArg {
    Skip,
    FileModified,
}

impl From<MissingDateArg> for MissingDatePolicy {
    fn from(value: MissingDateArg) -> Self {
        match value {
            MissingDateArg::Skip => MissingDatePolicy::Skip,
            MissingDateArg::FileModified => MissingDatePolicy::FileModified,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Rename(args) => cmd_rename(args),
        Commands::Config(config) => match config.action {
            ConfigAction::Show { config } => cmd_config_show(config.as_deref()),
        },
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
}

fn cmd_rename(args: RenameArgs) -> Result<()> {
    let mut config = resolve_config(args.config.as_deref())?;
    if !args.extensions.is_empty() {
        config.extensions = args.extensions;
    }
    if let Some(missing_date) = args.missing_date {
        config.missing_date = missing_date.into();
    }
    if args.threads.is_some() {
        config.threads = args.threads;
    }

    let renamer = match BatchRenamer::prepare(args.directory.as_deref(), &config.filter()) {
        Ok(renamer) => renamer,
        Err(RenameError::NoFilesFound(dir)) => {
            print_summary(&RunSummary::no_files_found(&dir), args.output)?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    let strategy = ExifCreationDate::new(config.missing_date);
    let options = RunOptions::from(&config);

    if args.dry_run {
        let planned = renamer.preview(&strategy, options)?;
        print_plan(&planned, args.output)?;
        eprintln!("dry run: no files were changed. Run without --dry-run to rename.");
        return Ok(());
    }

    let job = renamer.spawn(strategy, options);
    for event in job.events().iter() {
        report_progress(&event);
    }
    let summary = job.join().context("rename batch did not finish")?;

    print_summary(&summary, args.output)?;
    if summary.is_aborted() {
        anyhow::bail!("{}", summary.message());
    }
    Ok(())
}

fn report_progress(event: &ProgressEvent) {
    match event {
        ProgressEvent::Started { total } => eprintln!("renaming {total} files"),
        ProgressEvent::FileProcessed {
            file_name,
            processed,
        } => eprintln!("[{processed}] {file_name}"),
        ProgressEvent::Failed { reason } => eprintln!("error while renaming: {reason}"),
        ProgressEvent::Finished(_) => {}
    }
}

fn print_summary(summary: &RunSummary, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        OutputFormat::Table => {
            for outcome in &summary.outcomes {
                match outcome {
                    RenameOutcome::Renamed { from, to } => {
                        println!("{} -> {}", from.display(), to.display())
                    }
                    RenameOutcome::Failed { file, reason } => {
                        println!("{} (failed: {})", file.display(), reason)
                    }
                }
            }
            println!("\n{}", summary.message());
        }
    }
    Ok(())
}

fn print_plan(planned: &[PlannedName], output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(planned)?);
        }
        OutputFormat::Table => {
            println!("original -> new name");
            for item in planned {
                match (&item.target_path, &item.reason) {
                    (Some(target), _) => println!(
                        "{} -> {}",
                        item.original_path.display(),
                        target.display()
                    ),
                    (None, reason) => println!(
                        "{} (skipped: {})",
                        item.original_path.display(),
                        reason.as_deref().unwrap_or("unknown")
                    ),
                }
            }
        }
    }
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => app_paths()?.config_path,
    };
    println!("config file: {}", config_path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
