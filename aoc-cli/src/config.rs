//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use crate::inputs::InputStore;
use std::path::{Path, PathBuf};

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Input directory path
    pub input_dir: PathBuf,
    /// Single-day input file replacing the directory lookup
    pub input_file: Option<PathBuf>,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let thread_count = match args.threads {
            Some(0) => return Err(CliError::Config("--threads must be at least 1".to_string())),
            Some(n) => n,
            None => num_cpus(),
        };

        if args.input.is_some() && (args.year.is_none() || args.day.is_none()) {
            return Err(CliError::Config(
                "--input needs both --year and --day".to_string(),
            ));
        }

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_dir: expand_tilde(&args.input_dir),
            input_file: args.input.as_deref().map(expand_tilde),
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
        })
    }

    /// Input store honouring `--input-dir` and `--input`
    pub fn input_store(&self) -> InputStore {
        let store = InputStore::new(self.input_dir.clone());
        match (&self.input_file, self.year_filter, self.day_filter) {
            (Some(file), Some(year), Some(day)) => store.with_file(year, day, file.clone()),
            _ => store,
        }
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && let Some(rest) = path_str.strip_prefix('~')
        && (rest.is_empty() || rest.starts_with('/'))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest.trim_start_matches('/'));
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
