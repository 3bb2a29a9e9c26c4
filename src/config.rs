//! Resolved run options for decomment.

use std::collections::HashSet;
use std::path::PathBuf;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::cli::Cli;
use crate::error::{DecommentError, Result};

/// Effective options for one run, resolved from the CLI.
#[derive(Debug)]
pub struct Options {
    /// Root directory of the walk
    pub root: PathBuf,

    /// Extensions to process, lowercase without the dot
    pub extensions: HashSet<String>,

    /// Directory names pruned from the walk
    pub exclude_dirs: HashSet<String>,

    /// File-name patterns that are skipped
    pub exclude_files: GlobSet,

    /// The raw exclude patterns, kept for the banner
    pub exclude_file_patterns: Vec<String>,

    /// Report only, write nothing
    pub dry_run: bool,

    /// Log ignored entries
    pub verbose: bool,

    /// Suppress per-file output
    pub quiet: bool,

    /// Bounded fan-out for file processing
    pub concurrency: usize,
}

impl Options {
    /// Resolves options from parsed CLI arguments. Fails fast on a missing
    /// root directory or an invalid glob pattern.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = PathBuf::from(&cli.dir);
        let root = root.canonicalize().map_err(|e| {
            DecommentError::Config(format!("cannot resolve directory {}: {e}", cli.dir))
        })?;
        if !root.is_dir() {
            return Err(DecommentError::Config(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let extensions: HashSet<String> = cli
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect();

        let exclude_dirs: HashSet<String> = cli.exclude_dirs.iter().cloned().collect();

        let exclude_file_patterns: Vec<String> = cli.exclude_files.clone();

        let mut builder = GlobSetBuilder::new();
        for pattern in &exclude_file_patterns {
            builder.add(Glob::new(pattern)?);
        }
        let exclude_files = builder.build()?;

        Ok(Self {
            root,
            extensions,
            exclude_dirs,
            exclude_files,
            exclude_file_patterns,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
            quiet: cli.quiet,
            concurrency: cli.concurrency.unwrap_or_else(|| num_cpus::get() * 2).max(1),
        })
    }
}
