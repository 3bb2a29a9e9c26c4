//! File processing: walk the tree, pick a strategy per file, strip, write.
//!
//! The walk honors the root's `.gitignore`, prunes excluded directory names,
//! and skips excluded file patterns. Candidate files are then processed with
//! a bounded fan-out; strategies share no state, so no coordination is
//! needed between files. Per-file failures are logged and counted, never
//! fatal to the run.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};
use ignore::WalkBuilder;
use regex::Regex;
use tracing::{debug, warn};

use crate::config::Options;
use crate::error::Result;
use crate::strategy::Strategy;

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("invalid blank run pattern"));

/// Collapses runs of three or more consecutive newlines down to exactly two.
///
/// This is a textual tidy-up for blank lines left behind where a
/// comment-only line was removed. It runs after a strategy, not inside one,
/// and leaves single structural blank lines alone.
pub fn collapse_blank_runs(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").into_owned()
}

/// Counters for one run.
#[derive(Debug, Default)]
pub struct RunStats {
    /// Files a strategy was applied to
    pub scanned: AtomicUsize,
    /// Files whose contents changed
    pub changed: AtomicUsize,
    /// Files skipped as unreadable or not valid UTF-8
    pub skipped: AtomicUsize,
    /// Walk and write failures
    pub errors: AtomicUsize,
}

impl RunStats {
    pub fn scanned(&self) -> usize {
        self.scanned.load(Ordering::Relaxed)
    }

    pub fn changed(&self) -> usize {
        self.changed.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }
}

/// Walks the root and strips comments from every candidate file.
pub async fn run(options: &Options) -> Result<RunStats> {
    let stats = RunStats::default();
    let files = collect_files(options, &stats);

    stream::iter(files)
        .map(|(path, strategy)| process_file(path, strategy, options, &stats))
        .buffer_unordered(options.concurrency)
        .collect::<Vec<()>>()
        .await;

    Ok(stats)
}

/// Collects `(path, strategy)` pairs for every file the walk yields that
/// passes the exclusion filters and maps to a known strategy.
fn collect_files(options: &Options, stats: &RunStats) -> Vec<(PathBuf, Strategy)> {
    let exclude_dirs = options.exclude_dirs.clone();
    let verbose = options.verbose;
    let root = options.root.clone();

    let walker = WalkBuilder::new(&options.root)
        .hidden(false)
        .ignore(false)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(false)
        .require_git(false)
        .parents(false)
        .filter_entry(move |entry| {
            if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
                return true;
            }
            let excluded = entry
                .file_name()
                .to_str()
                .is_some_and(|name| exclude_dirs.contains(name));
            if excluded && verbose {
                // Import kept local: OwoColorize's blanket `hidden` method
                // would otherwise shadow `WalkBuilder::hidden` above.
                use owo_colors::OwoColorize;
                let rel = entry.path().strip_prefix(&root).unwrap_or(entry.path());
                println!("{} {}/", "ignored".dimmed(), rel.display());
            }
            !excluded
        })
        .build();

    let mut files = Vec::new();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                warn!("walk error: {err}");
                stats.errors.fetch_add(1, Ordering::Relaxed);
                continue;
            }
        };

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.into_path();

        let excluded_name = path
            .file_name()
            .is_some_and(|name| options.exclude_files.is_match(name));
        if excluded_name {
            if options.verbose {
                use owo_colors::OwoColorize;
                println!("{} {}", "ignored".dimmed(), relative(&path, options).display());
            }
            continue;
        }

        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let ext = ext.to_lowercase();
        if !options.extensions.contains(&ext) {
            debug!("extension not selected: {}", path.display());
            continue;
        }

        let Some(strategy) = Strategy::for_extension(&ext) else {
            debug!("no strategy for .{ext}: {}", path.display());
            continue;
        };

        files.push((path, strategy));
    }

    files
}

/// Strips one file. Read or write failures are counted, never propagated.
async fn process_file(path: PathBuf, strategy: Strategy, options: &Options, stats: &RunStats) {
    use owo_colors::OwoColorize;

    let raw = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::InvalidData => {
            warn!("not valid UTF-8, skipped: {}", path.display());
            stats.skipped.fetch_add(1, Ordering::Relaxed);
            return;
        }
        Err(err) => {
            warn!("cannot read {}: {err}", path.display());
            stats.skipped.fetch_add(1, Ordering::Relaxed);
            return;
        }
    };

    stats.scanned.fetch_add(1, Ordering::Relaxed);

    let transformed = collapse_blank_runs(&strategy.apply(&raw));
    if transformed == raw {
        return;
    }
    stats.changed.fetch_add(1, Ordering::Relaxed);

    let rel = relative(&path, options);
    if options.dry_run {
        if !options.quiet {
            println!("{} would clean {}", "[dry-run]".yellow(), rel.display().to_string().cyan());
        }
        return;
    }

    match tokio::fs::write(&path, &transformed).await {
        Ok(()) => {
            if !options.quiet {
                println!("{} {}", "Cleaned".green(), rel.display().to_string().cyan());
            }
        }
        Err(err) => {
            warn!("cannot write {}: {err}", path.display());
            stats.errors.fetch_add(1, Ordering::Relaxed);
        }
    }
}

fn relative<'a>(path: &'a Path, options: &Options) -> &'a Path {
    path.strip_prefix(&options.root).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use std::fs;

    fn options_for(dir: &Path, extra: &[&str]) -> Options {
        let mut args = vec!["decomment", "--dir", dir.to_str().unwrap(), "--quiet"];
        args.extend_from_slice(extra);
        Options::from_cli(&Cli::parse_from(args)).unwrap()
    }

    #[test]
    fn collapses_long_blank_runs_only() {
        assert_eq!(collapse_blank_runs("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_runs("a\n\n\nb"), "a\n\nb");
        // Two newlines (one blank line) are structural and stay.
        assert_eq!(collapse_blank_runs("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_runs("a\nb"), "a\nb");
    }

    #[tokio::test]
    async fn strips_comments_and_reports_change() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("app.js");
        fs::write(&file, "let a = 1; // gone\n").unwrap();

        let stats = run(&options_for(tmp.path(), &[])).await.unwrap();

        assert_eq!(stats.scanned(), 1);
        assert_eq!(stats.changed(), 1);
        assert_eq!(fs::read_to_string(&file).unwrap(), "let a = 1; \n");
    }

    #[tokio::test]
    async fn dry_run_leaves_files_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("app.js");
        let original = "let a = 1; // gone\n";
        fs::write(&file, original).unwrap();

        let stats = run(&options_for(tmp.path(), &["--dry-run"])).await.unwrap();

        assert_eq!(stats.changed(), 1);
        assert_eq!(fs::read_to_string(&file).unwrap(), original);
    }

    #[tokio::test]
    async fn unchanged_files_are_not_counted_as_changed() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("clean.js"), "let a = 1;\n").unwrap();

        let stats = run(&options_for(tmp.path(), &[])).await.unwrap();

        assert_eq!(stats.scanned(), 1);
        assert_eq!(stats.changed(), 0);
    }

    #[tokio::test]
    async fn excluded_directories_are_pruned() {
        let tmp = tempfile::tempdir().unwrap();
        let nm = tmp.path().join("node_modules");
        fs::create_dir(&nm).unwrap();
        let vendored = nm.join("dep.js");
        let contents = "let a = 1; // untouched\n";
        fs::write(&vendored, contents).unwrap();

        let stats = run(&options_for(tmp.path(), &[])).await.unwrap();

        assert_eq!(stats.scanned(), 0);
        assert_eq!(fs::read_to_string(&vendored).unwrap(), contents);
    }

    #[tokio::test]
    async fn hidden_directories_are_still_walked() {
        let tmp = tempfile::tempdir().unwrap();
        let hidden = tmp.path().join(".hidden");
        fs::create_dir(&hidden).unwrap();
        let file = hidden.join("a.js");
        fs::write(&file, "let a = 1; // gone\n").unwrap();

        let stats = run(&options_for(tmp.path(), &[])).await.unwrap();

        assert_eq!(stats.scanned(), 1);
        assert_eq!(fs::read_to_string(&file).unwrap(), "let a = 1; \n");
    }

    #[tokio::test]
    async fn excluded_file_patterns_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let minified = tmp.path().join("bundle.min.js");
        let contents = "var a=1;// packed\n";
        fs::write(&minified, contents).unwrap();

        let stats = run(&options_for(tmp.path(), &[])).await.unwrap();

        assert_eq!(stats.scanned(), 0);
        assert_eq!(fs::read_to_string(&minified).unwrap(), contents);
    }

    #[tokio::test]
    async fn gitignore_rules_are_honored() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(".gitignore"), "generated.js\n").unwrap();
        let generated = tmp.path().join("generated.js");
        let contents = "let a = 1; // untouched\n";
        fs::write(&generated, contents).unwrap();
        fs::write(tmp.path().join("app.js"), "let b = 2; // gone\n").unwrap();

        let stats = run(&options_for(tmp.path(), &[])).await.unwrap();

        assert_eq!(stats.scanned(), 1);
        assert_eq!(fs::read_to_string(&generated).unwrap(), contents);
    }

    #[tokio::test]
    async fn non_utf8_files_are_skipped_not_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("weird.js"), [0xff, 0xfe, 0x2f, 0x2f]).unwrap();
        fs::write(tmp.path().join("app.js"), "let a = 1; // gone\n").unwrap();

        let stats = run(&options_for(tmp.path(), &[])).await.unwrap();

        assert_eq!(stats.skipped(), 1);
        assert_eq!(stats.changed(), 1);
    }

    #[tokio::test]
    async fn unknown_extensions_are_left_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let rs = tmp.path().join("main.rs");
        let contents = "fn main() {} // kept\n";
        fs::write(&rs, contents).unwrap();

        let stats = run(&options_for(tmp.path(), &[])).await.unwrap();

        assert_eq!(stats.scanned(), 0);
        assert_eq!(fs::read_to_string(&rs).unwrap(), contents);
    }

    #[tokio::test]
    async fn css_files_use_the_block_strategy() {
        let tmp = tempfile::tempdir().unwrap();
        let css = tmp.path().join("style.css");
        fs::write(&css, "a { color: red; } /* note */\n").unwrap();

        run(&options_for(tmp.path(), &[])).await.unwrap();

        assert_eq!(fs::read_to_string(&css).unwrap(), "a { color: red; } \n");
    }

    #[tokio::test]
    async fn blank_runs_left_by_comments_are_collapsed() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("app.js");
        fs::write(&file, "let a = 1;\n// one\n// two\n\nlet b = 2;\n").unwrap();

        run(&options_for(tmp.path(), &[])).await.unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "let a = 1;\n\nlet b = 2;\n");
    }
}
