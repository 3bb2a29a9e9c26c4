//! CLI argument parsing for decomment.

use clap::Parser;

/// Default directory names that are never descended into.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    ".vscode",
    ".idea",
];

/// Default file-name glob patterns that are never touched.
pub const DEFAULT_EXCLUDE_FILES: &[&str] =
    &["package-lock.json", "*.log", "*.min.js", "*.min.css", "*.map"];

/// Default file extensions (without the dot) that are processed.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "mjs", "cjs", "css", "scss", "less", "html", "vue", "svelte",
    "json", "md", "yaml", "yml", "py", "java", "cs", "php", "rb", "go", "swift", "kt",
];

/// decomment - strips removable comments from the files of a project tree
#[derive(Parser, Debug)]
#[command(name = "decomment")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Removes comments from the selected files while leaving strings, \
                  template literals, regex literals and doc comments untouched."
)]
pub struct Cli {
    /// Root directory to process
    #[arg(short, long, default_value = ".")]
    pub dir: String,

    /// Directory names to exclude from the walk
    #[arg(
        long,
        value_name = "NAME",
        num_args = 1..,
        default_values_t = DEFAULT_EXCLUDE_DIRS.iter().map(ToString::to_string)
    )]
    pub exclude_dirs: Vec<String>,

    /// File glob patterns to exclude
    #[arg(
        long,
        value_name = "GLOB",
        num_args = 1..,
        default_values_t = DEFAULT_EXCLUDE_FILES.iter().map(ToString::to_string)
    )]
    pub exclude_files: Vec<String>,

    /// File extensions to process (without the dot)
    #[arg(
        long = "extensions",
        alias = "ext",
        value_name = "EXT",
        num_args = 1..,
        default_values_t = DEFAULT_EXTENSIONS.iter().map(ToString::to_string)
    )]
    pub extensions: Vec<String>,

    /// Report what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Log ignored files and directories
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress per-file output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Number of files processed concurrently (default: CPU count * 2)
    #[arg(long)]
    pub concurrency: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let cli = Cli::parse_from(["decomment"]);
        assert_eq!(cli.dir, ".");
        assert!(!cli.dry_run);
        assert!(cli.exclude_dirs.iter().any(|d| d == "node_modules"));
        assert!(cli.exclude_files.iter().any(|p| p == "*.min.js"));
        assert!(cli.extensions.iter().any(|e| e == "js"));
        assert!(cli.concurrency.is_none());
    }

    #[test]
    fn list_flags_replace_the_defaults() {
        let cli = Cli::parse_from([
            "decomment",
            "--extensions",
            "js",
            "ts",
            "--exclude-dirs",
            "vendor",
            "tmp",
            "--dry-run",
        ]);
        assert_eq!(cli.extensions, ["js", "ts"]);
        assert_eq!(cli.exclude_dirs, ["vendor", "tmp"]);
        assert!(cli.dry_run);
    }

    #[test]
    fn help_shows_the_default_lists() {
        use clap::CommandFactory;

        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("node_modules"));
        assert!(help.contains("package-lock.json"));
        assert!(help.contains("*.min.js"));
    }
}
