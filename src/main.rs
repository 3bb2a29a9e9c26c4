//! decomment - strips removable comments from the files of a project tree.
//!
//! This is the main entry point for the decomment binary.

use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod error;
mod processor;
mod scanner;
mod strategy;

use cli::Cli;
use config::Options;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse CLI arguments and resolve run options
    let cli = Cli::parse();
    let options = Options::from_cli(&cli)?;

    if !options.quiet {
        print_banner(&options);
    }

    let stats = processor::run(&options).await?;

    if !options.quiet {
        print_summary(&stats, options.dry_run);
    }

    Ok(())
}

fn print_banner(options: &Options) {
    let mut extensions: Vec<&str> = options.extensions.iter().map(String::as_str).collect();
    extensions.sort_unstable();
    let mut dirs: Vec<&str> = options.exclude_dirs.iter().map(String::as_str).collect();
    dirs.sort_unstable();

    println!("{}", "decomment".bright_cyan().bold());
    println!("  root:          {}", options.root.display());
    println!("  extensions:    {}", extensions.join(", "));
    println!("  exclude dirs:  {}", dirs.join(", "));
    println!("  exclude files: {}", options.exclude_file_patterns.join(", "));
    if options.dry_run {
        println!("\n{}", "dry run: no files will be modified".yellow().bold());
    }
    println!();
}

fn print_summary(stats: &processor::RunStats, dry_run: bool) {
    println!();
    let changed = if dry_run {
        format!("{} would change", stats.changed())
    } else {
        format!("{} changed", stats.changed())
    };
    println!(
        "{} {} scanned, {}, {} skipped, {} errors",
        "Done:".green().bold(),
        stats.scanned(),
        changed,
        stats.skipped(),
        stats.errors()
    );
}
