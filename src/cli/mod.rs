//! Command-line interface module

use clap::{Args as ClapArgs, Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{MergeError, MergeErrorKind, MergeResult};
use crate::listing::ListerConfig;
use crate::merge::config::DEFAULT_INDENT;
use crate::merge::MergeConfig;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "jsonmerge")]
#[command(about = "List directory trees and merge per-company JSON files")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Print per-file progress
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Recursively list every file under a directory, relative to it
    List(ListArgs),
    /// Merge the *.json files of a directory into one JSON object
    Merge(MergeArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ListArgs {
    /// Root directory to walk
    pub root: PathBuf,

    /// Follow symbolic links
    #[arg(long)]
    pub follow_links: bool,

    /// Skip unreadable subdirectories instead of failing
    #[arg(long)]
    pub skip_unreadable: bool,

    /// Walk directories in file-name order
    #[arg(long)]
    pub sort: bool,

    /// Print the number of files found to stderr
    #[arg(long)]
    pub count: bool,
}

impl ListArgs {
    pub fn to_config(&self) -> MergeResult<ListerConfig> {
        let config = ListerConfig::new(&self.root)
            .with_follow_links(self.follow_links)
            .with_skip_unreadable(self.skip_unreadable)
            .with_sort(self.sort);

        config
            .validate()
            .map_err(|e| MergeError::operation(MergeErrorKind::configuration(e)))?;
        Ok(config)
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct MergeArgs {
    /// Directory containing the per-company .json files
    pub input_dir: PathBuf,

    /// Merged output file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Spaces per indentation level (0-8, default: 4)
    #[arg(long)]
    pub indent: Option<u8>,

    /// Keep directory order instead of sorting by file name
    #[arg(long)]
    pub no_sort: bool,

    /// Write the output in place instead of via a temporary file
    #[arg(long)]
    pub no_atomic: bool,

    /// Only parse and report, don't write the output
    #[arg(long)]
    pub validate_only: bool,

    /// Output merge statistics
    #[arg(long)]
    pub stats: bool,
}

impl MergeArgs {
    /// Create merge configuration from CLI arguments
    pub fn to_config(&self) -> MergeResult<MergeConfig> {
        let config = MergeConfig {
            input_dir: self.input_dir.clone(),
            output_file: self.output.clone(),
            indent_size: self.indent.unwrap_or(DEFAULT_INDENT),
            sort_by_name: !self.no_sort,
            atomic_write: !self.no_atomic,
            validate_only: self.validate_only,
        };

        config
            .validate()
            .map_err(|e| MergeError::operation(MergeErrorKind::configuration(e)))?;

        Ok(config)
    }
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Create a progress bar for file processing. Hidden in quiet mode.
    pub fn create_progress_bar(total: u64, quiet: bool) -> indicatif::ProgressBar {
        if quiet {
            return indicatif::ProgressBar::hidden();
        }

        let pb = indicatif::ProgressBar::new(total);
        if let Ok(style) = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("{} {}", Self::marker("✓", MarkerColor::Green), message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("{} {}", Self::marker("✗", MarkerColor::Red), message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("{} {}", Self::marker("⚠", MarkerColor::Yellow), message);
        }
    }

    /// Show a progress detail (only in verbose mode)
    pub fn show_verbose(message: &str, verbose: bool) {
        if verbose {
            eprintln!("{}", style(message).dim());
        }
    }

    /// Check if output should be colored
    pub fn should_use_color() -> bool {
        atty::is(atty::Stream::Stdout) && std::env::var("NO_COLOR").is_err()
    }

    fn marker(symbol: &str, color: MarkerColor) -> String {
        if !Self::should_use_color() {
            return symbol.to_string();
        }
        let styled = match color {
            MarkerColor::Green => style(symbol).green(),
            MarkerColor::Red => style(symbol).red(),
            MarkerColor::Yellow => style(symbol).yellow(),
        };
        styled.bold().to_string()
    }
}

#[derive(Clone, Copy)]
enum MarkerColor {
    Green,
    Red,
    Yellow,
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &MergeError) {
    CliUtils::show_error(&error.user_message());

    match error.kind() {
        Some(MergeErrorKind::NotFound { .. }) => {
            eprintln!("\nTip: Check the path; directories are not created automatically");
        }
        Some(MergeErrorKind::Io { .. }) => {
            eprintln!("\nTip: The output's parent directory must exist and be writable");
        }
        _ => {}
    }

    eprintln!("\nTry 'jsonmerge --help' for usage information.");
}

/// Command execution result
pub type CliResult<T> = Result<T, MergeError>;
