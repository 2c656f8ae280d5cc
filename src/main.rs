use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};

use jsonmerge::cli::{self, Args, CliResult, CliUtils, Commands, ListArgs, MergeArgs};
use jsonmerge::{DirectoryLister, JsonMerger, MergeEvent, MergeStatistics};

fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(err) = run(&args) {
        cli::handle_error(&err);
        std::process::exit(1);
    }

    Ok(())
}

fn run(args: &Args) -> CliResult<()> {
    match &args.command {
        Commands::List(list) => run_list(list, args),
        Commands::Merge(merge) => run_merge(merge, args),
    }
}

fn run_list(list: &ListArgs, args: &Args) -> CliResult<()> {
    let lister = DirectoryLister::new(list.to_config()?);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut count = 0usize;

    for entry in lister.iter()? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if list.skip_unreadable => {
                CliUtils::show_warning(&format!("Skipped: {}", err.user_message()), args.quiet);
                continue;
            }
            Err(err) => return Err(err),
        };

        if let Err(e) = writeln!(out, "{}", entry.display()) {
            // Reader went away (e.g. piped into head)
            if e.kind() == io::ErrorKind::BrokenPipe {
                return Ok(());
            }
            return Err(anyhow::Error::new(e)
                .context("failed to write listing to stdout")
                .into());
        }
        count += 1;
    }

    out.flush().context("failed to flush stdout")?;

    if list.count && !args.quiet {
        eprintln!("{} files", count);
    }

    Ok(())
}

fn run_merge(merge: &MergeArgs, args: &Args) -> CliResult<()> {
    let config = merge.to_config()?;
    let merger = JsonMerger::new(config);
    let mut progress = None;

    let report = merger.merge_with(|event| match event {
        MergeEvent::Discovered { total } => {
            CliUtils::show_verbose(
                &format!(
                    "Found {} JSON files in {}",
                    total,
                    merger.config().input_dir.display()
                ),
                args.verbose,
            );
            progress = Some(CliUtils::create_progress_bar(
                total as u64,
                args.quiet || args.verbose,
            ));
        }
        MergeEvent::Merged {
            key,
            file_name,
            replaced,
        } => {
            if let Some(pb) = &progress {
                pb.inc(1);
            }
            let note = if replaced { " (replaced earlier value)" } else { "" };
            CliUtils::show_verbose(&format!("  {} -> \"{}\"{}", file_name, key, note), args.verbose);
        }
        MergeEvent::Skipped(skip) => {
            let message = format!("Error reading {}: {}", skip.file_name, skip.error);
            match &progress {
                Some(pb) => {
                    pb.inc(1);
                    pb.suspend(|| CliUtils::show_error(&message));
                }
                None => CliUtils::show_error(&message),
            }
        }
        MergeEvent::Written { path, bytes } => {
            if let Some(pb) = progress.take() {
                pb.finish_and_clear();
            }
            CliUtils::show_verbose(
                &format!(
                    "Wrote {} to {}",
                    CliUtils::format_file_size(bytes),
                    path.display()
                ),
                args.verbose,
            );
        }
    })?;

    if let Some(pb) = progress.take() {
        pb.finish_and_clear();
    }

    match &report.output_file {
        Some(path) => {
            CliUtils::show_success(&format!("Merged JSON saved to {}", path.display()), args.quiet)
        }
        None => CliUtils::show_success(
            &format!(
                "{} files valid, {} skipped",
                report.statistics.files_merged, report.statistics.files_skipped
            ),
            args.quiet,
        ),
    }

    if merge.stats {
        output_statistics(&report.statistics, args.quiet);
    }

    Ok(())
}

fn output_statistics(stats: &MergeStatistics, quiet: bool) {
    if quiet {
        return;
    }

    println!("\n{}", stats.summary());
    println!("Files scanned: {}", stats.files_scanned);
    println!("Files merged: {}", stats.files_merged);
    println!("Files skipped: {}", stats.files_skipped);
    if stats.keys_replaced > 0 {
        println!("Keys replaced: {}", stats.keys_replaced);
    }
    println!(
        "Input size: {}",
        CliUtils::format_file_size(stats.input_size_bytes)
    );
    println!(
        "Output size: {}",
        CliUtils::format_file_size(stats.output_size_bytes)
    );
    println!(
        "Processing time: {}",
        CliUtils::format_duration(std::time::Duration::from_millis(stats.processing_time_ms))
    );
    if stats.processing_time_ms > 0 {
        println!(
            "Throughput: {}/s",
            CliUtils::format_file_size(stats.throughput_bytes_per_sec() as u64)
        );
    }
    println!("Collected at: {}", stats.collected_at.to_rfc3339());
}
