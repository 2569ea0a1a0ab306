use anyhow::{Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use sitemirror_core::mirror::{MirrorOptions, execute_mirror};
use sitemirror_core::report::{ReportFormat, format_duration, generate_mirror_report};
use sitemirror_engine::MirrorTarget;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Normalise a user supplied start URL, assuming https when no scheme is given
pub fn normalize_start_url(input: &str) -> Result<String> {
    if input.trim().is_empty() {
        bail!("URL is required");
    }
    let target = MirrorTarget::parse(input, Path::new(""))?;
    Ok(target.start_url().to_string())
}

/// Expand `~` and environment variables in the output directory
pub fn resolve_output_dir(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Turn parsed arguments into mirror options
pub fn options_from_matches(matches: &ArgMatches) -> Result<MirrorOptions> {
    let url = matches
        .get_one::<String>("url")
        .map(String::as_str)
        .unwrap_or_default();
    let output = matches
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or(".");

    let concurrency = *matches.get_one::<usize>("concurrency").unwrap_or(&5);
    let workers = matches.get_one::<usize>("workers").copied();
    if concurrency == 0 || workers == Some(0) {
        bail!("--concurrency and --workers must be at least 1");
    }

    Ok(MirrorOptions {
        url: normalize_start_url(url)?,
        max_depth: *matches.get_one::<usize>("depth").unwrap_or(&1),
        concurrency,
        workers,
        timeout_secs: *matches.get_one::<u64>("timeout").unwrap_or(&30),
        output_dir: resolve_output_dir(output)?,
        show_progress_bars: !matches.get_flag("quiet"),
    })
}

pub async fn handle_mirror(matches: &ArgMatches) -> Result<()> {
    // Logs go to stderr; stdout carries the report only
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let options = options_from_matches(matches)?;
    let quiet = !options.show_progress_bars;
    let format = report_format(matches);
    let json = format == ReportFormat::Json;

    // In JSON mode stdout must stay a single parseable document
    let status = |line: String| {
        if json {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    };

    if !quiet {
        status(format!("{} {}", "Mirroring".bright_white().bold(), options.url.bright_cyan()));
        status(format!("Max depth:   {}", options.max_depth));
        status(format!("Concurrency: {}", options.concurrency));
        status(format!("Output:      {}\n", options.output_dir.display()));
    }

    let start = Instant::now();
    let report = execute_mirror(options, None, None).await?;

    if json {
        println!("{}", generate_mirror_report(&report, format));
    } else if !quiet {
        print!("{}", generate_mirror_report(&report, format));
    }

    status(format!(
        "\n{} Done in: {}",
        "✓".green().bold(),
        format_duration(start.elapsed())
    ));
    Ok(())
}

/// Report format selected on the command line
pub fn report_format(matches: &ArgMatches) -> ReportFormat {
    matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text)
}
