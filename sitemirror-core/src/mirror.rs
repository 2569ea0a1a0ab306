use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use sitemirror_engine::{Crawler, FetchRecord, MirrorReport};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use url::Url;

/// Options for configuring a mirror run
#[derive(Debug, Clone)]
pub struct MirrorOptions {
    pub url: String,
    pub max_depth: usize,
    pub concurrency: usize,
    pub workers: Option<usize>,
    pub timeout_secs: u64,
    pub output_dir: PathBuf,
    pub show_progress_bars: bool,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_depth: sitemirror_engine::crawler::DEFAULT_MAX_DEPTH,
            concurrency: sitemirror_engine::crawler::DEFAULT_CONCURRENCY,
            workers: None,
            timeout_secs: sitemirror_engine::crawler::DEFAULT_TIMEOUT_SECS,
            output_dir: PathBuf::from("."),
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting mirror progress
pub type MirrorProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Callback for reporting individual fetch results as they come in
pub type MirrorResultCallback = Arc<dyn Fn(FetchRecord) + Send + Sync>;

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Build the engine crawler for a set of options
pub fn build_crawler(options: &MirrorOptions) -> Crawler {
    let mut crawler = Crawler::with_timeout(options.timeout_secs)
        .with_max_depth(options.max_depth)
        .with_concurrency(options.concurrency)
        .with_output_dir(options.output_dir.clone());
    if let Some(workers) = options.workers {
        crawler = crawler.with_workers(workers);
    }
    crawler
}

/// Execute a mirror run with the given options
pub async fn execute_mirror(
    options: MirrorOptions,
    progress_callback: Option<MirrorProgressCallback>,
    result_callback: Option<MirrorResultCallback>,
) -> Result<MirrorReport> {
    // Set up a single spinner for overall progress (only if enabled)
    let progress_bar = if options.show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .context("invalid progress template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting mirror...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let started_count = Arc::new(AtomicUsize::new(0));
    let failed_count = Arc::new(AtomicUsize::new(0));

    let pb_clone = progress_bar.clone();
    let started_clone = started_count.clone();
    let progress_clone = progress_callback.clone();
    let internal_progress: sitemirror_engine::ProgressCallback =
        Arc::new(move |worker_id: usize, url: String| {
            let count = started_clone.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(ref pb) = pb_clone {
                pb.set_message(format!("[{}] worker {}: {}", count, worker_id, extract_url_path(&url)));
            }
            if let Some(ref callback) = progress_clone {
                callback(url);
            }
        });

    let pb_clone = progress_bar.clone();
    let failed_clone = failed_count.clone();
    let internal_result: sitemirror_engine::ResultCallback = Arc::new(move |record: FetchRecord| {
        if let Some(ref error) = record.error {
            failed_clone.fetch_add(1, Ordering::Relaxed);
            if let Some(ref pb) = pb_clone {
                pb.println(format!("[!] {}: {}", record.url, error));
            }
        }
        if let Some(ref callback) = result_callback {
            callback(record);
        }
    });

    let crawler = build_crawler(&options)
        .with_progress_callback(internal_progress)
        .with_result_callback(internal_result);

    let report = crawler
        .mirror(&options.url)
        .await
        .with_context(|| format!("failed to mirror {}", options.url))?;

    // Finish progress bar (only if enabled)
    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Mirror complete! {} URLs fetched, {} failed",
            started_count.load(Ordering::Relaxed),
            failed_count.load(Ordering::Relaxed)
        ));
    }

    Ok(report)
}
