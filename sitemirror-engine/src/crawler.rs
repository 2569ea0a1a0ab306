use crate::context::RunContext;
use crate::error::{MirrorError, Result};
use crate::fetch::fetch_task;
use crate::frontier::{CrawlTask, PendingGuard};
use crate::gate::FetchGate;
use crate::result::{FetchRecord, MirrorReport};
use crate::target::MirrorTarget;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, info};

pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;
pub type ResultCallback = Arc<dyn Fn(FetchRecord) + Send + Sync>;

pub const DEFAULT_MAX_DEPTH: usize = 1;
pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct Crawler {
    max_depth: usize,
    concurrency: usize,
    workers: Option<usize>,
    timeout_secs: u64,
    output_dir: PathBuf,
    user_agent: String,
    progress_callback: Option<ProgressCallback>,
    result_callback: Option<ResultCallback>,
}

impl Crawler {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            concurrency: DEFAULT_CONCURRENCY,
            workers: None,
            timeout_secs,
            output_dir: PathBuf::from("."),
            user_agent: format!("sitemirror/{}", env!("CARGO_PKG_VERSION")),
            progress_callback: None,
            result_callback: None,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Maximum number of HTTP fetches in flight at once.
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit;
        self
    }

    /// Size of the worker pool draining the task queue. Defaults to the
    /// concurrency limit.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Directory the `<host>` mirror root is created in.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn with_result_callback(mut self, callback: ResultCallback) -> Self {
        self.result_callback = Some(callback);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    fn build_client(&self) -> Result<Client> {
        let client = Client::builder()
            .user_agent(&self.user_agent)
            .timeout(Duration::from_secs(self.timeout_secs))
            .connect_timeout(Duration::from_secs((self.timeout_secs / 2).max(1)))
            .pool_max_idle_per_host(self.concurrency)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(client)
    }

    /// Mirror the site at `start_url` into `<output_dir>/<host>`.
    ///
    /// Individual fetch failures are recorded in the report; only setup
    /// failures return an error.
    pub async fn mirror(&self, start_url: &str) -> Result<MirrorReport> {
        let target = MirrorTarget::parse(start_url, &self.output_dir)?;
        self.mirror_target(target).await
    }

    pub async fn mirror_target(&self, target: MirrorTarget) -> Result<MirrorReport> {
        let workers = self.workers.unwrap_or(self.concurrency);
        if workers == 0 {
            return Err(MirrorError::InvalidConfig(
                "worker count must be at least 1".to_string(),
            ));
        }
        let gate = FetchGate::new(self.concurrency)?;
        let client = self.build_client()?;

        info!(
            "Mirroring {} into {} (depth {}, {} concurrent fetches, {} workers)",
            target.start_url(),
            target.root_dir().display(),
            self.max_depth,
            self.concurrency,
            workers
        );

        tokio::fs::create_dir_all(target.root_dir())
            .await
            .map_err(|e| MirrorError::fs(target.root_dir(), e))?;

        let started = Instant::now();
        let ctx = Arc::new(RunContext::new(target, client, self.max_depth, gate));
        ctx.spawn(CrawlTask::new(ctx.target.start_url().clone(), 0));

        let mut worker_set = JoinSet::new();
        for worker_id in 0..workers {
            let ctx = ctx.clone();
            let progress_cb = self.progress_callback.clone();
            let result_cb = self.result_callback.clone();

            worker_set.spawn(async move {
                debug!("Worker {} started", worker_id);

                while let Some(task) = ctx.frontier.next().await {
                    let _pending = PendingGuard::new(&ctx.frontier);

                    if let Some(ref callback) = progress_cb {
                        callback(worker_id, task.url.to_string());
                    }

                    let record = fetch_task(&ctx, &task).await;

                    if let Some(ref callback) = result_cb {
                        callback(record.clone());
                    }
                    ctx.results.lock().await.push(record);
                }

                debug!("Worker {} finished", worker_id);
            });
        }

        // Workers are joined in completion order so a failed one is seen at once
        while let Some(joined) = worker_set.join_next().await {
            if let Err(e) = joined {
                ctx.frontier.close();
                worker_set.abort_all();
                while worker_set.join_next().await.is_some() {}
                return Err(MirrorError::Join(e));
            }
        }

        let records = std::mem::take(&mut *ctx.results.lock().await);
        let report = MirrorReport {
            start_url: ctx.target.start_url().to_string(),
            root_dir: ctx.target.root_dir().to_path_buf(),
            max_depth: self.max_depth,
            concurrency: self.concurrency,
            records,
            elapsed: started.elapsed(),
            peak_in_flight: ctx.gate.peak(),
            peak_queued: ctx.frontier.peak_queued(),
        };

        info!(
            "Mirror complete. {} fetched, {} saved, {} failed in {:?}",
            report.fetched(),
            report.saved(),
            report.failed(),
            report.elapsed
        );
        Ok(report)
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}
