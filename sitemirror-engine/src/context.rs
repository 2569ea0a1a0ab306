use crate::frontier::{CrawlTask, Frontier};
use crate::gate::FetchGate;
use crate::result::FetchRecord;
use crate::target::MirrorTarget;
use crate::visited::VisitedSet;
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::debug;

/// State shared by every worker for the duration of one run.
///
/// Created fresh by each call to `Crawler::mirror` and dropped when the run
/// returns; nothing survives between runs.
pub(crate) struct RunContext {
    pub(crate) target: MirrorTarget,
    pub(crate) client: Client,
    pub(crate) max_depth: usize,
    pub(crate) visited: VisitedSet,
    pub(crate) gate: FetchGate,
    pub(crate) frontier: Frontier,
    pub(crate) results: Mutex<Vec<FetchRecord>>,
}

impl RunContext {
    pub(crate) fn new(
        target: MirrorTarget,
        client: Client,
        max_depth: usize,
        gate: FetchGate,
    ) -> Self {
        Self {
            target,
            client,
            max_depth,
            visited: VisitedSet::new(),
            gate,
            frontier: Frontier::new(),
            results: Mutex::new(Vec::new()),
        }
    }

    /// Claim the task's URL and queue it. Already-claimed URLs are dropped.
    pub(crate) fn spawn(&self, task: CrawlTask) -> bool {
        if !self.visited.try_claim(&task.url) {
            return false;
        }
        debug!("Queuing {} at depth {}", task.url, task.depth);
        self.frontier.push(task)
    }
}
