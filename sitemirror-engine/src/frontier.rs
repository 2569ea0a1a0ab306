use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use url::Url;

/// One unit of scheduling: a URL and the depth it was discovered at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    pub url: Url,
    pub depth: usize,
}

impl CrawlTask {
    pub fn new(url: Url, depth: usize) -> Self {
        Self { url, depth }
    }
}

/// Work queue shared by the worker pool.
///
/// `pending` counts tasks pushed but not yet completed. A task's children are
/// pushed before the task itself completes, so the count only reaches zero
/// once the whole crawl is finished. At that point the sender is dropped and
/// every worker's `next()` returns `None`.
pub(crate) struct Frontier {
    sender: Mutex<Option<UnboundedSender<CrawlTask>>>,
    receiver: tokio::sync::Mutex<UnboundedReceiver<CrawlTask>>,
    pending: AtomicUsize,
    queued: AtomicUsize,
    peak_queued: AtomicUsize,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender: Mutex::new(Some(sender)),
            receiver: tokio::sync::Mutex::new(receiver),
            pending: AtomicUsize::new(0),
            queued: AtomicUsize::new(0),
            peak_queued: AtomicUsize::new(0),
        }
    }

    /// Enqueue a task. Returns false if the frontier is already closed.
    pub(crate) fn push(&self, task: CrawlTask) -> bool {
        self.pending.fetch_add(1, Ordering::SeqCst);

        let sent = {
            let sender = self.sender.lock().unwrap_or_else(|e| e.into_inner());
            sender.as_ref().is_some_and(|tx| tx.send(task).is_ok())
        };

        if sent {
            let now = self.queued.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_queued.fetch_max(now, Ordering::SeqCst);
        } else {
            self.complete();
        }
        sent
    }

    /// Next task, or `None` once every pushed task has completed.
    pub(crate) async fn next(&self) -> Option<CrawlTask> {
        let task = self.receiver.lock().await.recv().await;
        if task.is_some() {
            self.queued.fetch_sub(1, Ordering::SeqCst);
        }
        task
    }

    /// Mark one task as finished.
    pub(crate) fn complete(&self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.close();
        }
    }

    /// Drop the sender; workers drain what is queued and stop.
    pub(crate) fn close(&self) {
        self.sender.lock().unwrap_or_else(|e| e.into_inner()).take();
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    pub(crate) fn peak_queued(&self) -> usize {
        self.peak_queued.load(Ordering::SeqCst)
    }
}

/// Completes its task on drop, so a panicking fetch cannot stall the run.
pub(crate) struct PendingGuard<'a> {
    frontier: &'a Frontier,
}

impl<'a> PendingGuard<'a> {
    pub(crate) fn new(frontier: &'a Frontier) -> Self {
        Self { frontier }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.frontier.complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(path: &str, depth: usize) -> CrawlTask {
        CrawlTask::new(Url::parse(&format!("https://example.com{}", path)).unwrap(), depth)
    }

    #[tokio::test]
    async fn test_closes_when_last_task_completes() {
        let frontier = Frontier::new();
        assert!(frontier.push(task("/", 0)));

        let first = frontier.next().await.unwrap();
        assert_eq!(first.depth, 0);

        // child pushed before the parent completes keeps the frontier open
        assert!(frontier.push(task("/a", 1)));
        frontier.complete();
        assert_eq!(frontier.pending(), 1);

        let child = frontier.next().await.unwrap();
        assert_eq!(child.url.path(), "/a");
        frontier.complete();

        assert_eq!(frontier.pending(), 0);
        assert!(frontier.next().await.is_none());
        assert!(!frontier.push(task("/late", 0)));
        assert_eq!(frontier.pending(), 0);
    }

    #[tokio::test]
    async fn test_guard_completes_on_drop() {
        let frontier = Frontier::new();
        frontier.push(task("/", 0));
        let _ = frontier.next().await;
        {
            let _guard = PendingGuard::new(&frontier);
        }
        assert!(frontier.next().await.is_none());
    }

    #[tokio::test]
    async fn test_peak_queued_tracks_backlog() {
        let frontier = Frontier::new();
        for i in 0..5 {
            frontier.push(task(&format!("/{}", i), 0));
        }
        for _ in 0..5 {
            frontier.next().await.unwrap();
        }
        assert_eq!(frontier.peak_queued(), 5);
    }
}
