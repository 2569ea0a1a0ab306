use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// How a fetched response was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    /// Parsed, rewritten and re-serialized.
    Html,
    /// Streamed to disk byte for byte.
    Asset,
}

/// Outcome of one claimed URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchRecord {
    pub url: String,
    pub depth: usize,
    pub status_code: u16,
    pub content_type: Option<String>,
    pub kind: Option<ContentKind>,
    pub local_path: Option<PathBuf>,
    pub bytes_written: u64,
    pub pages_found: usize,
    pub resources_found: usize,
    pub links_rewritten: usize,
    pub elapsed: Duration,
    pub error: Option<String>,
}

impl FetchRecord {
    pub fn new(url: String, depth: usize) -> Self {
        Self {
            url,
            depth,
            status_code: 0,
            content_type: None,
            kind: None,
            local_path: None,
            bytes_written: 0,
            pages_found: 0,
            resources_found: 0,
            links_rewritten: 0,
            elapsed: Duration::from_secs(0),
            error: None,
        }
    }

    pub fn is_saved(&self) -> bool {
        self.error.is_none() && self.local_path.is_some()
    }
}

/// Everything one mirror run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorReport {
    pub start_url: String,
    pub root_dir: PathBuf,
    pub max_depth: usize,
    pub concurrency: usize,
    pub records: Vec<FetchRecord>,
    pub elapsed: Duration,
    pub peak_in_flight: usize,
    pub peak_queued: usize,
}

impl MirrorReport {
    /// Number of URLs a fetch was issued for.
    pub fn fetched(&self) -> usize {
        self.records.len()
    }

    pub fn saved(&self) -> usize {
        self.records.iter().filter(|r| r.is_saved()).count()
    }

    pub fn failed(&self) -> usize {
        self.records.iter().filter(|r| r.error.is_some()).count()
    }

    pub fn bytes_written(&self) -> u64 {
        self.records.iter().map(|r| r.bytes_written).sum()
    }
}
