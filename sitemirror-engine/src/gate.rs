use crate::error::{MirrorError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting gate bounding the number of in-flight HTTP fetches.
///
/// Only fetches are bounded. Queued tasks, parsing and file writes happen
/// outside the gate.
#[derive(Debug)]
pub struct FetchGate {
    semaphore: Arc<Semaphore>,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

/// A held slot. Dropping it frees the slot.
#[derive(Debug)]
pub struct FetchSlot {
    _permit: OwnedSemaphorePermit,
    in_flight: Arc<AtomicUsize>,
}

impl FetchGate {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(MirrorError::InvalidConfig(
                "concurrency limit must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Wait until a slot is free and take it.
    pub async fn acquire(&self) -> FetchSlot {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .unwrap_or_else(|_| unreachable!("fetch gate semaphore is never closed"));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        FetchSlot {
            _permit: permit,
            in_flight: self.in_flight.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of slots held at once since the gate was created.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl FetchSlot {
    /// Free the slot explicitly.
    pub fn release(self) {}
}

impl Drop for FetchSlot {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
