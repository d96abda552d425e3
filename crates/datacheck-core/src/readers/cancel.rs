use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared flag a caller flips to abort an in-flight load.
///
/// Clones observe the same flag. The loader polls it while waiting on the
/// source and between decoded batches, so a cancel takes effect even while a
/// read is blocked.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
