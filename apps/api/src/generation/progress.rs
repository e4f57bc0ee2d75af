//! Cosmetic per-item progress for the running batch.
//!
//! Values are animated on a timer and do not measure the provider call. An
//! item moves 0 → 90 in fixed steps while its call is pending, then jumps to
//! 100 on success or to the failure sentinel -1.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::generation::content_type::ContentType;

/// Composite key `"{keyword}-{type}"` → percentage, or [`PROGRESS_FAILED`].
pub type GenerationProgress = HashMap<String, i32>;

pub const PROGRESS_FAILED: i32 = -1;
pub const PROGRESS_COMPLETE: i32 = 100;
const PROGRESS_STEP: i32 = 10;
const PROGRESS_CEILING: i32 = 90;

pub fn progress_key(keyword: &str, content_type: ContentType) -> String {
    format!("{}-{}", keyword.trim(), content_type)
}

#[derive(Clone)]
pub struct ProgressTracker {
    values: Arc<RwLock<GenerationProgress>>,
    tick: Duration,
}

impl ProgressTracker {
    pub fn new(tick: Duration) -> Self {
        Self {
            values: Arc::new(RwLock::new(GenerationProgress::new())),
            tick,
        }
    }

    pub async fn reset(&self) {
        self.values.write().await.clear();
    }

    pub async fn snapshot(&self) -> GenerationProgress {
        self.values.read().await.clone()
    }

    /// Sets `key` to 0 and starts animating it until the ticker is finished.
    pub async fn start(&self, key: String) -> ProgressTicker {
        self.values.write().await.insert(key.clone(), 0);

        let values = Arc::clone(&self.values);
        let tick = self.tick;
        let ticker_key = key.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + tick, tick);
            loop {
                interval.tick().await;
                let mut map = values.write().await;
                // Terminal values (100, -1) are never overwritten by a late tick.
                match map.get_mut(&ticker_key) {
                    Some(value) if (0..PROGRESS_CEILING).contains(value) => {
                        *value = (*value + PROGRESS_STEP).min(PROGRESS_CEILING);
                    }
                    _ => {}
                }
            }
        });

        ProgressTicker {
            key,
            handle,
            values: Arc::clone(&self.values),
        }
    }
}

/// Animation for one in-flight item. Aborted on finish or drop.
pub struct ProgressTicker {
    key: String,
    handle: JoinHandle<()>,
    values: Arc<RwLock<GenerationProgress>>,
}

impl ProgressTicker {
    pub async fn finish(self, succeeded: bool) -> i32 {
        self.handle.abort();
        let value = if succeeded {
            PROGRESS_COMPLETE
        } else {
            PROGRESS_FAILED
        };
        self.values.write().await.insert(self.key.clone(), value);
        value
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
