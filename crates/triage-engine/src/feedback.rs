//! Asynchronous outcome logging.
//!
//! Appends run as detached tasks: the response path never awaits them, and
//! a failing sink costs a metric increment, nothing more.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use triage_core::errors::TriageResult;
use triage_core::models::FeedbackRecord;
use triage_core::traits::IFeedbackSink;
use triage_observability::EngineMetrics;

/// Fire-and-forget writer in front of an `IFeedbackSink`.
#[derive(Clone)]
pub struct FeedbackLogger {
    sink: Arc<dyn IFeedbackSink>,
    metrics: Arc<EngineMetrics>,
}

impl FeedbackLogger {
    pub fn new(sink: Arc<dyn IFeedbackSink>, metrics: Arc<EngineMetrics>) -> Self {
        Self { sink, metrics }
    }

    /// Detach an append. At-most-once: a failure is swallowed and counted.
    pub fn record(&self, record: FeedbackRecord) {
        let sink = self.sink.clone();
        let metrics = self.metrics.clone();
        tokio::spawn(async move {
            if let Err(e) = sink.append(record).await {
                metrics.record_feedback_log_failure();
                tracing::debug!(error = %e, "feedback append failed");
            }
        });
    }
}

/// Buffered in-memory sink: records accumulate in a buffer that flushes to
/// the durable list once `batch_size` is reached. Reference implementation
/// and test double for the feedback boundary.
pub struct MemoryFeedbackSink {
    batch_size: usize,
    buffer: Mutex<Vec<FeedbackRecord>>,
    flushed: Mutex<Vec<FeedbackRecord>>,
}

impl MemoryFeedbackSink {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            buffer: Mutex::new(Vec::new()),
            flushed: Mutex::new(Vec::new()),
        }
    }

    /// Move buffered records to the flushed list.
    pub fn flush(&self) {
        let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        let drained: Vec<FeedbackRecord> = buffer.drain(..).collect();
        drop(buffer);
        self.flushed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(drained);
    }

    /// Every record seen so far, flushed or still buffered.
    pub fn records(&self) -> Vec<FeedbackRecord> {
        let mut all = self
            .flushed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        all.extend(
            self.buffer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .cloned(),
        );
        all
    }
}

impl Default for MemoryFeedbackSink {
    fn default() -> Self {
        Self::new(100)
    }
}

#[async_trait]
impl IFeedbackSink for MemoryFeedbackSink {
    async fn append(&self, record: FeedbackRecord) -> TriageResult<()> {
        let should_flush = {
            let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
            buffer.push(record);
            buffer.len() >= self.batch_size
        };
        if should_flush {
            self.flush();
        }
        Ok(())
    }
}
