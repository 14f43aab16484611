use async_trait::async_trait;

use crate::errors::TriageResult;
use crate::models::FeedbackRecord;

/// Append-only feedback boundary. At-most-once delivery is acceptable; the
/// logger swallows failures and counts them as a metric.
#[async_trait]
pub trait IFeedbackSink: Send + Sync {
    async fn append(&self, record: FeedbackRecord) -> TriageResult<()>;
}
