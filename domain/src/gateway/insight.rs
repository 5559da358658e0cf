//! Reservation insight provider trait.

use crate::error::Error;
use async_trait::async_trait;
use serde_json::Value;

/// Abstraction for the machine-learning enrichment attached to a create
/// response.
///
/// The analysis itself is an external collaborator; the pipeline treats its
/// output as an opaque JSON value and passes it through unchanged. A
/// provider failure degrades the response (no insights) rather than failing
/// the mutation.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Analyze an incoming reservation payload, returning an opaque
    /// enrichment or `None` when the provider has nothing to say.
    async fn analyze(&self, reservation: &Value) -> Result<Option<Value>, Error>;
}

/// Provider used when no analysis backend is configured.
pub struct NoInsight;

#[async_trait]
impl InsightProvider for NoInsight {
    async fn analyze(&self, _reservation: &Value) -> Result<Option<Value>, Error> {
        Ok(None)
    }
}
