//! Host application boundary.
//!
//! The host owns the authoritative document. It receives [`HostRequest`]
//! batches to play and reports back the bounds it actually produced, which
//! the caller reconciles into its optimistic copy.

use async_trait::async_trait;
use tracing::debug;

use crate::bounds::Bounds;
use crate::doc::{DocumentId, LayerId};
use crate::error::HostError;
use crate::payload::HostRequest;

/// Async adapter to the host application. Enables mocking in tests.
#[async_trait]
pub trait HostAdapter: Send + Sync {
    /// Play a batch of requests as one undoable step.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the host declines or cannot be reached.
    async fn play(&self, requests: &[HostRequest]) -> Result<(), HostError>;

    /// Current bounds of `layer_ids` as the host sees them.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the host cannot be reached.
    async fn fetch_bounds(
        &self,
        document_id: DocumentId,
        layer_ids: &[LayerId],
    ) -> Result<Vec<(LayerId, Bounds)>, HostError>;
}

/// Host that accepts every request and reports nothing back.
///
/// Used for dry runs, where the optimistic payload is the only result.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunHost;

#[async_trait]
impl HostAdapter for DryRunHost {
    async fn play(&self, requests: &[HostRequest]) -> Result<(), HostError> {
        debug!(count = requests.len(), "dry run: requests accepted");
        Ok(())
    }

    async fn fetch_bounds(
        &self,
        _document_id: DocumentId,
        _layer_ids: &[LayerId],
    ) -> Result<Vec<(LayerId, Bounds)>, HostError> {
        Ok(Vec::new())
    }
}
