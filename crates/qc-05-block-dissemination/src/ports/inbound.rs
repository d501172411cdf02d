//! Inbound ports (API) for the Block Dissemination subsystem.

use crate::domain::{DisseminationConfig, DisseminationError, DisseminationReport};
use crate::service::{DisseminationHandlers, DisseminationRequest};

/// Primary API for block dissemination.
///
/// Called by the block-processing path once per finalized block, right after
/// consensus for that round completes.
pub trait BlockDisseminationApi: Send + Sync {
    /// Forward a finalized block according to the local node's duties.
    ///
    /// # Returns
    /// The decisions taken. A node with no duty this round gets a report
    /// with `participating == false`, not an error.
    fn disseminate(
        &self,
        request: DisseminationRequest<'_>,
        handlers: DisseminationHandlers<'_>,
    ) -> Result<DisseminationReport, DisseminationError>;

    /// Active configuration.
    fn config(&self) -> &DisseminationConfig;
}
