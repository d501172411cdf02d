//! # Block Dissemination Service
//!
//! Orchestrates one dissemination round for a finalized block.
//!
//! ## Flow
//!
//! ```text
//! B2 bitmap + committee ──→ FilteredCommittee ──→ local index?
//!                                                    │ none → no-op
//!                                                    ↓
//!                                            compose message once
//!                                         ┌──────────┴──────────┐
//!                                lookup window?           cluster → [lo, hi]
//!                                         ↓                     ↓
//!                                  LookupSender            ShardSender
//! ```
//!
//! The service keeps no state between calls. Its only field is the
//! configuration it was built with.

use shared_types::Hash;
use tracing::{debug, info, warn};

use crate::domain::{
    lookup_window, partition_shards, should_forward_to_shards, CommitteeMember,
    DisseminationConfig, DisseminationError, DisseminationReport, FilteredCommittee,
    LocalIdentity, LookupDecision, LookupNode, Shard,
};
use crate::ports::inbound::BlockDisseminationApi;
use crate::ports::outbound::{CoSignedBlock, LookupSender, MessageComposer, ShardSender};

/// Inputs of one dissemination call. All borrowed for the call's duration.
#[derive(Clone, Copy)]
pub struct DisseminationRequest<'a> {
    /// The finalized block (only its co-signature bitmap is read).
    pub block: &'a dyn CoSignedBlock,
    /// Sender committee, in consensus-round order.
    pub sender_committee: &'a [CommitteeMember],
    /// Shard list, in sharding order.
    pub shards: &'a [Shard],
    /// Lookup nodes.
    pub lookups: &'a [LookupNode],
    /// Hash used to place the lookup window.
    pub hash_for_random: &'a Hash,
    /// How the local node recognises its own committee entry.
    pub local: LocalIdentity,
}

/// Capabilities invoked by one dissemination call.
///
/// A missing composer fails the call. Missing senders only suppress the
/// corresponding send.
#[derive(Clone, Copy, Default)]
pub struct DisseminationHandlers<'a> {
    /// Produces the wire bytes.
    pub composer: Option<&'a dyn MessageComposer>,
    /// Sends to lookup nodes.
    pub lookup_sender: Option<&'a dyn LookupSender>,
    /// Sends to shards.
    pub shard_sender: Option<&'a dyn ShardSender>,
}

impl<'a> DisseminationHandlers<'a> {
    /// All three capabilities present.
    pub fn new(
        composer: &'a dyn MessageComposer,
        lookup_sender: &'a dyn LookupSender,
        shard_sender: &'a dyn ShardSender,
    ) -> Self {
        Self {
            composer: Some(composer),
            lookup_sender: Some(lookup_sender),
            shard_sender: Some(shard_sender),
        }
    }
}

/// Block Dissemination Service.
///
/// Maps the local node's position in the co-signing committee to its
/// forwarding duties and triggers the sends.
///
/// ## Thread Safety
///
/// Holds only immutable configuration; share it freely via `Arc`.
#[derive(Clone, Debug)]
pub struct DisseminationService {
    config: DisseminationConfig,
}

impl DisseminationService {
    /// Builds a service after validating `config`.
    pub fn new(config: DisseminationConfig) -> Result<Self, DisseminationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Computes the local node's duties without composing or sending.
    ///
    /// Identical requests always yield identical plans. A lookup node has no
    /// duties, so its plan is always empty.
    pub fn plan(
        &self,
        request: &DisseminationRequest<'_>,
    ) -> Result<DisseminationReport, DisseminationError> {
        if self.config.lookup_node_mode {
            warn!("[qc-05] Dissemination not expected to be planned on a lookup node");
            return Ok(DisseminationReport::default());
        }

        let bitmap = request.block.cosignature_bitmap();
        let filtered = FilteredCommittee::build(request.sender_committee, bitmap, &request.local)
            .inspect_err(|e| {
                if let DisseminationError::SizeMismatch { .. } = e {
                    warn!("[qc-05] {}", e);
                }
            })?;

        let mut report = DisseminationReport {
            filtered_committee_size: filtered.len(),
            ..Default::default()
        };

        let Some(local_index) = filtered.local_index() else {
            debug!(
                committee = request.sender_committee.len(),
                cosigners = filtered.len(),
                "[qc-05] Not among the co-signers, nothing to forward"
            );
            return Ok(report);
        };
        report.participating = true;
        report.local_index = Some(local_index);

        match lookup_window(
            request.hash_for_random,
            filtered.len(),
            self.config.lookup_window_size,
        ) {
            Ok(window) => {
                report.lookup_window = Some(window);
                report.lookup = if window.contains(usize::from(local_index)) {
                    LookupDecision::Assigned
                } else {
                    LookupDecision::NotAssigned
                };
            }
            Err(e @ DisseminationError::CommitteeTooSmall { .. }) => {
                warn!("[qc-05] Skipping lookup forwarding: {}", e);
                report.lookup = LookupDecision::CommitteeTooSmall;
            }
            Err(e) => return Err(e),
        }

        if let Some(assignment) = partition_shards(
            filtered.len(),
            request.shards.len(),
            self.config.cluster_size,
            local_index,
        ) {
            debug!(
                num_clusters = assignment.num_clusters,
                shard_groups = assignment.shard_groups_per_cluster,
                cluster = assignment.cluster,
                shard_lo = assignment.shard_lo,
                shard_hi = assignment.shard_hi,
                "[qc-05] Shard assignment computed"
            );
            report.shard_forwarding = should_forward_to_shards(&assignment, request.shards.len());
            report.shard_assignment = Some(assignment);
        }

        Ok(report)
    }
}

impl BlockDisseminationApi for DisseminationService {
    fn disseminate(
        &self,
        request: DisseminationRequest<'_>,
        handlers: DisseminationHandlers<'_>,
    ) -> Result<DisseminationReport, DisseminationError> {
        // Lookup-node mode yields an empty, non-participating plan
        let mut report = self.plan(&request)?;
        if !report.participating {
            return Ok(report);
        }

        let Some(composer) = handlers.composer else {
            warn!("[qc-05] Message composer undefined");
            return Err(DisseminationError::ComposeFailed(
                "message composer undefined".to_string(),
            ));
        };
        let message = composer.compose_message().map_err(|e| {
            warn!("[qc-05] Cannot compose message: {}", e);
            DisseminationError::ComposeFailed(e.0)
        })?;
        report.message_len = message.len();

        if report.lookup == LookupDecision::Assigned {
            info!(
                local_index = ?report.local_index,
                "[qc-05] Part of the committee assigned to send the block to lookup nodes"
            );
            if let Some(sender) = handlers.lookup_sender {
                sender.send_to_lookups(request.lookups, &message);
                report.lookup_sent = true;
            }
        }

        if report.shard_forwarding {
            if let (Some(assignment), Some(sender)) =
                (report.shard_assignment, handlers.shard_sender)
            {
                sender.send_to_shards(
                    &message,
                    request.shards,
                    assignment.shard_lo,
                    assignment.shard_hi,
                );
                report.shards_sent = true;
            }
        }

        Ok(report)
    }

    fn config(&self) -> &DisseminationConfig {
        &self.config
    }
}
