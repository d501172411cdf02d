//! # Block Dissemination Subsystem (qc-05)
//!
//! Forwards a finalized block from the consensus committee to the lookup
//! nodes and to every shard, without every committee member contacting every
//! recipient.
//!
//! ## Architecture Role
//!
//! ```text
//! [Consensus] ──finalized block + B2 bitmap──→ [Block Dissemination (5)]
//!                                                    │
//!                          ┌─────────────────────────┴──────────┐
//!                          ↓ window of TX_SHARING nodes         ↓ cluster i → shards [lo, hi]
//!                   [Lookup nodes]                       [Shard members]
//! ```
//!
//! ## Forwarding Duty
//!
//! Only committee members that co-signed the block (bit set in the B2
//! bitmap) take part. Among those:
//!
//! - a contiguous window, positioned by the block hash, sends to lookups;
//! - the committee is cut into clusters, each cluster owns a slice of shards.
//!
//! Every honest node computes the same assignment from the same inputs.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{RecordingTransport, TransportLookupSender, TransportShardSender};
pub use domain::*;
pub use ports::inbound::BlockDisseminationApi;
pub use ports::outbound::{
    BroadcastTransport, CoSignedBlock, ComposeError, LookupSender, MessageComposer, ShardSender,
};
pub use service::{DisseminationHandlers, DisseminationRequest, DisseminationService};
