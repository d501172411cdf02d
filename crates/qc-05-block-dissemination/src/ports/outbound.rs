//! Outbound ports (SPI) for the Block Dissemination subsystem.
//!
//! Each port has a blanket implementation for closures with the same
//! signature, so call sites can pass a lambda instead of a named type.

use shared_types::Peer;
use thiserror::Error;

use crate::domain::{LookupNode, Shard};

/// Finalized block, seen only through its co-signature bitmap.
pub trait CoSignedBlock {
    /// One bit per sender committee member, in committee order.
    fn cosignature_bitmap(&self) -> &[bool];
}

impl CoSignedBlock for Vec<bool> {
    fn cosignature_bitmap(&self) -> &[bool] {
        self
    }
}

/// Failure reported by a [`MessageComposer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ComposeError(pub String);

/// Produces the exact wire bytes to disseminate.
pub trait MessageComposer {
    /// Compose the message. Called at most once per dissemination.
    fn compose_message(&self) -> Result<Vec<u8>, ComposeError>;
}

impl<F> MessageComposer for F
where
    F: Fn() -> Result<Vec<u8>, ComposeError>,
{
    fn compose_message(&self) -> Result<Vec<u8>, ComposeError> {
        self()
    }
}

/// Best-effort send to the lookup nodes.
pub trait LookupSender {
    /// Send `message` to every lookup node.
    fn send_to_lookups(&self, lookups: &[LookupNode], message: &[u8]);
}

impl<F> LookupSender for F
where
    F: Fn(&[LookupNode], &[u8]),
{
    fn send_to_lookups(&self, lookups: &[LookupNode], message: &[u8]) {
        self(lookups, message)
    }
}

/// Best-effort send to shards `[lo, hi]` (inclusive).
pub trait ShardSender {
    /// Send `message` to the shards in range, applying the fan-out policy.
    fn send_to_shards(&self, message: &[u8], shards: &[Shard], lo: usize, hi: usize);
}

impl<F> ShardSender for F
where
    F: Fn(&[u8], &[Shard], usize, usize),
{
    fn send_to_shards(&self, message: &[u8], shards: &[Shard], lo: usize, hi: usize) {
        self(message, shards, lo, hi)
    }
}

/// P2P broadcast: one message to a list of peers.
///
/// Fire-and-forget. Connection handling, retries and backpressure belong to
/// the implementation.
pub trait BroadcastTransport: Send + Sync {
    /// Send `message` to every peer in `peers`.
    fn broadcast(&self, peers: &[Peer], message: &[u8]);
}
