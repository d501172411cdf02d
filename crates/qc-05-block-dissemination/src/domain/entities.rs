//! # Core Domain Entities
//!
//! Defines the data the dissemination core reads and the transient results it
//! derives.
//!
//! ## Entities
//!
//! - [`CommitteeMember`]: (public key, peer) entry of the sender committee
//! - [`ShardMember`]: entry of a shard
//! - [`LookupNode`]: full-network gateway node
//! - [`LocalIdentity`]: how the local node recognises itself in a committee
//! - [`FilteredCommittee`]: co-signers only, order preserved, local index resolved
//! - [`ShardAssignment`], [`LookupWindow`], [`DisseminationReport`]: derived results

use shared_types::{Peer, PublicKey};

use super::DisseminationError;

/// Member of the sender (DS) committee.
///
/// Committee order is consensus-round order; every index computed by this
/// crate is a position in that order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitteeMember {
    /// Member's public key.
    pub public_key: PublicKey,
    /// Member's network location. The null peer marks the local node.
    pub peer: Peer,
}

impl CommitteeMember {
    /// Creates a new committee member.
    pub fn new(public_key: PublicKey, peer: Peer) -> Self {
        Self { public_key, peer }
    }
}

/// Member of a shard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShardMember {
    /// Member's public key.
    pub public_key: PublicKey,
    /// Member's network location.
    pub peer: Peer,
    /// Reputation carried with the shard structure. Not used for forwarding.
    pub reputation: u16,
}

impl ShardMember {
    /// Creates a new shard member.
    pub fn new(public_key: PublicKey, peer: Peer, reputation: u16) -> Self {
        Self {
            public_key,
            peer,
            reputation,
        }
    }
}

/// A shard: ordered list of members.
pub type Shard = Vec<ShardMember>;

/// Lookup node (full-network gateway).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupNode {
    /// Lookup node's public key.
    pub public_key: PublicKey,
    /// Lookup node's network location.
    pub peer: Peer,
}

impl LookupNode {
    /// Creates a new lookup node entry.
    pub fn new(public_key: PublicKey, peer: Peer) -> Self {
        Self { public_key, peer }
    }
}

/// How the local node finds its own entry in the committee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LocalIdentity {
    /// The local entry carries the null peer (consensus substitutes it).
    #[default]
    NullPeer,
    /// The local entry carries this public key.
    PublicKey(PublicKey),
}

impl LocalIdentity {
    /// Returns true if `member` is the local node.
    pub fn matches(&self, member: &CommitteeMember) -> bool {
        match self {
            LocalIdentity::NullPeer => member.peer.is_null(),
            LocalIdentity::PublicKey(key) => member.public_key == *key,
        }
    }
}

/// Sender committee reduced to the members whose co-signature bit is set.
///
/// This is the only committee view the partitioner and the lookup selector
/// operate on.
#[derive(Clone, Debug)]
pub struct FilteredCommittee<'a> {
    members: Vec<&'a CommitteeMember>,
    local_index: Option<u16>,
}

impl<'a> FilteredCommittee<'a> {
    /// Filters `committee` by `bitmap` and resolves the local node's index.
    ///
    /// The first member matching `local` wins.
    pub fn build(
        committee: &'a [CommitteeMember],
        bitmap: &[bool],
        local: &LocalIdentity,
    ) -> Result<Self, DisseminationError> {
        if bitmap.len() != committee.len() {
            return Err(DisseminationError::SizeMismatch {
                bitmap: bitmap.len(),
                committee: committee.len(),
            });
        }

        let members: Vec<&CommitteeMember> = committee
            .iter()
            .zip(bitmap)
            .filter_map(|(member, &signed)| if signed { Some(member) } else { None })
            .collect();

        if members.len() > usize::from(u16::MAX) + 1 {
            return Err(DisseminationError::CommitteeTooLarge {
                size: members.len(),
            });
        }

        let local_index = members
            .iter()
            .position(|member| local.matches(member))
            .map(|i| i as u16);

        Ok(Self {
            members,
            local_index,
        })
    }

    /// Co-signing members, in committee order.
    pub fn members(&self) -> &[&'a CommitteeMember] {
        &self.members
    }

    /// Number of co-signing members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if nobody co-signed.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Position of the local node, if it co-signed.
    pub fn local_index(&self) -> Option<u16> {
        self.local_index
    }
}

/// Shard range owned by one committee cluster.
///
/// `shard_lo..=shard_hi`, inclusive. Recomputed per call, never cached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShardAssignment {
    /// Cluster the node belongs to.
    pub cluster: usize,
    /// First shard index (inclusive).
    pub shard_lo: usize,
    /// Last shard index (inclusive).
    pub shard_hi: usize,
    /// Number of clusters in the committee.
    pub num_clusters: usize,
    /// Shards handled per cluster.
    pub shard_groups_per_cluster: usize,
}

/// Half-open window of committee indices that forward to lookup nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LookupWindow {
    /// First index in the window.
    pub lo: usize,
    /// One past the last index in the window.
    pub hi: usize,
}

impl LookupWindow {
    /// Returns true if `index` is inside the window.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.lo && index < self.hi
    }

    /// Window width.
    pub fn len(&self) -> usize {
        self.hi - self.lo
    }

    /// True for a zero-width window.
    pub fn is_empty(&self) -> bool {
        self.hi == self.lo
    }
}

/// Lookup forwarding decision for one call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LookupDecision {
    /// The node is inside the lookup window.
    Assigned,
    /// The node is outside the window, or does not participate.
    #[default]
    NotAssigned,
    /// Filtered committee too small to place a window; lookup path skipped.
    CommitteeTooSmall,
}

/// Decisions taken by one dissemination call.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DisseminationReport {
    /// Local node co-signed and found itself in the committee.
    pub participating: bool,
    /// Local node's index in the filtered committee.
    pub local_index: Option<u16>,
    /// Size of the filtered committee.
    pub filtered_committee_size: usize,
    /// Lookup forwarding decision.
    pub lookup: LookupDecision,
    /// Lookup window, when one could be placed.
    pub lookup_window: Option<LookupWindow>,
    /// Lookup sender was invoked.
    pub lookup_sent: bool,
    /// Shard range computed for the node's cluster.
    pub shard_assignment: Option<ShardAssignment>,
    /// Cluster passed the shard forwarding guard.
    pub shard_forwarding: bool,
    /// Shard sender was invoked.
    pub shards_sent: bool,
    /// Length of the composed message.
    pub message_len: usize,
}
