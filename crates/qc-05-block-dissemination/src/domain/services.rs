//! Domain services for block dissemination.
//!
//! All functions here are pure: the same inputs give the same forwarding
//! duties on every node.

use sha2::{Digest, Sha256};
use shared_types::{Hash, Peer};

use super::{DisseminationError, FanoutMode, LookupWindow, ShardAssignment, ShardMember};

/// Hex characters of the message digest shown in fan-out log lines.
pub const DIGEST_LOG_PREFIX_LEN: usize = 6;

/// Map a committee position to the range of shards its cluster forwards to.
///
/// Multicast assignments:
/// 1. Divide the committee into clusters of `cluster_size`
/// 2. Divide the shard list into `ceil(shards / clusters)` groups per cluster
/// 3. Cluster `i` owns shards `[i * groups, i * groups + groups - 1]`
///
/// The last range is clamped to `shard_count - 1`. Returns `None` when there
/// are no clusters (empty committee or zero cluster size).
pub fn partition_shards(
    committee_size: usize,
    shard_count: usize,
    cluster_size: usize,
    local_index: u16,
) -> Option<ShardAssignment> {
    if committee_size == 0 || cluster_size == 0 {
        return None;
    }

    let num_clusters = committee_size.div_ceil(cluster_size);
    let shard_groups_per_cluster = shard_count.div_ceil(num_clusters);

    let cluster = usize::from(local_index) / cluster_size;
    let shard_lo = cluster * shard_groups_per_cluster;
    let shard_hi = (shard_lo + shard_groups_per_cluster)
        .saturating_sub(1)
        .min(shard_count.saturating_sub(1));

    Some(ShardAssignment {
        cluster,
        shard_lo,
        shard_hi,
        num_clusters,
        shard_groups_per_cluster,
    })
}

/// Shard forwarding guard.
///
/// Fires iff `cluster + 1 <= shard_count`: gated on the shard-list size,
/// not on the cluster count.
pub fn should_forward_to_shards(assignment: &ShardAssignment, shard_count: usize) -> bool {
    assignment.cluster < shard_count
}

/// Read the first two bytes of a hash as a big-endian `u16`.
pub fn randomness_from_hash(hash: &Hash) -> u16 {
    u16::from_be_bytes([hash[0], hash[1]])
}

/// Place the window of committee indices responsible for lookup forwarding.
///
/// `lo = r mod (committee_size - window_size)`, `hi = lo + window_size`.
pub fn lookup_window(
    hash_for_random: &Hash,
    committee_size: usize,
    window_size: usize,
) -> Result<LookupWindow, DisseminationError> {
    if committee_size <= window_size {
        return Err(DisseminationError::CommitteeTooSmall {
            committee: committee_size,
            window: window_size,
        });
    }

    let random = usize::from(randomness_from_hash(hash_for_random));
    let lo = random % (committee_size - window_size);

    Ok(LookupWindow {
        lo,
        hi: lo + window_size,
    })
}

/// Direct recipients of a block within one shard.
///
/// Tree mode takes the first `min(fanout, shard.len())` members in shard
/// order. Flood mode takes all of them.
pub fn select_shard_recipients(shard: &[ShardMember], mode: FanoutMode, fanout: usize) -> Vec<Peer> {
    match mode {
        FanoutMode::Tree => shard.iter().take(fanout).map(|m| m.peer).collect(),
        FanoutMode::Flood => shard.iter().map(|m| m.peer).collect(),
    }
}

/// SHA-256 digest of a message.
pub fn message_digest(message: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(message);
    hasher.finalize().into()
}

/// Short printable digest for log lines.
pub fn message_digest_prefix(message: &[u8]) -> String {
    let mut digest = hex::encode(message_digest(message));
    digest.truncate(DIGEST_LOG_PREFIX_LEN);
    digest
}
