//! Invariants every honest committee node relies on.

use super::{partition_shards, FanoutMode, LookupWindow};

/// INVARIANT-1: Bitmap Alignment
/// One co-signature bit per committee member.
pub fn invariant_bitmap_matches_committee(bitmap_len: usize, committee_len: usize) -> bool {
    bitmap_len == committee_len
}

/// INVARIANT-2: Shard Coverage
/// Every shard index in `[0, shard_count - 1]` is owned by some cluster.
pub fn invariant_partition_covers_shards(
    committee_size: usize,
    shard_count: usize,
    cluster_size: usize,
) -> bool {
    if shard_count == 0 {
        return true;
    }

    let mut covered = vec![false; shard_count];
    let mut index = 0usize;
    while index < committee_size {
        let Ok(local) = u16::try_from(index) else {
            return false;
        };
        let Some(assignment) = partition_shards(committee_size, shard_count, cluster_size, local)
        else {
            return false;
        };
        if assignment.shard_lo <= assignment.shard_hi {
            for slot in &mut covered[assignment.shard_lo..=assignment.shard_hi] {
                *slot = true;
            }
        }
        // One representative per cluster is enough
        index += cluster_size;
    }

    covered.iter().all(|c| *c)
}

/// INVARIANT-3: Lookup Window Width
/// A placed window is exactly `window_size` wide and inside the committee.
pub fn invariant_lookup_window_width(
    window: &LookupWindow,
    committee_size: usize,
    window_size: usize,
) -> bool {
    window.len() == window_size && window.hi <= committee_size
}

/// INVARIANT-4: Bounded Fan-out
/// Tree mode never sends to more than `min(fanout, shard_size)` members.
pub fn invariant_fanout_bounded(
    recipients: usize,
    shard_size: usize,
    mode: FanoutMode,
    fanout: usize,
) -> bool {
    match mode {
        FanoutMode::Tree => recipients <= fanout.min(shard_size),
        FanoutMode::Flood => recipients == shard_size,
    }
}
