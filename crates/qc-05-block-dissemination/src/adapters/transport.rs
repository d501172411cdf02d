//! Transport-backed senders.
//!
//! Implements `LookupSender` and `ShardSender` by handing peer lists to a
//! `BroadcastTransport`.

use parking_lot::Mutex;
use shared_types::{public_key_hex, Peer};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{
    message_digest_prefix, select_shard_recipients, DisseminationConfig, FanoutMode, LookupNode,
    Shard,
};
use crate::ports::outbound::{BroadcastTransport, LookupSender, ShardSender};

/// Sends to every lookup node with a single broadcast.
pub struct TransportLookupSender<T: BroadcastTransport> {
    transport: Arc<T>,
    lookup_node_mode: bool,
}

impl<T: BroadcastTransport> TransportLookupSender<T> {
    /// Create a new sender.
    pub fn new(transport: Arc<T>, config: &DisseminationConfig) -> Self {
        Self {
            transport,
            lookup_node_mode: config.lookup_node_mode,
        }
    }
}

impl<T: BroadcastTransport> LookupSender for TransportLookupSender<T> {
    fn send_to_lookups(&self, lookups: &[LookupNode], message: &[u8]) {
        if self.lookup_node_mode {
            warn!("[qc-05] send_to_lookups not expected to be called from a lookup node");
            return;
        }

        let peers: Vec<Peer> = lookups
            .iter()
            .map(|node| {
                info!("[qc-05] Sending msg to lookup node {}", node.peer);
                node.peer
            })
            .collect();

        self.transport.broadcast(&peers, message);
    }
}

/// Sends to shards `[lo, hi]` using the configured fan-out mode.
pub struct TransportShardSender<T: BroadcastTransport> {
    transport: Arc<T>,
    fanout_mode: FanoutMode,
    forwarded_receivers_per_shard: usize,
    lookup_node_mode: bool,
}

impl<T: BroadcastTransport> TransportShardSender<T> {
    /// Create a new sender.
    pub fn new(transport: Arc<T>, config: &DisseminationConfig) -> Self {
        Self {
            transport,
            fanout_mode: config.fanout_mode,
            forwarded_receivers_per_shard: config.forwarded_receivers_per_shard,
            lookup_node_mode: config.lookup_node_mode,
        }
    }
}

impl<T: BroadcastTransport> ShardSender for TransportShardSender<T> {
    fn send_to_shards(&self, message: &[u8], shards: &[Shard], lo: usize, hi: usize) {
        if self.lookup_node_mode {
            warn!("[qc-05] send_to_shards not expected to be called from a lookup node");
            return;
        }

        // Inverted or out-of-range assignments forward nothing
        if lo > hi || lo >= shards.len() {
            debug!(lo, hi, shards = shards.len(), "[qc-05] Empty shard range");
            return;
        }
        let hi = hi.min(shards.len() - 1);

        let digest = match self.fanout_mode {
            FanoutMode::Tree => Some(message_digest_prefix(message)),
            FanoutMode::Flood => None,
        };

        for (shard_index, shard) in shards[lo..=hi].iter().enumerate() {
            let recipients =
                select_shard_recipients(shard, self.fanout_mode, self.forwarded_receivers_per_shard);

            if let Some(digest) = &digest {
                info!(
                    shard = lo + shard_index,
                    "[qc-05] Sending message with hash: [{}] to {} of {} shard peers",
                    digest,
                    recipients.len(),
                    shard.len()
                );
            }
            for member in shard.iter().take(recipients.len()) {
                debug!(
                    "[qc-05] PubKey: {} Peer: {}",
                    public_key_hex(&member.public_key),
                    member.peer
                );
            }

            self.transport.broadcast(&recipients, message);
        }
    }
}

/// In-memory transport that records every broadcast.
///
/// Useful for tests and dry runs.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(Vec<Peer>, Vec<u8>)>>,
}

impl RecordingTransport {
    /// Create an empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// All broadcasts so far, in call order.
    pub fn broadcasts(&self) -> Vec<(Vec<Peer>, Vec<u8>)> {
        self.sent.lock().clone()
    }

    /// Number of broadcasts so far.
    pub fn len(&self) -> usize {
        self.sent.lock().len()
    }

    /// True if nothing was broadcast.
    pub fn is_empty(&self) -> bool {
        self.sent.lock().is_empty()
    }

    /// Forget recorded broadcasts.
    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

impl BroadcastTransport for RecordingTransport {
    fn broadcast(&self, peers: &[Peer], message: &[u8]) {
        self.sent.lock().push((peers.to_vec(), message.to_vec()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShardMember;
    use std::net::{IpAddr, Ipv4Addr};

    fn peer(a: u8, b: u8) -> Peer {
        Peer::new(IpAddr::V4(Ipv4Addr::new(10, 0, a, b)), 5000)
    }

    fn shards(count: u8, size: u8) -> Vec<Shard> {
        (0..count)
            .map(|s| {
                (0..size)
                    .map(|m| ShardMember::new([m; 32], peer(s, m), 0))
                    .collect()
            })
            .collect()
    }

    fn tree_config() -> DisseminationConfig {
        DisseminationConfig {
            fanout_mode: FanoutMode::Tree,
            forwarded_receivers_per_shard: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_lookup_sender_single_broadcast() {
        let transport = Arc::new(RecordingTransport::new());
        let sender = TransportLookupSender::new(transport.clone(), &DisseminationConfig::default());
        let lookups = vec![
            LookupNode::new([1u8; 32], peer(9, 1)),
            LookupNode::new([2u8; 32], peer(9, 2)),
        ];

        sender.send_to_lookups(&lookups, b"block");

        let sent = transport.broadcasts();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, vec![peer(9, 1), peer(9, 2)]);
        assert_eq!(sent[0].1, b"block".to_vec());
    }

    #[test]
    fn test_shard_sender_flood() {
        let transport = Arc::new(RecordingTransport::new());
        let sender = TransportShardSender::new(transport.clone(), &DisseminationConfig::default());
        let shard_list = shards(5, 4);

        sender.send_to_shards(b"block", &shard_list, 1, 3);

        let sent = transport.broadcasts();
        assert_eq!(sent.len(), 3);
        for (i, (peers, _)) in sent.iter().enumerate() {
            let expected: Vec<Peer> = shard_list[1 + i].iter().map(|m| m.peer).collect();
            assert_eq!(*peers, expected);
        }
    }

    #[test]
    fn test_shard_sender_tree_prefix() {
        let transport = Arc::new(RecordingTransport::new());
        let sender = TransportShardSender::new(transport.clone(), &tree_config());
        let shard_list = shards(3, 5);

        sender.send_to_shards(b"block", &shard_list, 0, 2);

        let sent = transport.broadcasts();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[2].0, vec![peer(2, 0), peer(2, 1)]);
    }

    #[test]
    fn test_shard_sender_empty_shard_still_broadcasts_once() {
        let transport = Arc::new(RecordingTransport::new());
        let sender = TransportShardSender::new(transport.clone(), &tree_config());
        let shard_list: Vec<Shard> = vec![Vec::new()];

        sender.send_to_shards(b"block", &shard_list, 0, 0);

        assert_eq!(transport.len(), 1);
        assert!(transport.broadcasts()[0].0.is_empty());
    }

    #[test]
    fn test_shard_sender_inverted_range() {
        let transport = Arc::new(RecordingTransport::new());
        let sender = TransportShardSender::new(transport.clone(), &DisseminationConfig::default());
        let shard_list = shards(5, 2);

        sender.send_to_shards(b"block", &shard_list, 6, 4);
        sender.send_to_shards(b"block", &shard_list, 5, 7);

        assert!(transport.is_empty());
    }

    #[test]
    fn test_shard_sender_refuses_in_lookup_mode() {
        let transport = Arc::new(RecordingTransport::new());
        let config = DisseminationConfig {
            lookup_node_mode: true,
            ..Default::default()
        };
        let sender = TransportShardSender::new(transport.clone(), &config);

        sender.send_to_shards(b"block", &shards(2, 2), 0, 1);

        assert!(transport.is_empty());
    }

    #[test]
    fn test_lookup_sender_refuses_in_lookup_mode() {
        let transport = Arc::new(RecordingTransport::new());
        let config = DisseminationConfig {
            lookup_node_mode: true,
            ..Default::default()
        };
        let sender = TransportLookupSender::new(transport.clone(), &config);

        sender.send_to_lookups(&[LookupNode::new([1u8; 32], peer(9, 1))], b"block");

        assert!(transport.is_empty());
    }

    #[test]
    fn test_recording_transport_clear() {
        let transport = RecordingTransport::new();
        transport.broadcast(&[peer(0, 1)], b"x");
        assert_eq!(transport.len(), 1);
        transport.clear();
        assert!(transport.is_empty());
    }
}
