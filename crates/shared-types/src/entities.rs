//! # Core Entities
//!
//! ## Clusters
//!
//! - **Chain**: `Hash`
//! - **Identity**: `PublicKey`
//! - **Networking**: `Peer`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

// =============================================================================
// CLUSTER A: THE CHAIN
// =============================================================================

/// A 32-byte hash (e.g., SHA-256 of a block header).
pub type Hash = [u8; 32];

// =============================================================================
// CLUSTER B: IDENTITY
// =============================================================================

/// A 32-byte public key.
pub type PublicKey = [u8; 32];

/// Hex rendering of a public key for log lines.
pub fn public_key_hex(key: &PublicKey) -> String {
    hex::encode(key)
}

// =============================================================================
// CLUSTER C: NETWORKING
// =============================================================================

/// Network location of a node: IP address plus listen port.
///
/// The null peer (unspecified address, port 0) is never routable. Committee
/// lists handed over by consensus use it in place of the local node's own
/// entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Peer {
    /// IP address of the peer.
    pub ip_address: IpAddr,
    /// Port the peer listens on.
    pub listen_port: u16,
}

impl Peer {
    /// Creates a peer from an address and port.
    pub fn new(ip_address: IpAddr, listen_port: u16) -> Self {
        Self {
            ip_address,
            listen_port,
        }
    }

    /// The null peer.
    pub fn null() -> Self {
        Self {
            ip_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            listen_port: 0,
        }
    }

    /// Returns true for the null peer.
    pub fn is_null(&self) -> bool {
        self.ip_address.is_unspecified() && self.listen_port == 0
    }
}

impl Default for Peer {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ip_address {
            IpAddr::V4(ip) => write!(f, "{}:{}", ip, self.listen_port),
            IpAddr::V6(ip) => write!(f, "[{}]:{}", ip, self.listen_port),
        }
    }
}
