//! # Adapters
//!
//! Default implementations of the sending ports on top of a
//! [`BroadcastTransport`](crate::ports::outbound::BroadcastTransport).

mod transport;

pub use transport::{RecordingTransport, TransportLookupSender, TransportShardSender};
