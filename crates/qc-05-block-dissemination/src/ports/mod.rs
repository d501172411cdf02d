//! # Ports
//!
//! - **inbound**: API offered to the block-processing path
//! - **outbound**: capabilities the dissemination core calls out to

pub mod inbound;
pub mod outbound;
