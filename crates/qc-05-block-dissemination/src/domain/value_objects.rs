//! Value objects for block dissemination configuration.

use serde::{Deserialize, Serialize};

use super::DisseminationError;

/// How a committee node reaches the members of a shard it is assigned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanoutMode {
    /// Send to every member of the shard.
    #[default]
    Flood,
    /// Send to a fixed prefix of the shard; shard members relay further.
    Tree,
}

/// Block dissemination configuration.
///
/// Every honest committee node must run with the same values, otherwise the
/// clusters disagree on who forwards what.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisseminationConfig {
    /// Committee members per cluster (MULTICAST_CLUSTER_SIZE).
    pub cluster_size: usize,
    /// Committee members forwarding to lookup nodes (TX_SHARING_CLUSTER_SIZE).
    pub lookup_window_size: usize,
    /// Shard members sent to directly in tree mode.
    pub forwarded_receivers_per_shard: usize,
    /// Shard fan-out strategy.
    pub fanout_mode: FanoutMode,
    /// This process runs as a lookup node; dissemination is a no-op.
    pub lookup_node_mode: bool,
}

impl Default for DisseminationConfig {
    fn default() -> Self {
        Self {
            cluster_size: 10,
            lookup_window_size: 20,
            forwarded_receivers_per_shard: 3,
            fanout_mode: FanoutMode::Flood,
            lookup_node_mode: false,
        }
    }
}

impl DisseminationConfig {
    /// Create config for testing.
    pub fn for_testing() -> Self {
        Self {
            cluster_size: 4,
            lookup_window_size: 3,
            forwarded_receivers_per_shard: 2,
            fanout_mode: FanoutMode::Flood,
            lookup_node_mode: false,
        }
    }

    /// Parse a JSON configuration document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, DisseminationError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DisseminationError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the partitioner cannot work with.
    pub fn validate(&self) -> Result<(), DisseminationError> {
        if self.cluster_size == 0 {
            return Err(DisseminationError::InvalidConfig(
                "cluster_size must be greater than zero".to_string(),
            ));
        }
        if self.forwarded_receivers_per_shard == 0 {
            return Err(DisseminationError::InvalidConfig(
                "forwarded_receivers_per_shard must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
