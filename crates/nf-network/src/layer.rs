//! Per-graph layer parameters.

use nf_core::TransportMode;

use crate::resolve::SPEED_ATTRIBUTES;
use crate::{NetworkError, NetworkResult};

/// Default free-flow speed for car links, m/s.
pub const CAR_DEFAULT_SPEED_MPS: f64 = 15.0;
/// Default free-flow speed for walk links, m/s.
pub const WALK_DEFAULT_SPEED_MPS: f64 = 1.4;
/// Link capacity written for every link, vehicles/hour.
pub const DEFAULT_CAPACITY: f64 = 1000.0;
/// Lane count written for every link.
pub const DEFAULT_PERMLANES: u32 = 1;

/// How one source graph is turned into network elements.
///
/// `node_prefix` namespaces node ids so the two graphs cannot collide;
/// `link_prefix` names links `<prefix><n>` with `n` counting from 0 per
/// layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct LayerSpec {
    pub node_prefix:       String,
    pub link_prefix:       String,
    pub mode:              TransportMode,
    pub default_speed_mps: f64,
    pub capacity:          f64,
    pub permlanes:         u32,
    /// Edge attributes consulted for free-flow speed, in order.
    pub speed_attributes:  Vec<String>,
}

impl LayerSpec {
    /// Drive layer: `v_` nodes, `car_N` links, 15.0 m/s default.
    pub fn drive() -> Self {
        Self::preset("v_", "car_", TransportMode::Car, CAR_DEFAULT_SPEED_MPS)
    }

    /// Walk layer: `p_` nodes, `walk_N` links, 1.4 m/s default.
    pub fn walk() -> Self {
        Self::preset("p_", "walk_", TransportMode::Walk, WALK_DEFAULT_SPEED_MPS)
    }

    fn preset(node_prefix: &str, link_prefix: &str, mode: TransportMode, speed: f64) -> Self {
        Self {
            node_prefix:       node_prefix.to_owned(),
            link_prefix:       link_prefix.to_owned(),
            mode,
            default_speed_mps: speed,
            capacity:          DEFAULT_CAPACITY,
            permlanes:         DEFAULT_PERMLANES,
            speed_attributes:  SPEED_ATTRIBUTES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    /// Reject parameters that would produce an invalid network.
    pub fn validate(&self) -> NetworkResult<()> {
        if self.link_prefix.is_empty() {
            return Err(NetworkError::InvalidLayer("link prefix must not be empty".into()));
        }
        if !(self.default_speed_mps.is_finite() && self.default_speed_mps > 0.0) {
            return Err(NetworkError::InvalidLayer(format!(
                "{} default speed must be positive, got {}",
                self.mode, self.default_speed_mps
            )));
        }
        if !(self.capacity.is_finite() && self.capacity > 0.0) {
            return Err(NetworkError::InvalidLayer(format!(
                "{} capacity must be positive, got {}",
                self.mode, self.capacity
            )));
        }
        if self.permlanes == 0 {
            return Err(NetworkError::InvalidLayer(format!(
                "{} permlanes must be at least 1",
                self.mode
            )));
        }
        Ok(())
    }
}
