//! Transport mode tag attached to every network link.
//!
//! The tag is written verbatim into a link's `modes` attribute, so
//! [`TransportMode::as_str`] must match the vocabulary of the downstream
//! simulator.

use std::str::FromStr;

use crate::CoreError;

/// The mode permitted on a link.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransportMode {
    /// Private vehicle.
    Car,
    /// On foot.
    Walk,
    /// Bicycle.
    Bike,
}

impl TransportMode {
    /// Label used in the network file's `modes` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Car  => "car",
            TransportMode::Walk => "walk",
            TransportMode::Bike => "bike",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car"  => Ok(TransportMode::Car),
            "walk" => Ok(TransportMode::Walk),
            "bike" => Ok(TransportMode::Bike),
            _      => Err(CoreError::UnknownMode(s.to_owned())),
        }
    }
}
