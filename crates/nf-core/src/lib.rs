//! `nf-core` — foundational types for the `netfuse` network converter.
//!
//! Shared by `nf-network`, `nf-output` and `nf-cli`.  It has no `nf-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`geo`]         | `GeoPoint` (haversine distance), `PlanarPoint`          |
//! | [`projection`]  | `CoordinateProjector`, `InverseProjector`, `TransverseMercator` |
//! | [`transport`]   | `TransportMode` enum                                    |
//! | [`error`]       | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to public value types.      |

pub mod error;
pub mod geo;
pub mod projection;
pub mod transport;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{GeoPoint, PlanarPoint};
pub use projection::{CoordinateProjector, Ellipsoid, InverseProjector, TransverseMercator};
pub use transport::TransportMode;
