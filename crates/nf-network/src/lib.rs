//! `nf-network` — merge attributed source graphs into one directed network.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`network`] | `Network`, `NetworkNode`, `NetworkLink`                          |
//! | [`layer`]   | `LayerSpec` (per-graph prefixes, mode, defaults)                 |
//! | [`resolve`] | `LengthResolver`, `SpeedResolver`, `is_oneway`, `node_coordinate` |
//! | [`builder`] | `NetworkBuilder`, `LayerStats`, `merge`                          |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `LayerSpec`.            |

pub mod builder;
pub mod error;
pub mod layer;
pub mod network;
pub mod resolve;


pub use builder::{merge, LayerStats, NetworkBuilder};
pub use error::{NetworkError, NetworkResult};
pub use layer::LayerSpec;
pub use network::{Network, NetworkLink, NetworkNode};
pub use resolve::{is_oneway, node_coordinate, AttributeError, LengthResolver, SpeedResolver};
