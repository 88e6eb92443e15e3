//! `nf-output` — write a merged network as network XML plus a gzip twin.
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`render`] | `render_network` (pure, network → XML bytes)          |
//! | [`paths`]  | `OutputPaths` (`.xml` / `.xml.gz` sibling resolution) |
//! | [`write`]  | `write_network` (render once, write both atomically)  |
//! | [`error`]  | `OutputError`, `OutputResult<T>`                      |
//!
//! # Usage
//!
//! ```rust,ignore
//! use nf_output::write_network;
//!
//! let paths = write_network(&network, Path::new("out/network.xml.gz"))?;
//! println!("{} + {}", paths.xml.display(), paths.gz.display());
//! ```

pub mod error;
pub mod paths;
pub mod render;
pub mod write;


pub use error::{OutputError, OutputResult};
pub use paths::OutputPaths;
pub use render::{render_network, NETWORK_DOCTYPE};
pub use write::write_network;
