//! Minimal view of a content repository.
//!
//! ```text
//! <content-root>/
//!   .m7r-cm/config.toml     optional
//!   <program>/
//!     mdp/**/*.mdp          content units
//!     media/**              media resources
//!     html/                 build output
//!     media-pruned/         pruned media
//! ```

pub mod build;
pub mod media;
mod program;

pub use build::{BuildError, BuildHandler, MdpBuildHandler};
pub use media::{MediaIndex, MediaResource, PrunedResource};
pub use program::{ContentRoot, ContentUnit, MDP_DIR, MEDIA_DIR, Program, content_id};
