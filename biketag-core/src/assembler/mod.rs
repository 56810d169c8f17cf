//! Record assembly
//!
//! Two entry points build the same [`BikeTagRecord`](crate::types::BikeTagRecord)
//! shape over its default template:
//! - [`assemble_from_album`]: resolve a round inside a sorted album
//! - [`assemble_from_post`]: synthesize a round from a parsed social post

pub mod album;
pub mod post;
pub mod urls;

pub use album::assemble_from_album;
pub use post::assemble_from_post;
pub use urls::{image_url_variant, thumbnail_url, url_extension, ImageSize};
