//! Service layer
//!
//! - `biketag_service`: cached resolution front end
//! - `post_parser`: subreddit posts to tag data
//! - `user_tags`: album entries by player

pub mod biketag_service;
pub mod post_parser;
pub mod user_tags;

pub use biketag_service::{BikeTagService, ServiceOptions};
pub use post_parser::{found_at_remnant, PostParser};
pub use user_tags::{group_by_user, images_for_user, UserTags};
