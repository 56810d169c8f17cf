//! Test Helper Utilities
//!
//! Shared fixtures for biketag-core integration tests

#![allow(dead_code)]

pub mod album;
pub mod mock_sources;

pub use album::{synthetic_album, synthetic_round};
pub use mock_sources::{MockAlbumSource, MockGeocoder, MockPostSource};
