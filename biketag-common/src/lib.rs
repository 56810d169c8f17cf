//! # BikeTag Common Library
//!
//! Shared code for the BikeTag crates including:
//! - Error and result types
//! - Configuration loading (TOML file + environment overrides)
//! - Namespaced TTL cache facade
//! - Timestamp utilities

pub mod cache;
pub mod config;
pub mod error;
pub mod time;

pub use cache::{CacheFacade, CacheNamespace};
pub use config::BikeTagConfig;
pub use error::{Error, Result};
