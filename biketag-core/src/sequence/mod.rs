//! Album sequence handling
//!
//! Albums list each round as a mystery entry and a proof entry, newest round
//! first. `sorter` restores that order; `indexer` finds a round's entries in it.

pub mod indexer;
pub mod sorter;

pub use indexer::locate;
pub use sorter::{sort_by_tag_number, sort_by_upload_date};
