//! Change detection between the persisted snapshot and the current listing.

mod change_detector;
mod changes_model;

#[cfg(test)]
mod change_detector_tests;

pub use change_detector::{detect_changes, duplicate_ids};
pub use changes_model::{ChangeSet, PriceChange};
