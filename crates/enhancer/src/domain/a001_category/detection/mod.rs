//! Categories field detection
//!
//! `matcher` decides from static metadata whether a field holds category ids,
//! `detector` walks a host page and attaches enhancements to new matches.

pub mod detector;
pub mod matcher;

pub use detector::{route_matches, scan_and_enhance, HostField, HostPage, ScanReport};
pub use matcher::{DetectionRule, FieldMatcher, FieldMeta};
