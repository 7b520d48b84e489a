//! Data structures representing format components.
//!
//! Contains the decoded frame header and the static tables its fields index
//! into: sampling rates, channel configurations and bitrates.

pub mod header;
pub mod tables;
