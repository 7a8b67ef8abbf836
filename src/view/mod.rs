//! Visibility policy and per-viewer group detail assembly.

pub mod details;
pub mod visibility;
