//! CLI command implementations

pub mod look_back;
