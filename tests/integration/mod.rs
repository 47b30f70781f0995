//! Integration tests for tasklint
//!
//! These tests drive the public API against task lists and config files on disk.

pub mod check_files;
pub mod config_files;
pub mod custom_validators;
pub mod helpers;
