pub mod check;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod references;
pub mod tasks;
pub mod template;
pub mod validate;

pub use check::{check_document, check_file, CheckReport, SUCCESS_MESSAGE};
pub use config::LintConfig;
pub use error::LintError;
