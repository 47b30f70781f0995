//! Rule validation over extracted tasks
//!
//! Validators are independent, run in priority order per task, and contribute to a
//! combined [`ValidationResult`]. A critical finding ends validation of its task only.

mod context;
mod pipeline;
mod result;
pub mod validators;

pub use context::ValidationContext;
pub use pipeline::{TaskValidator, ValidationPipeline};
pub use result::{ErrorKind, Severity, ValidationError, ValidationResult};
