//! Prelude for commonly used types and traits in churn-guard.

pub use crate::config::ValidatorConfig;
pub use crate::core::{ChurnValidator, ValidationResult};
pub use crate::error::{ErrorContext, GuardError, Result};
pub use crate::formatters::{FormatterConfig, ResultFormatter};
pub use crate::logging::LogConfig;
