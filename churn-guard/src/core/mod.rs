//! Core validation types for churn-guard.
//!
//! ## Overview
//!
//! - **[`Rule`]**: a single named check applied to a batch
//! - **[`RuleSet`]**: an immutable, ordered collection of rules
//! - **[`ChurnValidator`]**: coerces numeric columns, runs a rule set and
//!   aggregates the outcome
//! - **[`ValidationResult`]**: the aggregated outcome of one run
//!
//! ## Architecture
//!
//! ```text
//! ChurnValidator
//!     ├── numeric coercion (in place)
//!     └── RuleSet
//!         ├── schema        column_exists:*
//!         ├── null          not_null:*
//!         ├── categorical   in_set:*
//!         ├── range         between:*
//!         ├── cross column  pair_greater_or_equal:*
//!         └── cardinality   row_count_between
//! ```
//!
//! ## Example
//!
//! ```rust
//! use churn_guard::core::{default_validator, EMPTY_BATCH_MARKER};
//!
//! let result = default_validator().validate(None);
//! assert!(!result.success);
//! assert_eq!(result.failed_checks, vec![EMPTY_BATCH_MARKER]);
//! ```

pub mod result;
pub mod rule;
pub mod rule_set;
pub mod validator;

pub use result::{
    FailureDetail, RuleResult, ValidationResult, ValidationSummary, EMPTY_BATCH_MARKER,
    VALIDATION_ERROR_MARKER,
};
pub use rule::{BoxedRule, Rule, RuleCategory, RuleOutcome};
pub use rule_set::{RuleSet, RuleSetBuilder};
pub use validator::{default_validator, ChurnValidator};
