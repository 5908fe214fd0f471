//! # churn-guard - Data Validation for Telecom Churn Records
//!
//! churn-guard checks a batch of telecom customer records against a fixed
//! rule set before the batch enters model training or scoring, and returns a
//! single structured verdict listing every rule that failed.
//!
//! Batches are Apache Arrow [`RecordBatch`](arrow::record_batch::RecordBatch)es.
//! Evaluation is synchronous and in memory; a validator is immutable once
//! built and can be shared across threads.
//!
//! ## Quick Start
//!
//! ```rust
//! use churn_guard::prelude::*;
//! use churn_guard::test_fixtures::sample_batch;
//!
//! # fn main() -> churn_guard::prelude::Result<()> {
//! let validator = ChurnValidator::new(ValidatorConfig::strict())?;
//!
//! let mut batch = sample_batch()?;
//! let result = validator.validate_batch(&mut batch);
//!
//! if result.success {
//!     println!("{} rows passed {} checks", result.summary.row_count, result.summary.total);
//! } else {
//!     for detail in &result.failure_details {
//!         println!("{}: {}", detail.identifier, detail.message);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Rules
//!
//! Rules run in a fixed order, one phase per category:
//!
//! 1. **Schema**: every required column exists (`column_exists:<col>`)
//! 2. **Null**: non-nullable columns have no missing values (`not_null:<col>`)
//! 3. **Categorical**: values belong to the allowed set (`in_set:<col>`)
//! 4. **Range**: numbers lie within inclusive bounds (`between:<col>`)
//! 5. **Cross column**: `TotalCharges >= MonthlyCharges` for at least 95% of
//!    rows (`pair_greater_or_equal:TotalCharges,MonthlyCharges`)
//! 6. **Cardinality**: the row count lies within bounds (`row_count_between`)
//!
//! A violated rule never stops the run; every rule is evaluated and every
//! failure is reported. An absent or empty batch fails with
//! `empty_dataframe`, and a fault during evaluation fails with
//! `validation_error`.
//!
//! ## Numeric coercion
//!
//! Columns with numeric bounds are rewritten in place as `Float64` before any
//! rule runs. Unparsable text and nulls become `0.0`. See [`coercion`].
//!
//! ## Configuration
//!
//! [`ValidatorConfig`](config::ValidatorConfig) describes the rule set. The
//! [`strict`](config::ValidatorConfig::strict) preset caps `TotalCharges` at
//! 10000; the [`lenient`](config::ValidatorConfig::lenient) preset leaves it
//! unbounded and relaxes the null checks. Configurations can also be loaded
//! from JSON.
//!
//! ## Architecture
//!
//! - **`core`**: `Rule`, `RuleSet`, `ChurnValidator` and result types
//! - **`rules`**: built-in rule implementations
//! - **`coercion`**: lenient numeric coercion
//! - **`config`**: validator configuration and presets
//! - **`sources`**: CSV loading
//! - **`formatters`**: JSON and console output
//! - **`logging`**: tracing configuration

pub mod coercion;
pub mod config;
pub mod core;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod rules;
pub mod sources;
pub mod test_fixtures;
