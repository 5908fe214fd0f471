//! Data sources that load churn records into a single [`RecordBatch`].
//!
//! The validator works on an in-memory batch; sources exist so callers can
//! go from a raw export on disk to a validated batch without extra glue.

use crate::prelude::*;
use arrow::record_batch::RecordBatch;
use std::fmt::Debug;

mod csv;

pub use csv::{CsvOptions, CsvSource};

/// Something that can produce one batch of records.
///
/// # Examples
///
/// ```rust,no_run
/// use churn_guard::core::default_validator;
/// use churn_guard::sources::{CsvSource, DataSource};
///
/// # fn example() -> churn_guard::prelude::Result<()> {
/// let source = CsvSource::new("data/telco_churn.csv")?;
/// let mut batch = source.load()?;
/// let result = default_validator().validate_batch(&mut batch);
/// println!("{}", result.to_human()?);
/// # Ok(())
/// # }
/// ```
pub trait DataSource: Debug + Send + Sync {
    /// Reads the whole source into one batch.
    fn load(&self) -> Result<RecordBatch>;

    /// Returns a human-readable description of this data source.
    fn description(&self) -> String;
}

/// Loads `source` and validates it with `validator`.
///
/// Load failures are returned as errors; validation failures are part of
/// the returned [`ValidationResult`].
pub fn load_and_validate(
    source: &dyn DataSource,
    validator: &ChurnValidator,
) -> Result<(RecordBatch, ValidationResult)> {
    let mut batch = source.load()?;
    let result = validator.validate_batch(&mut batch);
    Ok((batch, result))
}
