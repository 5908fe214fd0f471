//! Built-in rule implementations.
//!
//! Each rule implements [`Rule`](crate::core::Rule) and is evaluated directly
//! against an Arrow [`RecordBatch`] with compute kernels; nothing is planned or
//! queried. A [`RuleSet`](crate::core::RuleSet) assembles these from a
//! [`ValidatorConfig`](crate::config::ValidatorConfig).
//!
//! | Rule | Category | Identifier |
//! |------|----------|------------|
//! | [`ColumnExistsRule`] | schema | `column_exists:<col>` |
//! | [`NotNullRule`] | null | `not_null:<col>` |
//! | [`InSetRule`] | categorical | `in_set:<col>` |
//! | [`BetweenRule`] | range | `between:<col>` |
//! | [`PairGreaterOrEqualRule`] | cross_column | `pair_greater_or_equal:<a>,<b>` |
//! | [`RowCountRule`] | cardinality | `row_count_between` |
//! | [`CustomRule`] | any | caller supplied |
//!
//! A rule whose column is missing from the batch fails with a message naming
//! the column rather than returning an error.
//!
//! ```rust
//! use arrow::array::StringArray;
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use churn_guard::core::Rule;
//! use churn_guard::rules::InSetRule;
//! use std::sync::Arc;
//!
//! let schema = Arc::new(Schema::new(vec![Field::new("gender", DataType::Utf8, true)]));
//! let batch = RecordBatch::try_new(
//!     schema,
//!     vec![Arc::new(StringArray::from(vec!["Male", "female"]))],
//! )
//! .unwrap();
//!
//! let rule = InSetRule::new("gender", ["Male", "Female"]);
//! let outcome = rule.evaluate(&batch).unwrap();
//! assert!(!outcome.success);
//! assert_eq!(outcome.metric, Some(0.5));
//! ```

mod completeness;
mod consistency;
mod custom;
mod range;
mod schema;
mod size;
mod values;

pub use completeness::NotNullRule;
pub use consistency::PairGreaterOrEqualRule;
pub use custom::CustomRule;
pub use range::BetweenRule;
pub use schema::ColumnExistsRule;
pub use size::RowCountRule;
pub use values::InSetRule;

use crate::prelude::*;
use arrow::array::{ArrayRef, AsArray, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};

/// Casts a column to `Utf8` so string rules see one representation.
pub(crate) fn string_values(rule: &str, array: &ArrayRef) -> Result<StringArray> {
    let casted = cast(array, &DataType::Utf8).map_err(|e| {
        GuardError::rule_evaluation(
            rule,
            format!("cannot read {} column as text: {e}", array.data_type()),
        )
    })?;
    Ok(casted.as_string::<i32>().clone())
}

/// Casts a column to `Float64`. Unparsable strings become nulls.
pub(crate) fn float_values(rule: &str, array: &ArrayRef) -> Result<Float64Array> {
    let casted = cast(array, &DataType::Float64).map_err(|e| {
        GuardError::rule_evaluation(
            rule,
            format!("cannot read {} column as numbers: {e}", array.data_type()),
        )
    })?;
    Ok(casted.as_primitive::<Float64Type>().clone())
}

/// Fraction of `considered` values that matched; an empty population is fully compliant.
pub(crate) fn ratio(matching: usize, considered: usize) -> f64 {
    if considered == 0 {
        1.0
    } else {
        matching as f64 / considered as f64
    }
}

/// Rendering of an optional bound for messages.
pub(crate) fn bound_label(bound: Option<f64>, unbounded: &str) -> String {
    bound.map_or_else(|| unbounded.to_string(), |b| b.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, Int64Array};
    use std::sync::Arc;

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(0, 0), 1.0);
        assert_eq!(ratio(3, 4), 0.75);
    }

    #[test]
    fn test_string_values_from_integers() {
        let array: ArrayRef = Arc::new(Int64Array::from(vec![Some(1), None]));
        let strings = string_values("in_set:x", &array).unwrap();
        assert_eq!(strings.value(0), "1");
        assert!(strings.is_null(1));
    }

    #[test]
    fn test_float_values_unparsable_become_null() {
        let array: ArrayRef = Arc::new(StringArray::from(vec!["1.5", "abc"]));
        let floats = float_values("between:x", &array).unwrap();
        assert_eq!(floats.value(0), 1.5);
        assert!(floats.is_null(1));
    }

    #[test]
    fn test_bound_label() {
        assert_eq!(bound_label(Some(120.0), "inf"), "120");
        assert_eq!(bound_label(None, "inf"), "inf");
    }
}
