//! Non-nullable column checks.

use super::{ratio, string_values};
use crate::core::{Rule, RuleCategory, RuleOutcome};
use crate::prelude::*;
use arrow::array::Array;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use serde_json::json;
use tracing::{debug, instrument};

/// A rule that requires every row of a column to hold a value.
///
/// Nulls always count as missing. For text columns an empty or
/// whitespace-only string counts as missing too, since raw exports write
/// absent values that way.
///
/// # Examples
///
/// ```rust
/// use churn_guard::core::{Rule, RuleCategory};
/// use churn_guard::rules::NotNullRule;
///
/// let rule = NotNullRule::new("customerID");
/// assert_eq!(rule.id(), "not_null:customerID");
/// assert_eq!(rule.category(), RuleCategory::Null);
/// ```
#[derive(Debug, Clone)]
pub struct NotNullRule {
    id: String,
    column: String,
}

impl NotNullRule {
    pub fn new(column: impl Into<String>) -> Self {
        let column = column.into();
        Self {
            id: format!("not_null:{column}"),
            column,
        }
    }
}

fn is_text(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
    )
}

impl Rule for NotNullRule {
    #[instrument(skip(self, batch), fields(rule.id = %self.id))]
    fn evaluate(&self, batch: &RecordBatch) -> Result<RuleOutcome> {
        let Some(array) = batch.column_by_name(&self.column) else {
            return Ok(RuleOutcome::missing_column(&self.column));
        };

        let total = array.len();
        let missing = if is_text(array.data_type()) {
            string_values(&self.id, array)?
                .iter()
                .filter(|v| v.map_or(true, |s| s.trim().is_empty()))
                .count()
        } else {
            array.logical_null_count()
        };

        let completeness = ratio(total - missing, total);
        debug!(column = %self.column, total, missing, completeness, "Computed completeness");

        if missing == 0 {
            Ok(RuleOutcome::success_with_metric(completeness))
        } else {
            Ok(RuleOutcome::failure_with_metric(
                completeness,
                format!(
                    "Column '{}' has {missing} missing value(s) out of {total}",
                    self.column
                ),
            ))
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Null
    }

    fn columns(&self) -> Vec<String> {
        vec![self.column.clone()]
    }

    fn parameters(&self) -> serde_json::Value {
        json!({ "column": self.column })
    }

    fn description(&self) -> String {
        format!("Column '{}' must not contain nulls", self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use std::sync::Arc;

    fn batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("customerID", DataType::Utf8, true),
            Field::new("gender", DataType::Utf8, true),
            Field::new("tenure", DataType::Float64, true),
            Field::new("MonthlyCharges", DataType::Float64, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["C001", "C002", "C003", "C004"])),
                Arc::new(StringArray::from(vec![
                    Some("Male"),
                    Some("  "),
                    None,
                    Some("Female"),
                ])),
                Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0, 4.0])),
                Arc::new(Float64Array::from(vec![Some(1.0), None, Some(3.0), Some(4.0)])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_complete_column_passes() {
        let outcome = NotNullRule::new("customerID").evaluate(&batch()).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.metric, Some(1.0));

        let outcome = NotNullRule::new("tenure").evaluate(&batch()).unwrap();
        assert!(outcome.success);
    }

    #[test]
    fn test_blank_and_null_strings_are_missing() {
        let outcome = NotNullRule::new("gender").evaluate(&batch()).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.metric, Some(0.5));
        assert!(outcome.message.unwrap().contains("2 missing value(s) out of 4"));
    }

    #[test]
    fn test_numeric_nulls_are_missing() {
        let outcome = NotNullRule::new("MonthlyCharges")
            .evaluate(&batch())
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.metric, Some(0.75));
    }

    #[test]
    fn test_missing_column_fails() {
        let outcome = NotNullRule::new("Contract").evaluate(&batch()).unwrap();
        assert!(!outcome.success);
        assert!(outcome.metric.is_none());
    }
}
