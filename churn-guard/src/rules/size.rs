//! Row count bounds.

use crate::config::RowCountRange;
use crate::core::{Rule, RuleCategory, RuleOutcome};
use crate::prelude::*;
use arrow::record_batch::RecordBatch;
use serde_json::json;
use tracing::{debug, instrument};

/// A rule that checks the batch row count lies in an inclusive range.
///
/// # Examples
///
/// ```rust
/// use churn_guard::config::RowCountRange;
/// use churn_guard::core::Rule;
/// use churn_guard::rules::RowCountRule;
///
/// let rule = RowCountRule::new(RowCountRange { min: 1, max: 1_000_000 });
/// assert_eq!(rule.id(), "row_count_between");
/// ```
#[derive(Debug, Clone)]
pub struct RowCountRule {
    range: RowCountRange,
}

impl RowCountRule {
    pub fn new(range: RowCountRange) -> Self {
        Self { range }
    }
}

impl Rule for RowCountRule {
    #[instrument(skip(self, batch), fields(min = self.range.min, max = self.range.max))]
    fn evaluate(&self, batch: &RecordBatch) -> Result<RuleOutcome> {
        let rows = batch.num_rows();
        let in_range = (self.range.min..=self.range.max).contains(&rows);
        debug!(rows, in_range, "Checked row count");

        if in_range {
            Ok(RuleOutcome::success_with_metric(rows as f64))
        } else {
            Ok(RuleOutcome::failure_with_metric(
                rows as f64,
                format!(
                    "Row count {rows} is not between {} and {}",
                    self.range.min, self.range.max
                ),
            ))
        }
    }

    fn id(&self) -> &str {
        "row_count_between"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Cardinality
    }

    fn parameters(&self) -> serde_json::Value {
        json!({ "min_value": self.range.min, "max_value": self.range.max })
    }

    fn description(&self) -> String {
        format!(
            "Row count must be between {} and {}",
            self.range.min, self.range.max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Int64Array;
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn batch(rows: i64) -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![Field::new("tenure", DataType::Int64, false)]));
        RecordBatch::try_new(
            schema,
            vec![Arc::new(Int64Array::from((0..rows).collect::<Vec<_>>()))],
        )
        .unwrap()
    }

    #[test]
    fn test_row_count_in_range() {
        let rule = RowCountRule::new(RowCountRange { min: 1, max: 3 });
        let outcome = rule.evaluate(&batch(3)).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.metric, Some(3.0));
    }

    #[test]
    fn test_row_count_out_of_range() {
        let rule = RowCountRule::new(RowCountRange { min: 1, max: 3 });
        let outcome = rule.evaluate(&batch(4)).unwrap();
        assert!(!outcome.success);
        assert_eq!(
            outcome.message.as_deref(),
            Some("Row count 4 is not between 1 and 3")
        );

        assert!(!rule.evaluate(&batch(0)).unwrap().success);
    }
}
