//! Inclusive numeric bounds.

use super::{bound_label, float_values, ratio};
use crate::config::NumericRange;
use crate::core::{Rule, RuleCategory, RuleOutcome};
use crate::prelude::*;
use arrow::record_batch::RecordBatch;
use serde_json::json;
use tracing::{debug, instrument};

/// A rule that checks every non-null value of a column lies in `[min, max]`.
///
/// Either bound may be absent. The validator coerces numeric columns before
/// this rule runs, so by then the column holds no nulls; on an uncoerced text
/// column unparsable values are treated as nulls and skipped.
///
/// # Examples
///
/// ```rust
/// use churn_guard::config::NumericRange;
/// use churn_guard::core::Rule;
/// use churn_guard::rules::BetweenRule;
///
/// let rule = BetweenRule::new(NumericRange::between("tenure", 0.0, 120.0));
/// assert_eq!(rule.id(), "between:tenure");
/// assert_eq!(rule.parameters()["max_value"], 120.0);
/// ```
#[derive(Debug, Clone)]
pub struct BetweenRule {
    id: String,
    range: NumericRange,
}

impl BetweenRule {
    pub fn new(range: NumericRange) -> Self {
        Self {
            id: format!("between:{}", range.column),
            range,
        }
    }

    pub fn range(&self) -> &NumericRange {
        &self.range
    }
}

impl Rule for BetweenRule {
    #[instrument(skip(self, batch), fields(rule.id = %self.id, min = ?self.range.min, max = ?self.range.max))]
    fn evaluate(&self, batch: &RecordBatch) -> Result<RuleOutcome> {
        let Some(array) = batch.column_by_name(&self.range.column) else {
            return Ok(RuleOutcome::missing_column(&self.range.column));
        };

        let values = float_values(&self.id, array)?;
        let mut considered = 0usize;
        let mut out_of_range = 0usize;
        let mut observed_min = f64::INFINITY;
        let mut observed_max = f64::NEG_INFINITY;

        for value in values.iter().flatten() {
            considered += 1;
            observed_min = observed_min.min(value);
            observed_max = observed_max.max(value);
            if !self.range.contains(value) {
                out_of_range += 1;
            }
        }

        let in_range = ratio(considered - out_of_range, considered);
        debug!(
            column = %self.range.column,
            considered,
            out_of_range,
            observed_min,
            observed_max,
            "Checked numeric bounds"
        );

        if out_of_range == 0 {
            Ok(RuleOutcome::success_with_metric(in_range))
        } else {
            Ok(RuleOutcome::failure_with_metric(
                in_range,
                format!(
                    "Column '{}' has {out_of_range} value(s) outside [{}, {}] (observed min {observed_min}, max {observed_max})",
                    self.range.column,
                    bound_label(self.range.min, "-inf"),
                    bound_label(self.range.max, "inf"),
                ),
            ))
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Range
    }

    fn columns(&self) -> Vec<String> {
        vec![self.range.column.clone()]
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "column": self.range.column,
            "min_value": self.range.min,
            "max_value": self.range.max,
        })
    }

    fn description(&self) -> String {
        format!(
            "Values of '{}' must be within [{}, {}]",
            self.range.column,
            bound_label(self.range.min, "-inf"),
            bound_label(self.range.max, "inf"),
        )
    }
}
