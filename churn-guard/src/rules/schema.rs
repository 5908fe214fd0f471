//! Required column presence.

use crate::core::{Rule, RuleCategory, RuleOutcome};
use crate::prelude::*;
use arrow::record_batch::RecordBatch;
use serde_json::json;
use tracing::{debug, instrument};

/// A rule that checks a column is present in the batch schema.
///
/// # Examples
///
/// ```rust
/// use churn_guard::core::Rule;
/// use churn_guard::rules::ColumnExistsRule;
///
/// let rule = ColumnExistsRule::new("customerID");
/// assert_eq!(rule.id(), "column_exists:customerID");
/// ```
#[derive(Debug, Clone)]
pub struct ColumnExistsRule {
    id: String,
    column: String,
}

impl ColumnExistsRule {
    pub fn new(column: impl Into<String>) -> Self {
        let column = column.into();
        Self {
            id: format!("column_exists:{column}"),
            column,
        }
    }
}

impl Rule for ColumnExistsRule {
    #[instrument(skip(self, batch), fields(rule.id = %self.id))]
    fn evaluate(&self, batch: &RecordBatch) -> Result<RuleOutcome> {
        let found = batch.schema_ref().column_with_name(&self.column).is_some();
        debug!(column = %self.column, found, "Checked column presence");

        if found {
            Ok(RuleOutcome::success_with_metric(1.0))
        } else {
            Ok(RuleOutcome::failure_with_metric(
                0.0,
                format!("Required column '{}' is missing", self.column),
            ))
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Schema
    }

    fn columns(&self) -> Vec<String> {
        vec![self.column.clone()]
    }

    fn parameters(&self) -> serde_json::Value {
        json!({ "column": self.column })
    }

    fn description(&self) -> String {
        format!("Column '{}' must exist", self.column)
    }
}
