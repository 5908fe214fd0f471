//! Categorical domain membership.

use super::{ratio, string_values};
use crate::core::{Rule, RuleCategory, RuleOutcome};
use crate::prelude::*;
use arrow::record_batch::RecordBatch;
use serde_json::json;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Maximum number of distinct offending values quoted in a failure message.
const MAX_REPORTED_VALUES: usize = 5;

/// A rule that checks every non-null value of a column is in an allowed set.
///
/// Matching is exact and case-sensitive. Nulls are skipped; use
/// [`NotNullRule`](super::NotNullRule) to reject them.
#[derive(Debug, Clone)]
pub struct InSetRule {
    id: String,
    column: String,
    allowed: Vec<String>,
    lookup: HashSet<String>,
}

impl InSetRule {
    pub fn new<I, S>(column: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let column = column.into();
        let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
        Self {
            id: format!("in_set:{column}"),
            lookup: allowed.iter().cloned().collect(),
            column,
            allowed,
        }
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }
}

impl Rule for InSetRule {
    #[instrument(skip(self, batch), fields(rule.id = %self.id, allowed = self.allowed.len()))]
    fn evaluate(&self, batch: &RecordBatch) -> Result<RuleOutcome> {
        let Some(array) = batch.column_by_name(&self.column) else {
            return Ok(RuleOutcome::missing_column(&self.column));
        };

        let values = string_values(&self.id, array)?;
        let mut considered = 0usize;
        let mut unexpected = 0usize;
        let mut samples: Vec<&str> = Vec::new();

        for value in values.iter().flatten() {
            considered += 1;
            if !self.lookup.contains(value) {
                unexpected += 1;
                if samples.len() < MAX_REPORTED_VALUES && !samples.contains(&value) {
                    samples.push(value);
                }
            }
        }

        let in_set = ratio(considered - unexpected, considered);
        debug!(column = %self.column, considered, unexpected, "Checked domain membership");

        if unexpected == 0 {
            Ok(RuleOutcome::success_with_metric(in_set))
        } else {
            Ok(RuleOutcome::failure_with_metric(
                in_set,
                format!(
                    "Column '{}' has {unexpected} value(s) outside {:?}, e.g. {:?}",
                    self.column, self.allowed, samples
                ),
            ))
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Categorical
    }

    fn columns(&self) -> Vec<String> {
        vec![self.column.clone()]
    }

    fn parameters(&self) -> serde_json::Value {
        json!({ "column": self.column, "value_set": self.allowed })
    }

    fn description(&self) -> String {
        format!("Values of '{}' must be one of {:?}", self.column, self.allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::StringArray;
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn contract_batch(values: Vec<Option<&str>>) -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![Field::new(
            "Contract",
            DataType::Utf8,
            true,
        )]));
        RecordBatch::try_new(schema, vec![Arc::new(StringArray::from(values))]).unwrap()
    }

    fn contract_rule() -> InSetRule {
        InSetRule::new("Contract", ["Month-to-month", "One year", "Two year"])
    }

    #[test]
    fn test_all_in_domain_passes() {
        let batch = contract_batch(vec![Some("Month-to-month"), Some("Two year"), None]);
        let outcome = contract_rule().evaluate(&batch).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.metric, Some(1.0));
    }

    #[test]
    fn test_case_sensitive_mismatch_fails() {
        let batch = contract_batch(vec![
            Some("one year"),
            Some("One year"),
            Some("one year"),
            Some("Weekly"),
        ]);
        let outcome = contract_rule().evaluate(&batch).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.metric, Some(0.25));

        let message = outcome.message.unwrap();
        assert!(message.contains("3 value(s)"));
        assert!(message.contains("\"one year\", \"Weekly\""));
    }

    #[test]
    fn test_all_null_column_passes() {
        let batch = contract_batch(vec![None, None]);
        assert!(contract_rule().evaluate(&batch).unwrap().success);
    }

    #[test]
    fn test_parameters_list_value_set() {
        let params = contract_rule().parameters();
        assert_eq!(params["column"], "Contract");
        assert_eq!(params["value_set"][2], "Two year");
    }
}
