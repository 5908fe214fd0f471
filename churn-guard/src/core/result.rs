//! Validation result types.

use super::RuleCategory;
use serde::{Deserialize, Serialize};

/// Failure marker returned when the batch is absent or has no rows.
pub const EMPTY_BATCH_MARKER: &str = "empty_dataframe";

/// Failure marker returned when evaluation itself faulted.
pub const VALIDATION_ERROR_MARKER: &str = "validation_error";

/// Rule counts and batch size for one validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Number of rules evaluated
    pub total: usize,
    /// Number of rules that passed
    pub passed: usize,
    /// Number of rules that failed (`total - passed`)
    pub failed: usize,
    /// Number of rows in the batch
    pub row_count: usize,
}

impl ValidationSummary {
    /// Returns the pass rate as a percentage (0.0 to 100.0).
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}

/// Details about one failed rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureDetail {
    /// Identifier of the failed rule
    pub identifier: String,
    /// Parameters the rule was configured with
    pub parameters: serde_json::Value,
    /// Human-readable explanation
    pub message: String,
}

/// The outcome of one rule within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    pub identifier: String,
    pub category: RuleCategory,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<f64>,
}

/// The result of validating one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True only when every rule passed
    pub success: bool,
    /// Identifiers of failed rules, in evaluation order
    pub failed_checks: Vec<String>,
    pub summary: ValidationSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failure_details: Vec<FailureDetail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rule_results: Vec<RuleResult>,
    /// Error text when evaluation faulted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    /// Result for an absent or zero-row batch. No rule is evaluated.
    pub fn empty_batch() -> Self {
        Self {
            success: false,
            failed_checks: vec![EMPTY_BATCH_MARKER.to_string()],
            summary: ValidationSummary::default(),
            failure_details: Vec::new(),
            rule_results: Vec::new(),
            error: None,
        }
    }

    /// Result for a run that could not complete.
    pub fn evaluation_error(message: impl Into<String>, row_count: usize) -> Self {
        let message = message.into();
        Self {
            success: false,
            failed_checks: vec![VALIDATION_ERROR_MARKER.to_string()],
            summary: ValidationSummary {
                row_count,
                ..ValidationSummary::default()
            },
            failure_details: vec![FailureDetail {
                identifier: VALIDATION_ERROR_MARKER.to_string(),
                parameters: serde_json::Value::Null,
                message: message.clone(),
            }],
            rule_results: Vec::new(),
            error: Some(message),
        }
    }

    /// Aggregates per-rule results into a final result.
    ///
    /// `failure_details` must hold one entry per failed rule, in evaluation order.
    pub fn from_rules(
        rule_results: Vec<RuleResult>,
        failure_details: Vec<FailureDetail>,
        row_count: usize,
    ) -> Self {
        let total = rule_results.len();
        let passed = rule_results.iter().filter(|r| r.success).count();
        let failed_checks = rule_results
            .iter()
            .filter(|r| !r.success)
            .map(|r| r.identifier.clone())
            .collect();

        Self {
            success: passed == total,
            failed_checks,
            summary: ValidationSummary {
                total,
                passed,
                failed: total - passed,
                row_count,
            },
            failure_details,
            rule_results,
            error: None,
        }
    }

    /// Returns true if the validation succeeded.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Returns true if the validation failed.
    pub fn is_failure(&self) -> bool {
        !self.success
    }

    /// Returns true if `identifier` is among the failed checks.
    pub fn has_failed(&self, identifier: &str) -> bool {
        self.failed_checks.iter().any(|c| c == identifier)
    }

    /// Gets the results of all rules in a category.
    pub fn results_by_category(&self, category: RuleCategory) -> Vec<&RuleResult> {
        self.rule_results
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Formats the validation result as JSON.
    pub fn to_json(&self) -> crate::prelude::Result<String> {
        use crate::formatters::{JsonFormatter, ResultFormatter};
        JsonFormatter::new().format(self)
    }

    /// Formats the validation result as JSON with pretty printing.
    pub fn to_json_pretty(&self) -> crate::prelude::Result<String> {
        use crate::formatters::{JsonFormatter, ResultFormatter};
        JsonFormatter::new().with_pretty(true).format(self)
    }

    /// Formats the validation result for console display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use churn_guard::core::ValidationResult;
    /// let result = ValidationResult::empty_batch();
    /// let human_output = result.to_human().unwrap();
    /// assert!(human_output.contains("FAILED"));
    /// ```
    pub fn to_human(&self) -> crate::prelude::Result<String> {
        use crate::formatters::{HumanFormatter, ResultFormatter};
        HumanFormatter::new().format(self)
    }

    /// Formats the validation result using a custom formatter.
    pub fn format_with<F: crate::formatters::ResultFormatter>(
        &self,
        formatter: &F,
    ) -> crate::prelude::Result<String> {
        formatter.format(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(identifier: &str, category: RuleCategory, success: bool) -> RuleResult {
        RuleResult {
            identifier: identifier.to_string(),
            category,
            success,
            metric: None,
        }
    }

    #[test]
    fn test_summary_success_rate() {
        let mut summary = ValidationSummary::default();
        assert_eq!(summary.success_rate(), 100.0);

        summary.total = 10;
        summary.passed = 8;
        assert_eq!(summary.success_rate(), 80.0);
    }

    #[test]
    fn test_empty_batch_result() {
        let result = ValidationResult::empty_batch();
        assert!(result.is_failure());
        assert_eq!(result.failed_checks, vec!["empty_dataframe"]);
        assert_eq!(result.summary, ValidationSummary::default());
    }

    #[test]
    fn test_evaluation_error_result() {
        let result = ValidationResult::evaluation_error("boom", 42);
        assert!(result.is_failure());
        assert_eq!(result.failed_checks, vec!["validation_error"]);
        assert_eq!(result.summary.row_count, 42);
        assert_eq!(result.summary.total, 0);
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert_eq!(result.failure_details[0].message, "boom");
    }

    #[test]
    fn test_from_rules_preserves_order() {
        let results = vec![
            rule("column_exists:a", RuleCategory::Schema, true),
            rule("not_null:a", RuleCategory::Null, false),
            rule("in_set:b", RuleCategory::Categorical, true),
            rule("between:c", RuleCategory::Range, false),
        ];
        let result = ValidationResult::from_rules(results, Vec::new(), 7);

        assert!(!result.success);
        assert_eq!(result.failed_checks, vec!["not_null:a", "between:c"]);
        assert_eq!(
            result.summary,
            ValidationSummary {
                total: 4,
                passed: 2,
                failed: 2,
                row_count: 7,
            }
        );
        assert!(result.has_failed("between:c"));
        assert_eq!(result.results_by_category(RuleCategory::Range).len(), 1);
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let result = ValidationResult::from_rules(
            vec![rule("row_count_between", RuleCategory::Cardinality, true)],
            Vec::new(),
            3,
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["summary"]["row_count"], 3);
        assert!(json.get("failure_details").is_none());
        assert!(json.get("error").is_none());

        let parsed: ValidationResult = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, result);
    }
}
