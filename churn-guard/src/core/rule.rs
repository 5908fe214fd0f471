//! Rule trait and related types for validation checks.

use crate::prelude::*;
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// The category a rule belongs to.
///
/// Categories are listed in the order a [`RuleSet`](super::RuleSet) evaluates them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Required column presence
    Schema,
    /// Non-nullable columns
    Null,
    /// Categorical domain membership
    Categorical,
    /// Inclusive numeric bounds
    Range,
    /// Relationships between two columns
    CrossColumn,
    /// Row count bounds
    Cardinality,
}

impl RuleCategory {
    /// Returns the string representation of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::Schema => "schema",
            RuleCategory::Null => "null",
            RuleCategory::Categorical => "categorical",
            RuleCategory::Range => "range",
            RuleCategory::CrossColumn => "cross_column",
            RuleCategory::Cardinality => "cardinality",
        }
    }

    /// Progress line logged when the validator enters this category.
    pub fn phase_label(&self) -> &'static str {
        match self {
            RuleCategory::Schema => "Validating schema and required columns",
            RuleCategory::Null => "Validating null constraints",
            RuleCategory::Categorical => "Validating categorical values",
            RuleCategory::Range => "Validating numeric ranges",
            RuleCategory::CrossColumn => "Validating data consistency",
            RuleCategory::Cardinality => "Validating data cardinality",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of evaluating a single rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// Whether the rule passed
    pub success: bool,
    /// Optional metric observed during evaluation (a ratio or a count)
    pub metric: Option<f64>,
    /// Optional message providing additional context
    pub message: Option<String>,
}

impl RuleOutcome {
    /// Creates a passing outcome.
    pub fn success() -> Self {
        Self {
            success: true,
            metric: None,
            message: None,
        }
    }

    /// Creates a passing outcome with a metric.
    pub fn success_with_metric(metric: f64) -> Self {
        Self {
            success: true,
            metric: Some(metric),
            message: None,
        }
    }

    /// Creates a failing outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            metric: None,
            message: Some(message.into()),
        }
    }

    /// Creates a failing outcome with a metric.
    pub fn failure_with_metric(metric: f64, message: impl Into<String>) -> Self {
        Self {
            success: false,
            metric: Some(metric),
            message: Some(message.into()),
        }
    }

    /// Outcome for a rule whose target column is absent from the batch.
    pub fn missing_column(column: &str) -> Self {
        Self::failure(format!("Column '{column}' not found in batch"))
    }
}

/// A validation rule evaluated against a record batch.
///
/// Implementations hold only their parameters and are reusable across any
/// number of batches. A rule never mutates the batch it is given.
///
/// # Examples
///
/// ```rust
/// use arrow::record_batch::RecordBatch;
/// use churn_guard::core::{Rule, RuleCategory, RuleOutcome};
/// use churn_guard::prelude::*;
///
/// #[derive(Debug)]
/// struct HasColumns(usize);
///
/// impl Rule for HasColumns {
///     fn evaluate(&self, batch: &RecordBatch) -> Result<RuleOutcome> {
///         let found = batch.num_columns();
///         if found >= self.0 {
///             Ok(RuleOutcome::success_with_metric(found as f64))
///         } else {
///             Ok(RuleOutcome::failure(format!("expected {} columns", self.0)))
///         }
///     }
///
///     fn id(&self) -> &str {
///         "column_count"
///     }
///
///     fn category(&self) -> RuleCategory {
///         RuleCategory::Schema
///     }
/// }
/// ```
pub trait Rule: Debug + Send + Sync {
    /// Evaluates the rule against the batch.
    ///
    /// Violations are reported as a failing [`RuleOutcome`]; an `Err` means the
    /// rule could not be evaluated at all.
    fn evaluate(&self, batch: &RecordBatch) -> Result<RuleOutcome>;

    /// Returns the identifier reported in `failed_checks`.
    fn id(&self) -> &str;

    /// Returns the category of this rule.
    fn category(&self) -> RuleCategory;

    /// Returns the columns this rule reads.
    fn columns(&self) -> Vec<String> {
        Vec::new()
    }

    /// Returns the rule parameters as a JSON object.
    fn parameters(&self) -> serde_json::Value {
        serde_json::Value::Object(serde_json::Map::new())
    }

    /// Returns a human-readable description of what the rule validates.
    fn description(&self) -> String {
        format!("{} rule '{}'", self.category(), self.id())
    }
}

/// A boxed rule for use in collections.
pub type BoxedRule = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_outcome_builders() {
        let success = RuleOutcome::success();
        assert!(success.success);
        assert!(success.metric.is_none());
        assert!(success.message.is_none());

        let with_metric = RuleOutcome::success_with_metric(0.97);
        assert_eq!(with_metric.metric, Some(0.97));

        let failure = RuleOutcome::failure_with_metric(0.3, "Below threshold");
        assert!(!failure.success);
        assert_eq!(failure.metric, Some(0.3));
        assert_eq!(failure.message.as_deref(), Some("Below threshold"));

        let missing = RuleOutcome::missing_column("tenure");
        assert!(!missing.success);
        assert_eq!(
            missing.message.as_deref(),
            Some("Column 'tenure' not found in batch")
        );
    }

    #[test]
    fn test_category_order_matches_pipeline() {
        let mut categories = vec![
            RuleCategory::Cardinality,
            RuleCategory::Range,
            RuleCategory::Schema,
            RuleCategory::CrossColumn,
            RuleCategory::Categorical,
            RuleCategory::Null,
        ];
        categories.sort();
        assert_eq!(
            categories,
            vec![
                RuleCategory::Schema,
                RuleCategory::Null,
                RuleCategory::Categorical,
                RuleCategory::Range,
                RuleCategory::CrossColumn,
                RuleCategory::Cardinality,
            ]
        );
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&RuleCategory::CrossColumn).unwrap();
        assert_eq!(json, "\"cross_column\"");
        assert_eq!(RuleCategory::CrossColumn.to_string(), "cross_column");
    }
}
