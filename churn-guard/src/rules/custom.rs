//! Closure-backed rules.

use crate::core::{Rule, RuleCategory, RuleOutcome};
use crate::prelude::*;
use arrow::record_batch::RecordBatch;
use std::fmt;
use std::sync::Arc;

type Evaluator = Arc<dyn Fn(&RecordBatch) -> Result<RuleOutcome> + Send + Sync>;

/// A rule whose evaluation is a caller-supplied closure.
///
/// Lets a [`RuleSet`](crate::core::RuleSet) carry checks that have no built-in
/// counterpart while still reporting through the same result contract.
/// Problems must be reported by returning `Err`; a panicking closure unwinds
/// out of [`ChurnValidator::validate`](crate::core::ChurnValidator::validate).
///
/// # Examples
///
/// ```rust
/// use churn_guard::core::{Rule, RuleCategory, RuleOutcome};
/// use churn_guard::rules::CustomRule;
///
/// let rule = CustomRule::new("max_columns", RuleCategory::Schema, |batch| {
///     if batch.num_columns() <= 21 {
///         Ok(RuleOutcome::success())
///     } else {
///         Ok(RuleOutcome::failure("too many columns"))
///     }
/// });
/// assert_eq!(rule.id(), "max_columns");
/// ```
#[derive(Clone)]
pub struct CustomRule {
    id: String,
    category: RuleCategory,
    columns: Vec<String>,
    parameters: serde_json::Value,
    evaluator: Evaluator,
}

impl CustomRule {
    pub fn new<F>(id: impl Into<String>, category: RuleCategory, evaluator: F) -> Self
    where
        F: Fn(&RecordBatch) -> Result<RuleOutcome> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            category,
            columns: Vec::new(),
            parameters: serde_json::Value::Object(serde_json::Map::new()),
            evaluator: Arc::new(evaluator),
        }
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = parameters;
        self
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

impl Rule for CustomRule {
    fn evaluate(&self, batch: &RecordBatch) -> Result<RuleOutcome> {
        (self.evaluator)(batch)
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> RuleCategory {
        self.category
    }

    fn columns(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn parameters(&self) -> serde_json::Value {
        self.parameters.clone()
    }
}
