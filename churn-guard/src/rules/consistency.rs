//! Cross-column consistency with a tolerance fraction.

use super::{float_values, ratio};
use crate::config::ConsistencyConfig;
use crate::core::{Rule, RuleCategory, RuleOutcome};
use crate::prelude::*;
use arrow::record_batch::RecordBatch;
use serde_json::json;
use tracing::{debug, instrument};

/// A rule that checks `column_a >= column_b` (or `>`) holds for at least a
/// `mostly` fraction of rows.
///
/// Rows where both values are null are ignored. A row with only one null
/// value counts as a violation. With the default tolerance of 0.95, up to 5%
/// of rows may violate the relationship before the rule fails.
///
/// # Examples
///
/// ```rust
/// use churn_guard::config::ConsistencyConfig;
/// use churn_guard::core::Rule;
/// use churn_guard::rules::PairGreaterOrEqualRule;
///
/// let rule = PairGreaterOrEqualRule::new(ConsistencyConfig::default());
/// assert_eq!(rule.id(), "pair_greater_or_equal:TotalCharges,MonthlyCharges");
/// assert_eq!(rule.parameters()["mostly"], 0.95);
/// ```
#[derive(Debug, Clone)]
pub struct PairGreaterOrEqualRule {
    id: String,
    config: ConsistencyConfig,
}

impl PairGreaterOrEqualRule {
    pub fn new(config: ConsistencyConfig) -> Self {
        let kind = if config.or_equal {
            "pair_greater_or_equal"
        } else {
            "pair_greater"
        };
        Self {
            id: format!("{kind}:{},{}", config.column_a, config.column_b),
            config,
        }
    }

    fn satisfied(&self, a: f64, b: f64) -> bool {
        if self.config.or_equal {
            a >= b
        } else {
            a > b
        }
    }

    fn operator(&self) -> &'static str {
        if self.config.or_equal {
            ">="
        } else {
            ">"
        }
    }
}

impl Rule for PairGreaterOrEqualRule {
    #[instrument(skip(self, batch), fields(rule.id = %self.id, mostly = self.config.mostly))]
    fn evaluate(&self, batch: &RecordBatch) -> Result<RuleOutcome> {
        let column_a = &self.config.column_a;
        let column_b = &self.config.column_b;
        let Some(array_a) = batch.column_by_name(column_a) else {
            return Ok(RuleOutcome::missing_column(column_a));
        };
        let Some(array_b) = batch.column_by_name(column_b) else {
            return Ok(RuleOutcome::missing_column(column_b));
        };

        let values_a = float_values(&self.id, array_a)?;
        let values_b = float_values(&self.id, array_b)?;

        let mut considered = 0usize;
        let mut satisfied = 0usize;
        for (a, b) in values_a.iter().zip(values_b.iter()) {
            match (a, b) {
                (None, None) => continue,
                (Some(a), Some(b)) if self.satisfied(a, b) => satisfied += 1,
                _ => {}
            }
            considered += 1;
        }

        let fraction = ratio(satisfied, considered);
        debug!(considered, satisfied, fraction, "Checked column pair");

        if fraction >= self.config.mostly {
            Ok(RuleOutcome::success_with_metric(fraction))
        } else {
            Ok(RuleOutcome::failure_with_metric(
                fraction,
                format!(
                    "Only {:.2}% of rows satisfy {column_a} {} {column_b}, expected at least {:.2}%",
                    fraction * 100.0,
                    self.operator(),
                    self.config.mostly * 100.0
                ),
            ))
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::CrossColumn
    }

    fn columns(&self) -> Vec<String> {
        vec![self.config.column_a.clone(), self.config.column_b.clone()]
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "column_A": self.config.column_a,
            "column_B": self.config.column_b,
            "or_equal": self.config.or_equal,
            "mostly": self.config.mostly,
        })
    }

    fn description(&self) -> String {
        format!(
            "{} {} {} for at least {:.0}% of rows",
            self.config.column_a,
            self.operator(),
            self.config.column_b,
            self.config.mostly * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Float64Array;
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    /// 100 rows where the first `violations` have total < monthly.
    fn batch(violations: usize) -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("TotalCharges", DataType::Float64, true),
            Field::new("MonthlyCharges", DataType::Float64, true),
        ]));
        let total: Vec<f64> = (0..100)
            .map(|i| if i < violations { 10.0 } else { 500.0 })
            .collect();
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Float64Array::from(total)),
                Arc::new(Float64Array::from(vec![50.0; 100])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_within_tolerance_passes() {
        let outcome = PairGreaterOrEqualRule::new(ConsistencyConfig::default())
            .evaluate(&batch(4))
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.metric, Some(0.96));
    }

    #[test]
    fn test_exact_tolerance_passes() {
        let outcome = PairGreaterOrEqualRule::new(ConsistencyConfig::default())
            .evaluate(&batch(5))
            .unwrap();
        assert!(outcome.success);
    }

    #[test]
    fn test_beyond_tolerance_fails() {
        let outcome = PairGreaterOrEqualRule::new(ConsistencyConfig::default())
            .evaluate(&batch(6))
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.metric, Some(0.94));
        assert!(outcome.message.unwrap().contains("94.00%"));
    }

    #[test]
    fn test_equal_values_respect_or_equal() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("TotalCharges", DataType::Float64, true),
            Field::new("MonthlyCharges", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Float64Array::from(vec![Some(29.85), None])),
                Arc::new(Float64Array::from(vec![Some(29.85), None])),
            ],
        )
        .unwrap();

        let inclusive = PairGreaterOrEqualRule::new(ConsistencyConfig::default());
        assert_eq!(inclusive.evaluate(&batch).unwrap().metric, Some(1.0));

        let strict = PairGreaterOrEqualRule::new(ConsistencyConfig {
            or_equal: false,
            mostly: 1.0,
            ..ConsistencyConfig::default()
        });
        assert_eq!(strict.id(), "pair_greater:TotalCharges,MonthlyCharges");
        assert!(!strict.evaluate(&batch).unwrap().success);
    }

    #[test]
    fn test_missing_column_fails() {
        let rule = PairGreaterOrEqualRule::new(ConsistencyConfig {
            column_b: "Charges".to_string(),
            ..ConsistencyConfig::default()
        });
        let outcome = rule.evaluate(&batch(0)).unwrap();
        assert!(!outcome.success);
        assert!(outcome.message.unwrap().contains("'Charges'"));
    }
}
