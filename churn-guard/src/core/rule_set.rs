//! Ordered, immutable collections of rules.

use super::{BoxedRule, Rule, RuleCategory};
use crate::config::ValidatorConfig;
use crate::prelude::*;
use crate::rules::{
    BetweenRule, ColumnExistsRule, InSetRule, NotNullRule, PairGreaterOrEqualRule, RowCountRule,
};
use std::sync::Arc;

/// A fixed, ordered set of rules.
///
/// Rules are kept in pipeline order (schema, null, categorical, range,
/// cross-column, cardinality); within a category they keep the order they were
/// added in. A built rule set cannot be changed and is cheap to clone.
///
/// # Examples
///
/// ```rust
/// use churn_guard::config::ValidatorConfig;
/// use churn_guard::core::{RuleCategory, RuleSet};
///
/// let rules = RuleSet::from_config(&ValidatorConfig::strict()).unwrap();
/// assert_eq!(rules.len(), 27);
/// assert_eq!(rules.rules()[0].id(), "column_exists:customerID");
/// assert_eq!(rules.count_by_category(RuleCategory::Range), 3);
/// ```
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Arc<[BoxedRule]>,
}

impl RuleSet {
    /// Creates a new builder.
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// Builds the rule set described by `config`.
    ///
    /// Fails with [`GuardError::Configuration`] if the configuration is invalid.
    pub fn from_config(config: &ValidatorConfig) -> Result<Self> {
        Ok(Self::builder_from_config(config)?.build())
    }

    /// Returns a builder pre-loaded with the rules described by `config`, so
    /// extra rules can be added before building.
    pub fn builder_from_config(config: &ValidatorConfig) -> Result<RuleSetBuilder> {
        config.validate()?;
        Ok(Self::assemble(config))
    }

    pub(crate) fn assemble(config: &ValidatorConfig) -> RuleSetBuilder {
        let mut builder = Self::builder();
        for column in &config.required_columns {
            builder = builder.rule(ColumnExistsRule::new(column));
        }
        for column in &config.non_nullable_columns {
            builder = builder.rule(NotNullRule::new(column));
        }
        for domain in &config.categorical_constraints {
            builder = builder.rule(InSetRule::new(&domain.column, domain.allowed.iter()));
        }
        for range in &config.numeric_ranges {
            builder = builder.rule(BetweenRule::new(range.clone()));
        }
        if let Some(consistency) = &config.consistency {
            builder = builder.rule(PairGreaterOrEqualRule::new(consistency.clone()));
        }
        if let Some(row_count) = config.row_count {
            builder = builder.rule(RowCountRule::new(row_count));
        }
        builder
    }

    /// Returns the rules in evaluation order.
    pub fn rules(&self) -> &[BoxedRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the rule with the given identifier.
    pub fn get(&self, id: &str) -> Option<&dyn Rule> {
        self.rules.iter().find(|r| r.id() == id).map(|r| r.as_ref())
    }

    /// Returns the identifiers of all rules in evaluation order.
    pub fn ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    pub fn count_by_category(&self, category: RuleCategory) -> usize {
        self.rules
            .iter()
            .filter(|r| r.category() == category)
            .count()
    }
}

/// Builder for [`RuleSet`].
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<BoxedRule>,
}

impl RuleSetBuilder {
    /// Adds a rule to the set.
    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds an already boxed rule to the set.
    pub fn boxed_rule(mut self, rule: BoxedRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several rules at once.
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = BoxedRule>,
    {
        self.rules.extend(rules);
        self
    }

    /// Builds the rule set, ordering rules by category.
    pub fn build(mut self) -> RuleSet {
        // Stable, so insertion order survives within a category.
        self.rules.sort_by_key(|r| r.category());
        RuleSet {
            rules: self.rules.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NumericRange;
    use crate::core::RuleOutcome;
    use crate::rules::CustomRule;

    #[test]
    fn test_strict_rule_set_order() {
        let rules = RuleSet::from_config(&ValidatorConfig::strict()).unwrap();
        let ids = rules.ids();

        assert_eq!(rules.count_by_category(RuleCategory::Schema), 10);
        assert_eq!(rules.count_by_category(RuleCategory::Null), 6);
        assert_eq!(rules.count_by_category(RuleCategory::Categorical), 6);
        assert_eq!(rules.count_by_category(RuleCategory::Range), 3);
        assert_eq!(rules.count_by_category(RuleCategory::CrossColumn), 1);
        assert_eq!(rules.count_by_category(RuleCategory::Cardinality), 1);

        assert_eq!(ids[10], "not_null:customerID");
        assert_eq!(ids[16], "in_set:gender");
        assert_eq!(ids[22], "between:tenure");
        assert_eq!(ids[25], "pair_greater_or_equal:TotalCharges,MonthlyCharges");
        assert_eq!(ids[26], "row_count_between");
        assert_eq!(rules.len(), 27);
    }

    #[test]
    fn test_lenient_rule_set() {
        let rules = RuleSet::from_config(&ValidatorConfig::lenient()).unwrap();
        assert_eq!(rules.len(), 10 + 1 + 6 + 3 + 1);
        assert_eq!(rules.count_by_category(RuleCategory::Cardinality), 0);
        assert!(rules.get("row_count_between").is_none());
        assert!(rules.get("between:TotalCharges").is_some());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ValidatorConfig::strict()
            .with_numeric_range(NumericRange::between("tenure", 5.0, 1.0));
        assert!(matches!(
            RuleSet::from_config(&config),
            Err(GuardError::Configuration(_))
        ));
    }

    #[test]
    fn test_builder_sorts_by_category() {
        let rules = RuleSet::builder()
            .rule(CustomRule::new("late", RuleCategory::Cardinality, |_| {
                Ok(RuleOutcome::success())
            }))
            .rule(ColumnExistsRule::new("b"))
            .rule(NotNullRule::new("a"))
            .rule(ColumnExistsRule::new("a"))
            .build();

        assert_eq!(
            rules.ids(),
            vec!["column_exists:b", "column_exists:a", "not_null:a", "late"]
        );
    }

    #[test]
    fn test_builder_from_config_keeps_pipeline_order() {
        let rules = RuleSet::builder_from_config(&ValidatorConfig::lenient())
            .unwrap()
            .rule(CustomRule::new("customer_id_prefix", RuleCategory::Schema, |_| {
                Ok(RuleOutcome::success())
            }))
            .build();

        assert_eq!(rules.len(), 22);
        assert_eq!(rules.ids()[10], "customer_id_prefix");
        assert_eq!(rules.ids()[11], "not_null:customerID");
    }

    #[test]
    fn test_rule_set_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleSet>();
    }
}
