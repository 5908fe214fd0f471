//! The churn record validator.

use super::result::{FailureDetail, RuleResult, ValidationResult};
use super::{RuleCategory, RuleSet};
use crate::coercion::coerce_numeric_columns;
use crate::config::ValidatorConfig;
use crate::logging::{truncate_field, LogConfig};
use crate::prelude::*;
use arrow::record_batch::RecordBatch;
use once_cell::sync::Lazy;
use tracing::{error, info, instrument, warn};

static DEFAULT_VALIDATOR: Lazy<ChurnValidator> = Lazy::new(|| {
    let config = ValidatorConfig::default();
    ChurnValidator {
        rules: RuleSet::assemble(&config).build(),
        config,
        log_config: LogConfig::default(),
    }
});

/// Returns the process-wide validator built from [`ValidatorConfig::default`].
///
/// The rule set is built on first use and shared by every caller afterwards.
pub fn default_validator() -> &'static ChurnValidator {
    &DEFAULT_VALIDATOR
}

/// Validates batches of telecom churn records against a fixed rule set.
///
/// The rule set is built once at construction and never changes, so one
/// validator can be shared freely across threads.
///
/// # Coercion contract
///
/// Before any rule runs, every column named in
/// [`ValidatorConfig::numeric_ranges`] is rewritten in the caller's batch as a
/// non-null `Float64` column; unparsable text and nulls become `0.0`. See
/// [`coercion`](crate::coercion).
///
/// # Examples
///
/// ```rust
/// use churn_guard::config::ValidatorConfig;
/// use churn_guard::core::ChurnValidator;
/// use churn_guard::test_fixtures::sample_batch;
///
/// let validator = ChurnValidator::new(ValidatorConfig::strict()).unwrap();
/// let mut batch = sample_batch().unwrap();
///
/// let result = validator.validate_batch(&mut batch);
/// assert!(result.success);
/// assert!(result.failed_checks.is_empty());
/// assert_eq!(result.summary.row_count, 3);
/// ```
#[derive(Debug, Clone)]
pub struct ChurnValidator {
    config: ValidatorConfig,
    rules: RuleSet,
    log_config: LogConfig,
}

impl ChurnValidator {
    /// Creates a validator for `config`.
    ///
    /// Fails with [`GuardError::Configuration`] if the configuration is invalid.
    pub fn new(config: ValidatorConfig) -> Result<Self> {
        let rules = RuleSet::from_config(&config)?;
        Ok(Self {
            config,
            rules,
            log_config: LogConfig::default(),
        })
    }

    /// Creates a validator with a caller-assembled rule set.
    ///
    /// `config` still decides which columns are coerced to numbers.
    pub fn with_rule_set(config: ValidatorConfig, rules: RuleSet) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rules,
            log_config: LogConfig::default(),
        })
    }

    /// Sets the logging configuration.
    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rules
    }

    /// Validates `batch`, coercing its numeric columns in place.
    pub fn validate_batch(&self, batch: &mut RecordBatch) -> ValidationResult {
        self.validate(Some(batch))
    }

    /// Validates an optional batch.
    ///
    /// An absent or zero-row batch yields the `empty_dataframe` failure
    /// without running any rule. An error while coercing, from a built-in
    /// rule, or returned by a [`CustomRule`](crate::rules::CustomRule) is
    /// reported as a `validation_error` failure. Panics are not caught, so
    /// custom evaluators must return `Err` rather than panic.
    #[instrument(skip(self, batch), fields(rules = self.rules.len()))]
    pub fn validate(&self, batch: Option<&mut RecordBatch>) -> ValidationResult {
        info!("Starting data validation");

        let batch = match batch {
            Some(batch) if batch.num_rows() > 0 => batch,
            _ => {
                error!("Input batch is absent or empty");
                return ValidationResult::empty_batch();
            }
        };

        let row_count = batch.num_rows();
        info!(rows = row_count, "Processing batch");

        match self.run(batch) {
            Ok(result) => {
                self.log_summary(&result);
                result
            }
            Err(e) => {
                error!(error = %e, "Validation error");
                ValidationResult::evaluation_error(e.to_string(), row_count)
            }
        }
    }

    fn run(&self, batch: &mut RecordBatch) -> Result<ValidationResult> {
        let coerced = coerce_numeric_columns(batch, &self.config.numeric_columns())?;
        crate::perf_debug!(self.log_config, columns = ?coerced, "Coerced numeric columns");

        let batch: &RecordBatch = batch;
        let mut rule_results = Vec::with_capacity(self.rules.len());
        let mut failure_details = Vec::new();
        let mut phase: Option<RuleCategory> = None;

        for rule in self.rules.rules() {
            let category = rule.category();
            if phase != Some(category) {
                info!(phase = %category, "{}", category.phase_label());
                phase = Some(category);
            }

            let outcome = rule
                .evaluate(batch)
                .with_context(|| format!("Rule '{}' could not be evaluated", rule.id()))?;

            if outcome.success {
                crate::log_rule!(
                    self.log_config,
                    rule.id = %rule.id(),
                    rule.metric = ?outcome.metric,
                    "Rule passed"
                );
            } else {
                let message = outcome
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("Rule {} failed", rule.id()));
                crate::perf_debug!(
                    self.log_config,
                    rule.id = %rule.id(),
                    rule.metric = ?outcome.metric,
                    failure.message = %truncate_field(&message, self.log_config.max_field_length),
                    "Rule failed"
                );
                failure_details.push(FailureDetail {
                    identifier: rule.id().to_string(),
                    parameters: rule.parameters(),
                    message,
                });
            }

            rule_results.push(RuleResult {
                identifier: rule.id().to_string(),
                category,
                success: outcome.success,
                metric: outcome.metric,
            });
        }

        Ok(ValidationResult::from_rules(
            rule_results,
            failure_details,
            batch.num_rows(),
        ))
    }

    fn log_summary(&self, result: &ValidationResult) {
        if !self.log_config.log_summary {
            return;
        }

        let summary = &result.summary;
        if result.success {
            info!(
                passed = summary.passed,
                total = summary.total,
                "Data validation PASSED: {}/{} checks successful",
                summary.passed,
                summary.total
            );
        } else {
            warn!(
                failed = summary.failed,
                total = summary.total,
                "Data validation FAILED: {}/{} checks failed",
                summary.failed,
                summary.total
            );
            for detail in &result.failure_details {
                warn!(
                    rule.id = %detail.identifier,
                    "{}",
                    truncate_field(&detail.message, self.log_config.max_field_length)
                );
            }
        }
    }
}
