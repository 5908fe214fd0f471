//! Result formatting for validation results.
//!
//! [`JsonFormatter`] produces the machine-readable report; [`HumanFormatter`]
//! produces a console summary.
//!
//! # Examples
//!
//! ```rust
//! use churn_guard::core::ValidationResult;
//! use churn_guard::formatters::{FormatterConfig, HumanFormatter, ResultFormatter};
//!
//! let formatter = HumanFormatter::with_config(FormatterConfig::ci());
//! let output = formatter.format(&ValidationResult::empty_batch()).unwrap();
//! assert!(output.contains("Validation FAILED"));
//! ```

use crate::core::{FailureDetail, ValidationResult};
use crate::prelude::*;
use std::fmt::Write;

/// Configuration options for formatting validation results.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include the summary counts
    pub include_summary: bool,
    /// Include failure details
    pub include_issues: bool,
    /// Include per-rule results (JSON only)
    pub include_rule_results: bool,
    /// Maximum number of failures to display (`None` for all)
    pub max_issues: Option<usize>,
    /// Whether to use ANSI colors (human formatter)
    pub use_colors: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_summary: true,
            include_issues: true,
            include_rule_results: true,
            max_issues: None,
            use_colors: true,
        }
    }
}

impl FormatterConfig {
    /// Summary only.
    pub fn minimal() -> Self {
        Self {
            include_summary: true,
            include_issues: false,
            include_rule_results: false,
            max_issues: Some(0),
            use_colors: false,
        }
    }

    /// Creates a configuration suitable for CI/CD logs.
    pub fn ci() -> Self {
        Self {
            include_summary: true,
            include_issues: true,
            include_rule_results: false,
            max_issues: Some(50),
            use_colors: false,
        }
    }

    pub fn with_issues(mut self, include: bool) -> Self {
        self.include_issues = include;
        self
    }

    pub fn with_rule_results(mut self, include: bool) -> Self {
        self.include_rule_results = include;
        self
    }

    pub fn with_max_issues(mut self, max: Option<usize>) -> Self {
        self.max_issues = max;
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn visible_issues<'a>(&self, details: &'a [FailureDetail]) -> &'a [FailureDetail] {
        match self.max_issues {
            Some(max) => &details[..max.min(details.len())],
            None => details,
        }
    }
}

/// Trait for formatting validation results into different output formats.
///
/// # Examples
///
/// ```rust
/// use churn_guard::core::ValidationResult;
/// use churn_guard::formatters::ResultFormatter;
///
/// struct OneLine;
///
/// impl ResultFormatter for OneLine {
///     fn format(&self, result: &ValidationResult) -> churn_guard::prelude::Result<String> {
///         Ok(format!("ok={} failed={:?}", result.success, result.failed_checks))
///     }
/// }
///
/// let line = OneLine.format(&ValidationResult::empty_batch()).unwrap();
/// assert_eq!(line, "ok=false failed=[\"empty_dataframe\"]");
/// ```
pub trait ResultFormatter {
    /// Formats a validation result into a string representation.
    fn format(&self, result: &ValidationResult) -> Result<String>;

    /// Formats a validation result with custom configuration.
    fn format_with_config(
        &self,
        result: &ValidationResult,
        _config: &FormatterConfig,
    ) -> Result<String> {
        self.format(result)
    }
}

/// Formats validation results as JSON.
///
/// The output deserializes back into a [`ValidationResult`] as long as the
/// configuration keeps every section.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a compact JSON formatter.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: false,
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: false,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for JsonFormatter {
    fn format(&self, result: &ValidationResult) -> Result<String> {
        self.format_with_config(result, &self.config)
    }

    fn format_with_config(
        &self,
        result: &ValidationResult,
        config: &FormatterConfig,
    ) -> Result<String> {
        let filtered = filter_result_for_config(result, config);
        let json = if self.pretty {
            serde_json::to_string_pretty(&filtered)?
        } else {
            serde_json::to_string(&filtered)?
        };
        Ok(json)
    }
}

/// Formats validation results for console output.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn paint(text: &str, code: &str, use_colors: bool) -> String {
    if use_colors {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

impl ResultFormatter for HumanFormatter {
    fn format(&self, result: &ValidationResult) -> Result<String> {
        self.format_with_config(result, &self.config)
    }

    fn format_with_config(
        &self,
        result: &ValidationResult,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        let summary = &result.summary;

        if result.success {
            writeln!(
                output,
                "✅ {}",
                paint("Validation PASSED", "32", config.use_colors)
            )?;
        } else {
            writeln!(
                output,
                "❌ {}",
                paint("Validation FAILED", "31", config.use_colors)
            )?;
        }

        if config.include_summary {
            writeln!(output)?;
            writeln!(output, "📊 Summary:")?;
            writeln!(output, "   Rows: {}", summary.row_count)?;
            writeln!(output, "   Total Checks: {}", summary.total)?;
            writeln!(output, "   ✅ Passed: {}", summary.passed)?;
            writeln!(output, "   ❌ Failed: {}", summary.failed)?;
            writeln!(output, "   Success Rate: {:.1}%", summary.success_rate())?;
        }

        if let Some(error) = &result.error {
            writeln!(output)?;
            writeln!(output, "🚨 {}", paint(error, "31", config.use_colors))?;
        }

        if config.include_issues && !result.failed_checks.is_empty() {
            writeln!(output)?;
            writeln!(output, "🔍 Failed Checks:")?;
            if result.failure_details.is_empty() {
                for id in &result.failed_checks {
                    writeln!(output, "   - {id}")?;
                }
            }

            let shown = config.visible_issues(&result.failure_details);
            for (i, detail) in shown.iter().enumerate() {
                writeln!(output, "   {}. {}", i + 1, detail.identifier)?;
                writeln!(output, "      {}", detail.message)?;
            }

            let hidden = result.failure_details.len() - shown.len();
            if hidden > 0 {
                writeln!(output, "   ... and {hidden} more")?;
            }
        }

        Ok(output)
    }
}

fn filter_result_for_config(result: &ValidationResult, config: &FormatterConfig) -> ValidationResult {
    let mut filtered = result.clone();
    if !config.include_issues {
        filtered.failure_details.clear();
    } else if let Some(max) = config.max_issues {
        filtered.failure_details.truncate(max);
    }
    if !config.include_rule_results {
        filtered.rule_results.clear();
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RuleCategory, RuleResult, ValidationSummary};
    use serde_json::json;

    fn create_test_result() -> ValidationResult {
        let rule_results = vec![
            RuleResult {
                identifier: "column_exists:tenure".to_string(),
                category: RuleCategory::Schema,
                success: true,
                metric: Some(1.0),
            },
            RuleResult {
                identifier: "between:TotalCharges".to_string(),
                category: RuleCategory::Range,
                success: false,
                metric: Some(0.5),
            },
            RuleResult {
                identifier: "in_set:gender".to_string(),
                category: RuleCategory::Categorical,
                success: false,
                metric: Some(0.5),
            },
        ];
        let details = vec![
            FailureDetail {
                identifier: "between:TotalCharges".to_string(),
                parameters: json!({"column": "TotalCharges", "min_value": 0.0, "max_value": 10000.0}),
                message: "1 value(s) outside [0, 10000]".to_string(),
            },
            FailureDetail {
                identifier: "in_set:gender".to_string(),
                parameters: json!({"column": "gender"}),
                message: "1 value(s) not in set".to_string(),
            },
        ];
        ValidationResult::from_rules(rule_results, details, 2)
    }

    #[test]
    fn test_json_formatter() {
        let result = create_test_result();
        let json = JsonFormatter::new().format(&result).unwrap();
        assert!(!json.contains('\n'));

        let parsed: ValidationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);

        let pretty = JsonFormatter::new().with_pretty(true).format(&result).unwrap();
        assert!(pretty.contains("\n  \"success\": false"));
    }

    #[test]
    fn test_json_formatter_respects_config() {
        let result = create_test_result();
        let json = JsonFormatter::with_config(FormatterConfig::minimal())
            .format(&result)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("failure_details").is_none());
        assert!(value.get("rule_results").is_none());
        assert_eq!(
            value["failed_checks"],
            json!(["between:TotalCharges", "in_set:gender"])
        );
        assert_eq!(
            value["summary"],
            serde_json::to_value(ValidationSummary {
                total: 3,
                passed: 1,
                failed: 2,
                row_count: 2
            })
            .unwrap()
        );
    }

    #[test]
    fn test_human_formatter() {
        let result = create_test_result();
        let output = HumanFormatter::with_config(FormatterConfig::default().with_colors(false))
            .format(&result)
            .unwrap();

        assert!(output.starts_with("❌ Validation FAILED"));
        assert!(output.contains("Total Checks: 3"));
        assert!(output.contains("1. between:TotalCharges"));
        assert!(output.contains("2. in_set:gender"));
        assert!(!output.contains("\x1b["));
    }

    #[test]
    fn test_config_max_issues() {
        let result = create_test_result();
        let config = FormatterConfig::default()
            .with_colors(false)
            .with_max_issues(Some(1));
        let output = HumanFormatter::with_config(config).format(&result).unwrap();

        assert!(output.contains("1. between:TotalCharges"));
        assert!(!output.contains("in_set:gender"));
        assert!(output.contains("... and 1 more"));
    }

    #[test]
    fn test_human_formatter_reports_error() {
        let result = ValidationResult::evaluation_error("Arrow error: boom", 4);
        let output = HumanFormatter::with_config(FormatterConfig::ci())
            .format(&result)
            .unwrap();
        assert!(output.contains("🚨 Arrow error: boom"));
        assert!(output.contains("Rows: 4"));
    }
}
