//! Validator configuration.
//!
//! [`ValidatorConfig`] is the static description a [`RuleSet`](crate::core::RuleSet)
//! is built from: which columns must exist, which may not be null, the allowed
//! categorical domains, numeric bounds, the cross-column consistency rule and
//! the optional row count range.
//!
//! Two presets reflect the rule-set variants seen in production:
//!
//! - [`ValidatorConfig::strict`] caps `TotalCharges` at 10000, requires six
//!   non-nullable columns and checks the row count.
//! - [`ValidatorConfig::lenient`] leaves `TotalCharges` unbounded above, only
//!   requires `customerID` and skips the row count check.
//!
//! # Examples
//!
//! ```rust
//! use churn_guard::config::{NumericRange, ValidatorConfig};
//!
//! let config = ValidatorConfig::strict()
//!     .with_numeric_range(NumericRange::at_least("TotalCharges", 0.0))
//!     .with_mostly(0.9);
//! assert!(config.validate().is_ok());
//! ```

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Customer identifier column.
pub const CUSTOMER_ID: &str = "customerID";
/// Customer gender column.
pub const GENDER: &str = "gender";
/// Whether the customer has a partner.
pub const PARTNER: &str = "Partner";
/// Whether the customer has dependents.
pub const DEPENDENTS: &str = "Dependents";
/// Whether the customer has phone service.
pub const PHONE_SERVICE: &str = "PhoneService";
/// Internet service type column.
pub const INTERNET_SERVICE: &str = "InternetService";
/// Contract term column.
pub const CONTRACT: &str = "Contract";
/// Months the customer has stayed.
pub const TENURE: &str = "tenure";
/// Monthly charge amount.
pub const MONTHLY_CHARGES: &str = "MonthlyCharges";
/// Total charged amount over the customer lifetime.
pub const TOTAL_CHARGES: &str = "TotalCharges";

/// Allowed values for one categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalDomain {
    pub column: String,
    /// Exact, case-sensitive set of accepted values
    pub allowed: Vec<String>,
}

impl CategoricalDomain {
    pub fn new<I, S>(column: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: column.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

/// Inclusive numeric bounds for one column. A missing bound is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub column: String,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl NumericRange {
    /// Bounds on both sides, `[min, max]`.
    pub fn between(column: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            column: column.into(),
            min: Some(min),
            max: Some(max),
        }
    }

    /// Lower bound only, `[min, +inf)`.
    pub fn at_least(column: impl Into<String>, min: f64) -> Self {
        Self {
            column: column.into(),
            min: Some(min),
            max: None,
        }
    }

    /// Returns true if `value` lies inside the bounds.
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Cross-column rule: `column_a >= column_b` (or `>`) for a fraction of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyConfig {
    pub column_a: String,
    pub column_b: String,
    /// Whether equal values satisfy the rule
    #[serde(default = "default_or_equal")]
    pub or_equal: bool,
    /// Minimum fraction of rows that must satisfy the rule (0.0 to 1.0)
    #[serde(default = "default_mostly")]
    pub mostly: f64,
}

fn default_or_equal() -> bool {
    true
}

fn default_mostly() -> f64 {
    0.95
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            column_a: TOTAL_CHARGES.to_string(),
            column_b: MONTHLY_CHARGES.to_string(),
            or_equal: default_or_equal(),
            mostly: default_mostly(),
        }
    }
}

/// Inclusive range the batch row count must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCountRange {
    pub min: usize,
    pub max: usize,
}

impl Default for RowCountRange {
    fn default() -> Self {
        Self {
            min: 1,
            max: 1_000_000,
        }
    }
}

/// Full description of the rule set a validator enforces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    pub required_columns: Vec<String>,
    pub non_nullable_columns: Vec<String>,
    pub categorical_constraints: Vec<CategoricalDomain>,
    /// Columns listed here are coerced to `Float64` before any rule runs
    pub numeric_ranges: Vec<NumericRange>,
    #[serde(default)]
    pub consistency: Option<ConsistencyConfig>,
    #[serde(default)]
    pub row_count: Option<RowCountRange>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::strict()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn telco_domains() -> Vec<CategoricalDomain> {
    vec![
        CategoricalDomain::new(GENDER, ["Male", "Female"]),
        CategoricalDomain::new(PARTNER, ["Yes", "No"]),
        CategoricalDomain::new(DEPENDENTS, ["Yes", "No"]),
        CategoricalDomain::new(PHONE_SERVICE, ["Yes", "No"]),
        CategoricalDomain::new(CONTRACT, ["Month-to-month", "One year", "Two year"]),
        CategoricalDomain::new(INTERNET_SERVICE, ["DSL", "Fiber optic", "No"]),
    ]
}

impl ValidatorConfig {
    /// The telco rule set with a capped `TotalCharges`, six non-nullable
    /// columns and a `[1, 1_000_000]` row count check.
    pub fn strict() -> Self {
        Self {
            required_columns: strings(&[
                CUSTOMER_ID,
                GENDER,
                PARTNER,
                DEPENDENTS,
                PHONE_SERVICE,
                INTERNET_SERVICE,
                CONTRACT,
                TENURE,
                MONTHLY_CHARGES,
                TOTAL_CHARGES,
            ]),
            non_nullable_columns: strings(&[
                CUSTOMER_ID,
                GENDER,
                TENURE,
                MONTHLY_CHARGES,
                TOTAL_CHARGES,
                CONTRACT,
            ]),
            categorical_constraints: telco_domains(),
            numeric_ranges: vec![
                NumericRange::between(TENURE, 0.0, 120.0),
                NumericRange::between(MONTHLY_CHARGES, 0.0, 200.0),
                NumericRange::between(TOTAL_CHARGES, 0.0, 10_000.0),
            ],
            consistency: Some(ConsistencyConfig::default()),
            row_count: Some(RowCountRange::default()),
        }
    }

    /// The telco rule set with an unbounded `TotalCharges`, only
    /// `customerID` non-nullable and no row count check.
    pub fn lenient() -> Self {
        Self {
            non_nullable_columns: strings(&[CUSTOMER_ID]),
            numeric_ranges: vec![
                NumericRange::between(TENURE, 0.0, 120.0),
                NumericRange::between(MONTHLY_CHARGES, 0.0, 200.0),
                NumericRange::at_least(TOTAL_CHARGES, 0.0),
            ],
            row_count: None,
            ..Self::strict()
        }
    }

    /// Parses a configuration from a JSON document and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Replaces the bounds for a column, appending it if it has none yet.
    pub fn with_numeric_range(mut self, range: NumericRange) -> Self {
        match self
            .numeric_ranges
            .iter_mut()
            .find(|r| r.column == range.column)
        {
            Some(existing) => *existing = range,
            None => self.numeric_ranges.push(range),
        }
        self
    }

    /// Replaces the allowed values for a column, appending it if new.
    pub fn with_categorical(mut self, domain: CategoricalDomain) -> Self {
        match self
            .categorical_constraints
            .iter_mut()
            .find(|d| d.column == domain.column)
        {
            Some(existing) => *existing = domain,
            None => self.categorical_constraints.push(domain),
        }
        self
    }

    pub fn with_non_nullable_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.non_nullable_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_consistency(mut self, consistency: Option<ConsistencyConfig>) -> Self {
        self.consistency = consistency;
        self
    }

    /// Sets the tolerance of the consistency rule, enabling it with the
    /// default columns if it was disabled.
    pub fn with_mostly(mut self, mostly: f64) -> Self {
        self.consistency.get_or_insert_with(ConsistencyConfig::default).mostly = mostly;
        self
    }

    pub fn with_row_count(mut self, row_count: Option<RowCountRange>) -> Self {
        self.row_count = row_count;
        self
    }

    /// Names of the columns coerced to numeric before evaluation.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.numeric_ranges.iter().map(|r| r.column.clone()).collect()
    }

    /// Checks the configuration for values no rule could honour.
    pub fn validate(&self) -> Result<()> {
        let named = self
            .required_columns
            .iter()
            .chain(&self.non_nullable_columns)
            .chain(self.categorical_constraints.iter().map(|d| &d.column))
            .chain(self.numeric_ranges.iter().map(|r| &r.column));
        if named.into_iter().any(|c| c.trim().is_empty()) {
            return Err(GuardError::Configuration(
                "Column names must not be empty".to_string(),
            ));
        }

        for domain in &self.categorical_constraints {
            if domain.allowed.is_empty() {
                return Err(GuardError::Configuration(format!(
                    "Categorical domain for '{}' has no allowed values",
                    domain.column
                )));
            }
        }

        for range in &self.numeric_ranges {
            let bounds = [range.min, range.max];
            if bounds.iter().flatten().any(|b| b.is_nan()) {
                return Err(GuardError::Configuration(format!(
                    "Bounds for '{}' must not be NaN",
                    range.column
                )));
            }
            if let (Some(min), Some(max)) = (range.min, range.max) {
                if min > max {
                    return Err(GuardError::Configuration(format!(
                        "Range for '{}' has min {min} greater than max {max}",
                        range.column
                    )));
                }
            }
        }

        if let Some(consistency) = &self.consistency {
            if !(0.0..=1.0).contains(&consistency.mostly) {
                return Err(GuardError::Configuration(format!(
                    "mostly must be between 0.0 and 1.0, got {}",
                    consistency.mostly
                )));
            }
            if consistency.column_a.trim().is_empty() || consistency.column_b.trim().is_empty() {
                return Err(GuardError::Configuration(
                    "Consistency columns must not be empty".to_string(),
                ));
            }
        }

        if let Some(range) = self.row_count {
            if range.min > range.max {
                return Err(GuardError::Configuration(format!(
                    "Row count range has min {} greater than max {}",
                    range.min, range.max
                )));
            }
        }

        Ok(())
    }
}
