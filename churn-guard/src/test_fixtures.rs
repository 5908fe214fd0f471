//! Sample churn batches for tests, documentation and benchmarks.
//!
//! Batches use the layout of a raw Telco export: categorical columns as text,
//! `tenure` as `Int64`, `MonthlyCharges` as `Float64` and `TotalCharges` as
//! nullable text.

use crate::config::{
    CONTRACT, CUSTOMER_ID, DEPENDENTS, GENDER, INTERNET_SERVICE, MONTHLY_CHARGES, PARTNER,
    PHONE_SERVICE, TENURE, TOTAL_CHARGES,
};
use crate::prelude::*;
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// One customer row.
#[derive(Debug, Clone, PartialEq)]
pub struct ChurnRecord {
    pub customer_id: String,
    pub gender: String,
    pub partner: String,
    pub dependents: String,
    pub phone_service: String,
    pub internet_service: String,
    pub contract: String,
    pub tenure: i64,
    pub monthly_charges: f64,
    /// Raw text, as exported
    pub total_charges: Option<String>,
}

impl ChurnRecord {
    /// An in-domain record with the given numbers.
    pub fn new(customer_id: impl Into<String>, tenure: i64, monthly: f64, total: f64) -> Self {
        Self {
            customer_id: customer_id.into(),
            gender: "Female".to_string(),
            partner: "Yes".to_string(),
            dependents: "No".to_string(),
            phone_service: "Yes".to_string(),
            internet_service: "DSL".to_string(),
            contract: "Month-to-month".to_string(),
            tenure,
            monthly_charges: monthly,
            total_charges: Some(total.to_string()),
        }
    }

    pub fn with_total_charges(mut self, total: Option<&str>) -> Self {
        self.total_charges = total.map(str::to_string);
        self
    }
}

/// Schema of the batches built here.
pub fn churn_schema() -> SchemaRef {
    let text = |name: &str| Field::new(name, DataType::Utf8, true);
    Arc::new(Schema::new(vec![
        text(CUSTOMER_ID),
        text(GENDER),
        text(PARTNER),
        text(DEPENDENTS),
        text(PHONE_SERVICE),
        text(INTERNET_SERVICE),
        text(CONTRACT),
        Field::new(TENURE, DataType::Int64, true),
        Field::new(MONTHLY_CHARGES, DataType::Float64, true),
        text(TOTAL_CHARGES),
    ]))
}

/// Builds a batch from records.
pub fn records_to_batch(records: &[ChurnRecord]) -> Result<RecordBatch> {
    let text = |f: fn(&ChurnRecord) -> &str| -> ArrayRef {
        Arc::new(records.iter().map(|r| Some(f(r))).collect::<StringArray>())
    };

    let columns: Vec<ArrayRef> = vec![
        text(|r| r.customer_id.as_str()),
        text(|r| r.gender.as_str()),
        text(|r| r.partner.as_str()),
        text(|r| r.dependents.as_str()),
        text(|r| r.phone_service.as_str()),
        text(|r| r.internet_service.as_str()),
        text(|r| r.contract.as_str()),
        Arc::new(records.iter().map(|r| r.tenure).collect::<Int64Array>()),
        Arc::new(records.iter().map(|r| r.monthly_charges).collect::<Float64Array>()),
        Arc::new(
            records
                .iter()
                .map(|r| r.total_charges.as_deref())
                .collect::<StringArray>(),
        ),
    ];

    Ok(RecordBatch::try_new(churn_schema(), columns)?)
}

fn sample_records() -> Vec<ChurnRecord> {
    vec![
        ChurnRecord {
            gender: "Male".to_string(),
            ..ChurnRecord::new("7590-VHVEG", 12, 65.5, 786.0)
        },
        ChurnRecord {
            partner: "No".to_string(),
            internet_service: "Fiber optic".to_string(),
            contract: "One year".to_string(),
            ..ChurnRecord::new("5575-GNVDE", 24, 85.0, 2040.0)
        },
        ChurnRecord {
            gender: "Male".to_string(),
            dependents: "Yes".to_string(),
            phone_service: "No".to_string(),
            contract: "Two year".to_string(),
            ..ChurnRecord::new("3668-QPYBK", 6, 45.0, 270.0)
        },
    ]
}

/// The three-row batch every rule of the strict configuration accepts.
pub fn sample_batch() -> Result<RecordBatch> {
    records_to_batch(&sample_records())
}

/// The sample batch with `TotalCharges` replaced by `values`.
///
/// Other columns cycle through the sample rows, so any length works.
pub fn sample_batch_with_total_charges(values: Vec<Option<&str>>) -> Result<RecordBatch> {
    let samples = sample_records();
    let records: Vec<ChurnRecord> = values
        .into_iter()
        .enumerate()
        .map(|(i, total)| ChurnRecord {
            customer_id: format!("C{:05}", i + 1),
            ..samples[i % samples.len()].clone().with_total_charges(total)
        })
        .collect();
    records_to_batch(&records)
}

/// `rows` in-domain rows of which the first `violations` have
/// `TotalCharges < MonthlyCharges`.
pub fn consistency_batch(rows: usize, violations: usize) -> Result<RecordBatch> {
    if violations > rows {
        return Err(GuardError::Configuration(format!(
            "Cannot place {violations} violations in {rows} rows"
        )));
    }
    let records: Vec<ChurnRecord> = (0..rows)
        .map(|i| {
            let total = if i < violations { 25.0 } else { 600.0 };
            ChurnRecord::new(format!("C{:05}", i + 1), 12, 50.0, total)
        })
        .collect();
    records_to_batch(&records)
}

/// A batch whose numeric columns are all text, with blanks and junk in
/// `TotalCharges` as found in raw exports.
pub fn string_numeric_batch() -> Result<RecordBatch> {
    let text = |values: &[Option<&str>]| -> ArrayRef {
        Arc::new(values.iter().copied().collect::<StringArray>())
    };
    let schema = Arc::new(Schema::new(
        churn_schema()
            .fields()
            .iter()
            .map(|f| f.as_ref().clone().with_data_type(DataType::Utf8))
            .collect::<Vec<_>>(),
    ));

    let base = sample_batch()?;
    let mut columns: Vec<ArrayRef> = base.columns()[..7].to_vec();
    columns.push(text(&[Some("12"), Some(" 24 "), Some("6")]));
    columns.push(text(&[Some("65.5"), Some("85.0"), Some("45")]));
    columns.push(text(&[Some("786.0"), Some("N/A"), Some(" ")]));

    Ok(RecordBatch::try_new(schema, columns)?)
}
