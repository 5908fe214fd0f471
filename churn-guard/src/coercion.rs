//! Lenient numeric coercion.
//!
//! Raw churn exports store charges as text and leave blanks for customers
//! in their first billing cycle. Before range checks run, the validator
//! rewrites every configured numeric column in place as `Float64`:
//!
//! - text is trimmed and parsed; anything unparsable becomes `0.0`
//! - nulls and `NaN` become `0.0`
//! - integer, decimal and boolean columns are cast to `f64`
//!
//! Bad numeric input is therefore never an error. Callers that need the
//! original values must keep their own copy of the batch.

use crate::prelude::*;
use arrow::array::{Array, ArrayRef, AsArray, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Float64Type, Schema};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Parses one text value the way the validator expects. Never fails.
pub fn parse_lenient(value: Option<&str>) -> f64 {
    value
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
        .unwrap_or(0.0)
}

fn coerce_array(column: &str, array: &ArrayRef) -> Result<Float64Array> {
    let coerced = match array.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let text = cast(array, &DataType::Utf8)?;
            text.as_string::<i32>()
                .iter()
                .map(|v| Some(parse_lenient(v)))
                .collect::<Float64Array>()
        }
        DataType::Null => Float64Array::from(vec![0.0; array.len()]),
        data_type if data_type.is_numeric() || *data_type == DataType::Boolean => {
            let numbers = cast(array, &DataType::Float64)?;
            numbers
                .as_primitive::<Float64Type>()
                .iter()
                .map(|v| Some(v.filter(|x| !x.is_nan()).unwrap_or(0.0)))
                .collect::<Float64Array>()
        }
        other => {
            return Err(GuardError::TypeMismatch {
                expected: format!("numeric or text column '{column}'"),
                found: other.to_string(),
            })
        }
    };
    Ok(coerced)
}

/// Rewrites the named columns of `batch` as non-null `Float64` columns.
///
/// Columns absent from the batch are skipped. Returns the names of the
/// columns that were rewritten, in the order given.
#[instrument(skip(batch, columns), fields(rows = batch.num_rows()))]
pub fn coerce_numeric_columns(batch: &mut RecordBatch, columns: &[String]) -> Result<Vec<String>> {
    let schema = batch.schema();
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    let mut arrays: Vec<ArrayRef> = batch.columns().to_vec();
    let mut coerced = Vec::new();

    for column in columns {
        let Ok(index) = schema.index_of(column) else {
            debug!(column = %column, "Skipping coercion of absent column");
            continue;
        };
        if coerced.contains(column) {
            continue;
        }

        let values = coerce_array(column, &arrays[index])
            .with_context(|| format!("Failed to coerce column '{column}'"))?;
        debug!(
            column = %column,
            from = %arrays[index].data_type(),
            "Coerced column to Float64"
        );
        arrays[index] = Arc::new(values);
        fields[index] = fields[index]
            .clone()
            .with_data_type(DataType::Float64)
            .with_nullable(false);
        coerced.push(column.clone());
    }

    if !coerced.is_empty() {
        let schema = Schema::new_with_metadata(fields, schema.metadata().clone());
        *batch = RecordBatch::try_new(Arc::new(schema), arrays)?;
    }
    Ok(coerced)
}
