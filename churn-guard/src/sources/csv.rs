//! CSV file source.

use super::DataSource;
use crate::config::{MONTHLY_CHARGES, TENURE, TOTAL_CHARGES};
use crate::prelude::*;
use arrow::compute::concat_batches;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::fs::File;
use std::io::{BufReader, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Options for reading CSV files.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether the CSV file has a header row
    pub has_header: bool,
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Schema to use (if None, will be inferred)
    pub schema: Option<SchemaRef>,
    /// Maximum records to read for schema inference
    pub schema_infer_max_records: usize,
    /// Rows per decoded batch before concatenation
    pub batch_size: usize,
    /// Columns read as `Utf8` whatever inference guesses for them
    pub text_columns: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            quote: b'"',
            schema: None,
            schema_infer_max_records: 1000,
            batch_size: 8192,
            text_columns: vec![
                TENURE.to_string(),
                MONTHLY_CHARGES.to_string(),
                TOTAL_CHARGES.to_string(),
            ],
        }
    }
}

impl CsvOptions {
    fn format(&self) -> Format {
        Format::default()
            .with_header(self.has_header)
            .with_delimiter(self.delimiter)
            .with_quote(self.quote)
    }
}

/// A CSV file loaded into one batch.
///
/// Without an explicit schema, column types are inferred from the first
/// [`CsvOptions::schema_infer_max_records`] rows, except for
/// [`CsvOptions::text_columns`], which are always read as text. The numeric
/// Telco columns are text by default, so a blank `TotalCharges` anywhere in
/// the file is left for the validator to coerce.
///
/// # Examples
///
/// ```rust,no_run
/// use churn_guard::sources::{CsvOptions, CsvSource, DataSource};
///
/// # fn example() -> churn_guard::prelude::Result<()> {
/// let options = CsvOptions {
///     delimiter: b';',
///     ..Default::default()
/// };
/// let batch = CsvSource::with_options("exports/churn.csv", options)?.load()?;
/// println!("{} rows", batch.num_rows());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvSource {
    /// Creates a CSV source with default options.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(path, CsvOptions::default())
    }

    /// Creates a CSV source with custom options.
    pub fn with_options(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        if options.batch_size == 0 {
            return Err(GuardError::Configuration(
                "CSV batch size must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            options,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<File> {
        File::open(&self.path).map_err(|e| {
            GuardError::data_source_with_source(
                "CSV",
                format!("Failed to open {}", self.path.display()),
                Box::new(e),
            )
        })
    }

    fn resolve_schema(&self, file: &mut File) -> Result<SchemaRef> {
        if let Some(schema) = &self.options.schema {
            return Ok(schema.clone());
        }

        let (schema, records) = self
            .options
            .format()
            .infer_schema(
                BufReader::new(&mut *file),
                Some(self.options.schema_infer_max_records),
            )
            .map_err(|e| {
                GuardError::data_source_with_source(
                    "CSV",
                    format!("Failed to infer schema of {}", self.path.display()),
                    Box::new(e),
                )
            })?;
        debug!(
            fields = schema.fields().len(),
            records_read = records,
            "Inferred CSV schema"
        );
        file.rewind()?;
        Ok(Arc::new(self.with_text_columns(schema)))
    }

    fn with_text_columns(&self, schema: Schema) -> Schema {
        let fields: Vec<Field> = schema
            .fields()
            .iter()
            .map(|field| {
                if self.options.text_columns.iter().any(|c| c == field.name()) {
                    field.as_ref().clone().with_data_type(DataType::Utf8)
                } else {
                    field.as_ref().clone()
                }
            })
            .collect();
        Schema::new_with_metadata(fields, schema.metadata().clone())
    }
}

impl DataSource for CsvSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<RecordBatch> {
        let mut file = self.open()?;
        let schema = self.resolve_schema(&mut file)?;

        let reader = ReaderBuilder::new(schema.clone())
            .with_format(self.options.format())
            .with_batch_size(self.options.batch_size)
            .build(BufReader::new(file))?;

        let batches = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                GuardError::data_source_with_source(
                    "CSV",
                    format!("Failed to read {}", self.path.display()),
                    Box::new(e),
                )
            })?;
        let batch = concat_batches(&schema, &batches)?;

        info!(rows = batch.num_rows(), "Loaded CSV file");
        Ok(batch)
    }

    fn description(&self) -> String {
        format!("CSV file: {}", self.path.display())
    }
}
