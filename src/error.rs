use polars::prelude::PolarsError;
use thiserror::Error;

/// Everything that can stop a chart from being produced.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error(
        "the columns '{x_column}' or '{y_column}' are not present in the csv file (missing: {})",
        .missing.join(", ")
    )]
    MissingColumn {
        x_column: String,
        y_column: String,
        missing: Vec<String>,
    },
    #[error(
        "the column '{column}' contains non-positive values (row {row}: {value}), \
        which is not allowed on a logarithmic scale"
    )]
    NonPositiveYValue {
        column: String,
        row: usize,
        value: f64,
    },
    #[error("the column '{column}' is not numeric (found {dtype})")]
    NonNumericColumn { column: String, dtype: String },
    #[error("no row has finite values in both '{x_column}' and '{y_column}'")]
    NoPlottableData { x_column: String, y_column: String },
    #[error("invalid x step '{0}', a finite number > 0 is required")]
    InvalidTickStep(String),
    #[error("x step {step} up to {max} gives more than {limit} ticks")]
    TooManyTicks { step: f64, max: f64, limit: usize },
    #[error("unsupported output format '{0}', use svg, png, jpg, jpeg, bmp or html")]
    UnsupportedFormat(String),
    #[error("failed to load csv: {0}")]
    Load(#[from] PolarsError),
    #[error("failed to draw chart: {0}")]
    Draw(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ChartError {
    /// True for the validation failures that are reported to the user
    /// without failing the process.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ChartError::MissingColumn { .. }
                | ChartError::NonPositiveYValue { .. }
                | ChartError::NonNumericColumn { .. }
                | ChartError::NoPlottableData { .. }
        )
    }
}
