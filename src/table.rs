use crate::error::ChartError;
use log::debug;
use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// A delimited text file loaded as named, equal length columns.
/// The frame is never handed out mutably, so a Table does not change after loading.
#[derive(Debug, Clone)]
pub struct Table {
    df: DataFrame,
    index: HashMap<String, usize>,
}

impl Table {
    /// Wrap a DataFrame, indexing its column names.
    pub fn from_dataframe(df: DataFrame) -> Table {
        let index = df
            .get_column_names()
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), i))
            .collect();
        Table { df, index }
    }

    /// Read a table whose first row holds the column names.
    /// Comma separated, except for .tsv and .tab files which are tab separated.
    pub fn from_csv<P>(fin: P) -> Result<Table, ChartError>
    where
        P: AsRef<Path>,
    {
        let path = fin.as_ref();
        let separator = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab") => {
                b'\t'
            }
            _ => b',',
        };
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_separator(separator)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;
        debug!(
            "loaded {} rows and {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );
        Ok(Table::from_dataframe(df))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Column names in file order.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Integer and float columns are numeric, and so is a column without any value,
    /// whatever type the reader gave it.
    pub fn is_numeric(&self, name: &str) -> Result<bool, ChartError> {
        let col = self.df.column(name)?;
        let numeric = matches!(
            col.dtype(),
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        );
        Ok(numeric || col.null_count() == col.len())
    }

    /// The values of a numeric column as f64, missing cells as NAN.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>, ChartError> {
        if !self.is_numeric(name)? {
            let col = self.df.column(name)?;
            return Err(ChartError::NonNumericColumn {
                column: name.to_string(),
                dtype: col.dtype().to_string(),
            });
        }
        let col = self.df.column(name)?;
        if col.null_count() == col.len() {
            return Ok(vec![f64::NAN; col.len()]);
        }
        let col_f64 = col.cast(&DataType::Float64)?;
        let values = col_f64
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        Ok(values)
    }
}
