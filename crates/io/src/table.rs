//! Column-oriented output table shared by the CSV and Parquet writers.

use crate::error::IoError;

/// Typed values of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int32(Vec<i32>),
    UInt32(Vec<u32>),
    Float64(Vec<f64>),
    Utf8(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::Int32(v) => v.len(),
            Self::UInt32(v) => v.len(),
            Self::Float64(v) => v.len(),
            Self::Utf8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text rendering of row `i` for CSV output.
    pub(crate) fn cell(&self, i: usize) -> String {
        match self {
            Self::Int32(v) => v[i].to_string(),
            Self::UInt32(v) => v[i].to_string(),
            Self::Float64(v) => v[i].to_string(),
            Self::Utf8(v) => v[i].clone(),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }
}

/// A rectangular table: equally long named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Builds a table from columns.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the table has no columns or the
    /// columns differ in length.
    pub fn new(columns: Vec<Column>) -> Result<Self, IoError> {
        let mut c = crate::validate::ValidationCollector::new();
        let n_rows = columns.first().map_or(0, |col| col.data.len());
        if columns.is_empty() {
            c.push("table has no columns");
        }
        for col in &columns {
            if col.data.len() != n_rows {
                c.push(format!(
                    "column '{}' has {} rows, expected {n_rows}",
                    col.name,
                    col.data.len()
                ));
            }
        }
        c.finish()?;
        Ok(Self { columns, n_rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Appends the rows of `other`, which must have the same column names
    /// and types in the same order.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] on a schema mismatch.
    pub fn append(&mut self, other: Table) -> Result<(), IoError> {
        let mut c = crate::validate::ValidationCollector::new();
        if self.columns.len() != other.columns.len() {
            c.push(format!(
                "cannot append {} columns to {}",
                other.columns.len(),
                self.columns.len()
            ));
            return c.finish();
        }
        for (a, b) in self.columns.iter().zip(&other.columns) {
            if a.name != b.name || std::mem::discriminant(&a.data) != std::mem::discriminant(&b.data)
            {
                c.push(format!("column '{}' does not match '{}'", b.name, a.name));
            }
        }
        c.finish()?;

        for (a, b) in self.columns.iter_mut().zip(other.columns) {
            match (&mut a.data, b.data) {
                (ColumnData::Int32(x), ColumnData::Int32(y)) => x.extend(y),
                (ColumnData::UInt32(x), ColumnData::UInt32(y)) => x.extend(y),
                (ColumnData::Float64(x), ColumnData::Float64(y)) => x.extend(y),
                (ColumnData::Utf8(x), ColumnData::Utf8(y)) => x.extend(y),
                _ => unreachable!("column types checked above"),
            }
        }
        self.n_rows += other.n_rows;
        Ok(())
    }
}
