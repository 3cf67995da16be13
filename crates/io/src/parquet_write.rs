//! Low-level Parquet column building.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, RecordBatch, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::IoError;
use crate::table::{ColumnData, Table};

/// Builds the Arrow schema for a [`Table`]. Every column is non-nullable.
pub(crate) fn build_schema(table: &Table) -> Schema {
    let fields: Vec<Field> = table
        .columns()
        .iter()
        .map(|c| Field::new(c.name(), data_type(c.data()), false))
        .collect();
    Schema::new(fields)
}

fn data_type(data: &ColumnData) -> DataType {
    match data {
        ColumnData::Int32(_) => DataType::Int32,
        ColumnData::UInt32(_) => DataType::UInt32,
        ColumnData::Float64(_) => DataType::Float64,
        ColumnData::Utf8(_) => DataType::Utf8,
    }
}

/// Converts a [`Table`] into an Arrow [`RecordBatch`] with `schema`.
pub(crate) fn table_to_record_batch(table: &Table, schema: &Schema) -> Result<RecordBatch, IoError> {
    let columns: Vec<ArrayRef> = table
        .columns()
        .iter()
        .map(|c| -> ArrayRef {
            match c.data() {
                ColumnData::Int32(v) => Arc::new(Int32Array::from(v.clone())),
                ColumnData::UInt32(v) => Arc::new(UInt32Array::from(v.clone())),
                ColumnData::Float64(v) => Arc::new(Float64Array::from(v.clone())),
                ColumnData::Utf8(v) => Arc::new(StringArray::from(v.clone())),
            }
        })
        .collect();

    Ok(RecordBatch::try_new(Arc::new(schema.clone()), columns)?)
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Access`] if the file cannot be created and
/// [`IoError::Parquet`] if batch writing or finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: &Schema,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::from_io(path, &e))?;
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn table() -> Table {
        Table::new(vec![
            Column::new("station", ColumnData::Utf8(vec!["A".into(), "A".into()])),
            Column::new("accounting_year", ColumnData::Int32(vec![2000, 2001])),
            Column::new("tc_min", ColumnData::UInt32(vec![5, 10])),
            Column::new("max_precipitation_mm", ColumnData::Float64(vec![55.0, 61.2])),
        ])
        .unwrap()
    }

    #[test]
    fn schema_follows_columns() {
        let schema = build_schema(&table());
        assert_eq!(schema.fields().len(), 4);
        assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
        assert_eq!(schema.field(1).name(), "accounting_year");
        assert_eq!(schema.field(2).data_type(), &DataType::UInt32);
        assert_eq!(schema.field(3).data_type(), &DataType::Float64);
    }

    #[test]
    fn record_batch_shape() {
        let t = table();
        let schema = build_schema(&t);
        let batch = table_to_record_batch(&t, &schema).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 4);
    }
}
