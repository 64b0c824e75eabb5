//! Synthetic result tables.
//!
//! Every answered statement produces a [`DataTable`] which the driver hands to
//! the engine as a forward-only, read-once [`TableReader`]. Tables are built
//! per execution and discarded after the engine has walked them.

use crate::values::DbValue;

/// Error raised by table construction or reader access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("row width {actual} does not match column count {expected}")]
    RowArity { expected: usize, actual: usize },

    #[error("column '{name}' does not exist")]
    ColumnNotFound { name: String },

    #[error("column ordinal {ordinal} is out of range for {width} columns")]
    OrdinalOutOfRange { ordinal: usize, width: usize },

    #[error("reader is not positioned on a row")]
    NoCurrentRow,
}

/// An in-memory table with ordered named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<DbValue>>,
}

impl DataTable {
    /// A table with no columns and no rows, the designed "nothing exists yet"
    /// answer the engine resolves with its own defaults.
    pub fn empty() -> Self {
        DataTable::default()
    }

    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DataTable {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<DbValue>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowArity {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[DbValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[DbValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Ordinal of the named column, by exact name match.
    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn value(&self, row: usize, ordinal: usize) -> Option<&DbValue> {
        self.rows.get(row).and_then(|row| row.get(ordinal))
    }

    pub fn into_reader(self) -> TableReader {
        TableReader {
            table: self,
            current: None,
        }
    }
}

/// Forward-only, read-once cursor over a [`DataTable`].
#[derive(Debug)]
pub struct TableReader {
    table: DataTable,
    current: Option<usize>,
}

impl TableReader {
    /// Advance to the next row; `false` once the table is exhausted.
    pub fn advance(&mut self) -> bool {
        let next = self.current.map_or(0, |index| index + 1);
        if next < self.table.row_count() {
            self.current = Some(next);
            true
        } else {
            self.current = Some(self.table.row_count());
            false
        }
    }

    pub fn columns(&self) -> &[String] {
        self.table.columns()
    }

    pub fn column_count(&self) -> usize {
        self.table.column_count()
    }

    pub fn ordinal(&self, name: &str) -> Result<usize, TableError> {
        self.table
            .ordinal(name)
            .ok_or_else(|| TableError::ColumnNotFound {
                name: name.to_owned(),
            })
    }

    /// Value of the current row at the given ordinal.
    pub fn value(&self, ordinal: usize) -> Result<&DbValue, TableError> {
        let row = self
            .current
            .filter(|index| *index < self.table.row_count())
            .ok_or(TableError::NoCurrentRow)?;
        self.table
            .value(row, ordinal)
            .ok_or(TableError::OrdinalOutOfRange {
                ordinal,
                width: self.table.column_count(),
            })
    }

    /// Value of the current row in the named column.
    pub fn value_named(&self, name: &str) -> Result<&DbValue, TableError> {
        self.value(self.ordinal(name)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataTable {
        let mut table = DataTable::with_columns(["Id", "Name"]);
        table
            .push_row(vec![DbValue::from(1), DbValue::from("first")])
            .unwrap();
        table
            .push_row(vec![DbValue::from(2), DbValue::from("second")])
            .unwrap();
        table
    }

    #[test]
    fn push_row_rejects_wrong_arity() {
        let mut table = DataTable::with_columns(["Id"]);
        let err = table
            .push_row(vec![DbValue::from(1), DbValue::from(2)])
            .unwrap_err();
        assert_eq!(
            err,
            TableError::RowArity {
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn reader_walks_rows_forward_once() {
        let mut reader = sample().into_reader();

        assert!(reader.advance());
        assert_eq!(reader.value_named("Name").unwrap().as_str(), Ok("first"));
        assert!(reader.advance());
        assert_eq!(reader.value(0).unwrap().as_i64(), Ok(2));
        assert!(!reader.advance());
        assert!(!reader.advance());
        assert_eq!(reader.value(0), Err(TableError::NoCurrentRow));
    }

    #[test]
    fn reader_requires_advance_before_access() {
        let reader = sample().into_reader();
        assert_eq!(reader.value(0), Err(TableError::NoCurrentRow));
    }

    #[test]
    fn reader_reports_unknown_column() {
        let mut reader = sample().into_reader();
        assert!(reader.advance());
        assert_eq!(
            reader.value_named("Missing"),
            Err(TableError::ColumnNotFound {
                name: "Missing".into()
            })
        );
    }

    #[test]
    fn empty_table_has_no_rows() {
        let table = DataTable::empty();
        assert!(table.is_empty());
        let mut reader = table.into_reader();
        assert!(!reader.advance());
    }
}
