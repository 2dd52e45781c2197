use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{MosaicError, MosaicResult};

/// One typed variable of a [`DataTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Text(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn take_rows(&self, rows: &[usize]) -> Self {
        match self {
            Self::Numeric(values) => Self::Numeric(rows.iter().map(|&i| values[i]).collect()),
            Self::Text(values) => Self::Text(rows.iter().map(|&i| values[i].clone()).collect()),
        }
    }
}

/// Tidy in-memory dataset: rows are observations, columns are variables.
///
/// Column order is preserved and every column has the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    columns: IndexMap<String, Column>,
}

impl DataTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows. An empty table has zero rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.values().next().map_or(0, Column::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn numeric_column(&self, name: &str) -> MosaicResult<&[f64]> {
        match self.columns.get(name) {
            Some(Column::Numeric(values)) => Ok(values),
            Some(Column::Text(_)) => Err(MosaicError::InvalidData(format!(
                "column `{name}` is not numeric"
            ))),
            None => Err(MosaicError::UnknownColumn(name.to_owned())),
        }
    }

    pub fn text_column(&self, name: &str) -> MosaicResult<&[String]> {
        match self.columns.get(name) {
            Some(Column::Text(values)) => Ok(values),
            Some(Column::Numeric(_)) => Err(MosaicError::InvalidData(format!(
                "column `{name}` does not hold text"
            ))),
            None => Err(MosaicError::UnknownColumn(name.to_owned())),
        }
    }

    /// Inserts or replaces a column.
    pub fn insert(&mut self, name: impl Into<String>, column: Column) -> MosaicResult<()> {
        let name = name.into();
        let replacing_only_column = self.columns.len() == 1 && self.columns.contains_key(&name);
        if !self.columns.is_empty() && !replacing_only_column && column.len() != self.len() {
            return Err(MosaicError::InvalidData(format!(
                "column `{name}` has {} rows, table has {}",
                column.len(),
                self.len()
            )));
        }
        self.columns.insert(name, column);
        Ok(())
    }

    pub fn push_numeric(&mut self, name: impl Into<String>, values: Vec<f64>) -> MosaicResult<()> {
        self.insert(name, Column::Numeric(values))
    }

    pub fn push_text<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> MosaicResult<()> {
        self.insert(name, Column::Text(values.into_iter().map(Into::into).collect()))
    }

    pub fn with_numeric(mut self, name: impl Into<String>, values: Vec<f64>) -> MosaicResult<Self> {
        self.push_numeric(name, values)?;
        Ok(self)
    }

    pub fn with_text<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> MosaicResult<Self> {
        self.push_text(name, values)?;
        Ok(self)
    }

    /// New table holding `rows` in the given order.
    pub fn take_rows(&self, rows: &[usize]) -> MosaicResult<Self> {
        let len = self.len();
        if let Some(&bad) = rows.iter().find(|&&row| row >= len) {
            return Err(MosaicError::InvalidData(format!(
                "row {bad} out of range for table with {len} rows"
            )));
        }

        Ok(Self {
            columns: self
                .columns
                .iter()
                .map(|(name, column)| (name.clone(), column.take_rows(rows)))
                .collect(),
        })
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> MosaicResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| MosaicError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv_reader(file)
    }

    /// Reads a headed CSV. A column is numeric when every cell parses as `f64`.
    pub fn from_csv_reader<R: Read>(reader: R) -> MosaicResult<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record?;
            for (column, cell) in cells.iter_mut().zip(record.iter()) {
                column.push(cell.to_owned());
            }
        }

        let mut table = Self::new();
        for (name, values) in headers.into_iter().zip(cells) {
            let parsed: Option<Vec<f64>> = values.iter().map(|cell| cell.parse().ok()).collect();
            let column = match parsed {
                Some(numbers) if !values.is_empty() => Column::Numeric(numbers),
                _ => Column::Text(values),
            };
            table.insert(name, column)?;
        }

        debug!(rows = table.len(), columns = table.columns.len(), "loaded csv table");
        Ok(table)
    }

    /// Builds a table from a JSON array of flat objects.
    ///
    /// Keys absent from a record, or `null`, become `NaN` in numeric columns and
    /// empty strings in text columns.
    pub fn from_json_records(input: &str) -> MosaicResult<Self> {
        let records: Vec<IndexMap<String, Value>> = serde_json::from_str(input)
            .map_err(|e| MosaicError::InvalidData(format!("failed to parse json records: {e}")))?;

        let mut names: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !names.contains(key) {
                    names.push(key.clone());
                }
            }
        }

        let mut table = Self::new();
        for name in names {
            let cells: Vec<&Value> = records
                .iter()
                .map(|record| record.get(&name).unwrap_or(&Value::Null))
                .collect();
            let numeric = cells
                .iter()
                .all(|cell| cell.is_number() || cell.is_null());
            let column = if numeric {
                Column::Numeric(
                    cells
                        .iter()
                        .map(|cell| cell.as_f64().unwrap_or(f64::NAN))
                        .collect(),
                )
            } else {
                Column::Text(
                    cells
                        .iter()
                        .map(|cell| match cell {
                            Value::String(text) => text.clone(),
                            Value::Null => String::new(),
                            other => other.to_string(),
                        })
                        .collect(),
                )
            };
            table.insert(name, column)?;
        }

        debug!(rows = table.len(), columns = table.columns.len(), "loaded json table");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, DataTable};

    #[test]
    fn csv_columns_are_typed() {
        let csv = "image_path,x,label\na.png,1.5,cat\nb.png,2,dog\n";
        let table = DataTable::from_csv_reader(csv.as_bytes()).expect("csv");
        assert_eq!(table.len(), 2);
        assert_eq!(table.numeric_column("x").expect("x"), &[1.5, 2.0]);
        assert_eq!(table.text_column("label").expect("label"), &["cat", "dog"]);
        assert!(table.numeric_column("label").is_err());
    }

    #[test]
    fn mismatched_column_length_is_rejected() {
        let table = DataTable::new().with_numeric("x", vec![1.0, 2.0]).expect("x");
        assert!(table.with_numeric("y", vec![1.0]).is_err());
    }

    #[test]
    fn json_records_fill_missing_cells() {
        let json = r#"[{"a": 1, "b": "x"}, {"a": null}]"#;
        let table = DataTable::from_json_records(json).expect("json");
        let a = table.numeric_column("a").expect("a");
        assert_eq!(a[0], 1.0);
        assert!(a[1].is_nan());
        assert_eq!(table.column("b"), Some(&Column::Text(vec!["x".into(), String::new()])));
    }
}
