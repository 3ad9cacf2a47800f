use crate::error::{LmpError, LmpResult};

/// Rows of named `f64` columns. Every row has exactly `columns.len()` values.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermoTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ThermoTable {
    pub fn new(columns: Vec<String>) -> LmpResult<Self> {
        if columns.is_empty() {
            return Err(LmpError::Invalid("table needs at least one column".into()));
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<f64>>) -> LmpResult<Self> {
        let mut table = Self::new(columns)?;
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<f64>) -> LmpResult<()> {
        if row.len() != self.columns.len() {
            return Err(LmpError::Mismatch(format!(
                "row has {} values, table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&[f64]> {
        self.rows.get(idx).map(|r| r.as_slice())
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> LmpResult<Vec<f64>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| LmpError::Mismatch(format!("column '{name}' not found")))?;
        Ok(self.rows.iter().map(|r| r[idx]).collect())
    }

    pub fn insert_column(&mut self, at: usize, name: &str, values: Vec<f64>) -> LmpResult<()> {
        if at > self.columns.len() {
            return Err(LmpError::Invalid(format!(
                "cannot insert column at {at} into {} columns",
                self.columns.len()
            )));
        }
        if values.len() != self.rows.len() {
            return Err(LmpError::Mismatch(format!(
                "column '{name}' has {} values for {} rows",
                values.len(),
                self.rows.len()
            )));
        }
        self.columns.insert(at, name.to_string());
        for (row, v) in self.rows.iter_mut().zip(values) {
            row.insert(at, v);
        }
        Ok(())
    }
}

/// A [`ThermoTable`] with one label per row, e.g. the statistic names of a
/// column summary.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledTable {
    index_name: String,
    labels: Vec<String>,
    table: ThermoTable,
}

impl LabelledTable {
    pub fn new(
        index_name: impl Into<String>,
        labels: Vec<String>,
        table: ThermoTable,
    ) -> LmpResult<Self> {
        if labels.len() != table.n_rows() {
            return Err(LmpError::Mismatch(format!(
                "{} row labels for {} rows",
                labels.len(),
                table.n_rows()
            )));
        }
        Ok(Self {
            index_name: index_name.into(),
            labels,
            table,
        })
    }

    /// Header of the label column; empty when unnamed.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn table(&self) -> &ThermoTable {
        &self.table
    }

    pub fn row_by_label(&self, label: &str) -> Option<&[f64]> {
        let idx = self.labels.iter().position(|l| l == label)?;
        self.table.row(idx)
    }

    pub fn get(&self, label: &str, column: &str) -> Option<f64> {
        let col = self.table.column_index(column)?;
        self.row_by_label(label).map(|row| row[col])
    }
}
