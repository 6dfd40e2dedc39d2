use serde::{Deserialize, Serialize};

/// One editable table entry. Cells may be empty while the user is typing,
/// so every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub jd: Option<f64>,
    pub src1: Option<f64>,
    pub src2: Option<f64>,
}

impl Row {
    pub fn new(jd: f64, src1: f64, src2: f64) -> Self {
        Self {
            jd: Some(jd),
            src1: Some(src1),
            src2: Some(src2),
        }
    }
}

/// Column identifier matching the three-column grid layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Jd,
    Src1,
    Src2,
}

/// Ordered grid backing the chart. Rows are keyed by position only;
/// insertion order is display order and no sorting by `jd` is assumed.
#[derive(Debug, Clone)]
pub struct DataTable {
    rows: Vec<Row>,
    col_headers: [String; 3],
}

impl DataTable {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            col_headers: [
                "Julian Date".to_string(),
                "Sample1 Mag".to_string(),
                "Sample2 Mag".to_string(),
            ],
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends an empty row and returns its index.
    pub fn insert_row(&mut self) -> usize {
        self.rows.push(Row::default());
        self.rows.len() - 1
    }

    /// Writes one cell. Returns false when the row index is out of range.
    pub fn set_cell(&mut self, row: usize, column: Column, value: Option<f64>) -> bool {
        let Some(entry) = self.rows.get_mut(row) else {
            return false;
        };
        match column {
            Column::Jd => entry.jd = value,
            Column::Src1 => entry.src1 = value,
            Column::Src2 => entry.src2 = value,
        }
        true
    }

    /// Removes one row. Returns false when the row index is out of range.
    pub fn remove_row(&mut self, row: usize) -> bool {
        if row < self.rows.len() {
            self.rows.remove(row);
            true
        } else {
            false
        }
    }

    /// Replaces the whole grid, as a file upload does.
    pub fn replace_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    pub fn col_headers(&self) -> &[String; 3] {
        &self.col_headers
    }

    pub fn set_col_headers(&mut self, headers: [String; 3]) {
        self.col_headers = headers;
    }
}

impl Default for DataTable {
    fn default() -> Self {
        Self::new()
    }
}
