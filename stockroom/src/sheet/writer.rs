//! Sheet Writer

use super::SheetResult;
use shared::format_currency;
use std::collections::BTreeSet;
use std::path::Path;

/// A single output cell. Integer cells can carry currency formatting when
/// their column is marked with `set_column_currency_format`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map_or(Cell::Empty, Cell::Text)
    }
}

impl From<Option<i64>> for Cell {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Cell::Empty, Cell::Int)
    }
}

/// Builds a table-shaped artifact: optional title banner, optional
/// left/right subheader pair, header row, body rows, optional leading
/// 1-based row-index column.
///
/// Contract: body rows reproduce, in order, the synthetic row index followed
/// by the original field values.
pub struct SheetWriter {
    title: Option<String>,
    subheader: Option<(String, String)>,
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    currency_columns: BTreeSet<usize>,
    currency: String,
    row_index: bool,
}

impl SheetWriter {
    pub fn new(currency: &str) -> Self {
        Self {
            title: None,
            subheader: None,
            headers: Vec::new(),
            rows: Vec::new(),
            currency_columns: BTreeSet::new(),
            currency: currency.to_string(),
            row_index: false,
        }
    }

    pub fn add_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    pub fn add_subheaders(&mut self, left: &str, right: &str) {
        self.subheader = Some((left.to_string(), right.to_string()));
    }

    pub fn add_headers(&mut self, headers: &[&str]) {
        self.headers = headers.iter().map(|h| h.to_string()).collect();
    }

    pub fn add_data(&mut self, rows: Vec<Vec<Cell>>) {
        self.rows.extend(rows);
    }

    /// Prepend a synthetic 1-based row index column on save.
    pub fn add_row_index_column(&mut self) {
        self.row_index = true;
    }

    /// Mark a body column (0-based, counted before the row-index column is
    /// prepended) for currency formatting of its integer cells.
    pub fn set_column_currency_format(&mut self, column: usize) {
        self.currency_columns.insert(column);
    }

    fn render_cell(&self, column: usize, cell: &Cell) -> String {
        match cell {
            Cell::Empty => String::new(),
            Cell::Text(text) => text.clone(),
            Cell::Int(value) => {
                if self.currency_columns.contains(&column) {
                    format_currency(*value, &self.currency)
                } else {
                    value.to_string()
                }
            }
        }
    }

    /// The full output as rows of strings, exactly as they are saved.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.rows.len() + 3);
        if let Some(title) = &self.title {
            out.push(vec![title.clone()]);
        }
        if let Some((left, right)) = &self.subheader {
            out.push(vec![left.clone(), right.clone()]);
        }
        if !self.headers.is_empty() {
            let mut header = Vec::with_capacity(self.headers.len() + 1);
            if self.row_index {
                header.push("Row".to_string());
            }
            header.extend(self.headers.iter().cloned());
            out.push(header);
        }
        for (i, row) in self.rows.iter().enumerate() {
            let mut rendered = Vec::with_capacity(row.len() + 1);
            if self.row_index {
                rendered.push((i + 1).to_string());
            }
            for (col, cell) in row.iter().enumerate() {
                rendered.push(self.render_cell(col, cell));
            }
            out.push(rendered);
        }
        out
    }

    pub fn save(&self, path: &Path) -> SheetResult<()> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
        for row in self.to_rows() {
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_rows_are_index_then_original_values() {
        let mut writer = SheetWriter::new("IRR");
        writer.add_headers(&["Code", "Price"]);
        writer.add_data(vec![
            vec![Cell::from("P001"), Cell::from(1500i64)],
            vec![Cell::from("P002"), Cell::from(200i64)],
        ]);
        writer.add_row_index_column();
        let rows = writer.to_rows();
        assert_eq!(rows[0], vec!["Row", "Code", "Price"]);
        assert_eq!(rows[1], vec!["1", "P001", "1500"]);
        assert_eq!(rows[2], vec!["2", "P002", "200"]);
    }

    #[test]
    fn currency_columns_format_integer_cells() {
        let mut writer = SheetWriter::new("IRR");
        writer.add_headers(&["Code", "Price"]);
        writer.add_data(vec![vec![Cell::from("P001"), Cell::from(1_234_500i64)]]);
        writer.set_column_currency_format(1);
        let rows = writer.to_rows();
        assert_eq!(rows[1], vec!["P001", "IRR 1,234,500"]);
    }

    #[test]
    fn title_and_subheaders_lead_the_output() {
        let mut writer = SheetWriter::new("IRR");
        writer.add_title("Availability");
        writer.add_subheaders("Acme", "2026-08-01");
        writer.add_headers(&["Code"]);
        writer.add_data(vec![vec![Cell::from("P001")]]);
        let rows = writer.to_rows();
        assert_eq!(rows[0], vec!["Availability"]);
        assert_eq!(rows[1], vec!["Acme", "2026-08-01"]);
        assert_eq!(rows[2], vec!["Code"]);
        assert_eq!(rows[3], vec!["P001"]);
    }

    #[test]
    fn empty_cells_render_blank() {
        let mut writer = SheetWriter::new("IRR");
        writer.add_headers(&["Code", "Brand"]);
        writer.add_data(vec![vec![Cell::from("P001"), Cell::from(None::<String>)]]);
        let rows = writer.to_rows();
        assert_eq!(rows[1], vec!["P001", ""]);
    }
}
