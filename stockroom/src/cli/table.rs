//! Plain-text table rendering for stdout reports.

/// Column-aligned text table with an optional totals section separated by a
/// rule, mirroring the sheet layout of the same report.
pub struct TextTable {
    title: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    /// Row indexes that start a new section (rendered with a rule above).
    section_starts: Vec<usize>,
}

impl TextTable {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            headers: Vec::new(),
            rows: Vec::new(),
            section_starts: Vec::new(),
        }
    }

    pub fn headers(&mut self, headers: &[&str]) {
        self.headers = headers.iter().map(|h| h.to_string()).collect();
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// The next row added starts a new section (used for totals).
    pub fn add_section(&mut self) {
        self.section_starts.push(self.rows.len());
    }

    fn column_widths(&self) -> Vec<usize> {
        let columns = self
            .headers
            .len()
            .max(self.rows.iter().map(Vec::len).max().unwrap_or(0));
        let mut widths = vec![0usize; columns];
        for (i, header) in self.headers.iter().enumerate() {
            widths[i] = widths[i].max(header.chars().count());
        }
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths
    }

    fn format_row(cells: &[String], widths: &[usize]) -> String {
        let mut line = String::new();
        for (i, &width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(&format!("{cell:<width$}"));
        }
        line.trim_end().to_string()
    }

    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        if !self.headers.is_empty() {
            out.push_str(&Self::format_row(&self.headers, &widths));
            out.push('\n');
            out.push_str(&"-".repeat(rule_len));
            out.push('\n');
        }
        for (i, row) in self.rows.iter().enumerate() {
            if self.section_starts.contains(&i) {
                out.push_str(&"-".repeat(rule_len));
                out.push('\n');
            }
            out.push_str(&Self::format_row(row, &widths));
            out.push('\n');
        }
        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }
}
