//! Sheet Reader

use super::SheetResult;
use std::path::Path;

/// Reads a whole sheet into memory as rows of string cells.
///
/// Row 0 is always a header and is not part of `data_rows`; every
/// row-projecting caller in the ledger works on data rows only.
pub struct SheetReader {
    rows: Vec<Vec<String>>,
}

impl SheetReader {
    pub fn open(path: &Path) -> SheetResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { rows })
    }

    /// All rows after the header, in file order.
    pub fn data_rows(&self) -> &[Vec<String>] {
        if self.rows.is_empty() { &[] } else { &self.rows[1..] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_sheet(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn skips_exactly_the_header_row() {
        let (_dir, path) = write_sheet("Code,Count\nP001,5\nP002,3\n");
        let reader = SheetReader::open(&path).unwrap();
        assert_eq!(
            reader.data_rows(),
            &[
                vec!["P001".to_string(), "5".to_string()],
                vec!["P002".to_string(), "3".to_string()],
            ]
        );
    }

    #[test]
    fn empty_sheet_has_no_data_rows() {
        let (_dir, path) = write_sheet("");
        let reader = SheetReader::open(&path).unwrap();
        assert!(reader.data_rows().is_empty());
    }

    #[test]
    fn header_only_sheet_has_no_data_rows() {
        let (_dir, path) = write_sheet("Code,Count\n");
        let reader = SheetReader::open(&path).unwrap();
        assert!(reader.data_rows().is_empty());
    }
}
