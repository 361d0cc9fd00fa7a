//! Batch Applier
//!
//! Replays sheet rows through the single-row operations. A `ColumnMap`
//! assigns 0-based column positions to field roles; unmapped roles project
//! to `None`. Rows are applied strictly in file order and the default
//! failure policy is propagate-and-abort: the first row error stops the
//! batch, rows before it stay applied.

use crate::db::repository::{RepoError, RepoResult};
use shared::models::{OrderLineInput, ProductInput};

/// Field role -> column position mapping for sheet imports.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    pub code: Option<usize>,
    pub description: Option<usize>,
    pub brand: Option<usize>,
    pub price: Option<usize>,
    pub count_in_carton: Option<usize>,
    pub count: Option<usize>,
}

impl ColumnMap {
    /// Mapping for stock-movement sheets: just a code and a count column.
    pub fn stock(code: usize, count: usize) -> Self {
        Self {
            code: Some(code),
            count: Some(count),
            ..Self::default()
        }
    }

    /// Mapping for sheets that carry product codes only.
    pub fn codes_only(code: usize) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }
}

fn text_cell(row: &[String], index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| row.get(i))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn int_cell(row: &[String], index: Option<usize>, role: &str, file_row: usize) -> RepoResult<Option<i64>> {
    let Some(raw) = row.get(index.unwrap_or(usize::MAX)).map(|s| s.trim()).filter(|s| !s.is_empty())
    else {
        return Ok(None);
    };
    raw.replace(',', "").parse::<i64>().map(Some).map_err(|_| {
        RepoError::Validation(format!(
            "row {file_row}: {role} column is not an integer: '{raw}'"
        ))
    })
}

/// Project a data row into a product input. `file_row` is the 1-based row
/// number in the file (the header is row 1), used only for error messages.
pub fn project_product(row: &[String], map: &ColumnMap, file_row: usize) -> RepoResult<ProductInput> {
    Ok(ProductInput {
        code: text_cell(row, map.code),
        description: text_cell(row, map.description),
        brand: text_cell(row, map.brand),
        price: int_cell(row, map.price, "price", file_row)?,
        count_in_carton: int_cell(row, map.count_in_carton, "count_in_carton", file_row)?,
        count: int_cell(row, map.count, "count", file_row)?,
    })
}

/// Project a data row into an order-line input.
pub fn project_order_line(
    row: &[String],
    map: &ColumnMap,
    file_row: usize,
) -> RepoResult<OrderLineInput> {
    Ok(OrderLineInput {
        product_code: text_cell(row, map.code),
        count: int_cell(row, map.count, "count", file_row)?,
    })
}

/// Helpers for the fields the single-row operations cannot do without.
pub fn required_text(value: Option<String>, role: &str, file_row: usize) -> RepoResult<String> {
    value.ok_or_else(|| RepoError::Validation(format!("row {file_row}: {role} cell is empty")))
}

pub fn required_int(value: Option<i64>, role: &str, file_row: usize) -> RepoResult<i64> {
    value.ok_or_else(|| RepoError::Validation(format!("row {file_row}: {role} cell is empty")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn unmapped_roles_project_to_none() {
        let map = ColumnMap::stock(0, 1);
        let input = project_product(&row(&["P001", "7", "ignored"]), &map, 2).unwrap();
        assert_eq!(input.code.as_deref(), Some("P001"));
        assert_eq!(input.count, Some(7));
        assert!(input.description.is_none());
        assert!(input.price.is_none());
    }

    #[test]
    fn empty_cells_project_to_none() {
        let map = ColumnMap {
            code: Some(0),
            brand: Some(1),
            ..ColumnMap::default()
        };
        let input = project_product(&row(&["P001", "  "]), &map, 3).unwrap();
        assert_eq!(input.code.as_deref(), Some("P001"));
        assert!(input.brand.is_none());
    }

    #[test]
    fn mapped_column_past_row_end_projects_to_none() {
        let map = ColumnMap::stock(0, 5);
        let input = project_order_line(&row(&["P001"]), &map, 2).unwrap();
        assert_eq!(input.product_code.as_deref(), Some("P001"));
        assert!(input.count.is_none());
    }

    #[test]
    fn non_integer_cell_is_a_validation_error_naming_the_row() {
        let map = ColumnMap::stock(0, 1);
        let err = project_order_line(&row(&["P001", "many"]), &map, 4).unwrap_err();
        match err {
            RepoError::Validation(msg) => {
                assert!(msg.contains("row 4"));
                assert!(msg.contains("many"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn grouped_digits_parse_as_integers() {
        let map = ColumnMap::stock(0, 1);
        let input = project_order_line(&row(&["P001", "1,250"]), &map, 2).unwrap();
        assert_eq!(input.count, Some(1250));
    }
}
