//! `DataFrame` to [`WideTable`] conversion.

use crate::error::Result;
use polars::prelude::*;
use scanidx_index::{Cell, WideTable};

/// Cells of one column. String columns keep their text; every other dtype
/// is cast to `f64`, with failed casts becoming missing cells.
fn column_cells(column: &Column) -> Result<Vec<Cell>> {
    let cells = if column.dtype() == &DataType::String {
        column
            .str()?
            .into_iter()
            .map(|v| v.map_or(Cell::Missing, |s| Cell::Text(s.to_string())))
            .collect()
    } else {
        let values = column.cast(&DataType::Float64)?;
        values.f64()?.into_iter().map(Cell::from).collect()
    };
    Ok(cells)
}

/// Convert a frame into a wide table, keeping column names and order.
///
/// # Errors
///
/// Returns an error if a column cannot be read.
pub fn wide_table_from_frame(df: &DataFrame) -> Result<WideTable> {
    let columns: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
    let cells = df
        .get_columns()
        .iter()
        .map(column_cells)
        .collect::<Result<Vec<_>>>()?;

    let mut table = WideTable::new(columns);
    for row in 0..df.height() {
        table.push_row(cells.iter().map(|column| column[row].clone()).collect())?;
    }
    Ok(table)
}
