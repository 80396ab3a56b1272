//! Per-90 normalization of counting statistics.

use crate::dataset::{ColumnRole, PlayerRow, PlayerTable, StatsError};

/// Normalized value of one cell: raw divided by the row's `90s`, unless the
/// column is already a rate. A non-positive divisor is an explicit error
/// rather than an Inf/NaN that would poison every downstream rank.
pub fn per90_value(row: &PlayerRow, raw: f64, role: ColumnRole) -> Result<f64, StatsError> {
    match role {
        ColumnRole::Rate => Ok(raw),
        ColumnRole::Counting => {
            if row.nineties > 0.0 {
                Ok(raw / row.nineties)
            } else {
                Err(StatsError::InvalidDivisor {
                    player: row.player.clone(),
                })
            }
        }
    }
}

/// Normalized column for the whole table, in row order. Always returns a
/// fresh vector; the table itself is never touched, so calling this twice
/// cannot double-divide a column.
pub fn per90_column(table: &PlayerTable, stat: &str) -> Result<Vec<f64>, StatsError> {
    let index = table.stat_index(stat)?;
    let role = table.columns[index].role;
    table
        .rows
        .iter()
        .map(|row| per90_value(row, row.value(index), role))
        .collect()
}

/// Normalized column for a filtered subset of rows (the scatter page filters
/// by playing time before plotting).
pub fn per90_for_rows(
    rows: &[&PlayerRow],
    index: usize,
    role: ColumnRole,
) -> Result<Vec<f64>, StatsError> {
    rows.iter()
        .map(|row| per90_value(row, row.value(index), role))
        .collect()
}
