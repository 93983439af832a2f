use heapless::String as HeaplessString;
use sqlx::{sqlite::SqliteRow, Row};
use std::error::Error;
use std::str::FromStr;

/// Conversion from a database row into a model.
pub trait TryFromRow<R>: Sized {
    fn try_from_row(row: &R) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

/// Reads a required `HeaplessString` column, failing on overflow.
pub fn get_heapless_string<const N: usize>(
    row: &SqliteRow,
    col_name: &str,
) -> Result<HeaplessString<N>, Box<dyn Error + Send + Sync>> {
    let s: String = row.try_get(col_name)?;
    HeaplessString::from_str(&s)
        .map_err(|_| format!("Value for column '{col_name}' is too long (max {N} chars)").into())
}
