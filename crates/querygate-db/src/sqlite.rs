use crate::executor::execution_error;
use querygate_core::{ExecOutcome, QuerygateError, Row, SqlValue};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Column, Executor, Row as _, TypeInfo, ValueRef};

pub(crate) async fn fetch_rows(pool: &SqlitePool, sql: &str) -> Result<Vec<Row>, QuerygateError> {
    let rows = pool.fetch_all(sql).await.map_err(execution_error)?;
    rows.iter()
        .map(|row| convert_row(row).map_err(execution_error))
        .collect()
}

pub(crate) async fn execute(pool: &SqlitePool, sql: &str) -> Result<ExecOutcome, QuerygateError> {
    let result = pool.execute(sql).await.map_err(execution_error)?;
    Ok(ExecOutcome {
        rows_affected: result.rows_affected(),
        last_insert_id: u64::try_from(result.last_insert_rowid()).ok(),
    })
}

fn convert_row(row: &SqliteRow) -> Result<Row, sqlx::Error> {
    let mut out = Row::with_capacity(row.len());
    for (index, column) in row.columns().iter().enumerate() {
        out.insert(column.name(), convert_value(row, index)?);
    }
    Ok(out)
}

// SQLite is dynamically typed, so the value's storage class is used rather
// than the declared column type.
fn convert_value(row: &SqliteRow, index: usize) -> Result<SqlValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(SqlValue::Null);
    }
    let type_name = raw.type_info().name().to_string();
    let value = match type_name.as_str() {
        "INTEGER" => SqlValue::Integer(row.try_get::<i64, _>(index)?),
        "REAL" => SqlValue::Float(row.try_get::<f64, _>(index)?),
        _ => SqlValue::from_bytes(&row.try_get_unchecked::<Vec<u8>, _>(index)?),
    };
    Ok(value)
}
