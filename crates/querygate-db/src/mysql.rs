use crate::executor::execution_error;
use querygate_core::{ExecOutcome, QuerygateError, Row, SqlValue};
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::{Column, Executor, Row as _, TypeInfo, ValueRef};

// Plain `&str` statements carry no arguments, so sqlx sends them over the
// text protocol unprepared. Every non-null value therefore arrives as bytes,
// which is what the catch-all arm in `convert_value` relies on.

pub(crate) async fn fetch_rows(pool: &MySqlPool, sql: &str) -> Result<Vec<Row>, QuerygateError> {
    let rows = pool.fetch_all(sql).await.map_err(execution_error)?;
    rows.iter()
        .map(|row| convert_row(row).map_err(execution_error))
        .collect()
}

pub(crate) async fn execute(pool: &MySqlPool, sql: &str) -> Result<ExecOutcome, QuerygateError> {
    let result = pool.execute(sql).await.map_err(execution_error)?;
    Ok(ExecOutcome {
        rows_affected: result.rows_affected(),
        last_insert_id: Some(result.last_insert_id()),
    })
}

fn convert_row(row: &MySqlRow) -> Result<Row, sqlx::Error> {
    let mut out = Row::with_capacity(row.len());
    for (index, column) in row.columns().iter().enumerate() {
        out.insert(column.name(), convert_value(row, index)?);
    }
    Ok(out)
}

/// How a non-null value of a given MySQL type is read out of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Conversion {
    Boolean,
    Signed,
    Unsigned,
    Float32,
    Float64,
    /// CHAR/TEXT/BLOB/BINARY/DECIMAL/temporal/JSON/BIT
    Bytes,
}

pub(crate) fn conversion_for(type_name: &str) -> Conversion {
    match type_name {
        "BOOLEAN" => Conversion::Boolean,
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => Conversion::Signed,
        name if name.ends_with(" UNSIGNED") => Conversion::Unsigned,
        "FLOAT" => Conversion::Float32,
        "DOUBLE" => Conversion::Float64,
        _ => Conversion::Bytes,
    }
}

fn convert_value(row: &MySqlRow, index: usize) -> Result<SqlValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(SqlValue::Null);
    }
    let conversion = conversion_for(raw.type_info().name());
    let value = match conversion {
        Conversion::Boolean => SqlValue::Boolean(row.try_get::<bool, _>(index)?),
        Conversion::Signed => SqlValue::Integer(row.try_get::<i64, _>(index)?),
        Conversion::Unsigned => SqlValue::from_unsigned(row.try_get::<u64, _>(index)?),
        Conversion::Float32 => SqlValue::Float(f64::from(row.try_get::<f32, _>(index)?)),
        Conversion::Float64 => SqlValue::Float(row.try_get::<f64, _>(index)?),
        Conversion::Bytes => SqlValue::from_bytes(&row.try_get_unchecked::<Vec<u8>, _>(index)?),
    };
    Ok(value)
}
