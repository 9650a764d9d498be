use async_trait::async_trait;
use querygate_core::{ExecOutcome, QuerygateError, Row};

/// What the gateway needs from a database handle.
///
/// Implementations must be safe to share across concurrent requests; the
/// pooled [`Database`](crate::Database) is, and tests substitute their own.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Runs `sql` as a query and buffers every row in return order.
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<Row>, QuerygateError>;

    /// Runs `sql` as a command without inspecting result rows.
    async fn execute(&self, sql: &str) -> Result<ExecOutcome, QuerygateError>;
}

pub(crate) fn execution_error(err: sqlx::Error) -> QuerygateError {
    QuerygateError::Execution(err.to_string())
}
