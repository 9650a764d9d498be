use thiserror::Error;

pub const INVALID_JSON_BODY: &str = "Invalid JSON body";
pub const SQL_REQUIRED: &str = "SQL query is required";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const EXECUTION_FAILED: &str = "Query execution failed";

#[derive(Debug, Error)]
pub enum QuerygateError {
    /// Client sent something we refuse before touching the database.
    #[error("{0}")]
    Validation(&'static str),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("database unreachable: {0}")]
    Connectivity(String),
    /// Driver error text, passed to the client verbatim.
    #[error("{0}")]
    Execution(String),
}

impl QuerygateError {
    pub fn invalid_json() -> Self {
        QuerygateError::Validation(INVALID_JSON_BODY)
    }

    pub fn sql_required() -> Self {
        QuerygateError::Validation(SQL_REQUIRED)
    }

    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            QuerygateError::Validation(_) | QuerygateError::MethodNotAllowed
        )
    }
}
