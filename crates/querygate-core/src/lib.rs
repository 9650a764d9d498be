pub mod error;
pub mod messages;
pub mod statement;
pub mod types;

pub use error::QuerygateError;
pub use messages::{ErrorResponse, ExecOutcome, QueryRequest, QueryResult};
pub use statement::{MutationKind, StatementKind};
pub use types::{Row, SqlValue};

#[cfg(test)]
mod tests;
