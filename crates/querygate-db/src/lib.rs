pub mod executor;
mod mysql;
pub mod pool;
mod sqlite;

pub use executor::QueryExecutor;
pub use pool::{Database, PoolSettings};
