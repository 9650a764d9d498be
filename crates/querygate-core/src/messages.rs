use crate::error::{QuerygateError, EXECUTION_FAILED};
use crate::statement::MutationKind;
use crate::types::Row;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRequest {
    pub sql: String,
}

impl QueryRequest {
    /// Decodes a request body. Only JSON objects are accepted. The `sql` key
    /// matches case-insensitively, an exact `sql` taking precedence; other keys
    /// are ignored and a missing or null `sql` reads as empty.
    pub fn from_slice(body: &[u8]) -> Result<Self, QuerygateError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| QuerygateError::invalid_json())?;
        let Value::Object(mut fields) = value else {
            return Err(QuerygateError::invalid_json());
        };
        let key = if fields.contains_key("sql") {
            Some("sql".to_string())
        } else {
            fields.keys().find(|key| key.eq_ignore_ascii_case("sql")).cloned()
        };
        let sql = key.and_then(|key| fields.remove(&key));
        match sql {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::String(sql)) => Ok(Self { sql }),
            Some(_) => Err(QuerygateError::invalid_json()),
        }
    }

    /// The statement with surrounding whitespace removed.
    pub fn statement(&self) -> Result<&str, QuerygateError> {
        let sql = self.sql.trim();
        if sql.is_empty() {
            return Err(QuerygateError::sql_required());
        }
        Ok(sql)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&QuerygateError> for ErrorResponse {
    fn from(err: &QuerygateError) -> Self {
        match err {
            QuerygateError::Execution(message) => ErrorResponse {
                error: EXECUTION_FAILED.to_string(),
                message: Some(message.clone()).filter(|m| !m.is_empty()),
            },
            other => ErrorResponse {
                error: other.to_string(),
                message: None,
            },
        }
    }
}

/// What a command reports back. Either field may be unavailable from the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    pub last_insert_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Select {
        rows: Vec<Row>,
    },
    Mutation {
        kind: MutationKind,
        affected_rows: u64,
        insert_id: Option<u64>,
    },
    Executed {
        keyword: String,
    },
}

impl QueryResult {
    pub fn select(rows: Vec<Row>) -> Self {
        QueryResult::Select { rows }
    }

    /// Missing counters default to zero; `insert_id` is only carried for INSERT.
    pub fn mutation(kind: MutationKind, outcome: ExecOutcome) -> Self {
        let insert_id = match kind {
            MutationKind::Insert => Some(outcome.last_insert_id.unwrap_or(0)),
            MutationKind::Update | MutationKind::Delete => None,
        };
        QueryResult::Mutation {
            kind,
            affected_rows: outcome.rows_affected,
            insert_id,
        }
    }

    pub fn executed(keyword: impl Into<String>) -> Self {
        QueryResult::Executed {
            keyword: keyword.into(),
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            QueryResult::Select { .. } => "SELECT",
            QueryResult::Mutation { kind, .. } => kind.as_str(),
            QueryResult::Executed { keyword } => keyword,
        }
    }
}

// Shapes:
//   {"type":"SELECT","rows":[...],"count":N}
//   {"type":"INSERT|UPDATE|DELETE","affectedRows":N[,"insertId":M]}
//   {"type":"<KEYWORD>","status":"executed"}
impl Serialize for QueryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QueryResult::Select { rows } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "SELECT")?;
                map.serialize_entry("rows", rows)?;
                map.serialize_entry("count", &rows.len())?;
                map.end()
            }
            QueryResult::Mutation {
                kind,
                affected_rows,
                insert_id,
            } => {
                let len = if insert_id.is_some() { 3 } else { 2 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("type", kind.as_str())?;
                map.serialize_entry("affectedRows", affected_rows)?;
                if let Some(id) = insert_id {
                    map.serialize_entry("insertId", id)?;
                }
                map.end()
            }
            QueryResult::Executed { keyword } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", keyword)?;
                map.serialize_entry("status", "executed")?;
                map.end()
            }
        }
    }
}
