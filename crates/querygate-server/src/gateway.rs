use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use metrics::counter;
use querygate_core::{ErrorResponse, QueryRequest, QueryResult, QuerygateError, StatementKind};
use querygate_db::QueryExecutor;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error};

/// Shared by every request. The executor is injected at startup.
#[derive(Clone)]
pub struct AppState {
    executor: Arc<dyn QueryExecutor>,
}

impl AppState {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }
}

#[derive(Debug)]
pub struct ApiError(QuerygateError);

impl From<QuerygateError> for ApiError {
    fn from(err: QuerygateError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            QuerygateError::Validation(_) => StatusCode::BAD_REQUEST,
            QuerygateError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            QuerygateError::Configuration(_)
            | QuerygateError::Connectivity(_)
            | QuerygateError::Execution(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn method_not_allowed() -> ApiError {
    counter!("query_rejected_total", "reason" => "method").increment(1);
    ApiError(QuerygateError::MethodNotAllowed)
}

pub async fn query(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<QueryResult>, ApiError> {
    let request = QueryRequest::from_slice(&body).map_err(reject)?;
    let sql = request.statement().map_err(reject)?;
    let kind = StatementKind::classify(sql);
    counter!("query_requests_total", "kind" => kind.label()).increment(1);

    match execute_statement(state.executor.as_ref(), sql, &kind).await {
        Ok(result) => {
            counter!("query_success_total", "kind" => kind.label()).increment(1);
            Ok(Json(result))
        }
        Err(err) => {
            counter!("query_error_total", "kind" => kind.label()).increment(1);
            error!(kind = %kind, "query execution failed: {err}");
            Err(err.into())
        }
    }
}

fn reject(err: QuerygateError) -> ApiError {
    debug!("rejected query request: {err}");
    counter!("query_rejected_total", "reason" => "validation").increment(1);
    ApiError(err)
}

/// Runs one statement down the path its kind selects. Nothing is reported
/// unless the whole statement succeeded.
pub async fn execute_statement(
    executor: &dyn QueryExecutor,
    sql: &str,
    kind: &StatementKind,
) -> Result<QueryResult, QuerygateError> {
    match kind {
        StatementKind::Select => Ok(QueryResult::select(executor.fetch_rows(sql).await?)),
        StatementKind::Mutation(mutation) => {
            let outcome = executor.execute(sql).await?;
            Ok(QueryResult::mutation(*mutation, outcome))
        }
        StatementKind::Other(keyword) => {
            executor.execute(sql).await?;
            Ok(QueryResult::executed(keyword.clone()))
        }
    }
}
