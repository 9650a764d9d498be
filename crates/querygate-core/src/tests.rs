#[cfg(test)]
mod tests {
    use crate::error::QuerygateError;
    use crate::messages::{ErrorResponse, ExecOutcome, QueryRequest, QueryResult};
    use crate::statement::{MutationKind, StatementKind};
    use crate::types::{Row, SqlValue};
    use serde_json::json;

    #[test]
    fn classify_is_case_insensitive_on_first_token() {
        for sql in ["select * from t", "SELECT * FROM t", "   Select  *  from t"] {
            assert_eq!(StatementKind::classify(sql), StatementKind::Select);
        }
        assert_eq!(
            StatementKind::classify("insert into t values (1)"),
            StatementKind::Mutation(MutationKind::Insert)
        );
        assert_eq!(
            StatementKind::classify("Update t set v = 1"),
            StatementKind::Mutation(MutationKind::Update)
        );
        assert_eq!(
            StatementKind::classify("\tdelete from t"),
            StatementKind::Mutation(MutationKind::Delete)
        );
    }

    #[test]
    fn classify_other_keeps_upper_cased_keyword() {
        assert_eq!(
            StatementKind::classify("create table t (id int)"),
            StatementKind::Other("CREATE".into())
        );
        assert_eq!(StatementKind::classify("drop table t").keyword(), "DROP");
        // Only whitespace separates tokens, so this is not a SELECT.
        assert_eq!(
            StatementKind::classify("select*from t"),
            StatementKind::Other("SELECT*FROM".into())
        );
        assert_eq!(StatementKind::classify("(select 1)").label(), "other");
    }

    #[test]
    fn request_rejects_non_objects() {
        let bodies: [&[u8]; 6] = [b"not json", b"", b"[\"select 1\"]", b"null", b"42", b"\"select 1\""];
        for body in bodies {
            let err = QueryRequest::from_slice(body).expect_err("should reject");
            assert!(matches!(err, QuerygateError::Validation("Invalid JSON body")));
        }
        let err = QueryRequest::from_slice(br#"{"sql": 5}"#).expect_err("wrong type");
        assert_eq!(err.to_string(), "Invalid JSON body");
    }

    #[test]
    fn request_statement_is_trimmed_and_required() {
        let req = QueryRequest::from_slice(br#"{"sql": "  SELECT 1 \n"}"#).expect("decode");
        assert_eq!(req.statement().expect("statement"), "SELECT 1");

        let bodies: [&[u8]; 3] = [br#"{"sql": "   "}"#, br#"{}"#, br#"{"sql": null}"#];
        for body in bodies {
            let req = QueryRequest::from_slice(body).expect("decode");
            let err = req.statement().expect_err("blank");
            assert_eq!(err.to_string(), "SQL query is required");
        }

        let req = QueryRequest::from_slice(br#"{"sql": "select 1", "extra": true}"#)
            .expect("unknown fields are ignored");
        assert_eq!(req.sql, "select 1");
    }

    #[test]
    fn request_sql_key_is_case_insensitive() {
        let bodies: [&[u8]; 2] = [br#"{"SQL": "SELECT 1"}"#, br#"{"Sql": "SELECT 1"}"#];
        for body in bodies {
            let req = QueryRequest::from_slice(body).expect("decode");
            assert_eq!(req.statement().expect("statement"), "SELECT 1");
        }
        let req = QueryRequest::from_slice(br#"{"SQL": "SELECT 2", "sql": "SELECT 1"}"#)
            .expect("decode");
        assert_eq!(req.sql, "SELECT 1");
        let err = QueryRequest::from_slice(br#"{"SQL": 5}"#).expect_err("wrong type");
        assert_eq!(err.to_string(), "Invalid JSON body");
    }

    #[test]
    fn row_keeps_column_order_and_overwrites_duplicates() {
        let mut row = Row::default();
        row.insert("b", SqlValue::Integer(1));
        row.insert("a", SqlValue::Null);
        row.insert("b", SqlValue::Text("two".into()));
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("b"), Some(&SqlValue::Text("two".into())));
        assert_eq!(serde_json::to_string(&row).expect("json"), r#"{"b":"two","a":null}"#);
    }

    #[test]
    fn sql_values_serialize_as_plain_json() {
        let row: Row = vec![
            ("i".to_string(), SqlValue::Integer(-3)),
            ("f".to_string(), SqlValue::Float(1.5)),
            ("t".to_string(), SqlValue::from_bytes(b"bytes")),
            ("b".to_string(), SqlValue::Boolean(true)),
            ("n".to_string(), SqlValue::Null),
            ("u".to_string(), SqlValue::from_unsigned(u64::MAX)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            serde_json::to_value(&row).expect("json"),
            json!({"i": -3, "f": 1.5, "t": "bytes", "b": true, "n": null, "u": "18446744073709551615"})
        );
        assert_eq!(SqlValue::from_unsigned(7), SqlValue::Integer(7));
    }

    #[test]
    fn select_result_shape() {
        let mut row = Row::default();
        row.insert("x", SqlValue::Integer(1));
        let result = QueryResult::select(vec![row]);
        assert_eq!(
            serde_json::to_value(&result).expect("json"),
            json!({"type": "SELECT", "rows": [{"x": 1}], "count": 1})
        );
        let empty = QueryResult::select(Vec::new());
        assert_eq!(
            serde_json::to_value(&empty).expect("json"),
            json!({"type": "SELECT", "rows": [], "count": 0})
        );
    }

    #[test]
    fn mutation_result_only_carries_insert_id_for_insert() {
        let outcome = ExecOutcome {
            rows_affected: 1,
            last_insert_id: Some(42),
        };
        let insert = QueryResult::mutation(MutationKind::Insert, outcome);
        assert_eq!(
            serde_json::to_value(&insert).expect("json"),
            json!({"type": "INSERT", "affectedRows": 1, "insertId": 42})
        );

        let update = QueryResult::mutation(MutationKind::Update, ExecOutcome::default());
        assert_eq!(
            serde_json::to_value(&update).expect("json"),
            json!({"type": "UPDATE", "affectedRows": 0})
        );

        let no_id = QueryResult::mutation(MutationKind::Insert, ExecOutcome::default());
        assert_eq!(
            serde_json::to_value(&no_id).expect("json"),
            json!({"type": "INSERT", "affectedRows": 0, "insertId": 0})
        );
    }

    #[test]
    fn executed_result_shape() {
        let result = QueryResult::executed("CREATE");
        assert_eq!(result.kind(), "CREATE");
        assert_eq!(
            serde_json::to_value(&result).expect("json"),
            json!({"type": "CREATE", "status": "executed"})
        );
    }

    #[test]
    fn error_response_mapping() {
        let body = ErrorResponse::from(&QuerygateError::sql_required());
        assert_eq!(
            serde_json::to_value(&body).expect("json"),
            json!({"error": "SQL query is required"})
        );

        let err = QuerygateError::Execution("no such table: missing".into());
        assert!(!err.is_client_error());
        let body = ErrorResponse::from(&err);
        assert_eq!(body.error, "Query execution failed");
        assert_eq!(body.message.as_deref(), Some("no such table: missing"));

        let body = ErrorResponse::from(&QuerygateError::MethodNotAllowed);
        assert_eq!(body.error, "Method not allowed");
        assert!(body.message.is_none());
    }
}
