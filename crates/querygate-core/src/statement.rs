use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Insert,
    Update,
    Delete,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Insert => "INSERT",
            MutationKind::Update => "UPDATE",
            MutationKind::Delete => "DELETE",
        }
    }
}

/// Execution path chosen from a statement's leading keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Mutation(MutationKind),
    /// DDL and anything unrecognised, carrying the upper-cased keyword.
    Other(String),
}

impl StatementKind {
    /// Classifies by the first whitespace-delimited token, case-insensitively.
    /// Callers are expected to have rejected blank statements already.
    pub fn classify(sql: &str) -> Self {
        let keyword = sql
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_uppercase();
        match keyword.as_str() {
            "SELECT" => StatementKind::Select,
            "INSERT" => StatementKind::Mutation(MutationKind::Insert),
            "UPDATE" => StatementKind::Mutation(MutationKind::Update),
            "DELETE" => StatementKind::Mutation(MutationKind::Delete),
            _ => StatementKind::Other(keyword),
        }
    }

    pub fn keyword(&self) -> &str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Mutation(kind) => kind.as_str(),
            StatementKind::Other(keyword) => keyword,
        }
    }

    /// Low-cardinality name for metric labels.
    pub fn label(&self) -> &'static str {
        match self {
            StatementKind::Select => "select",
            StatementKind::Mutation(MutationKind::Insert) => "insert",
            StatementKind::Mutation(MutationKind::Update) => "update",
            StatementKind::Mutation(MutationKind::Delete) => "delete",
            StatementKind::Other(_) => "other",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
