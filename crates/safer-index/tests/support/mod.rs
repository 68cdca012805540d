#![allow(dead_code)]

//! A connection that simulates the parts of the PostgreSQL catalog the index
//! directives touch, and records the SQL text of every statement.

use safer_index::{
    schema::{Index, ModelState, ProjectState},
    AddIndexConcurrently, Directive,
};
use safer_index_core::{
    async_trait,
    driver::{operation::Transaction, Connection, Operation, Response, Row},
    stmt::Statement,
    Error, Result,
};
use safer_index_sql::Serializer;
use std::{collections::BTreeMap, fmt};

pub const APP_LABEL: &str = "example_app";
pub const MODEL: &str = "IntModel";
pub const TABLE: &str = "example_app_intmodel";
pub const INDEX: &str = "int_field_idx";

pub const SHOW: &str = "SHOW lock_timeout;";
pub const DISABLE: &str = "SET lock_timeout = 0;";
pub const RESTORE: &str = "SET lock_timeout = '1s';";
pub const FIND_INVALID: &str = "SELECT relname FROM pg_class, pg_index WHERE (pg_index.indisvalid = false AND pg_index.indexrelid = pg_class.oid AND relname = $1);";
pub const DROP: &str = r#"DROP INDEX CONCURRENTLY IF EXISTS "int_field_idx";"#;
pub const CREATE: &str = r#"CREATE INDEX CONCURRENTLY IF NOT EXISTS "int_field_idx" ON "example_app_intmodel" ("int_field");"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIndex {
    pub table: String,
    pub valid: bool,
}

#[derive(Debug)]
pub struct FakeConnection {
    alias: String,
    lock_timeout: String,
    depth: u32,
    indexes: BTreeMap<String, CatalogIndex>,
    log: Vec<String>,

    /// Builds of this index fail, leaving an invalid index behind
    failing_build: Option<String>,

    /// Statements whose SQL starts with one of these prefixes fail
    failing_prefixes: Vec<String>,

    /// `SHOW` answers with no rows
    empty_show: bool,
}

#[derive(Debug)]
struct FakeError(String);

impl std::error::Error for FakeError {}

impl fmt::Display for FakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FakeConnection {
    pub fn new() -> Self {
        Self {
            alias: "default".to_string(),
            lock_timeout: "1s".to_string(),
            depth: 0,
            indexes: BTreeMap::new(),
            log: vec![],
            failing_build: None,
            failing_prefixes: vec![],
            empty_show: false,
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = alias.to_string();
        self
    }

    pub fn with_index(mut self, name: &str, table: &str, valid: bool) -> Self {
        self.indexes.insert(
            name.to_string(),
            CatalogIndex {
                table: table.to_string(),
                valid,
            },
        );
        self
    }

    pub fn fail_build_of(mut self, name: &str) -> Self {
        self.failing_build = Some(name.to_string());
        self
    }

    pub fn fail_statements_starting_with(mut self, prefix: &str) -> Self {
        self.failing_prefixes.push(prefix.to_string());
        self
    }

    pub fn with_empty_show(mut self) -> Self {
        self.empty_show = true;
        self
    }

    /// Lets the next build succeed.
    pub fn heal(&mut self) {
        self.failing_build = None;
    }

    pub fn lock_timeout(&self) -> &str {
        &self.lock_timeout
    }

    pub fn index(&self, name: &str) -> Option<&CatalogIndex> {
        self.indexes.get(name)
    }

    pub fn indexes(&self) -> &BTreeMap<String, CatalogIndex> {
        &self.indexes
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn take_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.log)
    }

    fn fail(message: impl Into<String>) -> Error {
        Error::driver_operation_failed(FakeError(message.into()))
    }

    fn exec_statement(&mut self, stmt: Statement) -> Result<Response> {
        let mut params = Vec::<String>::new();
        let sql = Serializer::postgresql().serialize(&stmt, &mut params);
        self.log.push(sql.clone());

        if self
            .failing_prefixes
            .iter()
            .any(|prefix| sql.starts_with(prefix))
        {
            return Err(Self::fail(format!("injected failure: {sql}")));
        }

        if stmt.is_concurrent_ddl() && self.depth > 0 {
            return Err(Self::fail(
                "CREATE/DROP INDEX CONCURRENTLY cannot run inside a transaction block",
            ));
        }

        match stmt {
            Statement::ShowSetting(_) if self.empty_show => Ok(Response::empty_values()),
            Statement::ShowSetting(_) => Ok(Response::values(vec![Row::from_iter([Some(
                self.lock_timeout.clone(),
            )])])),
            Statement::SetSetting(stmt) => {
                self.lock_timeout = stmt.display_value();
                Ok(Response::count(0))
            }
            Statement::FindInvalidIndex(stmt) => {
                let rows = self
                    .indexes
                    .iter()
                    .filter(|(name, index)| **name == stmt.name && !index.valid)
                    .map(|(name, _)| Row::from_iter([Some(name.clone())]))
                    .collect();
                Ok(Response::values(rows))
            }
            Statement::CreateIndex(stmt) => {
                let name = stmt.name.to_string();
                if self.indexes.contains_key(&name) {
                    return Ok(Response::count(0));
                }

                let failed = self.failing_build.as_deref() == Some(name.as_str());
                self.indexes.insert(
                    name.clone(),
                    CatalogIndex {
                        table: stmt.on.to_string(),
                        valid: !failed,
                    },
                );

                if failed {
                    return Err(Self::fail(format!(
                        "could not create unique index \"{name}\""
                    )));
                }
                Ok(Response::count(0))
            }
            Statement::DropIndex(stmt) => {
                self.indexes.remove(stmt.name.as_str());
                Ok(Response::count(0))
            }
        }
    }
}

#[async_trait]
impl Connection for FakeConnection {
    fn database(&self) -> &str {
        &self.alias
    }

    fn in_transaction(&self) -> bool {
        self.depth > 0
    }

    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::QuerySql(op) => self.exec_statement(op.stmt),
            Operation::Transaction(op) => {
                let sql = match op {
                    Transaction::Start => {
                        self.depth += 1;
                        "BEGIN;"
                    }
                    Transaction::Commit => {
                        self.depth = self.depth.saturating_sub(1);
                        "COMMIT;"
                    }
                    Transaction::Rollback => {
                        self.depth = self.depth.saturating_sub(1);
                        "ROLLBACK;"
                    }
                };
                self.log.push(sql.to_string());
                Ok(Response::count(0))
            }
        }
    }
}

pub fn int_model() -> ModelState {
    ModelState::new(APP_LABEL, MODEL).field("int_field")
}

pub fn int_field_idx() -> Index {
    Index::builder(INDEX).fields(["int_field"]).build().unwrap()
}

/// Logical state without the index.
pub fn state_without_index() -> ProjectState {
    [int_model()].into_iter().collect()
}

/// Logical state with `int_field_idx` declared.
pub fn state_with_index() -> ProjectState {
    let mut state = state_without_index();
    AddIndexConcurrently::new(MODEL, int_field_idx())
        .state_forwards(APP_LABEL, &mut state)
        .unwrap();
    state
}

pub fn sql(statements: &[&str]) -> Vec<String> {
    statements.iter().map(|s| s.to_string()).collect()
}
