//! Per-table models.
//!
//! A [`Model`] binds a table (and optionally its primary key) to a client and hands out
//! fresh [`StatementBuilder`]s for it.

use crate::client::DbClient;
use crate::error::{ChainError, ChainResult};
use crate::statement::{Condition, StatementBuilder, StatementKind};
use crate::value::Value;
use serde::Deserialize;
use std::sync::Arc;

/// Table configuration for a [`Model`].
///
/// Deserializes from `{"table": "users", "primaryKey": "id"}`; `primary_key` is also
/// accepted as the key spelling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelConfig {
    pub table: String,
    #[serde(default, rename = "primaryKey", alias = "primary_key")]
    pub primary_key: Option<String>,
}

impl ModelConfig {
    /// Create a configuration for `table` without a primary key.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            primary_key: None,
        }
    }

    /// Set the primary key column used by [`Model::find`].
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = Some(column.into());
        self.normalized()
    }

    /// Parse and validate a configuration object.
    ///
    /// - `null`, arrays and scalars are rejected with [`ChainError::Config`]
    /// - an object without a `table` key is rejected with [`ChainError::MissingTable`]
    /// - an empty `primaryKey` counts as no primary key
    pub fn from_json(value: &serde_json::Value) -> ChainResult<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| ChainError::config("Config must be an object"))?;

        if !map.contains_key("table") {
            return Err(ChainError::MissingTable);
        }

        let config: ModelConfig = serde_json::from_value(value.clone())?;
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        if self.primary_key.as_deref() == Some("") {
            self.primary_key = None;
        }
        self
    }
}

/// A table bound to a database client.
///
/// Models hold no mutable state; every method starts a new statement.
pub struct Model<C> {
    client: Arc<C>,
    table: String,
    primary_key: Option<String>,
}

impl<C> Clone for Model<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            table: self.table.clone(),
            primary_key: self.primary_key.clone(),
        }
    }
}

impl<C> std::fmt::Debug for Model<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("table", &self.table)
            .field("primary_key", &self.primary_key)
            .finish()
    }
}

impl<C> Model<C> {
    pub fn new(client: Arc<C>, config: ModelConfig) -> Self {
        let config = config.normalized();
        Self {
            client,
            table: config.table,
            primary_key: config.primary_key,
        }
    }

    /// Create a model from an untyped configuration object.
    ///
    /// See [`ModelConfig::from_json`] for the validation rules.
    pub fn from_json(client: Arc<C>, config: &serde_json::Value) -> ChainResult<Self> {
        Ok(Self::new(client, ModelConfig::from_json(config)?))
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    /// A fresh builder for this table with no statement kind chosen.
    pub fn statement(&self) -> StatementBuilder<C> {
        StatementBuilder::new(Arc::clone(&self.client), self.table.as_str())
    }

    fn started(&self, kind: StatementKind, columns: &[&str]) -> StatementBuilder<C> {
        StatementBuilder::started(Arc::clone(&self.client), self.table.as_str(), kind, columns)
    }

    /// `SELECT <columns|*> FROM <table>`
    pub fn select(&self, columns: &[&str]) -> StatementBuilder<C> {
        self.started(StatementKind::Select, columns)
    }

    /// `INSERT INTO <table> [( columns )] VALUES`; add rows with `values`.
    pub fn insert(&self, columns: &[&str]) -> StatementBuilder<C> {
        self.started(StatementKind::Insert, columns)
    }

    /// `UPDATE <table> SET <column> = ?`
    ///
    /// More columns can be chained with [`StatementBuilder::set`].
    pub fn update(&self, column: &str, value: impl Into<Value>) -> StatementBuilder<C> {
        self.started(StatementKind::Update, &[])
            .push_set(column, value.into())
    }

    /// `DELETE FROM <table> WHERE <column> = ?`
    pub fn delete(&self, column: &str, value: impl Into<Value>) -> StatementBuilder<C> {
        self.delete_by(Condition::eq(column, value))
    }

    /// `DELETE FROM <table> WHERE <condition>`
    pub fn delete_by(&self, condition: Condition) -> StatementBuilder<C> {
        self.started(StatementKind::Delete, &[]).filter(condition)
    }

    fn find_statement(
        &self,
        value: impl Into<Value>,
        fields: &[&str],
    ) -> ChainResult<StatementBuilder<C>> {
        let primary_key = self
            .primary_key
            .as_deref()
            .ok_or_else(|| ChainError::MissingPrimaryKey {
                table: self.table.clone(),
            })?;
        Ok(self.select(fields).and_where(primary_key, value))
    }
}

impl<C: DbClient> Model<C> {
    /// Run raw SQL on the model's client.
    pub async fn sql(&self, sql: &str, params: &[Value]) -> ChainResult<Vec<C::Row>> {
        tracing::debug!(target: "chainsql.sql", table = %self.table, sql, params = params.len(), "executing raw sql");
        self.client.query(sql, params).await
    }

    /// Run raw SQL and deliver the outcome to `callback`.
    pub async fn sql_with<F, R>(&self, sql: &str, params: &[Value], callback: F) -> R
    where
        F: FnOnce(ChainResult<Vec<C::Row>>) -> R + Send,
        R: Send,
    {
        tracing::debug!(target: "chainsql.sql", table = %self.table, sql, params = params.len(), "executing raw sql");
        self.client.query_with(sql, params, callback).await
    }

    /// Look up one row by primary key.
    ///
    /// Returns the first row of `SELECT <fields|*> FROM <table> WHERE <pk> = ?`, or `None`
    /// when nothing matched. Fails with [`ChainError::MissingPrimaryKey`] when the model
    /// has no primary key configured.
    pub async fn find(
        &self,
        value: impl Into<Value>,
        fields: &[&str],
    ) -> ChainResult<Option<C::Row>> {
        let rows = self.find_statement(value, fields)?.exec().await?;
        Ok(rows.into_iter().next())
    }

    /// Callback form of [`find`](Self::find).
    pub async fn find_with<F, R>(&self, value: impl Into<Value>, fields: &[&str], callback: F) -> R
    where
        F: FnOnce(ChainResult<Option<C::Row>>) -> R + Send,
        R: Send,
    {
        match self.find_statement(value, fields) {
            Ok(stmt) => {
                stmt.exec_with(|result| callback(result.map(|rows| rows.into_iter().next())))
                    .await
            }
            Err(err) => callback(Err(err)),
        }
    }
}
