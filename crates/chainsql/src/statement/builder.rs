//! Fluent builder for a single SQL statement.

use crate::client::DbClient;
use crate::error::{ChainError, ChainResult};
use crate::statement::built::BuiltStatement;
use crate::statement::condition::{Condition, ConditionChain, Connector, placeholder_group};
use crate::statement::kind::{OrderDirection, StatementKind};
use crate::statement::limit::Limit;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Builder for one SELECT, INSERT, UPDATE or DELETE statement against a table.
///
/// The statement kind is chosen once by [`select`](Self::select), [`insert`](Self::insert),
/// [`update`](Self::update) or [`delete`](Self::delete); choosing it again is an error.
/// Every bound value is recorded in the order its `?` placeholder appears in the rendered
/// SQL.
///
/// # Example
/// ```ignore
/// let rows = StatementBuilder::new(client, "users")
///     .select(&["id", "name"])?
///     .and_where("status", "active")
///     .and_where_op("age", ">", 20)
///     .order_by(&["name"])
///     .limit(10)
///     .exec()
///     .await?;
/// // SELECT id, name FROM users WHERE status = ? AND age > ? ORDER BY name ASC LIMIT 10
/// ```
pub struct StatementBuilder<C> {
    client: Arc<C>,
    table: String,
    kind: StatementKind,
    /// Rendered prefix, e.g. `SELECT a, b FROM t`
    head: String,
    /// `column = ?` fragments (UPDATE)
    set_clauses: Vec<String>,
    /// `( ?, ... )` row groups (INSERT)
    insert_rows: Vec<String>,
    conditions: ConditionChain,
    order: Option<String>,
    order_direction: OrderDirection,
    limit: Option<Limit>,
    params: Vec<Value>,
}

impl<C> StatementBuilder<C> {
    /// Create a builder for `table` with no statement kind chosen yet.
    pub fn new(client: Arc<C>, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
            kind: StatementKind::Unset,
            head: String::new(),
            set_clauses: Vec::new(),
            insert_rows: Vec::new(),
            conditions: ConditionChain::default(),
            order: None,
            order_direction: OrderDirection::default(),
            limit: None,
            params: Vec::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Bound values collected so far, in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    // ==================== Statement kind ====================

    /// Start a SELECT. An empty column list selects `*`.
    pub fn select(self, columns: &[&str]) -> ChainResult<Self> {
        self.ensure_unset()?;
        Ok(self.begin(StatementKind::Select, columns))
    }

    /// Start an INSERT. The column list is optional and does not constrain
    /// the arity of later [`values`](Self::values) calls.
    pub fn insert(self, columns: &[&str]) -> ChainResult<Self> {
        self.ensure_unset()?;
        Ok(self.begin(StatementKind::Insert, columns))
    }

    /// Start an UPDATE. Columns are added with [`set`](Self::set).
    pub fn update(self) -> ChainResult<Self> {
        self.ensure_unset()?;
        Ok(self.begin(StatementKind::Update, &[]))
    }

    /// Start a DELETE.
    pub fn delete(self) -> ChainResult<Self> {
        self.ensure_unset()?;
        Ok(self.begin(StatementKind::Delete, &[]))
    }

    /// Create a builder whose kind is already chosen.
    pub(crate) fn started(
        client: Arc<C>,
        table: impl Into<String>,
        kind: StatementKind,
        columns: &[&str],
    ) -> Self {
        Self::new(client, table).begin(kind, columns)
    }

    fn ensure_unset(&self) -> ChainResult<()> {
        if self.kind.is_set() {
            return Err(ChainError::KindAlreadySet { current: self.kind });
        }
        Ok(())
    }

    fn ensure_kind(&self, expected: StatementKind) -> ChainResult<()> {
        if self.kind != expected {
            return Err(ChainError::KindMismatch {
                expected,
                actual: self.kind,
            });
        }
        Ok(())
    }

    fn begin(mut self, kind: StatementKind, columns: &[&str]) -> Self {
        self.head = match kind {
            StatementKind::Select => {
                let columns = if columns.is_empty() {
                    "*".to_string()
                } else {
                    columns.join(", ")
                };
                format!("SELECT {} FROM {}", columns, self.table)
            }
            StatementKind::Insert if columns.is_empty() => {
                format!("INSERT INTO {} VALUES", self.table)
            }
            StatementKind::Insert => {
                format!("INSERT INTO {} ( {} ) VALUES", self.table, columns.join(", "))
            }
            StatementKind::Update => format!("UPDATE {} SET", self.table),
            StatementKind::Delete => format!("DELETE FROM {}", self.table),
            StatementKind::Unset => String::new(),
        };
        self.kind = kind;
        self
    }

    // ==================== INSERT / UPDATE payload ====================

    /// Append one VALUES row group with a placeholder per value.
    pub fn values<I, V>(mut self, values: I) -> ChainResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.ensure_kind(StatementKind::Insert)?;
        let before = self.params.len();
        self.params.extend(values.into_iter().map(Into::into));
        let count = self.params.len() - before;
        self.insert_rows.push(placeholder_group(count));
        Ok(self)
    }

    /// Append `column = ?` to the SET list.
    pub fn set(self, column: &str, value: impl Into<Value>) -> ChainResult<Self> {
        self.ensure_kind(StatementKind::Update)?;
        Ok(self.push_set(column, value.into()))
    }

    pub(crate) fn push_set(mut self, column: &str, value: Value) -> Self {
        self.set_clauses.push(format!("{} = ?", column));
        self.params.push(value);
        self
    }

    // ==================== WHERE conditions ====================

    /// Add `column = ?`, joined with AND.
    pub fn and_where(self, column: &str, value: impl Into<Value>) -> Self {
        self.filter(Condition::eq(column, value))
    }

    /// Add `column <op> ?`, joined with AND.
    pub fn and_where_op(self, column: &str, operator: &str, value: impl Into<Value>) -> Self {
        self.filter(Condition::new(column, operator, value))
    }

    /// Add `column = ?`, joined with OR.
    pub fn or_where(self, column: &str, value: impl Into<Value>) -> Self {
        self.or_filter(Condition::eq(column, value))
    }

    /// Add `column <op> ?`, joined with OR.
    pub fn or_where_op(self, column: &str, operator: &str, value: impl Into<Value>) -> Self {
        self.or_filter(Condition::new(column, operator, value))
    }

    /// Add a prepared condition, joined with AND.
    pub fn filter(self, condition: Condition) -> Self {
        self.push_condition(Connector::And, condition)
    }

    /// Add a prepared condition, joined with OR.
    pub fn or_filter(self, condition: Condition) -> Self {
        self.push_condition(Connector::Or, condition)
    }

    fn push_condition(mut self, connector: Connector, condition: Condition) -> Self {
        self.conditions.push(connector, &condition.column, &condition.operator);
        self.params.push(condition.value);
        self
    }

    /// Add `column IN ( ?, ?, ... )`. Must be the first condition of the statement.
    pub fn where_in<I, V>(mut self, column: &str, values: I) -> ChainResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        if !self.conditions.is_empty() {
            return Err(ChainError::WhereInNotFirst);
        }
        let before = self.params.len();
        self.params.extend(values.into_iter().map(Into::into));
        let count = self.params.len() - before;
        self.conditions.push_in(column, count);
        Ok(self)
    }

    // ==================== ORDER BY / LIMIT ====================

    /// Set the ORDER BY keys. The direction is ascending.
    pub fn order_by(mut self, keys: &[&str]) -> Self {
        self.order = Some(keys.join(","));
        self
    }

    /// Set `LIMIT count`.
    pub fn limit(self, count: u64) -> Self {
        self.limit_with(Limit::new(count))
    }

    /// Set `LIMIT offset,count`.
    pub fn limit_offset(self, offset: u64, count: u64) -> Self {
        self.limit_with(Limit::with_offset(offset, count))
    }

    pub fn limit_with(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }

    // ==================== Rendering ====================

    /// Render the SQL text.
    ///
    /// Slots are concatenated in a fixed order: head, SET list, then either the WHERE
    /// clause or the VALUES row groups, ORDER BY, LIMIT. Each non-empty slot is preceded
    /// by one space.
    pub fn to_sql(&self) -> String {
        let mut sql = self.head.clone();

        push_slot(&mut sql, &self.set_clauses.join(", "));

        if self.conditions.is_empty() {
            push_slot(&mut sql, &self.insert_rows.join(", "));
        } else {
            push_slot(&mut sql, &format!("WHERE {}", self.conditions.as_str()));
        }

        if let Some(order) = &self.order {
            push_slot(&mut sql, &format!("ORDER BY {} {}", order, self.order_direction));
        }

        if let Some(limit) = &self.limit {
            push_slot(&mut sql, &limit.to_string());
        }

        sql.trim().to_string()
    }

    /// Render the SQL text together with a copy of the bound values.
    pub fn build(&self) -> BuiltStatement {
        BuiltStatement::new(self.to_sql(), self.params.clone())
    }
}

impl<C: DbClient> StatementBuilder<C> {
    /// Render the statement and run it on the client.
    pub async fn exec(self) -> ChainResult<Vec<C::Row>> {
        let sql = self.to_sql();
        self.trace(&sql);
        self.client.query(&sql, &self.params).await
    }

    /// Render the statement and run it, delivering the outcome to `callback`.
    ///
    /// Returns whatever the callback returns.
    pub async fn exec_with<F, R>(self, callback: F) -> R
    where
        F: FnOnce(ChainResult<Vec<C::Row>>) -> R + Send,
        R: Send,
    {
        let sql = self.to_sql();
        self.trace(&sql);
        self.client.query_with(&sql, &self.params, callback).await
    }

    fn trace(&self, sql: &str) {
        tracing::debug!(
            target: "chainsql.sql",
            kind = %self.kind,
            table = %self.table,
            sql,
            params = self.params.len(),
            "executing statement"
        );
    }
}

fn push_slot(sql: &mut String, slot: &str) {
    if !slot.is_empty() {
        sql.push(' ');
        sql.push_str(slot);
    }
}

impl<C> fmt::Debug for StatementBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementBuilder")
            .field("table", &self.table)
            .field("kind", &self.kind)
            .field("sql", &self.to_sql())
            .field("params", &self.params)
            .finish()
    }
}
