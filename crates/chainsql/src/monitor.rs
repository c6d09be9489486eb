//! Query logging via `tracing`.

use crate::client::DbClient;
use crate::error::ChainResult;
use crate::statement::StatementKind;
use crate::value::Value;
use std::time::Instant;
use tracing::Level;

/// Truncate to at most `max_bytes`, backing off to a char boundary.
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// A client wrapper that emits one `tracing` event per executed statement.
///
/// Events go to target `chainsql.sql` with the statement kind, the (possibly truncated)
/// SQL, the parameter count, the row count and the elapsed time. Failed queries are
/// reported at `WARN` regardless of the configured level.
///
/// ```ignore
/// let client = TracingClient::new(my_client).level(Level::INFO).max_sql_length(120);
/// let db = Database::new(client);
/// ```
#[derive(Debug, Clone)]
pub struct TracingClient<C> {
    client: C,
    /// Tracing event level for successful queries.
    pub level: Level,
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl<C> TracingClient<C> {
    /// Wrap a client, logging at `DEBUG` with SQL truncated to 200 bytes.
    pub fn new(client: C) -> Self {
        Self {
            client,
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub fn inner(&self) -> &C {
        &self.client
    }

    pub fn into_inner(self) -> C {
        self.client
    }

    fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

impl<C: DbClient> DbClient for TracingClient<C> {
    type Row = C::Row;

    async fn query(&self, sql: &str, params: &[Value]) -> ChainResult<Vec<Self::Row>> {
        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let start = Instant::now();
        let result = self.client.query(sql, params).await;
        let elapsed = start.elapsed();

        let kind = StatementKind::from_sql(sql);
        let shown = self.truncate_sql(sql);
        match &result {
            Ok(rows) => emit_at_level!(
                self.level,
                target: "chainsql.sql",
                kind = ?kind,
                sql = %shown,
                param_count = params.len(),
                rows = rows.len(),
                elapsed = ?elapsed,
                "query complete"
            ),
            Err(err) => tracing::warn!(
                target: "chainsql.sql",
                kind = ?kind,
                sql = %shown,
                param_count = params.len(),
                elapsed = ?elapsed,
                error = %err,
                "query failed"
            ),
        }

        result
    }
}
