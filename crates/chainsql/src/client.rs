//! Database client trait: the single seam between statements and a driver.

use crate::error::ChainResult;
use crate::value::Value;

/// A database client able to run one parameterized SQL statement.
///
/// Implementations receive SQL using `?` placeholders and the bound values in
/// placeholder order. Row contents are opaque to this crate, except that
/// [`Model::find`](crate::Model::find) takes the first row of a result set.
pub trait DbClient: Send + Sync {
    /// Row type produced by the client.
    type Row: Send;

    /// Execute a statement and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl std::future::Future<Output = ChainResult<Vec<Self::Row>>> + Send;

    /// Execute a statement and hand the outcome to a completion callback.
    ///
    /// The default implementation awaits [`DbClient::query`] and invokes `callback`
    /// with its result, returning whatever the callback returns.
    fn query_with<F, R>(
        &self,
        sql: &str,
        params: &[Value],
        callback: F,
    ) -> impl std::future::Future<Output = R> + Send
    where
        F: FnOnce(ChainResult<Vec<Self::Row>>) -> R + Send,
        R: Send,
    {
        async move { callback(self.query(sql, params).await) }
    }
}
