//! Model factory over one shared client.

use crate::error::ChainResult;
use crate::model::{Model, ModelConfig};
use std::sync::Arc;

/// Holds a database client and creates [`Model`]s that share it.
///
/// # Example
/// ```ignore
/// let db = Database::new(client);
/// let users = db.extend(ModelConfig::new("users").primary_key("id"));
/// let posts = db.extend_json(&serde_json::json!({ "table": "posts" }))?;
/// ```
pub struct Database<C> {
    client: Arc<C>,
}

impl<C> Clone for Database<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C> Database<C> {
    pub fn new(client: C) -> Self {
        Self::from_arc(Arc::new(client))
    }

    pub fn from_arc(client: Arc<C>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    /// Create a model for a table configuration.
    pub fn extend(&self, config: ModelConfig) -> Model<C> {
        tracing::trace!(target: "chainsql.model", table = %config.table, "model created");
        Model::new(Arc::clone(&self.client), config)
    }

    /// Create a model from an untyped configuration object.
    pub fn extend_json(&self, config: &serde_json::Value) -> ChainResult<Model<C>> {
        Ok(self.extend(ModelConfig::from_json(config)?))
    }
}
