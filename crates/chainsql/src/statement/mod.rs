//! Statement building.
//!
//! A [`StatementBuilder`] accumulates one statement through a method chain and renders it
//! as SQL with `?` placeholders plus the bound values in placeholder order.
//!
//! # Usage
//!
//! ```ignore
//! use chainsql::statement;
//!
//! // SELECT
//! let rows = statement(client.clone(), "users")
//!     .select(&["id", "name"])?
//!     .and_where("status", "active")
//!     .limit(10)
//!     .exec()
//!     .await?;
//!
//! // INSERT with two rows
//! statement(client.clone(), "users")
//!     .insert(&["name", "age"])?
//!     .values([Value::from("alice"), Value::from(30)])?
//!     .values([Value::from("bob"), Value::from(25)])?
//!     .exec()
//!     .await?;
//!
//! // UPDATE
//! statement(client.clone(), "users")
//!     .update()?
//!     .set("status", "inactive")?
//!     .and_where("id", 7)
//!     .exec()
//!     .await?;
//! ```

mod builder;
mod built;
mod condition;
mod kind;
mod limit;

pub use builder::StatementBuilder;
pub use built::BuiltStatement;
pub use condition::{Condition, Connector};
pub use kind::{OrderDirection, StatementKind};
pub use limit::Limit;

use std::sync::Arc;

/// Create a statement builder for `table` with no kind chosen yet.
pub fn statement<C>(client: Arc<C>, table: impl Into<String>) -> StatementBuilder<C> {
    StatementBuilder::new(client, table)
}
