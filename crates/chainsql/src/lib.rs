//! # chainsql
//!
//! A fluent SQL statement builder over an injected database client.
//!
//! ## Features
//!
//! - **Parameterized by construction**: every value becomes a `?` placeholder, and bound
//!   values are kept in placeholder order
//! - **One statement kind per builder**: SELECT, INSERT, UPDATE or DELETE is chosen once
//! - **Flat condition chains**: `AND`/`OR` conditions are appended left to right, without
//!   implicit grouping
//! - **Driver-agnostic**: bring any client implementing [`DbClient`]
//! - **Per-table models**: [`Model`] turns a table configuration into ready-made statements
//! - **Query logging**: [`TracingClient`] emits a `tracing` event per executed statement
//!
//! ## Example
//!
//! ```ignore
//! use chainsql::{Database, ModelConfig};
//!
//! let db = Database::new(client);
//! let users = db.extend(ModelConfig::new("users").primary_key("id"));
//!
//! // SELECT id, name FROM users WHERE age > ? ORDER BY name ASC LIMIT 10
//! let rows = users
//!     .select(&["id", "name"])
//!     .and_where_op("age", ">", 20)
//!     .order_by(&["name"])
//!     .limit(10)
//!     .exec()
//!     .await?;
//!
//! // INSERT INTO users ( name, age ) VALUES ( ?, ? ), ( ?, ? )
//! users
//!     .insert(&["name", "age"])
//!     .values([Value::from("alice"), Value::from(30)])?
//!     .values([Value::from("bob"), Value::from(25)])?
//!     .exec()
//!     .await?;
//!
//! // SELECT * FROM users WHERE id = ?
//! let alice = users.find(1, &[]).await?;
//! ```

pub mod client;
pub mod database;
pub mod error;
pub mod model;
pub mod monitor;
pub mod statement;
pub mod value;

pub use client::DbClient;
pub use database::Database;
pub use error::{ChainError, ChainResult};
pub use model::{Model, ModelConfig};
pub use monitor::TracingClient;
pub use statement::{
    BuiltStatement, Condition, Connector, Limit, OrderDirection, StatementBuilder, StatementKind,
    statement,
};
pub use value::Value;
