//! Basic usage example for chainsql
//!
//! Run with: cargo run --example basic -p chainsql
//!
//! Set RUST_LOG=chainsql=debug to see the executed statements.

use chainsql::{ChainResult, Database, DbClient, ModelConfig, TracingClient, Value};
use std::sync::Mutex;

/// Stand-in for a real driver: prints every statement and returns canned rows.
#[derive(Default)]
struct EchoClient {
    executed: Mutex<usize>,
}

impl DbClient for EchoClient {
    type Row = Vec<Value>;

    async fn query(&self, sql: &str, params: &[Value]) -> ChainResult<Vec<Self::Row>> {
        *self.executed.lock().unwrap() += 1;
        let shown: Vec<String> = params.iter().map(ToString::to_string).collect();
        println!("{sql}  -- [{}]", shown.join(", "));
        if sql.starts_with("SELECT") {
            Ok(vec![params.to_vec()])
        } else {
            Ok(Vec::new())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let db = Database::new(TracingClient::new(EchoClient::default()));
    let users = db.extend(ModelConfig::new("users").primary_key("id"));

    // ============================================
    // SELECT with conditions
    // ============================================
    println!("=== select ===");
    users
        .select(&["id", "name"])
        .and_where_op("age", ">", 20)
        .or_where("role", "admin")
        .order_by(&["name"])
        .limit_offset(20, 10)
        .exec()
        .await?;

    users
        .select(&[])
        .where_in("id", [1, 2, 3])?
        .exec()
        .await?;

    // ============================================
    // INSERT with two rows
    // ============================================
    println!("=== insert ===");
    users
        .insert(&["name", "age"])
        .values([Value::from("alice"), Value::from(30)])?
        .values([Value::from("bob"), Value::from(25)])?
        .exec()
        .await?;

    // ============================================
    // UPDATE / DELETE
    // ============================================
    println!("=== update / delete ===");
    users
        .update("status", "inactive")
        .set("age", 31)?
        .and_where("id", 1)
        .exec()
        .await?;
    users.delete("id", 2).exec().await?;

    // ============================================
    // find by primary key, async and callback style
    // ============================================
    println!("=== find ===");
    let row = users.find(1, &["id", "name"]).await?;
    println!("found: {row:?}");

    users
        .find_with(1, &[], |res| match res {
            Ok(Some(row)) => println!("callback found: {row:?}"),
            Ok(None) => println!("callback: no row"),
            Err(err) => println!("callback error: {err}"),
        })
        .await;

    let executed = *db.client().inner().executed.lock().unwrap();
    println!("{executed} statements executed");
    Ok(())
}
