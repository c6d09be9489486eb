//! End-to-end tests: models and builders running against a recording client.

use chainsql::{ChainError, ChainResult, Database, DbClient, Model, ModelConfig, Value};
use serde_json::json;
use std::sync::{Arc, Mutex};

type Row = serde_json::Value;

/// Records every call and answers with a fixed result set.
#[derive(Default)]
struct RecordingClient {
    calls: Mutex<Vec<(String, Vec<Value>)>>,
    rows: Vec<Row>,
}

impl RecordingClient {
    fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            rows,
        }
    }

    fn last_call(&self) -> (String, Vec<Value>) {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no query was executed")
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl DbClient for RecordingClient {
    type Row = Row;

    async fn query(&self, sql: &str, params: &[Value]) -> ChainResult<Vec<Row>> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        Ok(self.rows.clone())
    }
}

fn setup() -> (Arc<RecordingClient>, Model<RecordingClient>) {
    let client = Arc::new(RecordingClient::default());
    let model = Model::from_json(
        Arc::clone(&client),
        &json!({ "table": "table", "primaryKey": "pri" }),
    )
    .unwrap();
    (client, model)
}

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::from).collect()
}

#[test]
fn test_config_must_be_an_object() {
    let client = Arc::new(RecordingClient::default());
    let err = Model::from_json(client, &json!(null)).unwrap_err();
    assert_eq!(err.to_string(), "Config must be an object");
}

#[test]
fn test_config_requires_table() {
    let client = Arc::new(RecordingClient::default());
    let err = Model::from_json(client, &json!({})).unwrap_err();
    assert_eq!(err.to_string(), "Attribute \"table\" not exists");
}

#[test]
fn test_database_extend() {
    let db = Database::new(RecordingClient::default());
    let model = db.extend_json(&json!({ "table": "table", "primaryKey": "pri" })).unwrap();
    assert_eq!(model.table(), "table");
    assert_eq!(model.primary_key(), Some("pri"));
}

#[tokio::test]
async fn test_find_without_primary_key() {
    let client = Arc::new(RecordingClient::default());
    let model = Model::new(Arc::clone(&client), ModelConfig::new("table"));

    let err = model.find(3, &[]).await.unwrap_err();
    assert!(matches!(err, ChainError::MissingPrimaryKey { ref table } if table == "table"));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_find_without_primary_key_callback() {
    let model = Model::new(Arc::new(RecordingClient::default()), ModelConfig::new("table"));
    let missing = model
        .find_with(3, &[], |res| res.is_err_and(|e| e.is_missing_primary_key()))
        .await;
    assert!(missing);
}

#[tokio::test]
async fn test_raw_sql() {
    let (client, model) = setup();
    let rows = model
        .sql("SELECT * FROM table WHERE user = ?", &ints(&[3]))
        .await
        .unwrap();

    assert!(rows.is_empty());
    assert_eq!(
        client.last_call(),
        ("SELECT * FROM table WHERE user = ?".to_string(), ints(&[3]))
    );
}

#[tokio::test]
async fn test_raw_sql_callback() {
    let (client, model) = setup();
    let count = model
        .sql_with("SELECT * FROM table WHERE user = ?", &ints(&[3]), |res| {
            res.map(|rows| rows.len())
        })
        .await
        .unwrap();

    assert_eq!(count, 0);
    assert_eq!(client.last_call().0, "SELECT * FROM table WHERE user = ?");
}

#[tokio::test]
async fn test_find() {
    let (client, model) = setup();
    let row = model.find(3, &[]).await.unwrap();

    assert!(row.is_none());
    assert_eq!(
        client.last_call(),
        ("SELECT * FROM table WHERE pri = ?".to_string(), ints(&[3]))
    );
}

#[tokio::test]
async fn test_find_with_fields() {
    let (client, model) = setup();
    model.find(3, &["a", "b", "c"]).await.unwrap();
    assert_eq!(
        client.last_call().0,
        "SELECT a, b, c FROM table WHERE pri = ?"
    );
}

#[tokio::test]
async fn test_find_returns_first_row() {
    let client = Arc::new(RecordingClient::with_rows(vec![
        json!({ "pri": 3, "name": "alice" }),
        json!({ "pri": 3, "name": "shadow" }),
    ]));
    let model = Model::new(client, ModelConfig::new("table").primary_key("pri"));

    let row = model.find(3, &[]).await.unwrap();
    assert_eq!(row, Some(json!({ "pri": 3, "name": "alice" })));
}

#[tokio::test]
async fn test_find_callback() {
    let (client, model) = setup();
    let row = model
        .find_with(3, &["a", "b", "c"], |res| res.unwrap())
        .await;

    assert!(row.is_none());
    assert_eq!(
        client.last_call(),
        (
            "SELECT a, b, c FROM table WHERE pri = ?".to_string(),
            ints(&[3])
        )
    );
}

#[tokio::test]
async fn test_select() {
    let (client, model) = setup();
    model.select(&[]).exec().await.unwrap();
    assert_eq!(client.last_call(), ("SELECT * FROM table".to_string(), vec![]));

    model.select(&["a", "b", "c"]).exec().await.unwrap();
    assert_eq!(client.last_call().0, "SELECT a, b, c FROM table");
}

#[tokio::test]
async fn test_select_callback() {
    let (client, model) = setup();
    let rows = model
        .select(&["a", "b", "c"])
        .exec_with(|res| res.unwrap())
        .await;

    assert!(rows.is_empty());
    assert_eq!(client.last_call().0, "SELECT a, b, c FROM table");
}

#[tokio::test]
async fn test_select_conditions() {
    let (client, model) = setup();

    model
        .select(&[])
        .and_where("id", 3)
        .and_where_op("age", ">", 20)
        .exec()
        .await
        .unwrap();
    assert_eq!(
        client.last_call(),
        (
            "SELECT * FROM table WHERE id = ? AND age > ?".to_string(),
            ints(&[3, 20])
        )
    );

    model
        .select(&[])
        .or_where("id", 3)
        .or_where_op("age", ">", 20)
        .exec()
        .await
        .unwrap();
    assert_eq!(
        client.last_call().0,
        "SELECT * FROM table WHERE id = ? OR age > ?"
    );
}

#[tokio::test]
async fn test_select_in() -> ChainResult<()> {
    let (client, model) = setup();

    model.select(&[]).where_in("id", [1, 2, 3])?.exec().await?;
    assert_eq!(
        client.last_call(),
        (
            "SELECT * FROM table WHERE id IN ( ?, ?, ? )".to_string(),
            ints(&[1, 2, 3])
        )
    );

    model
        .select(&[])
        .where_in("id", [1, 2, 3])?
        .and_where_op("age", ">", 20)
        .exec()
        .await?;
    assert_eq!(
        client.last_call(),
        (
            "SELECT * FROM table WHERE id IN ( ?, ?, ? ) AND age > ?".to_string(),
            ints(&[1, 2, 3, 20])
        )
    );
    Ok(())
}

#[tokio::test]
async fn test_insert() -> ChainResult<()> {
    let (client, model) = setup();

    model.insert(&[]).values([1, 2, 3])?.exec().await?;
    assert_eq!(
        client.last_call(),
        (
            "INSERT INTO table VALUES ( ?, ?, ? )".to_string(),
            ints(&[1, 2, 3])
        )
    );

    model.insert(&["a", "b", "c"]).values([1, 2, 3])?.exec().await?;
    assert_eq!(
        client.last_call().0,
        "INSERT INTO table ( a, b, c ) VALUES ( ?, ?, ? )"
    );

    model
        .insert(&[])
        .values([1, 2, 3])?
        .values([4, 5, 6])?
        .exec()
        .await?;
    assert_eq!(
        client.last_call(),
        (
            "INSERT INTO table VALUES ( ?, ?, ? ), ( ?, ?, ? )".to_string(),
            ints(&[1, 2, 3, 4, 5, 6])
        )
    );
    Ok(())
}

#[tokio::test]
async fn test_update() {
    let (client, model) = setup();

    model.update("a", 3).exec().await.unwrap();
    assert_eq!(
        client.last_call(),
        ("UPDATE table SET a = ?".to_string(), ints(&[3]))
    );

    model.update("a", 3).and_where("id", 10).exec().await.unwrap();
    assert_eq!(
        client.last_call(),
        (
            "UPDATE table SET a = ? WHERE id = ?".to_string(),
            ints(&[3, 10])
        )
    );
}

#[tokio::test]
async fn test_delete() {
    let (client, model) = setup();

    model.delete("a", 3).exec().await.unwrap();
    assert_eq!(
        client.last_call(),
        ("DELETE FROM table WHERE a = ?".to_string(), ints(&[3]))
    );

    model.delete("a", 3).and_where("b", 5).exec().await.unwrap();
    assert_eq!(
        client.last_call(),
        (
            "DELETE FROM table WHERE a = ? AND b = ?".to_string(),
            ints(&[3, 5])
        )
    );
}

#[tokio::test]
async fn test_state_errors_do_not_reach_the_client() {
    let (client, model) = setup();

    assert!(model.select(&[]).insert(&[]).is_err());
    assert!(model.delete("a", 1).where_in("b", [1]).is_err());
    assert!(model.update("a", 1).values([1]).is_err());
    assert_eq!(client.call_count(), 0);
}
