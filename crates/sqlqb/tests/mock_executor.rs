//! Drives the execution traits through a recording executor.

use sqlqb::prelude::*;
use sqlqb::{ConnectionConfig, ConnectionManager};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Records every prepared SQL string and bound value list. Returns a fixed
/// result set for SELECTs.
#[derive(Debug, Default)]
struct MockExecutor {
    log: Mutex<Vec<(String, Vec<Value>)>>,
    rows: Vec<Vec<Value>>,
    fail_execute: bool,
}

impl MockExecutor {
    fn with_rows(rows: Vec<Vec<Value>>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    fn log(&self) -> Vec<(String, Vec<Value>)> {
        self.log.lock().unwrap().clone()
    }
}

struct MockStatement<'a> {
    executor: &'a MockExecutor,
    sql: String,
    rows: VecDeque<Row>,
    row_count: u64,
}

impl Executor for MockExecutor {
    type Statement<'a> = MockStatement<'a>;

    fn prepare(&self, sql: &str) -> QbResult<MockStatement<'_>> {
        if sql.is_empty() {
            return Err(QbError::prepare("empty statement"));
        }
        Ok(MockStatement {
            executor: self,
            sql: sql.to_string(),
            rows: VecDeque::new(),
            row_count: 0,
        })
    }
}

impl PreparedStatement for MockStatement<'_> {
    fn execute(&mut self, values: &[Value]) -> bool {
        self.executor
            .log
            .lock()
            .unwrap()
            .push((self.sql.clone(), values.to_vec()));
        if self.executor.fail_execute {
            return false;
        }
        let columns: Arc<[String]> = Arc::from(vec!["id".to_string(), "name".to_string()]);
        self.rows = self
            .executor
            .rows
            .iter()
            .map(|values| Row::new(Arc::clone(&columns), values.clone()))
            .collect();
        self.row_count = self.rows.len() as u64;
        true
    }

    fn row_count(&self) -> u64 {
        self.row_count
    }

    fn fetch_one(&mut self) -> Option<Row> {
        self.rows.pop_front()
    }

    fn fetch_all(&mut self) -> Vec<Row> {
        self.rows.drain(..).collect()
    }

    fn fetch_column(&mut self, index: usize) -> Option<Value> {
        self.fetch_one()
            .and_then(|row| row.get_index(index).cloned())
    }
}

fn two_rows() -> MockExecutor {
    MockExecutor::with_rows(vec![
        vec![Value::Int(1), Value::from("alice")],
        vec![Value::Int(2), Value::from("bob")],
    ])
}

#[test]
fn executor_receives_built_sql_and_values() {
    let db = two_rows();

    let mut q = sqlqb::select("id, name");
    q.from("users")
        .where_(("id", vec![1, 2]))
        .not("name", Value::Null);
    let stmt = q.execute(&db).unwrap().unwrap();
    assert_eq!(stmt.row_count(), 2);

    assert_eq!(
        db.log(),
        vec![(
            "SELECT `id`, `name` FROM `users` WHERE `id` IN (?,?) AND `name` IS NOT NULL".to_string(),
            vec![Value::Int(1), Value::Int(2)],
        )]
    );
}

#[test]
fn fetch_helpers() {
    let db = two_rows();
    let q = sqlqb::raw("SELECT id, name FROM users");

    let first = q.one(&db).unwrap().unwrap();
    assert_eq!(first.get("name"), Some(&Value::from("alice")));

    assert_eq!(q.all(&db).unwrap().unwrap().len(), 2);
    assert_eq!(
        q.column(&db, 1).unwrap().unwrap(),
        vec![Value::from("alice"), Value::from("bob")]
    );
    assert_eq!(q.scalar(&db).unwrap(), Some(Value::Int(1)));
    assert_eq!(db.log().len(), 4);
}

#[test]
fn row_count_survives_every_fetch() {
    let db = MockExecutor::with_rows(
        (1..=10)
            .map(|i| vec![Value::Int(i), Value::from(format!("user{i}"))])
            .collect(),
    );
    let mut q = sqlqb::select("id, name");
    q.from("users").limit(10, 0);

    let one = q.one_with_count(&db).unwrap().unwrap();
    assert_eq!(one.row_count, 10);
    assert_eq!(one.data.and_then(|row| row.get("id").cloned()), Some(Value::Int(1)));

    let all = q.all_with_count(&db).unwrap().unwrap();
    assert_eq!(all.row_count, 10);
    assert_eq!(all.data.len(), 10);

    let column = q.column_with_count(&db, 1).unwrap().unwrap();
    assert_eq!(column.row_count, 10);
    assert_eq!(column.data.last(), Some(&Value::from("user10")));

    let scalar = q.scalar_with_count(&db).unwrap().unwrap();
    assert_eq!(scalar, Fetched { data: Some(Value::Int(1)), row_count: 10 });
}

#[test]
fn row_count_is_zero_for_empty_result() {
    let db = MockExecutor::default();
    let q = sqlqb::raw("SELECT id, name FROM users");

    let one = q.one_with_count(&db).unwrap().unwrap();
    assert_eq!(one, Fetched { data: None, row_count: 0 });
    assert!(q.one(&db).unwrap().is_none());

    let failing = MockExecutor {
        fail_execute: true,
        ..Default::default()
    };
    assert!(q.all_with_count(&failing).unwrap().is_none());
}

#[test]
fn failed_execute_is_none_for_every_helper() {
    let db = MockExecutor {
        fail_execute: true,
        ..two_rows()
    };
    let q = sqlqb::raw("SELECT 1");

    assert!(q.execute(&db).unwrap().is_none());
    assert!(q.one(&db).unwrap().is_none());
    assert!(q.all(&db).unwrap().is_none());
    assert!(q.column(&db, 0).unwrap().is_none());
    assert!(q.scalar(&db).unwrap().is_none());
}

#[test]
fn prepare_error_propagates() {
    let db = two_rows();
    // A select with nothing to render produces empty SQL.
    let mut q = SelectQuery::new();
    q.select_statement_mut().clear_fields();

    let err = q.all(&db).unwrap_err();
    assert!(matches!(err, QbError::Prepare(_)));
    assert!(db.log().is_empty());
}

#[derive(Debug, PartialEq)]
struct Named {
    id: i64,
    name: String,
}

impl FromRow for Named {
    fn from_row(row: &Row) -> QbResult<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
        })
    }
}

#[test]
fn typed_rows() {
    let db = two_rows();
    let q = sqlqb::raw("SELECT id, name FROM users");

    let all: Vec<Named> = q.all_as(&db).unwrap().unwrap();
    assert_eq!(
        all,
        vec![
            Named { id: 1, name: "alice".into() },
            Named { id: 2, name: "bob".into() },
        ]
    );

    let one: Option<Named> = q.one_as(&db).unwrap();
    assert_eq!(one.map(|n| n.id), Some(1));

    let bad = MockExecutor::with_rows(vec![vec![Value::from("x"), Value::from("y")]]);
    let err = q.all_as::<Named, _>(&bad).unwrap_err();
    assert!(matches!(err, QbError::Decode { ref column, .. } if column == "id"));
}

#[test]
fn write_queries_execute_once() {
    let db = MockExecutor::default();

    let mut insert = sqlqb::insert_into("users");
    insert.values([("name", "carol")]);
    let mut update = sqlqb::update("users");
    update.values([("name", "caz")]).where_(("id", 3));
    let mut delete = sqlqb::delete_from("users");
    delete.where_(("id", 3));

    assert!(insert.execute(&db).unwrap().is_some());
    assert!(update.execute(&db).unwrap().is_some());
    assert!(delete.execute(&db).unwrap().is_some());

    let sql: Vec<String> = db.log().into_iter().map(|(sql, _)| sql).collect();
    assert_eq!(
        sql,
        [
            "INSERT INTO `users` (`name`) VALUES (?)",
            "UPDATE `users` SET `name` = ? WHERE `id` = ?",
            "DELETE FROM `users` WHERE `id` = ?",
        ]
    );
}

#[test]
fn shared_executor_across_threads() {
    let db = Arc::new(two_rows());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let db = Arc::clone(&db);
            std::thread::spawn(move || {
                let mut q = sqlqb::select("*");
                q.from("users").where_(("id", i));
                q.all(&db).unwrap().unwrap().len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
    assert_eq!(db.log().len(), 4);
}

#[test]
fn manager_with_closure_connector() {
    let configs = HashMap::from([
        (
            "primary".to_string(),
            ConnectionConfig {
                kind: Some("mock".into()),
                ..Default::default()
            },
        ),
        ("broken".to_string(), ConnectionConfig::default()),
    ]);
    let manager = ConnectionManager::new(
        configs,
        |config: &ConnectionConfig, id: &str| -> QbResult<MockExecutor> {
            match config.kind.as_deref() {
                Some(_) => Ok(two_rows()),
                None => Err(QbError::MissingType(id.to_string())),
            }
        },
    );

    let a = manager.get("primary").unwrap();
    let b = manager.get("primary").unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    assert!(matches!(
        manager.get("broken").unwrap_err(),
        QbError::MissingType(_)
    ));
    assert!(manager.add("primary", MockExecutor::default()).unwrap_err().is_duplicate_connection());

    manager.add("secondary", MockExecutor::default()).unwrap();
    assert!(matches!(
        manager.default_connection().unwrap_err(),
        QbError::NoDefaultConnection
    ));

    let q = sqlqb::raw("SELECT id, name FROM users");
    assert_eq!(q.all(&a).unwrap().unwrap().len(), 2);
}
