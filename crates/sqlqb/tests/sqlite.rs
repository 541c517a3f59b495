//! End-to-end tests against an in-memory SQLite database.

#![cfg(feature = "sqlite")]

use sqlqb::prelude::*;
use sqlqb::{ConnectionConfig, ConnectionManager, SqliteConnector, SqliteExecutor};
use std::collections::HashMap;

fn setup() -> SqliteExecutor {
    let db = SqliteExecutor::memory().unwrap();
    db.execute_batch(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            username TEXT NOT NULL,
            status TEXT,
            balance INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE orders (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            total INTEGER NOT NULL
        );",
    )
    .unwrap();

    for (id, name, status, balance) in [
        (1, "alice", Some("active"), 100),
        (2, "bob", Some("active"), 250),
        (3, "carol", None, 50),
        (4, "dave", Some("banned"), 0),
    ] {
        sqlqb::insert_into("users")
            .values(sqlqb::values! {
                "id" => id,
                "username" => name,
                "status" => status,
                "balance" => balance,
            })
            .execute(&db)
            .unwrap()
            .unwrap();
    }

    for (user_id, total) in [(1, 30), (1, 70), (2, 20)] {
        sqlqb::insert_into("orders")
            .values([("user_id", user_id), ("total", total)])
            .execute(&db)
            .unwrap()
            .unwrap();
    }

    db
}

#[derive(Debug, PartialEq)]
struct User {
    id: i64,
    username: String,
    status: Option<String>,
}

impl FromRow for User {
    fn from_row(row: &Row) -> QbResult<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            status: row.try_get("status")?,
        })
    }
}

#[test]
fn select_with_conditions() {
    let db = setup();

    let mut q = sqlqb::select("id, username, status");
    q.from("users")
        .where_(("status", "active"))
        .or_where(("status", None::<&str>))
        .order_by("id", Some(Direction::Asc));

    let users: Vec<User> = q.all_as(&db).unwrap().unwrap();
    assert_eq!(
        users.iter().map(|u| u.username.as_str()).collect::<Vec<_>>(),
        ["alice", "bob", "carol"]
    );
    assert_eq!(users[2].status, None);
}

#[test]
fn select_in_between_and_limit() {
    let db = setup();

    let mut q = sqlqb::select("username");
    q.from("users")
        .where_(("id", vec![1, 2, 3, 4]))
        .between("balance", 50, 250)
        .order_by("balance DESC", None)
        .limit(2, 1);

    let names = q.column(&db, 0).unwrap().unwrap();
    assert_eq!(names, vec![Value::from("alice"), Value::from("carol")]);
}

#[test]
fn select_one_as_and_scalar() {
    let db = setup();

    let mut q = sqlqb::select("*");
    q.from("users").where_(("username", "bob"));
    let bob: User = q.one_as(&db).unwrap().unwrap();
    assert_eq!(
        bob,
        User {
            id: 2,
            username: "bob".into(),
            status: Some("active".into()),
        }
    );

    let mut q = SelectQuery::new();
    q.sum("balance").from("users").not("status", "banned");
    assert_eq!(q.scalar(&db).unwrap(), Some(Value::Int(350)));

    let mut q = SelectQuery::new();
    q.count("*").from("users").where_(("username", "nobody"));
    assert_eq!(q.scalar(&db).unwrap(), Some(Value::Int(0)));
}

#[test]
fn exists_with_correlated_subquery() {
    let db = setup();

    let mut q = sqlqb::select("username");
    q.from("users")
        .exists(|sub| {
            sub.select("id")
                .from("orders")
                .where_("orders.user_id = users.id")
                .where_(("total", 50, ">"));
        })
        .order_by("username", None);

    let rows = q.all(&db).unwrap().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("username"), Some(&Value::from("alice")));

    let mut q = sqlqb::select("username");
    q.from("users")
        .not_exists(|sub| {
            sub.select("id")
                .from("orders")
                .where_("orders.user_id = users.id");
        })
        .order_by("username", None);
    let names = q.column(&db, 0).unwrap().unwrap();
    assert_eq!(names, vec![Value::from("carol"), Value::from("dave")]);
}

#[test]
fn group_by_having() {
    let db = setup();

    let mut q = sqlqb::select("user_id");
    q.from("orders")
        .group_by("user_id")
        .having(Filter::raw("SUM(total) > 50"));
    let ids = q.column(&db, 0).unwrap().unwrap();
    assert_eq!(ids, vec![Value::Int(1)]);
}

#[test]
fn join_and_union() {
    let db = setup();

    let mut archived = sqlqb::select("username");
    archived.from("users").where_(("status", "banned"));

    let mut q = sqlqb::select("users.username");
    q.from("users")
        .join("orders", Some("orders.user_id = users.id"), None, "JOIN")
        .where_(("orders.total", 20))
        .union(&archived, UnionType::All);

    let names = q.column(&db, 0).unwrap().unwrap();
    assert_eq!(names, vec![Value::from("bob"), Value::from("dave")]);
}

#[test]
fn update_reports_row_count() {
    let db = setup();

    let mut q = sqlqb::update("users");
    q.values([("status", "inactive")])
        .where_(("balance", 100, "<"));
    let stmt = q.execute(&db).unwrap().unwrap();
    assert_eq!(stmt.row_count(), 2);

    let mut q = sqlqb::select("username");
    q.from("users")
        .where_(("status", "inactive"))
        .order_by("username", None);
    assert_eq!(
        q.column(&db, 0).unwrap().unwrap(),
        vec![Value::from("carol"), Value::from("dave")]
    );
}

#[test]
fn delete_reports_row_count() {
    let db = setup();

    let mut q = sqlqb::delete_from("orders");
    q.where_(("user_id", 1));
    assert_eq!(q.execute(&db).unwrap().unwrap().row_count(), 2);

    let mut q = SelectQuery::new();
    q.count("*").from("orders");
    assert_eq!(q.scalar(&db).unwrap(), Some(Value::Int(1)));
}

#[test]
fn raw_query_binds_parameters() {
    let db = setup();

    let mut q = sqlqb::raw("SELECT username FROM users WHERE balance >= ? AND status = ?");
    q.parameters([Value::from(100), Value::from("active")]);
    let rows = q.all(&db).unwrap().unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn execute_failure_is_none() {
    let db = setup();

    // Violates NOT NULL on username.
    let mut q = sqlqb::insert_into("users");
    q.values([("id", 9)]);
    assert!(q.execute(&db).unwrap().is_none());

    let mut q = sqlqb::select("*");
    q.from("users").where_(("id", 9));
    assert!(q.one(&db).unwrap().is_none());
}

#[test]
fn prepare_failure_is_err() {
    let db = setup();

    let err = sqlqb::raw("SELECT * FROM no_such_table").execute(&db).unwrap_err();
    assert!(matches!(err, QbError::Prepare(_)));
}

#[test]
fn connection_manager_builds_lazily() {
    let config = ConnectionConfig {
        kind: Some("sqlite".into()),
        name: Some(":memory:".into()),
        ..Default::default()
    };
    let manager = ConnectionManager::new(HashMap::from([("main".to_string(), config)]), SqliteConnector);
    assert!(manager.connected_ids().is_empty());

    let db = manager.get("main").unwrap();
    db.execute_batch("CREATE TABLE kv (k TEXT, v TEXT)").unwrap();
    sqlqb::insert_into("kv")
        .values([("k", "a"), ("v", "1")])
        .execute(&db)
        .unwrap()
        .unwrap();

    let again = manager.default_connection().unwrap();
    let mut q = sqlqb::select("v");
    q.from("kv").where_(("k", "a"));
    assert_eq!(q.scalar(&again).unwrap(), Some(Value::from("1")));

    assert!(manager.get("replica").unwrap_err().is_no_configuration());
}

#[test]
fn fetch_keeps_row_count() {
    let db = setup();

    let mut q = sqlqb::select("username");
    q.from("users").order_by("id", None);

    let first = q.one_with_count(&db).unwrap().unwrap();
    assert_eq!(first.row_count, 4);
    assert_eq!(first.data.unwrap().get("username"), Some(&Value::from("alice")));

    let names = q.column_with_count(&db, 0).unwrap().unwrap();
    assert_eq!(names.row_count, 4);
    assert_eq!(names.data.len(), 4);

    let mut q = SelectQuery::new();
    q.count("*").from("users");
    assert_eq!(q.scalar_with_count(&db).unwrap().unwrap().row_count, 1);
}
