//! Basic usage example for sqlqb
//!
//! Run with: cargo run --example basic -p sqlqb
//!
//! Uses an in-memory SQLite database, so no setup is needed.

use sqlqb::prelude::*;
use sqlqb::SqliteExecutor;

#[derive(Debug)]
#[allow(dead_code)]
struct User {
    id: i64,
    username: String,
    email: Option<String>,
}

impl FromRow for User {
    fn from_row(row: &Row) -> QbResult<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
        })
    }
}

fn main() -> Result<(), QbError> {
    let db = SqliteExecutor::memory()?;

    // Setup
    db.execute_batch(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL,
            email TEXT
        )",
    )?;

    // ============================================
    // Example 1: INSERT
    // ============================================
    println!("=== INSERT ===");

    for (username, email) in [
        ("alice", Some("alice@example.com")),
        ("bob", None),
        ("carol", Some("carol@example.com")),
    ] {
        let mut q = sqlqb::insert_into("users");
        q.values(sqlqb::values! { "username" => username, "email" => email });
        println!("{}", q.to_sql());
        if let Some(stmt) = q.execute(&db)? {
            println!("  inserted {} row(s)", stmt.row_count());
        }
    }

    // ============================================
    // Example 2: SELECT
    // ============================================
    println!("\n=== SELECT ===");

    let mut q = sqlqb::select("id, username, email");
    q.from("users")
        .where_(("email", None::<&str>))
        .or_where(("username", vec!["alice", "carol"]))
        .order_by("username", Some(Direction::Desc));
    println!("{}", q.to_sql());

    let users: Vec<User> = q.all_as(&db)?.unwrap_or_default();
    for user in &users {
        println!("  {user:?}");
    }

    // ============================================
    // Example 3: aggregate + EXISTS
    // ============================================
    println!("\n=== COUNT with EXISTS ===");

    let mut q = SelectQuery::new();
    q.count("*").from("users u").not_exists(|sub| {
        sub.select("id")
            .from("users other")
            .where_("other.username = u.username")
            .where_("other.id < u.id");
    });
    println!("{}", q.to_sql());
    println!("  distinct usernames: {:?}", q.scalar(&db)?);

    // ============================================
    // Example 4: UPDATE and DELETE
    // ============================================
    println!("\n=== UPDATE / DELETE ===");

    let mut q = sqlqb::update("users");
    q.values([("email", "bob@example.com")])
        .where_(("username", "bob"));
    println!("{}", q.to_sql());
    if let Some(stmt) = q.execute(&db)? {
        println!("  updated {} row(s)", stmt.row_count());
    }

    let mut q = sqlqb::delete_from("users");
    q.where_(("email", "carol@example.com", "="));
    println!("{}", q.to_sql());
    if let Some(stmt) = q.execute(&db)? {
        println!("  deleted {} row(s)", stmt.row_count());
    }

    // ============================================
    // Example 5: raw SQL
    // ============================================
    println!("\n=== Raw SQL ===");

    let mut q = sqlqb::raw("SELECT username FROM users WHERE id > ? ORDER BY id");
    q.parameters([0]);
    if let Some(names) = q.column(&db, 0)? {
        println!("  remaining: {names:?}");
    }

    Ok(())
}
