//! Named connection registry.
//!
//! Executors are registered by ID, either directly with
//! [`ConnectionManager::add`] or lazily from a [`ConnectionConfig`] the first
//! time [`ConnectionManager::get`] asks for them.
//!
//! ```
//! use sqlqb::connection::{ConnectionConfig, ConnectionManager};
//!
//! let configs = serde_json::from_str(r#"{
//!     "main": { "type": "mysql", "host": "127.0.0.1", "port": 3306, "name": "app" }
//! }"#).unwrap();
//!
//! let manager = ConnectionManager::new(
//!     configs,
//!     |_: &ConnectionConfig, id: &str| -> sqlqb::QbResult<String> { Ok(format!("connected to {id}")) },
//! );
//!
//! assert_eq!(*manager.get("main").unwrap(), "connected to main");
//! assert!(manager.get("other").is_err());
//! ```

use crate::error::{QbError, QbResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Connection settings for one ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Driver name, e.g. `mysql` or `sqlite`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    /// Database name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub charset: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Full DSN; takes precedence over the individual fields.
    #[serde(default)]
    pub dsn: Option<String>,
    #[serde(rename = "errorMode", alias = "error_mode", default)]
    pub error_mode: Option<String>,
}

impl ConnectionConfig {
    /// `type:host=..;port=..;dbname=..;charset=..`, listing only the keys
    /// that are set. An explicit `dsn` is returned as-is.
    pub fn build_dsn(&self, id: &str) -> QbResult<String> {
        if let Some(dsn) = &self.dsn {
            return Ok(dsn.clone());
        }

        let kind = self
            .kind
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| QbError::MissingType(id.to_string()))?;

        let port = self.port.map(|p| p.to_string());
        let parts: Vec<String> = [
            ("host", self.host.as_deref()),
            ("port", port.as_deref()),
            ("dbname", self.name.as_deref()),
            ("charset", self.charset.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| format!("{key}={v}")))
        .collect();

        Ok(format!("{kind}:{}", parts.join(";")))
    }
}

/// Builds an executor from a config.
pub trait Connector {
    type Executor;

    fn connect(&self, config: &ConnectionConfig, id: &str) -> QbResult<Self::Executor>;
}

impl<F, E> Connector for F
where
    F: Fn(&ConnectionConfig, &str) -> QbResult<E>,
{
    type Executor = E;

    fn connect(&self, config: &ConnectionConfig, id: &str) -> QbResult<E> {
        self(config, id)
    }
}

/// Registry of named executors.
pub struct ConnectionManager<C: Connector> {
    configs: HashMap<String, ConnectionConfig>,
    connector: C,
    connections: RwLock<HashMap<String, Arc<C::Executor>>>,
}

impl<C: Connector> ConnectionManager<C> {
    /// A registry with `configs` and nothing connected yet.
    pub fn new(configs: HashMap<String, ConnectionConfig>, connector: C) -> Self {
        Self {
            configs,
            connector,
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// A manager with no configs; connections must be [`add`](Self::add)ed.
    pub fn empty(connector: C) -> Self {
        Self::new(HashMap::new(), connector)
    }

    pub fn config(&self, id: &str) -> Option<&ConnectionConfig> {
        self.configs.get(id)
    }

    /// The executor for `id`, building it from its config on first use.
    pub fn get(&self, id: &str) -> QbResult<Arc<C::Executor>> {
        if let Some(conn) = self.read().get(id) {
            return Ok(Arc::clone(conn));
        }

        let config = self
            .configs
            .get(id)
            .ok_or_else(|| QbError::NoConfiguration(id.to_string()))?;

        let mut connections = self.write();
        if let Some(conn) = connections.get(id) {
            return Ok(Arc::clone(conn));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sqlqb.sql", id, kind = ?config.kind, "opening connection");

        let conn = Arc::new(self.connector.connect(config, id)?);
        connections.insert(id.to_string(), Arc::clone(&conn));
        Ok(conn)
    }

    /// Register a live executor. Fails if `id` is already live.
    pub fn add(&self, id: impl Into<String>, executor: C::Executor) -> QbResult<Arc<C::Executor>> {
        let id = id.into();
        let mut connections = self.write();
        if connections.contains_key(&id) {
            return Err(QbError::DuplicateConnection(id));
        }
        let conn = Arc::new(executor);
        connections.insert(id, Arc::clone(&conn));
        Ok(conn)
    }

    /// The only live executor; an error when there are zero or several.
    pub fn default_connection(&self) -> QbResult<Arc<C::Executor>> {
        let connections = self.read();
        let mut iter = connections.values();
        match (iter.next(), iter.next()) {
            (Some(conn), None) => Ok(Arc::clone(conn)),
            _ => Err(QbError::NoDefaultConnection),
        }
    }

    /// IDs of live executors.
    pub fn connected_ids(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<C::Executor>>> {
        self.connections.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<C::Executor>>> {
        self.connections.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config(kind: &str) -> ConnectionConfig {
        ConnectionConfig {
            kind: Some(kind.to_string()),
            host: Some("localhost".to_string()),
            port: Some(3306),
            name: Some("app".to_string()),
            charset: Some("utf8mb4".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn build_dsn_lists_present_keys() {
        assert_eq!(
            config("mysql").build_dsn("main").unwrap(),
            "mysql:host=localhost;port=3306;dbname=app;charset=utf8mb4"
        );

        let partial = ConnectionConfig {
            kind: Some("mysql".into()),
            name: Some("app".into()),
            ..Default::default()
        };
        assert_eq!(partial.build_dsn("main").unwrap(), "mysql:dbname=app");
    }

    #[test]
    fn build_dsn_requires_type() {
        let err = ConnectionConfig::default().build_dsn("main").unwrap_err();
        assert!(matches!(err, QbError::MissingType(ref id) if id == "main"));
    }

    #[test]
    fn get_builds_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let manager = ConnectionManager::new(
            HashMap::from([("main".to_string(), config("mysql"))]),
            move |cfg: &ConnectionConfig, _id: &str| {
                counter.fetch_add(1, Ordering::SeqCst);
                cfg.build_dsn("main")
            },
        );

        let a = manager.get("main").unwrap();
        let b = manager.get("main").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(manager.get("missing").unwrap_err().is_no_configuration());
    }

    #[test]
    fn add_rejects_duplicates() {
        let manager = ConnectionManager::empty(|_: &ConnectionConfig, _: &str| -> QbResult<u8> { Ok(0) });
        manager.add("a", 1).unwrap();
        assert!(manager.add("a", 2).unwrap_err().is_duplicate_connection());
        assert_eq!(*manager.get("a").unwrap(), 1);
    }

    #[test]
    fn default_needs_exactly_one() {
        let manager = ConnectionManager::empty(|_: &ConnectionConfig, _: &str| -> QbResult<u8> { Ok(0) });
        assert!(matches!(
            manager.default_connection(),
            Err(QbError::NoDefaultConnection)
        ));

        manager.add("a", 1).unwrap();
        assert_eq!(*manager.default_connection().unwrap(), 1);

        manager.add("b", 2).unwrap();
        assert!(manager.default_connection().is_err());
    }

    #[test]
    fn config_field_names() {
        let cfg: ConnectionConfig = serde_json::from_str(
            r#"{"type": "mysql", "host": "db", "errorMode": "exception"}"#,
        )
        .unwrap();
        assert_eq!(cfg.kind.as_deref(), Some("mysql"));
        assert_eq!(cfg.error_mode.as_deref(), Some("exception"));
        assert_eq!(cfg.build_dsn("main").unwrap(), "mysql:host=db");

        let manager = ConnectionManager::new(
            HashMap::from([("main".to_string(), cfg)]),
            |_: &ConnectionConfig, _: &str| -> QbResult<()> { Ok(()) },
        );
        assert_eq!(manager.config("main").map(|c| c.host.as_deref()), Some(Some("db")));
    }
}
