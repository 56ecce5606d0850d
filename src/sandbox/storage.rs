//! On-disk key/value store
//!
//! Backs the one-time hint flags. Values are small JSON documents in a
//! single-table SQLite database kept in the platform app-data folder. Every
//! failure is contained: a store that cannot open simply behaves as empty,
//! which at worst re-shows a hint.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// App data folder name.
const APP_DATA_FOLDER: &str = "Dropfolio";
/// Database file name inside the app-data folder.
const DATABASE_FILE: &str = "dropfolio.db";

/// Document stored under a hint flag key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintRecord {
    pub seen: bool,
    /// Unix seconds of the first time the hint finished showing.
    #[serde(default)]
    pub first_seen_unix: Option<u64>,
}

impl HintRecord {
    pub fn seen_now() -> Self {
        Self {
            seen: true,
            first_seen_unix: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .ok()
                .map(|d| d.as_secs()),
        }
    }
}

/// SQLite-backed key/value store. `None` when the database could not be
/// opened; reads then return nothing and writes are dropped.
#[derive(Resource)]
pub struct KeyValueStore {
    conn: Option<Mutex<rusqlite::Connection>>,
}

impl KeyValueStore {
    /// Open (or create) the store in the platform app-data folder. Failures
    /// are logged and produce an inert store.
    pub fn open_default() -> Self {
        let result = Self::get_data_dir().and_then(|dir| Self::open_at(dir.join(DATABASE_FILE)));
        match result {
            Ok(store) => store,
            Err(e) => {
                warn!("key/value store unavailable: {}", e);
                Self { conn: None }
            }
        }
    }

    /// Open (or create) the store at an explicit path.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let conn = rusqlite::Connection::open(path)
            .map_err(|e| format!("failed to open database {:?}: {}", path, e))?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .map_err(|e| format!("failed to create kv table: {}", e))?;
        Ok(Self {
            conn: Some(Mutex::new(conn)),
        })
    }

    /// Get the app data directory for storing the database.
    /// Uses LocalAppData on Windows, which is accessible to packaged apps.
    fn get_data_dir() -> Result<PathBuf, String> {
        #[cfg(target_os = "windows")]
        {
            if let Ok(local_app_data) = std::env::var("LOCALAPPDATA") {
                let app_dir = PathBuf::from(&local_app_data).join(APP_DATA_FOLDER);
                std::fs::create_dir_all(&app_dir)
                    .map_err(|e| format!("failed to create app data directory: {}", e))?;
                return Ok(app_dir);
            }
        }

        #[cfg(target_os = "macos")]
        {
            if let Ok(home) = std::env::var("HOME") {
                let app_dir = PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join(APP_DATA_FOLDER);
                std::fs::create_dir_all(&app_dir)
                    .map_err(|e| format!("failed to create app data directory: {}", e))?;
                return Ok(app_dir);
            }
        }

        #[cfg(target_os = "linux")]
        {
            if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
                let app_dir = PathBuf::from(data_home).join(APP_DATA_FOLDER);
                std::fs::create_dir_all(&app_dir)
                    .map_err(|e| format!("failed to create app data directory: {}", e))?;
                return Ok(app_dir);
            } else if let Ok(home) = std::env::var("HOME") {
                let app_dir = PathBuf::from(home)
                    .join(".local")
                    .join("share")
                    .join(APP_DATA_FOLDER);
                std::fs::create_dir_all(&app_dir)
                    .map_err(|e| format!("failed to create app data directory: {}", e))?;
                return Ok(app_dir);
            }
        }

        std::env::current_dir().map_err(|e| format!("no usable data directory: {}", e))
    }

    /// Read a raw value.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        let conn = self.conn.as_ref()?;
        let conn = conn.lock().ok()?;
        conn.query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
            row.get::<_, String>(0)
        })
        .ok()
    }

    /// Write a raw value, replacing any previous one.
    pub fn put_raw(&self, key: &str, value: &str) {
        let Some(conn) = self.conn.as_ref() else {
            return;
        };
        let Ok(conn) = conn.lock() else {
            return;
        };
        if let Err(e) = conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        ) {
            warn!("failed to persist {:?}: {}", key, e);
        }
    }

    /// Read and deserialize a JSON document.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("stored document {:?} is unreadable: {}", key, e);
                None
            }
        }
    }

    /// Serialize and write a JSON document.
    pub fn put_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.put_raw(key, &raw),
            Err(e) => warn!("failed to serialize document {:?}: {}", key, e),
        }
    }

    /// Whether a hint flag has been set.
    pub fn hint_seen(&self, key: &str) -> bool {
        self.get_json::<HintRecord>(key)
            .map(|record| record.seen)
            .unwrap_or(false)
    }

    /// Set a hint flag, recording when it was first seen.
    pub fn mark_hint_seen(&self, key: &str) {
        if !self.hint_seen(key) {
            self.put_json(key, &HintRecord::seen_now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> (KeyValueStore, PathBuf) {
        let path = std::env::temp_dir().join(format!(
            "dropfolio-test-{}-{}.db",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        (KeyValueStore::open_at(&path).unwrap(), path)
    }

    #[test]
    fn test_raw_roundtrip_and_overwrite() {
        let (store, path) = temp_store("raw");
        assert_eq!(store.get_raw("k"), None);
        store.put_raw("k", "v1");
        assert_eq!(store.get_raw("k").as_deref(), Some("v1"));
        store.put_raw("k", "v2");
        assert_eq!(store.get_raw("k").as_deref(), Some("v2"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_hint_flag_set_once() {
        let (store, path) = temp_store("hints");
        assert!(!store.hint_seen("has-seen-grab-hint"));

        store.mark_hint_seen("has-seen-grab-hint");
        assert!(store.hint_seen("has-seen-grab-hint"));

        let first: HintRecord = store.get_json("has-seen-grab-hint").unwrap();
        store.mark_hint_seen("has-seen-grab-hint");
        let second: HintRecord = store.get_json("has-seen-grab-hint").unwrap();
        assert_eq!(first.first_seen_unix, second.first_seen_unix);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_flags_survive_reopen() {
        let (store, path) = temp_store("reopen");
        store.mark_hint_seen("has-seen-lever-hint");
        drop(store);

        let store = KeyValueStore::open_at(&path).unwrap();
        assert!(store.hint_seen("has-seen-lever-hint"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_inert_store_is_harmless() {
        let store = KeyValueStore { conn: None };
        assert!(!store.hint_seen("anything"));
        store.mark_hint_seen("anything");
        assert!(!store.hint_seen("anything"));
    }
}
