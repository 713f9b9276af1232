use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Stored value is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Primitive async blob store: JSON values keyed by string, one flat
/// namespace, no conditional writes. Everything the booking service knows
/// about persistence goes through this trait.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
    async fn list(&self) -> Result<Vec<String>, StoreError>;
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and local development.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self.entries.lock().expect("store mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.lock().expect("store mutex poisoned");
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        entries.remove(key);
        Ok(())
    }
}

/// File-backed store: one `<key>.json` file per record under a data
/// directory. Keys are escaped so arbitrary strings round-trip as file names.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

const FILE_SUFFIX: &str = ".json";

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}{FILE_SUFFIX}", encode_key(key)))
    }
}

#[async_trait]
impl BlobStore for FsStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        let bytes = serde_json::to_vec(&value)?;
        tokio::fs::write(self.path_for(key), bytes).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut dir = match tokio::fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut keys = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let Some(encoded) = name.strip_suffix(FILE_SUFFIX) else {
                continue;
            };
            if let Some(key) = decode_key(encoded) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            // Deleting an absent key is a no-op.
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn decode_key(encoded: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(encoded.len());
    let mut chars = encoded.bytes();
    while let Some(byte) = chars.next() {
        if byte == b'%' {
            let hi = chars.next()?;
            let lo = chars.next()?;
            let pair = [hi, lo];
            let hex = std::str::from_utf8(&pair).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
        } else {
            bytes.push(byte);
        }
    }
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_key_encoding_round_trip() {
        for key in ["yoga-mon-9am", "pilates_18.30", "évasion/flow class"] {
            let encoded = encode_key(key);
            assert!(
                encoded
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b"-_.%".contains(&b))
            );
            assert_eq!(decode_key(&encoded).as_deref(), Some(key));
        }
    }

    #[test]
    fn test_decode_key_rejects_malformed_escape() {
        assert!(decode_key("abc%2").is_none());
        assert!(decode_key("abc%zz").is_none());
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a").await.unwrap(), None);

        store.set("a", json!({"n": 1})).await.unwrap();
        store.set("b", json!({"n": 2})).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some(json!({"n": 1})));
        assert_eq!(store.list().await.unwrap(), vec!["a", "b"]);

        store.delete("a").await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), None);
        // Deleting twice is fine.
        store.delete("a").await.unwrap();
    }

    #[tokio::test]
    async fn test_fs_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());

        assert_eq!(store.get("missing").await.unwrap(), None);
        assert!(store.list().await.unwrap().is_empty());

        store.set("yoga mon/9am", json!({"booked": 3})).await.unwrap();
        assert_eq!(
            store.get("yoga mon/9am").await.unwrap(),
            Some(json!({"booked": 3}))
        );
        assert_eq!(store.list().await.unwrap(), vec!["yoga mon/9am"]);

        store.delete("yoga mon/9am").await.unwrap();
        assert_eq!(store.get("yoga mon/9am").await.unwrap(), None);
        store.delete("yoga mon/9am").await.unwrap();
    }

    #[tokio::test]
    async fn test_fs_store_list_before_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path().join("nested/not-created-yet"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fs_store_corrupt_file_surfaces_serde_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        tokio::fs::write(dir.path().join("bad.json"), b"not json")
            .await
            .unwrap();
        assert!(matches!(
            store.get("bad").await.unwrap_err(),
            StoreError::Serde(_)
        ));
    }
}
