//! In-memory key-value store for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{KeyValueStore, StoreError};

/// In-memory store with switchable failures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    save_should_fail: Arc<Mutex<bool>>,
    load_should_fail: Arc<Mutex<bool>>,
    delete_fails_for: Arc<Mutex<Option<String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether load should fail.
    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    /// Make deletes of `key` fail; other keys are unaffected.
    pub fn set_delete_fails_for(&self, key: Option<&str>) {
        *self.delete_fails_for.lock().unwrap() = key.map(str::to_string);
    }

    /// Read a raw value synchronously (for assertions).
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    /// Write a raw value synchronously (for seeding corrupt data etc).
    pub fn put(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(StoreError::LoadFailed {
                key: key.to_string(),
                message: "Mock load failure".to_string(),
            });
        }
        Ok(self.get(key))
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(StoreError::SaveFailed {
                key: key.to_string(),
                message: "Mock save failure".to_string(),
            });
        }
        self.put(key, value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        if self.delete_fails_for.lock().unwrap().as_deref() == Some(key) {
            return Err(StoreError::DeleteFailed {
                key: key.to_string(),
                message: "Mock delete failure".to_string(),
            });
        }
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}
