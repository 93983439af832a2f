//! In-memory [`RequestStore`] used by the engine unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use request_core_api::error::{WorkflowError, WorkflowResult};

use crate::models::request::CustomerRequestModel;
use crate::repository::{Create, Delete, List, Load, NextSequence, Update};

#[derive(Default)]
pub struct MemoryStore {
    requests: Mutex<HashMap<String, CustomerRequestModel>>,
    counters: Mutex<HashMap<String, i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing the engine.
    pub fn insert_raw(&self, model: CustomerRequestModel) {
        self.requests
            .lock()
            .unwrap()
            .insert(model.id.as_str().to_string(), model);
    }

    /// The stored document text, for byte-for-byte comparisons.
    pub fn raw_document(&self, id: &str) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .get(id)
            .map(|model| crate::models::request::to_document(model).unwrap())
    }
}

#[async_trait]
impl Load<CustomerRequestModel> for MemoryStore {
    async fn load(&self, id: &str) -> WorkflowResult<Option<CustomerRequestModel>> {
        Ok(self.requests.lock().unwrap().get(id).cloned())
    }
}

#[async_trait]
impl List<CustomerRequestModel> for MemoryStore {
    async fn list(&self) -> WorkflowResult<Vec<CustomerRequestModel>> {
        let mut items: Vec<_> = self.requests.lock().unwrap().values().cloned().collect();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(items)
    }
}

#[async_trait]
impl Create<CustomerRequestModel> for MemoryStore {
    async fn create(&self, entity: &CustomerRequestModel) -> WorkflowResult<()> {
        let mut requests = self.requests.lock().unwrap();
        let key = entity.id.as_str().to_string();
        if requests.contains_key(&key) {
            return Err(WorkflowError::StorageError(format!(
                "duplicate request id {key}"
            )));
        }
        requests.insert(key, entity.clone());
        Ok(())
    }
}

#[async_trait]
impl Update<CustomerRequestModel> for MemoryStore {
    async fn update(
        &self,
        entity: &CustomerRequestModel,
        expected_version: i64,
    ) -> WorkflowResult<()> {
        let mut requests = self.requests.lock().unwrap();
        let key = entity.id.as_str().to_string();
        let stored = requests
            .get(&key)
            .ok_or_else(|| WorkflowError::NotFound(format!("Request {key}")))?;
        if stored.version != expected_version {
            return Err(WorkflowError::Conflict(format!(
                "Request {key} changed concurrently"
            )));
        }
        requests.insert(key, entity.clone());
        Ok(())
    }
}

#[async_trait]
impl Delete<CustomerRequestModel> for MemoryStore {
    async fn delete(&self, id: &str) -> WorkflowResult<bool> {
        Ok(self.requests.lock().unwrap().remove(id).is_some())
    }
}

#[async_trait]
impl NextSequence for MemoryStore {
    async fn next_sequence(&self, counter: &str) -> WorkflowResult<i64> {
        let mut counters = self.counters.lock().unwrap();
        let value = counters.entry(counter.to_string()).or_insert(0);
        *value += 1;
        Ok(*value)
    }
}
