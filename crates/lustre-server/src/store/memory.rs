// SPDX-License-Identifier: Apache-2.0

use crate::{SessionStore, StoreError};
use async_trait::async_trait;
use lustre_model::{Product, UploadId, UploadRecord};
use std::collections::HashMap;
use tokio::sync::{Mutex, RwLock};

/// Lifetime-of-process store. Records are never evicted.
#[derive(Default)]
pub struct InMemoryStore {
    uploads: RwLock<HashMap<UploadId, UploadRecord>>,
    cart: Mutex<Vec<Product>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn put_upload(&self, record: UploadRecord) -> Result<(), StoreError> {
        let mut uploads = self.uploads.write().await;
        if uploads.contains_key(&record.upload_id) {
            return Err(StoreError::DuplicateUpload(record.upload_id));
        }
        uploads.insert(record.upload_id.clone(), record);
        Ok(())
    }

    async fn get_upload(&self, id: &UploadId) -> Result<Option<UploadRecord>, StoreError> {
        Ok(self.uploads.read().await.get(id).cloned())
    }

    async fn contains_upload(&self, id: &UploadId) -> Result<bool, StoreError> {
        Ok(self.uploads.read().await.contains_key(id))
    }

    async fn upload_count(&self) -> Result<usize, StoreError> {
        Ok(self.uploads.read().await.len())
    }

    async fn append_selection(&self, product: Product) -> Result<usize, StoreError> {
        let mut cart = self.cart.lock().await;
        cart.push(product);
        Ok(cart.len())
    }

    async fn cart_snapshot(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.cart.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lustre_model::Catalog;
    use std::sync::Arc;

    #[tokio::test]
    async fn duplicate_upload_ids_are_rejected() {
        let store = InMemoryStore::new();
        let id = UploadId::generate();
        let record = UploadRecord::new(id.clone(), Vec::new(), None, None);
        store.put_upload(record.clone()).await.expect("first insert");
        let err = store.put_upload(record).await.expect_err("duplicate");
        assert!(matches!(err, StoreError::DuplicateUpload(dup) if dup == id));
        assert_eq!(store.upload_count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn concurrent_appends_are_all_recorded() {
        let store = Arc::new(InMemoryStore::new());
        let product = Catalog::fixed().find("p2").cloned().expect("p2");
        let mut tasks = Vec::new();
        for _ in 0..32 {
            let store = Arc::clone(&store);
            let product = product.clone();
            tasks.push(tokio::spawn(async move {
                store.append_selection(product).await.expect("append")
            }));
        }
        for t in tasks {
            t.await.expect("join");
        }
        let cart = store.cart_snapshot().await.expect("snapshot");
        assert_eq!(cart.len(), 32);
        assert!(cart.iter().all(|p| p.id.as_str() == "p2"));
    }

    #[tokio::test]
    async fn snapshot_is_detached_from_later_appends() {
        let store = InMemoryStore::new();
        let p1 = Catalog::fixed().find("p1").cloned().expect("p1");
        store.append_selection(p1.clone()).await.expect("append");
        let snap = store.cart_snapshot().await.expect("snapshot");
        store.append_selection(p1).await.expect("append");
        assert_eq!(snap.len(), 1);
    }
}
