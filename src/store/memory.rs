//! In-memory product store (for development/testing).

use super::ProductStore;
use crate::error::AppError;
use crate::model::{NewProduct, Product, ProductChanges, DEFAULT_AVAILABILITY};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Rows {
    last_id: i64,
    products: BTreeMap<i64, Product>,
}

/// Products kept in a map keyed by id. Ids start at 1 and are never reused.
///
/// A store built with [`InMemoryProductStore::unavailable`] fails every call,
/// standing in for an unreachable database.
#[derive(Debug, Clone)]
pub struct InMemoryProductStore {
    rows: Arc<RwLock<Rows>>,
    available: Arc<AtomicBool>,
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Rows::default())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn unavailable() -> Self {
        let store = Self::new();
        store.set_available(false);
        store
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::Unavailable("in-memory store is offline".into()))
        }
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn sync(&self) -> Result<(), AppError> {
        self.check_available()
    }

    async fn reset(&self) -> Result<(), AppError> {
        self.check_available()?;
        *self.rows.write().await = Rows::default();
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_available()
    }

    async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        self.check_available()?;
        let rows = self.rows.read().await;
        Ok(rows.products.values().rev().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        self.check_available()?;
        Ok(self.rows.read().await.products.get(&id).cloned())
    }

    async fn create(&self, product: NewProduct) -> Result<Product, AppError> {
        self.check_available()?;
        let mut rows = self.rows.write().await;
        rows.last_id += 1;
        let now = Utc::now();
        let created = Product {
            id: rows.last_id,
            name: product.name,
            price: product.price,
            availability: product.availability.unwrap_or(DEFAULT_AVAILABILITY),
            created_at: now,
            updated_at: now,
        };
        rows.products.insert(created.id, created.clone());
        tracing::debug!(product_id = created.id, "created product in memory");
        Ok(created)
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> Result<Option<Product>, AppError> {
        self.check_available()?;
        let mut rows = self.rows.write().await;
        let Some(product) = rows.products.get_mut(&id) else {
            return Ok(None);
        };
        product.name = changes.name;
        product.price = changes.price;
        if let Some(availability) = changes.availability {
            product.availability = availability;
        }
        product.updated_at = Utc::now();
        Ok(Some(product.clone()))
    }

    async fn toggle_availability(&self, id: i64) -> Result<Option<Product>, AppError> {
        self.check_available()?;
        let mut rows = self.rows.write().await;
        Ok(rows.products.get_mut(&id).map(|product| {
            product.availability = !product.availability;
            product.updated_at = Utc::now();
            product.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        self.check_available()?;
        Ok(self.rows.write().await.products.remove(&id).is_some())
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(price: f64) -> NewProduct {
        NewProduct {
            name: "Monitor".into(),
            price,
            availability: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids_and_default_availability() {
        let store = InMemoryProductStore::new();
        let first = store.create(monitor(10.0)).await.unwrap();
        let second = store.create(monitor(20.0)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.availability);
    }

    #[tokio::test]
    async fn list_is_ordered_by_id_descending() {
        let store = InMemoryProductStore::new();
        for price in [1.0, 2.0, 3.0] {
            store.create(monitor(price)).await.unwrap();
        }
        let ids: Vec<i64> = store.list_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, [3, 2, 1]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryProductStore::new();
        let first = store.create(monitor(1.0)).await.unwrap();
        assert!(store.delete(first.id).await.unwrap());
        assert!(!store.delete(first.id).await.unwrap());
        let next = store.create(monitor(2.0)).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn update_keeps_availability_when_omitted() {
        let store = InMemoryProductStore::new();
        let created = store
            .create(NewProduct {
                availability: Some(false),
                ..monitor(5.0)
            })
            .await
            .unwrap();
        let updated = store
            .update(
                created.id,
                ProductChanges {
                    name: "Keyboard".into(),
                    price: 7.5,
                    availability: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Keyboard");
        assert_eq!(updated.price, 7.5);
        assert!(!updated.availability);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn toggle_twice_restores_availability() {
        let store = InMemoryProductStore::new();
        let created = store.create(monitor(5.0)).await.unwrap();
        let once = store.toggle_availability(created.id).await.unwrap().unwrap();
        let twice = store.toggle_availability(created.id).await.unwrap().unwrap();
        assert!(!once.availability);
        assert!(twice.availability);
        assert!(store.toggle_availability(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = InMemoryProductStore::unavailable();
        assert!(store.sync().await.is_err());
        assert!(store.list_all().await.is_err());
        assert!(store.get_by_id(1).await.is_err());
        store.set_available(true);
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
