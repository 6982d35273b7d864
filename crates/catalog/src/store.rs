//! Observable product store.
//!
//! The store is a single-writer value holder with broadcast fan-out:
//!
//! - The owner publishes a **complete** product sequence; each publish replaces
//!   the previous one atomically (no incremental updates).
//! - Every subscriber receives the current snapshot on subscription, then each
//!   later snapshot in publish order.
//! - No IO, no async. Delivery uses std channels so the store can be observed
//!   from a UI thread or a blocking worker alike.
//!
//! Writers need `&mut ProductStore`; readers only ever hold a [`Subscription`],
//! which cannot mutate anything.

use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};

use kmpapp_core::Entity;

use crate::error::{CatalogError, CatalogResult};
use crate::product::Product;

/// One published state of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    /// Number of publishes that led to this snapshot (0 for the initial value).
    pub version: u64,
    pub published_at: DateTime<Utc>,
    pub products: Vec<Product>,
}

impl ProductSnapshot {
    fn initial(products: Vec<Product>) -> Self {
        Self {
            version: 0,
            published_at: Utc::now(),
            products,
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// A subscription to the product stream.
///
/// Snapshots arrive in publish order. UI consumers usually only care about the
/// newest one and should use [`Subscription::latest`].
#[derive(Debug)]
pub struct Subscription {
    receiver: Receiver<Arc<ProductSnapshot>>,
}

impl Subscription {
    fn new(receiver: Receiver<Arc<ProductSnapshot>>) -> Self {
        Self { receiver }
    }

    /// Block until the next snapshot is available.
    pub fn recv(&self) -> Result<Arc<ProductSnapshot>, RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a snapshot without blocking.
    pub fn try_recv(&self) -> Result<Arc<ProductSnapshot>, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a snapshot.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Arc<ProductSnapshot>, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain everything pending and return only the newest snapshot, if any.
    pub fn latest(&self) -> Option<Arc<ProductSnapshot>> {
        let mut newest = None;
        while let Ok(snapshot) = self.receiver.try_recv() {
            newest = Some(snapshot);
        }
        newest
    }
}

/// Authoritative, observable product sequence.
#[derive(Debug)]
pub struct ProductStore {
    current: Arc<ProductSnapshot>,
    subscribers: Mutex<Vec<Sender<Arc<ProductSnapshot>>>>,
}

impl ProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a static sequence.
    pub fn with_products(products: Vec<Product>) -> CatalogResult<Self> {
        ensure_unique_ids(&products)?;
        Ok(Self {
            current: Arc::new(ProductSnapshot::initial(products)),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    /// Latest published snapshot.
    pub fn current(&self) -> Arc<ProductSnapshot> {
        Arc::clone(&self.current)
    }

    /// Replace the whole sequence and fan the new snapshot out to subscribers.
    ///
    /// On error nothing is published and the previous snapshot stays current.
    pub fn publish(&mut self, products: Vec<Product>) -> CatalogResult<Arc<ProductSnapshot>> {
        ensure_unique_ids(&products)?;

        let snapshot = Arc::new(ProductSnapshot {
            version: self.current.version + 1,
            published_at: Utc::now(),
            products,
        });
        self.current = Arc::clone(&snapshot);

        // A poisoned lock only means a subscriber push panicked; the sender list
        // itself is still consistent.
        let subs = self
            .subscribers
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Drop any dead subscribers while publishing.
        subs.retain(|tx| tx.send(Arc::clone(&snapshot)).is_ok());

        tracing::debug!(
            version = snapshot.version,
            products = snapshot.len(),
            subscribers = subs.len(),
            "published product snapshot"
        );

        Ok(snapshot)
    }

    /// Subscribe to the stream. The current snapshot is delivered first.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();

        // The receiver is alive, so this cannot fail.
        let _ = tx.send(Arc::clone(&self.current));

        let mut subs = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subs.push(tx);

        Subscription::new(rx)
    }

    /// Number of live subscribers as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .map(|subs| subs.len())
            .unwrap_or_default()
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self {
            current: Arc::new(ProductSnapshot::initial(Vec::new())),
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

fn ensure_unique_ids(products: &[Product]) -> CatalogResult<()> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if !seen.insert(product.id()) {
            return Err(CatalogError::DuplicateProductId(product.id().clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{ImageUri, Price};
    use kmpapp_core::ProductId;

    fn product(id: &str) -> Product {
        Product::new(
            ProductId::new(id).unwrap(),
            format!("Product {id}"),
            ImageUri::new(format!("http://x/{id}.png")).unwrap(),
            Price::from_minor_units(100),
        )
    }

    fn ids(snapshot: &ProductSnapshot) -> Vec<&str> {
        snapshot.products.iter().map(|p| p.id().as_str()).collect()
    }

    #[test]
    fn new_store_starts_empty_at_version_zero() {
        let store = ProductStore::new();
        let current = store.current();
        assert_eq!(current.version, 0);
        assert!(current.is_empty());
    }

    #[test]
    fn subscriber_receives_current_snapshot_first() {
        let mut store = ProductStore::new();
        store.publish(vec![product("1")]).unwrap();
        store.publish(vec![product("1"), product("2")]).unwrap();

        let sub = store.subscribe();
        let first = sub.try_recv().unwrap();
        assert_eq!(first.version, 2);
        assert_eq!(ids(&first), vec!["1", "2"]);
        assert!(sub.try_recv().is_err());
    }

    #[test]
    fn publish_replaces_whole_sequence_in_order() {
        let mut store = ProductStore::new();
        let sub = store.subscribe();
        let _initial = sub.recv().unwrap();

        store.publish(vec![product("a"), product("b")]).unwrap();
        store.publish(vec![product("c")]).unwrap();

        let s1 = sub.recv().unwrap();
        let s2 = sub.recv().unwrap();
        assert_eq!(ids(&s1), vec!["a", "b"]);
        assert_eq!(ids(&s2), vec!["c"]);
        assert_eq!(s2.version, s1.version + 1);
    }

    #[test]
    fn latest_conflates_pending_snapshots() {
        let mut store = ProductStore::new();
        let sub = store.subscribe();
        for n in 1..=5 {
            store.publish((1..=n).map(|i| product(&i.to_string())).collect()).unwrap();
        }

        let newest = sub.latest().unwrap();
        assert_eq!(newest.version, 5);
        assert_eq!(newest.len(), 5);
        assert!(sub.latest().is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected_and_previous_snapshot_kept() {
        let mut store = ProductStore::new();
        store.publish(vec![product("1")]).unwrap();
        let sub = store.subscribe();
        let _ = sub.recv().unwrap();

        let err = store.publish(vec![product("2"), product("2")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateProductId(ProductId::new("2").unwrap()));
        assert_eq!(store.current().version, 1);
        assert_eq!(ids(&store.current()), vec!["1"]);
        assert!(sub.try_recv().is_err());
    }

    #[test]
    fn seeding_with_duplicates_fails() {
        let err = ProductStore::with_products(vec![product("x"), product("x")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateProductId(_)));
    }

    #[test]
    fn dropped_subscribers_are_pruned_on_publish() {
        let mut store = ProductStore::new();
        let keep = store.subscribe();
        drop(store.subscribe());
        assert_eq!(store.subscriber_count(), 2);

        store.publish(vec![product("1")]).unwrap();
        assert_eq!(store.subscriber_count(), 1);
        assert_eq!(keep.latest().unwrap().version, 1);
    }

    #[test]
    fn empty_sequence_is_a_valid_publish() {
        let mut store = ProductStore::with_products(vec![product("1")]).unwrap();
        let snapshot = store.publish(Vec::new()).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.version, 1);
    }
}
