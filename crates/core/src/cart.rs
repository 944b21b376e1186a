//! Cart store
//!
//! The only mutable domain state in the system: the session's selected
//! items and delivery preferences. Mutations persist to durable storage
//! under independent keys and notify subscribers with a fresh quote, so a
//! UI can re-render reactively without any process-wide singleton.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    delivery::{DeliveryArea, DeliverySpeed},
    pricing::{Quote, quote},
    products::{Product, ProductId, PromoFamily},
    storage::CartStorage,
};

/// Storage key for the cart contents snapshot.
pub const CART_KEY: &str = "snaxo-cart";

/// Storage key for the selected delivery area.
pub const AREA_KEY: &str = "snaxo-delivery-area";

/// Storage key for the selected delivery speed.
pub const SPEED_KEY: &str = "snaxo-delivery-speed";

/// One cart entry: a product reference plus the name/price snapshot taken
/// at add-time, so totals stay stable if the catalog changes later.
///
/// Invariant: `quantity >= 1`; an entry that would reach zero is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product the entry refers to.
    pub product_id: ProductId,

    /// Product name snapshot.
    pub name: String,

    /// Unit price snapshot in whole currency units.
    pub price: u64,

    /// Image reference snapshot.
    pub image_url: Option<String>,

    /// Promotional family snapshot.
    pub promo_family: Option<PromoFamily>,

    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot a product into a new line with quantity 1.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            promo_family: product.promo_family,
            quantity: 1,
        }
    }

    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.price * u64::from(self.quantity)
    }
}

/// Handle returned by [`CartStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(usize);

type Subscriber = Box<dyn Fn(&Quote) + Send>;

/// Session-scoped cart store.
///
/// Entries are keyed by product id (O(1) membership) and iterate in
/// insertion order. One store instance per session; a single writer, so
/// no interior locking.
pub struct CartStore<S> {
    lines: Vec<CartLine>,
    index: FxHashMap<ProductId, usize>,
    area: Option<DeliveryArea>,
    speed: DeliverySpeed,
    storage: S,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber: usize,
}

impl<S> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("area", &self.area)
            .field("speed", &self.speed)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl<S: CartStorage> CartStore<S> {
    /// Create an empty cart backed by the given storage.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            lines: Vec::new(),
            index: FxHashMap::default(),
            area: None,
            speed: DeliverySpeed::default(),
            storage,
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    /// Restore a cart from storage.
    ///
    /// Each key is restored independently; a missing or corrupt snapshot
    /// falls back to the empty default for that key only, so partial
    /// state survives a reload.
    #[must_use]
    pub fn restore(storage: S) -> Self {
        let lines: Vec<CartLine> = read_json(&storage, CART_KEY).unwrap_or_default();
        let area: Option<DeliveryArea> = read_json(&storage, AREA_KEY);
        let speed: DeliverySpeed = read_json(&storage, SPEED_KEY).unwrap_or_default();

        let index = lines
            .iter()
            .enumerate()
            .map(|(i, line)| (line.product_id, i))
            .collect();

        Self {
            lines,
            index,
            area,
            speed,
            storage,
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    /// Add one unit of a product.
    ///
    /// If the product already has an entry its quantity is incremented;
    /// otherwise a new entry with quantity 1 is appended. Always succeeds.
    pub fn add_item(&mut self, product: &Product) {
        match self.index.get(&product.id) {
            Some(&position) => {
                if let Some(line) = self.lines.get_mut(position) {
                    line.quantity += 1;
                }
            }
            None => {
                self.index.insert(product.id, self.lines.len());
                self.lines.push(CartLine::from_product(product));
            }
        }

        self.after_mutation();
    }

    /// Remove a product's entry entirely. Absent ids are a no-op.
    pub fn remove_item(&mut self, product_id: ProductId) {
        let Some(position) = self.index.remove(&product_id) else {
            return;
        };

        self.lines.remove(position);
        self.reindex();
        self.after_mutation();
    }

    /// Set a product's quantity to the given value (not an increment).
    ///
    /// A quantity of zero behaves as [`Self::remove_item`]. Absent ids
    /// are a no-op.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);

            return;
        }

        let Some(&position) = self.index.get(&product_id) else {
            return;
        };

        if let Some(line) = self.lines.get_mut(position) {
            line.quantity = quantity;
        }

        self.after_mutation();
    }

    /// Empty all entries. Delivery selections are retained; they are
    /// persisted under their own keys.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.index.clear();
        self.after_mutation();
    }

    /// Replace the selected delivery area.
    pub fn set_delivery_area(&mut self, area: Option<DeliveryArea>) {
        self.area = area;
        self.after_mutation();
    }

    /// Replace the selected delivery speed.
    pub fn set_delivery_speed(&mut self, speed: DeliverySpeed) {
        self.speed = speed;
        self.after_mutation();
    }

    /// The entries in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The currently selected delivery area, if any.
    #[must_use]
    pub fn delivery_area(&self) -> Option<&DeliveryArea> {
        self.area.as_ref()
    }

    /// The currently selected delivery speed.
    #[must_use]
    pub fn delivery_speed(&self) -> DeliverySpeed {
        self.speed
    }

    /// Sum of quantities across all entries. Recomputed per call.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price times quantity across all entries. Recomputed per call.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Price the current cart state.
    #[must_use]
    pub fn quote(&self) -> Quote {
        quote(&self.lines, self.area.as_ref(), self.speed)
    }

    /// Register a subscriber invoked with a fresh quote after every
    /// mutation.
    pub fn subscribe(&mut self, subscriber: impl Fn(&Quote) + Send + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(subscriber)));

        id
    }

    /// Remove a previously registered subscriber. Unknown ids are a no-op.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(existing, _)| *existing != id);
    }

    fn after_mutation(&mut self) {
        self.persist();
        self.notify();
    }

    fn reindex(&mut self) {
        self.index = self
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| (line.product_id, i))
            .collect();
    }

    /// Best-effort durable persistence; failures are logged, never
    /// propagated to the caller.
    fn persist(&mut self) {
        write_json(&mut self.storage, CART_KEY, &self.lines);

        match &self.area {
            Some(area) => write_json(&mut self.storage, AREA_KEY, area),
            None => {
                if let Err(error) = self.storage.remove(AREA_KEY) {
                    warn!("failed to clear persisted delivery area: {error}");
                }
            }
        }

        write_json(&mut self.storage, SPEED_KEY, &self.speed);
    }

    fn notify(&self) {
        let quote = self.quote();

        for (_, subscriber) in &self.subscribers {
            subscriber(&quote);
        }
    }
}

fn read_json<S: CartStorage, T: serde::de::DeserializeOwned>(storage: &S, key: &str) -> Option<T> {
    let raw = match storage.load(key) {
        Ok(raw) => raw?,
        Err(error) => {
            warn!("failed to read persisted state under {key}: {error}");

            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!("discarding corrupt persisted state under {key}: {error}");

            None
        }
    }
}

fn write_json<S: CartStorage, T: Serialize>(storage: &mut S, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(error) => {
            warn!("failed to serialize state for {key}: {error}");

            return;
        }
    };

    if let Err(error) = storage.store(key, &raw) {
        warn!("failed to persist state under {key}: {error}");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    };

    use crate::{
        delivery::DeliveryAreaId,
        products::Category,
        storage::{MemoryStorage, StorageError},
    };

    use super::*;

    fn product(name: &str, price: u64) -> Product {
        Product {
            id: ProductId::new(),
            name: name.to_string(),
            description: None,
            price,
            original_price: None,
            category: Category::Snacks,
            image_url: None,
            in_stock: true,
            is_popular: false,
            promo_family: None,
        }
    }

    fn area(fee: u64) -> DeliveryArea {
        DeliveryArea {
            id: DeliveryAreaId::new(),
            name: "Järfälla".to_string(),
            fee,
        }
    }

    #[test]
    fn add_item_twice_coalesces_into_one_entry() {
        let mut cart = CartStore::new(MemoryStorage::new());
        let crisps = product("Crisps", 25);

        cart.add_item(&crisps);
        cart.add_item(&crisps);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines().first().map(|l| l.quantity), Some(2));
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn total_items_tracks_mutations_in_any_order() {
        let mut cart = CartStore::new(MemoryStorage::new());
        let crisps = product("Crisps", 25);
        let cola = product("Cola", 15);

        cart.add_item(&crisps);
        cart.add_item(&cola);
        cart.update_quantity(cola.id, 4);
        cart.add_item(&crisps);
        cart.remove_item(crisps.id);

        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.subtotal(), 60);
    }

    #[test]
    fn update_quantity_to_zero_equals_remove() {
        let mut cart = CartStore::new(MemoryStorage::new());
        let crisps = product("Crisps", 25);

        cart.add_item(&crisps);
        cart.update_quantity(crisps.id, 0);

        assert!(cart.is_empty());
        assert!(!cart.lines().iter().any(|l| l.quantity == 0));
    }

    #[test]
    fn update_quantity_sets_not_increments() {
        let mut cart = CartStore::new(MemoryStorage::new());
        let crisps = product("Crisps", 25);

        cart.add_item(&crisps);
        cart.add_item(&crisps);
        cart.update_quantity(crisps.id, 5);

        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn update_quantity_for_absent_product_is_a_no_op() {
        let mut cart = CartStore::new(MemoryStorage::new());

        cart.update_quantity(ProductId::new(), 3);

        assert!(cart.is_empty());
    }

    #[test]
    fn remove_absent_product_is_a_no_op() {
        let mut cart = CartStore::new(MemoryStorage::new());
        let crisps = product("Crisps", 25);

        cart.add_item(&crisps);
        cart.remove_item(ProductId::new());

        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn subtotal_is_fresh_after_every_mutation() {
        let mut cart = CartStore::new(MemoryStorage::new());
        let crisps = product("Crisps", 25);

        cart.add_item(&crisps);
        assert_eq!(cart.subtotal(), 25);

        cart.update_quantity(crisps.id, 3);
        assert_eq!(cart.subtotal(), 75);

        cart.remove_item(crisps.id);
        assert_eq!(cart.subtotal(), 0);
    }

    #[test]
    fn clear_retains_delivery_selections() {
        let mut cart = CartStore::new(MemoryStorage::new());
        let selected = area(29);

        cart.add_item(&product("Crisps", 25));
        cart.set_delivery_area(Some(selected.clone()));
        cart.set_delivery_speed(DeliverySpeed::Priority);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.delivery_area(), Some(&selected));
        assert_eq!(cart.delivery_speed(), DeliverySpeed::Priority);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut cart = CartStore::new(MemoryStorage::new());
        let crisps = product("Crisps", 25);
        let cola = product("Cola", 15);
        let pizza = product("Pizza", 40);

        cart.add_item(&crisps);
        cart.add_item(&cola);
        cart.add_item(&pizza);
        cart.remove_item(cola.id);
        cart.add_item(&crisps);

        let names: Vec<&str> = cart.lines().iter().map(|l| l.name.as_str()).collect();

        assert_eq!(names, ["Crisps", "Pizza"]);
    }

    #[test]
    fn restore_round_trips_cart_and_selections() {
        let mut cart = CartStore::new(MemoryStorage::new());
        let crisps = product("Crisps", 25);
        let selected = area(49);

        cart.add_item(&crisps);
        cart.add_item(&crisps);
        cart.set_delivery_area(Some(selected.clone()));
        cart.set_delivery_speed(DeliverySpeed::Priority);

        let storage = cart.storage.clone();
        let restored = CartStore::restore(storage);

        assert_eq!(restored.total_items(), 2);
        assert_eq!(restored.subtotal(), 50);
        assert_eq!(restored.delivery_area(), Some(&selected));
        assert_eq!(restored.delivery_speed(), DeliverySpeed::Priority);
    }

    #[test]
    fn restore_tolerates_corrupt_cart_snapshot() {
        let mut storage = MemoryStorage::new();
        let stored = storage.store(CART_KEY, "not json");
        assert!(stored.is_ok(), "memory storage writes are infallible");

        let json = serde_json::to_string(&DeliverySpeed::Priority);
        let stored = storage.store(SPEED_KEY, &json.unwrap_or_default());
        assert!(stored.is_ok(), "memory storage writes are infallible");

        let restored = CartStore::restore(storage);

        assert!(restored.is_empty());
        assert_eq!(restored.delivery_speed(), DeliverySpeed::Priority);
    }

    #[test]
    fn subscribers_see_fresh_quote_after_mutations() {
        let mut cart = CartStore::new(MemoryStorage::new());
        let crisps = product("Crisps", 25);

        let seen = Arc::new(AtomicU64::new(0));
        let sink = Arc::clone(&seen);

        cart.subscribe(move |quote| sink.store(quote.total, Ordering::SeqCst));

        cart.add_item(&crisps);
        assert_eq!(seen.load(Ordering::SeqCst), 25);

        cart.set_delivery_area(Some(area(29)));
        assert_eq!(seen.load(Ordering::SeqCst), 54);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut cart = CartStore::new(MemoryStorage::new());
        let crisps = product("Crisps", 25);

        let calls = Arc::new(AtomicU64::new(0));
        let sink = Arc::clone(&calls);

        let id = cart.subscribe(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        });

        cart.add_item(&crisps);
        cart.unsubscribe(id);
        cart.add_item(&crisps);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn storage_failures_do_not_block_mutations() {
        struct BrokenStorage;

        impl CartStorage for BrokenStorage {
            fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Err(StorageError::Unavailable)
            }

            fn store(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError::Unavailable)
            }

            fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
                Err(StorageError::Unavailable)
            }
        }

        let mut cart = CartStore::new(BrokenStorage);

        cart.add_item(&product("Crisps", 25));

        assert_eq!(cart.total_items(), 1);
    }
}
