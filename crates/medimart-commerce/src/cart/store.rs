//! Cart persisted in a single storage slot.

use crate::cart::{summarize, Cart, CartLineItem, PricingPolicy, PricingSummary};
use crate::catalog::Medicine;
use crate::error::CommerceError;
use crate::ids::MedicineId;
use medimart_cache::{cache_key, Cache, CacheError, KvStore};

/// Reads and writes the cart slot.
///
/// Holds no cart state of its own: every mutation loads the slot, applies
/// the change and overwrites the slot with the whole cart. Two stores on
/// the same slot therefore race with last-write-wins semantics.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    cache: Cache<S>,
    key: String,
}

impl<S: KvStore> CartStore<S> {
    /// Slot key used when none is configured.
    pub const DEFAULT_KEY: &'static str = "cart";

    /// Open the cart stored under [`Self::DEFAULT_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, Self::DEFAULT_KEY)
    }

    /// Open the cart stored under `key`.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(store),
            key: key.into(),
        }
    }

    /// Open the cart of one signed-in account, so accounts sharing a
    /// device keep separate carts.
    pub fn for_account(store: S, email: &str) -> Self {
        Self::with_key(
            store,
            cache_key!(Self::DEFAULT_KEY, email.trim().to_lowercase()),
        )
    }

    /// The slot key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    /// Read the cart.
    ///
    /// An absent slot is an empty cart. So is an unreadable or malformed
    /// one; the anomaly is logged, never returned.
    pub fn load(&self) -> Cart {
        match self.try_load() {
            Ok(cart) => cart,
            Err(e) => {
                tracing::error!(slot = %self.key, error = %e, "cart slot unreadable, using empty cart");
                Cart::new()
            }
        }
    }

    /// Add `quantity` units of a medicine and persist.
    pub fn add(&self, medicine: &Medicine, quantity: i64) -> Result<Cart, CommerceError> {
        self.update(|cart| cart.add(medicine, quantity))
            .inspect(|_| {
                tracing::debug!(slot = %self.key, id = %medicine.id, quantity, "added to cart");
            })
    }

    /// Add a single unit of a medicine and persist.
    pub fn add_one(&self, medicine: &Medicine) -> Result<Cart, CommerceError> {
        self.add(medicine, 1)
    }

    /// Replace a line's quantity and persist. A quantity <= 0 removes it.
    pub fn set_quantity(&self, id: &MedicineId, quantity: i64) -> Result<Cart, CommerceError> {
        self.update(|cart| {
            if !cart.set_quantity(id, quantity)? {
                return Err(CommerceError::ItemNotInCart(id.to_string()));
            }
            Ok(())
        })
        .inspect(|_| {
            tracing::debug!(slot = %self.key, %id, quantity, "cart quantity set");
        })
    }

    /// Remove a line and persist.
    pub fn remove(&self, id: &MedicineId) -> Result<Cart, CommerceError> {
        self.update(|cart| {
            if !cart.remove(id) {
                return Err(CommerceError::ItemNotInCart(id.to_string()));
            }
            Ok(())
        })
        .inspect(|_| tracing::debug!(slot = %self.key, %id, "removed from cart"))
    }

    /// Empty the cart and persist the empty state.
    pub fn clear(&self) -> Result<Cart, CommerceError> {
        let cart = Cart::new();
        self.save(&cart)?;
        tracing::debug!(slot = %self.key, "cart cleared");
        Ok(cart)
    }

    /// Price the current cart.
    pub fn summarize(&self, policy: &PricingPolicy) -> Result<PricingSummary, CommerceError> {
        summarize(&self.load(), policy)
    }

    /// Load the slot, treating malformed data as an empty cart but
    /// propagating store failures.
    fn try_load(&self) -> Result<Cart, CommerceError> {
        match self.cache.get::<Vec<CartLineItem>>(&self.key) {
            Ok(Some(lines)) => {
                let total = lines.len();
                let cart = Cart::from_lines(lines);
                let dropped = total - cart.unique_item_count();
                if dropped > 0 {
                    tracing::warn!(slot = %self.key, dropped, "dropped cart lines with no quantity");
                }
                Ok(cart)
            }
            Ok(None) => Ok(Cart::new()),
            Err(CacheError::SerializeError(e)) => {
                tracing::warn!(slot = %self.key, error = %e, "malformed cart slot, treating as empty");
                Ok(Cart::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), CommerceError> {
        self.cache.set(&self.key, cart)?;
        Ok(())
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut Cart) -> Result<(), CommerceError>,
    ) -> Result<Cart, CommerceError> {
        let mut cart = self.try_load()?;
        apply(&mut cart)?;
        self.save(&cart)?;
        Ok(cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medimart_cache::MemoryStore;
    use rust_decimal::Decimal;

    fn napa() -> Medicine {
        Medicine::new("med-1", "Napa", Decimal::from(10))
    }

    fn ace() -> Medicine {
        Medicine::new("med-2", "Ace", Decimal::from(4)).with_discount(Decimal::from(25))
    }

    fn stored(store: &MemoryStore) -> Option<serde_json::Value> {
        store
            .get(CartStore::<MemoryStore>::DEFAULT_KEY)
            .unwrap()
            .map(|bytes| serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_absent_slot_is_empty_cart() {
        let carts = CartStore::new(MemoryStore::new());
        assert!(carts.load().is_empty());
        assert!(stored(carts.store()).is_none());
    }

    #[test]
    fn test_malformed_slot_is_empty_cart() {
        let store = MemoryStore::new();
        store.set("cart", b"{\"oops\": ").unwrap();

        let carts = CartStore::new(store);
        assert!(carts.load().is_empty());

        // The next mutation overwrites the corrupt slot.
        carts.add_one(&napa()).unwrap();
        assert_eq!(carts.load().item_count(), 1);
    }

    #[test]
    fn test_wrong_shape_slot_is_empty_cart() {
        let store = MemoryStore::new();
        store.set("cart", br#"{"items": 3}"#).unwrap();
        assert!(CartStore::new(store).load().is_empty());
    }

    #[test]
    fn test_add_twice_merges_and_persists() {
        let carts = CartStore::new(MemoryStore::new());
        carts.add_one(&napa()).unwrap();
        carts.add_one(&napa()).unwrap();

        let json = stored(carts.store()).unwrap();
        let lines = json.as_array().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["quantity"], 2);
    }

    #[test]
    fn test_set_quantity_zero_removes_from_storage() {
        let carts = CartStore::new(MemoryStore::new());
        carts.add(&napa(), 3).unwrap();
        carts.add_one(&ace()).unwrap();

        let cart = carts.set_quantity(&MedicineId::new("med-1"), 0).unwrap();
        assert!(cart.get(&MedicineId::new("med-1")).is_none());

        let json = stored(carts.store()).unwrap();
        let ids: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["med-2"]);
    }

    #[test]
    fn test_remove_removes_from_storage() {
        let carts = CartStore::new(MemoryStore::new());
        carts.add_one(&napa()).unwrap();

        let cart = carts.remove(&MedicineId::new("med-1")).unwrap();
        assert!(cart.is_empty());
        assert_eq!(stored(carts.store()).unwrap(), serde_json::json!([]));
    }

    #[test]
    fn test_remove_missing_line_is_reported() {
        let carts = CartStore::new(MemoryStore::new());
        assert!(matches!(
            carts.remove(&MedicineId::new("ghost")),
            Err(CommerceError::ItemNotInCart(_))
        ));
    }

    #[test]
    fn test_clear_persists_empty_array() {
        let carts = CartStore::new(MemoryStore::new());
        carts.add_one(&napa()).unwrap();
        carts.clear().unwrap();

        assert!(carts.load().is_empty());
        assert_eq!(stored(carts.store()).unwrap(), serde_json::json!([]));
    }

    #[test]
    fn test_invalid_add_leaves_storage_untouched() {
        let carts = CartStore::new(MemoryStore::new());
        carts.add_one(&napa()).unwrap();
        assert!(carts.add(&napa(), -2).is_err());
        assert_eq!(carts.load().item_count(), 1);
    }

    #[test]
    fn test_two_stores_on_one_slot_share_the_cart() {
        let store = MemoryStore::new();
        let tab_a = CartStore::new(store.clone());
        let tab_b = CartStore::new(store);

        tab_a.add_one(&napa()).unwrap();
        tab_b.add_one(&ace()).unwrap();

        // Each mutation re-reads the slot, so neither write is lost here.
        assert_eq!(tab_a.load().unique_item_count(), 2);
    }

    #[test]
    fn test_custom_key() {
        let carts = CartStore::with_key(MemoryStore::new(), "cart:guest");
        carts.add_one(&napa()).unwrap();
        assert!(carts.store().exists("cart:guest").unwrap());
        assert!(!carts.store().exists("cart").unwrap());
    }

    #[test]
    fn test_account_carts_are_separate() {
        let store = MemoryStore::new();
        let alice = CartStore::for_account(store.clone(), " Alice@Example.com");
        let bob = CartStore::for_account(store.clone(), "bob@example.com");

        alice.add_one(&napa()).unwrap();
        assert_eq!(alice.key(), "cart:alice@example.com");
        assert!(bob.load().is_empty());
        assert!(CartStore::new(store).load().is_empty());
    }

    #[test]
    fn test_account_carts_are_separate_on_disk() {
        let dir = std::env::temp_dir().join(format!(
            "medimart-commerce-accounts-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        let store = medimart_cache::FileStore::open(&dir).unwrap();

        let dotted = CartStore::for_account(store.clone(), "a.b@x.com");
        let underscored = CartStore::for_account(store, "a_b@x.com");
        dotted.add_one(&napa()).unwrap();

        assert_eq!(dotted.load().item_count(), 1);
        assert_eq!(underscored.load().item_count(), 0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_summary_reflects_live_cart() {
        let carts = CartStore::new(MemoryStore::new());
        let policy = PricingPolicy::default();

        carts.add(&napa(), 2).unwrap();
        assert_eq!(carts.summarize(&policy).unwrap().subtotal.amount, Decimal::from(20));

        carts.add(&napa(), 3).unwrap();
        assert_eq!(carts.summarize(&policy).unwrap().subtotal.amount, Decimal::from(50));
    }
}
