//! Key-value persistence port and built-in backends.
//!
//! The port mirrors the browser's origin-scoped local storage: three string
//! keys hold the cart (`cartItems` as a JSON array, `deliveryFee` as a
//! decimal string, `selectedLocation` as a raw token). An absent key is a
//! default, never an error, so a cold start hydrates to an empty cart.
//! Malformed stored values are coerced to defaults with a warning.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use crate::cart::{Cart, CartItem, NO_LOCATION};

/// Storage key for the JSON-encoded item array.
pub const ITEMS_KEY: &str = "cartItems";
/// Storage key for the delivery fee, stored as a decimal string.
pub const FEE_KEY: &str = "deliveryFee";
/// Storage key for the selected location token.
pub const LOCATION_KEY: &str = "selectedLocation";

/// String key-value persistence port.
///
/// Implementations must treat a missing key as `Ok(None)` and reserve errors
/// for genuine I/O failures.
pub trait CartStorage {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Store `value` under `key`, replacing any existing value.
    fn put(&mut self, key: &str, value: &str) -> io::Result<()>;

    /// Remove the value stored under `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// Rebuild a [`Cart`] from storage.
///
/// Absent keys yield the corresponding default (no items, zero fee,
/// [`NO_LOCATION`]). Unparseable stored values are logged and coerced to the
/// same defaults rather than failing hydration.
///
/// # Errors
///
/// Returns `io::Error` only for storage-level read failures.
pub fn hydrate<S: CartStorage>(storage: &S) -> io::Result<Cart> {
    let items: Vec<CartItem> = match storage.get(ITEMS_KEY)? {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, "stored cart items are corrupt, starting empty");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let delivery_fee = match storage.get(FEE_KEY)? {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "stored delivery fee is not numeric, using 0");
            0.0
        }),
        None => 0.0,
    };

    let location = storage
        .get(LOCATION_KEY)?
        .unwrap_or_else(|| NO_LOCATION.to_string());

    Ok(Cart {
        items,
        delivery_fee,
        location,
    })
}

/// Write the item array back to storage.
///
/// # Errors
///
/// Returns `io::Error` if serialization or the storage write fails.
pub fn save_items<S: CartStorage>(storage: &mut S, cart: &Cart) -> io::Result<()> {
    let json = serde_json::to_string(&cart.items).map_err(io::Error::other)?;
    storage.put(ITEMS_KEY, &json)
}

/// Write the delivery fee and location token back to storage.
///
/// Does not touch the item array.
///
/// # Errors
///
/// Returns `io::Error` if either storage write fails.
pub fn save_delivery<S: CartStorage>(storage: &mut S, cart: &Cart) -> io::Result<()> {
    storage.put(FEE_KEY, &cart.delivery_fee.to_string())?;
    storage.put(LOCATION_KEY, &cart.location)
}

/// Remove all three cart keys from storage.
///
/// # Errors
///
/// Returns `io::Error` if any removal fails.
pub fn clear<S: CartStorage>(storage: &mut S) -> io::Result<()> {
    storage.remove(ITEMS_KEY)?;
    storage.remove(FEE_KEY)?;
    storage.remove(LOCATION_KEY)
}

/// In-memory backend for tests and headless embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed backend: one file per key under a base directory.
///
/// Writes are atomic via a temp-rename pattern so readers never see a
/// partially-written value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Create a backend rooted at `base_dir`. The directory is created
    /// lazily on first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        let path = self.key_path(key);
        let tmp_path = self.base_dir.join(format!("{key}.tmp"));
        std::fs::write(&tmp_path, value)?;
        std::fs::rename(&tmp_path, &path)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hydrate_cold_start_yields_defaults() {
        let storage = MemoryStorage::new();
        let cart = hydrate(&storage).expect("hydrate should succeed");
        assert!(cart.items.is_empty());
        assert_eq!(cart.delivery_fee, 0.0);
        assert_eq!(cart.location, NO_LOCATION);
    }

    #[test]
    fn hydrate_reads_back_saved_state() {
        let mut storage = MemoryStorage::new();
        let cart = Cart {
            items: vec![CartItem {
                name: "Burger".into(),
                unit_price: 150.0,
                quantity: 2,
            }],
            delivery_fee: 50.0,
            location: "1".into(),
        };
        save_items(&mut storage, &cart).expect("save items");
        save_delivery(&mut storage, &cart).expect("save delivery");

        let loaded = hydrate(&storage).expect("hydrate should succeed");
        assert_eq!(loaded, cart);
    }

    #[test]
    fn hydrate_corrupt_items_starts_empty() {
        let mut storage = MemoryStorage::new();
        storage.put(ITEMS_KEY, "not json at all").expect("put");
        storage.put(FEE_KEY, "50").expect("put");

        let cart = hydrate(&storage).expect("corrupt data is not an error");
        assert!(cart.items.is_empty());
        assert_eq!(cart.delivery_fee, 50.0);
    }

    #[test]
    fn hydrate_non_numeric_fee_coerces_to_zero() {
        let mut storage = MemoryStorage::new();
        storage.put(FEE_KEY, "fifty").expect("put");

        let cart = hydrate(&storage).expect("hydrate should succeed");
        assert_eq!(cart.delivery_fee, 0.0);
    }

    #[test]
    fn hydrate_partially_numeric_fee_coerces_to_zero() {
        // A fee string with trailing garbage is malformed as a whole; it
        // defaults rather than keeping its numeric prefix.
        let mut storage = MemoryStorage::new();
        storage.put(FEE_KEY, "50abc").expect("put");

        let cart = hydrate(&storage).expect("hydrate should succeed");
        assert_eq!(cart.delivery_fee, 0.0);
    }

    #[test]
    fn save_delivery_leaves_items_untouched() {
        let mut storage = MemoryStorage::new();
        storage.put(ITEMS_KEY, "[]").expect("put");
        let cart = Cart {
            delivery_fee: 30.0,
            location: "2".into(),
            ..Cart::default()
        };
        save_delivery(&mut storage, &cart).expect("save delivery");

        assert_eq!(
            storage.get(ITEMS_KEY).expect("get"),
            Some("[]".to_string())
        );
        assert_eq!(storage.get(FEE_KEY).expect("get"), Some("30".to_string()));
        assert_eq!(
            storage.get(LOCATION_KEY).expect("get"),
            Some("2".to_string())
        );
    }

    #[test]
    fn clear_removes_all_three_keys() {
        let mut storage = MemoryStorage::new();
        storage.put(ITEMS_KEY, "[]").expect("put");
        storage.put(FEE_KEY, "50").expect("put");
        storage.put(LOCATION_KEY, "1").expect("put");

        clear(&mut storage).expect("clear should succeed");
        assert!(storage.is_empty());
    }

    #[test]
    fn clear_on_empty_storage_succeeds() {
        let mut storage = MemoryStorage::new();
        clear(&mut storage).expect("removing absent keys should succeed");
    }

    #[test]
    fn file_storage_roundtrip() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut storage = FileStorage::new(dir.path());

        storage.put(LOCATION_KEY, "1").expect("put");
        assert_eq!(
            storage.get(LOCATION_KEY).expect("get"),
            Some("1".to_string())
        );

        storage.remove(LOCATION_KEY).expect("remove");
        assert_eq!(storage.get(LOCATION_KEY).expect("get"), None);
    }

    #[test]
    fn file_storage_missing_key_is_none() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get(ITEMS_KEY).expect("get"), None);
    }

    #[test]
    fn file_storage_put_leaves_no_temp_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut storage = FileStorage::new(dir.path());
        storage.put(FEE_KEY, "50").expect("put");

        assert!(dir.path().join(FEE_KEY).is_file());
        assert!(
            !dir.path().join(format!("{FEE_KEY}.tmp")).exists(),
            "temp file should not exist after a successful write"
        );
    }

    #[test]
    fn file_storage_hydrates_like_memory() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut storage = FileStorage::new(dir.path());
        let cart = Cart {
            items: vec![CartItem {
                name: "Fries".into(),
                unit_price: 80.0,
                quantity: 1,
            }],
            delivery_fee: 20.0,
            location: "3".into(),
        };
        save_items(&mut storage, &cart).expect("save items");
        save_delivery(&mut storage, &cart).expect("save delivery");

        let loaded = hydrate(&storage).expect("hydrate should succeed");
        assert_eq!(loaded, cart);
    }
}
