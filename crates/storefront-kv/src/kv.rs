//! Key-value store trait and typed JSON wrapper.

use crate::KvError;
use serde::{de::DeserializeOwned, Serialize};
use std::rc::Rc;
use std::sync::Arc;

/// A blob store addressed by string keys.
///
/// Implementations take `&self` for writes so a store can be shared between
/// the owner of the data and whoever inspects it (tests, tooling).
pub trait KvStore {
    /// Get the raw bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError>;

    /// Store raw bytes under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), KvError>;

    /// List all keys currently stored.
    fn keys(&self) -> Result<Vec<String>, KvError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, KvError> {
        Ok(self.get(key)?.is_some())
    }

    /// Write several entries as one group.
    ///
    /// The default writes entries in order. Stores that can stage writes
    /// should override this so a failure leaves earlier values untouched
    /// as far as they are able to.
    fn set_many(&self, entries: &[(String, Vec<u8>)]) -> Result<(), KvError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        (**self).delete(key)
    }

    fn keys(&self) -> Result<Vec<String>, KvError> {
        (**self).keys()
    }

    fn set_many(&self, entries: &[(String, Vec<u8>)]) -> Result<(), KvError> {
        (**self).set_many(entries)
    }
}

macro_rules! forward_kv_store {
    ($ptr:ident) => {
        impl<S: KvStore + ?Sized> KvStore for $ptr<S> {
            fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
                (**self).get(key)
            }

            fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
                (**self).set(key, value)
            }

            fn delete(&self, key: &str) -> Result<(), KvError> {
                (**self).delete(key)
            }

            fn keys(&self) -> Result<Vec<String>, KvError> {
                (**self).keys()
            }

            fn set_many(&self, entries: &[(String, Vec<u8>)]) -> Result<(), KvError> {
                (**self).set_many(entries)
            }
        }
    };
}

forward_kv_store!(Box);
forward_kv_store!(Rc);
forward_kv_store!(Arc);

/// Type-safe cache over any [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
pub struct Cache<S> {
    store: S,
}

impl<S: KvStore> Cache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist and an error if the stored
    /// bytes are not valid JSON for `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Vec<CartLine>> = cache.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, KvError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("cart", &cart)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), KvError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), KvError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, KvError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, KvError> {
        self.store.keys()
    }

    /// Write every entry of a batch.
    ///
    /// All values were serialized when they were added to the batch, so a
    /// serialization failure can never leave a half-written snapshot.
    pub fn commit(&self, batch: Batch) -> Result<(), KvError> {
        if batch.entries.is_empty() {
            return Ok(());
        }
        tracing::trace!(keys = batch.entries.len(), "committing kv batch");
        self.store.set_many(&batch.entries)
    }
}

/// A group of serialized values to be written together.
#[derive(Debug, Default)]
pub struct Batch {
    entries: Vec<(String, Vec<u8>)>,
}

impl Batch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `value` and stage it under `key`.
    ///
    /// A later `put` for the same key replaces the earlier one.
    pub fn put<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), KvError> {
        let bytes = serde_json::to_vec(value)?;
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| k == key) {
            slot.1 = bytes;
        } else {
            self.entries.push((key.to_string(), bytes));
        }
        Ok(())
    }

    /// Number of staged entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
