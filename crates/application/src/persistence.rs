//! Scoped persistence for stores.
//!
//! A [`Persisted`] value owns a piece of state and a [`SaveHook`]. Every
//! mutation goes through [`Persisted::update`], which runs the mutator and
//! then hands the new state to the hook. State types never see storage.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::ports::{StateStorage, StorageError};

/// Storage handle shared by all stores of a session.
pub type SharedStorage = Arc<dyn StateStorage>;

/// Where a store keeps its snapshots.
#[derive(Clone, Default)]
pub enum Backing {
    /// Load from and save to a storage backend.
    Storage(SharedStorage),
    /// Keep state in memory only.
    #[default]
    Ephemeral,
}

impl Backing {
    /// Wraps a storage backend.
    pub fn storage(storage: impl StateStorage + 'static) -> Self {
        Self::Storage(Arc::new(storage))
    }
}

impl fmt::Debug for Backing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(_) => f.write_str("Backing::Storage"),
            Self::Ephemeral => f.write_str("Backing::Ephemeral"),
        }
    }
}

/// Error raised when a mutated state could not be saved.
///
/// The in-memory mutation has already happened when this is returned.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The state could not be turned into a JSON snapshot.
    #[error("failed to encode snapshot for {key}: {source}")]
    Encode {
        /// Persistence key
        key: &'static str,
        /// Encoding failure
        #[source]
        source: serde_json::Error,
    },

    /// The storage backend rejected the write.
    #[error("failed to persist {key}: {source}")]
    Write {
        /// Persistence key
        key: &'static str,
        /// Backend failure
        #[source]
        source: StorageError,
    },
}

/// Observer invoked after every store mutation.
pub trait SaveHook<S>: Send + Sync {
    /// Called with the state as it is right after a mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the state could not be saved.
    fn after_mutation(&self, key: &'static str, state: &S) -> Result<(), PersistError>;
}

/// Hook writing a JSON snapshot to a storage backend.
#[derive(Clone)]
pub struct StorageHook {
    storage: SharedStorage,
}

impl StorageHook {
    /// Creates a hook writing to `storage`.
    #[must_use]
    pub const fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }
}

impl<S: Serialize> SaveHook<S> for StorageHook {
    fn after_mutation(&self, key: &'static str, state: &S) -> Result<(), PersistError> {
        let snapshot =
            serde_json::to_value(state).map_err(|source| PersistError::Encode { key, source })?;
        self.storage
            .write(key, &snapshot)
            .map_err(|source| PersistError::Write { key, source })?;
        debug!(key, "persisted store snapshot");
        Ok(())
    }
}

/// Hook that keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl<S> SaveHook<S> for NoopHook {
    fn after_mutation(&self, _key: &'static str, _state: &S) -> Result<(), PersistError> {
        Ok(())
    }
}

/// State owned together with the hook that saves it.
pub struct Persisted<S> {
    key: &'static str,
    state: S,
    hook: Box<dyn SaveHook<S>>,
}

impl<S> fmt::Debug for Persisted<S>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persisted")
            .field("key", &self.key)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<S> Persisted<S>
where
    S: Serialize + DeserializeOwned + 'static,
{
    /// Opens the state saved under `key`, falling back to `initial`.
    ///
    /// With a storage backing, a saved record is merged onto `initial` and
    /// later mutations are written back. An ephemeral backing starts from
    /// `initial` and saves nothing.
    pub fn open(key: &'static str, initial: S, backing: &Backing) -> Self {
        match backing {
            Backing::Ephemeral => Self::with_hook(key, initial, Box::new(NoopHook)),
            Backing::Storage(storage) => {
                let state = restore(storage.as_ref(), key, initial);
                Self::with_hook(key, state, Box::new(StorageHook::new(Arc::clone(storage))))
            }
        }
    }
}

impl<S> Persisted<S> {
    /// Wraps `state` with an explicit hook.
    pub fn with_hook(key: &'static str, state: S, hook: Box<dyn SaveHook<S>>) -> Self {
        Self { key, state, hook }
    }

    /// Returns the persistence key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// Applies a mutation and saves the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the save hook fails. The mutation is kept.
    pub fn update<R>(&mut self, mutate: impl FnOnce(&mut S) -> R) -> Result<R, PersistError> {
        let output = mutate(&mut self.state);
        self.hook.after_mutation(self.key, &self.state)?;
        Ok(output)
    }

    /// Applies a mutation and saves only if it reports a change.
    ///
    /// # Errors
    ///
    /// Returns an error if the save hook fails. The mutation is kept.
    pub fn update_if(&mut self, mutate: impl FnOnce(&mut S) -> bool) -> Result<bool, PersistError> {
        let changed = mutate(&mut self.state);
        if changed {
            self.hook.after_mutation(self.key, &self.state)?;
        }
        Ok(changed)
    }

    /// Adjusts loaded state without saving it.
    pub(crate) fn repair(&mut self, fix: impl FnOnce(&mut S)) {
        fix(&mut self.state);
    }
}

/// Loads the record under `key` merged onto `initial`.
///
/// Missing records yield `initial` silently; unreadable or ill-typed
/// records yield `initial` with a warning.
fn restore<S>(storage: &dyn StateStorage, key: &'static str, initial: S) -> S
where
    S: Serialize + DeserializeOwned,
{
    let stored = match storage.read(key) {
        Ok(Some(stored)) => stored,
        Ok(None) => return initial,
        Err(error) => {
            warn!(key, %error, "stored snapshot unreadable, using defaults");
            return initial;
        }
    };

    let mut merged = match serde_json::to_value(&initial) {
        Ok(value) => value,
        Err(error) => {
            warn!(key, %error, "default state not encodable, ignoring stored snapshot");
            return initial;
        }
    };
    merge_snapshot(&mut merged, stored);

    match serde_json::from_value(merged) {
        Ok(state) => state,
        Err(error) => {
            warn!(key, %error, "stored snapshot does not match store shape, using defaults");
            initial
        }
    }
}

/// Deep-merges `overlay` onto `base`.
///
/// Objects merge key by key; arrays and scalars replace. `null` in the
/// overlay leaves the base value untouched.
pub fn merge_snapshot(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge_snapshot(slot, value),
                    None => {
                        if !value.is_null() {
                            base.insert(key, value);
                        }
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
