//! Class registries shared between executions.
//!
//! Each `Runtime` owns its variables and stacks, but a host usually defines
//! its classes once. `SharedMutableRegistry` is the handle the host clones
//! into every runtime it builds; all clones see the same table.

use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable handle to a registry behind a read-write lock.
///
/// The runtime takes a guard only for the length of one lookup or
/// definition and never while a script routine runs, so a routine may
/// itself define classes.
pub struct SharedMutableRegistry<T>(Arc<RwLock<T>>);

impl<T> SharedMutableRegistry<T> {
    pub fn new(registry: T) -> Self {
        SharedMutableRegistry(Arc::new(RwLock::new(registry)))
    }

    /// Shared access for lookups.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read()
    }

    /// Exclusive access for definitions.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write()
    }

    /// Returns `true` if both handles point at the same registry.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for SharedMutableRegistry<T> {
    fn clone(&self) -> Self {
        SharedMutableRegistry(Arc::clone(&self.0))
    }
}

impl<T: Default> Default for SharedMutableRegistry<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedMutableRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedMutableRegistry")
            .field(&*self.0.read())
            .finish()
    }
}
