//! Scoped dismiss notifications.
//!
//! A page registers cleanup work with [`DismissRegistry::subscribe`] and
//! holds the returned [`DismissGuard`] for as long as it is interested;
//! dropping the guard unregisters the callback. [`DismissRegistry::notify`]
//! runs every callback still registered. No UI framework involved: this is
//! plain acquire-on-subscribe, release-on-drop.

use std::sync::{Arc, Mutex, Weak};

type Callback = Box<dyn FnMut() + Send>;

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    listeners: Vec<(u64, Callback)>,
}

#[derive(Clone, Default)]
pub struct DismissRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl DismissRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; it stays live until the guard is dropped.
    pub fn subscribe(&self, callback: impl FnMut() + Send + 'static) -> DismissGuard {
        let mut inner = self.inner.lock().expect("dismiss registry lock");
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Box::new(callback)));
        DismissGuard {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Run every live callback, in registration order.
    ///
    /// The registry lock is held while callbacks run; callbacks must not
    /// subscribe or drop guards themselves.
    pub fn notify(&self) {
        let mut inner = self.inner.lock().expect("dismiss registry lock");
        for (_, callback) in inner.listeners.iter_mut() {
            callback();
        }
    }
}

/// Unregisters its callback when dropped.
pub struct DismissGuard {
    id: u64,
    registry: Weak<Mutex<RegistryInner>>,
}

impl Drop for DismissGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            let mut inner = inner.lock().expect("dismiss registry lock");
            inner.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
