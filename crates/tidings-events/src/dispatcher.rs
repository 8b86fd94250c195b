//! Named-event dispatcher.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde_json::Value;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::callback::Callback;
use crate::error::{EventsError, EventsResult};
use crate::payload;

/// Registration handle for a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscriber:{}", self.0)
    }
}

#[derive(Clone)]
struct Subscriber {
    id: SubscriberId,
    callback: Callback,
}

type Registry = HashMap<String, Vec<Subscriber>>;

/// Synchronous fan-out of named events to registered callbacks.
///
/// Clones share the same registry. Subscribers that need to emit from inside
/// a handler should hold a [`WeakDispatcher`] so the registry does not keep
/// itself alive through the callbacks it stores.
#[derive(Clone, Default)]
pub struct Dispatcher {
    registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.lock();
        f.debug_struct("Dispatcher")
            .field("event_count", &registry.len())
            .field(
                "subscriber_count",
                &registry.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}

impl Dispatcher {
    /// Create a dispatcher with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // A handler never runs while the lock is held, so poisoning carries no
    // half-applied registry update.
    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn register(&self, name: &str, callback: Callback, bound: bool) -> SubscriberId {
        let id = SubscriberId::new();
        self.lock()
            .entry(name.to_owned())
            .or_default()
            .push(Subscriber { id, callback });

        debug!(event = %name, subscriber_id = %id, bound, "Subscriber registered");
        id
    }

    /// Append `callback` to the subscribers of `name`.
    ///
    /// The callback is stored as-is, so passing the same `callback` to
    /// [`Dispatcher::unsubscribe`] later removes it.
    pub fn subscribe(&self, name: &str, callback: &Callback) -> SubscriberId {
        self.register(name, callback.clone(), false)
    }

    /// Append `callback` bound to `context` to the subscribers of `name`.
    ///
    /// The stored entry is `callback.bind(context)`, a new callback. Passing
    /// the original `callback` to [`Dispatcher::unsubscribe`] therefore does
    /// not remove it; use [`Dispatcher::unsubscribe_id`] with the returned id.
    pub fn subscribe_with_context<C>(
        &self,
        name: &str,
        callback: &Callback,
        context: Arc<C>,
    ) -> SubscriberId
    where
        C: Any + Send + Sync,
    {
        self.register(name, callback.bind(context), true)
    }

    /// Remove subscribers of `name`.
    ///
    /// With `None` the whole entry for `name` is deleted. With a callback,
    /// every stored entry equal to it is removed; the (possibly empty) list
    /// stays in place. Unknown names are a no-op.
    ///
    /// Returns the number of subscribers removed.
    pub fn unsubscribe(&self, name: &str, callback: Option<&Callback>) -> usize {
        // Removed entries are dropped after the lock is released: a bound
        // context may emit from its `Drop`.
        let removed: Vec<Subscriber> = {
            let mut registry = self.lock();
            match callback {
                None => registry.remove(name).unwrap_or_default(),
                Some(callback) => match registry.get_mut(name) {
                    Some(subscribers) => {
                        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(subscribers)
                            .into_iter()
                            .partition(|s| s.callback == *callback);
                        *subscribers = kept;
                        removed
                    },
                    None => Vec::new(),
                },
            }
        };

        if callback.is_none() {
            debug!(event = %name, removed = removed.len(), "Event cleared");
        } else if removed.is_empty() {
            trace!(event = %name, "No subscriber matched callback");
        } else {
            debug!(event = %name, removed = removed.len(), "Subscriber unregistered");
        }

        removed.len()
    }

    /// Remove the subscriber registered under `id`.
    ///
    /// Unlike [`Dispatcher::unsubscribe`] this also removes context-bound
    /// subscribers. Returns `true` if the subscriber was found.
    pub fn unsubscribe_id(&self, name: &str, id: SubscriberId) -> bool {
        let removed = {
            let mut registry = self.lock();
            registry.get_mut(name).and_then(|subscribers| {
                subscribers
                    .iter()
                    .position(|s| s.id == id)
                    .map(|index| subscribers.remove(index))
            })
        };

        if removed.is_some() {
            debug!(event = %name, subscriber_id = %id, "Subscriber unregistered");
        }

        removed.is_some()
    }

    /// Emit `name` with a single payload.
    ///
    /// Objects, arrays and `null` are delivered unchanged; any other value is
    /// delivered as a one-element array.
    ///
    /// # Errors
    ///
    /// Returns [`EventsError::Handler`] for the first subscriber that fails.
    /// Subscribers after it are not invoked.
    pub fn emit(&self, name: &str, payload: Value) -> EventsResult<()> {
        self.deliver(name, payload::normalize_single(payload))
    }

    /// Emit `name` with a list of arguments.
    ///
    /// See [`payload::normalize`] for how the arguments become the payload.
    ///
    /// # Errors
    ///
    /// Returns [`EventsError::Handler`] for the first subscriber that fails.
    /// Subscribers after it are not invoked.
    pub fn emit_args<I>(&self, name: &str, args: I) -> EventsResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.deliver(name, payload::normalize(args))
    }

    fn deliver(&self, name: &str, mut payload: Value) -> EventsResult<()> {
        let snapshot = {
            let registry = self.lock();
            match registry.get(name) {
                Some(subscribers) => subscribers.clone(),
                None => {
                    trace!(event = %name, "No subscribers for event");
                    return Ok(());
                },
            }
        };

        trace!(event = %name, subscriber_count = snapshot.len(), "Emitting event");

        for (position, subscriber) in snapshot.iter().enumerate() {
            trace!(
                event = %name,
                position,
                subscriber_id = %subscriber.id,
                "Notifying subscriber"
            );

            if let Err(source) = subscriber.callback.call(&mut payload) {
                warn!(
                    event = %name,
                    position,
                    subscriber_id = %subscriber.id,
                    error = %source,
                    "Subscriber failed, aborting emission"
                );
                return Err(EventsError::Handler {
                    event: name.to_owned(),
                    position,
                    source,
                });
            }
        }

        Ok(())
    }

    /// Number of subscribers registered under `name`.
    #[must_use]
    pub fn subscriber_count(&self, name: &str) -> usize {
        self.lock().get(name).map_or(0, Vec::len)
    }

    /// Whether at least one subscriber is registered under `name`.
    #[must_use]
    pub fn has_subscribers(&self, name: &str) -> bool {
        self.subscriber_count(name) > 0
    }

    /// Event names with an entry in the registry, sorted.
    ///
    /// Includes names whose subscribers were all removed by reference.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Total number of subscribers across all events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    /// Whether no subscriber is registered for any event.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create a non-owning handle onto this dispatcher's registry.
    #[must_use]
    pub fn downgrade(&self) -> WeakDispatcher {
        WeakDispatcher {
            registry: Arc::downgrade(&self.registry),
        }
    }
}

/// Non-owning handle onto a [`Dispatcher`].
#[derive(Clone, Default)]
pub struct WeakDispatcher {
    registry: Weak<Mutex<Registry>>,
}

impl WeakDispatcher {
    /// Upgrade to a [`Dispatcher`] if any strong handle is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Dispatcher> {
        self.registry.upgrade().map(|registry| Dispatcher { registry })
    }
}

impl fmt::Debug for WeakDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakDispatcher")
            .field("alive", &(self.registry.strong_count() > 0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, Callback) {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        let cb = Callback::new(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        (count, cb)
    }

    #[test]
    fn test_dispatcher_creation() {
        let dispatcher = Dispatcher::new();
        assert!(dispatcher.is_empty());
        assert!(dispatcher.event_names().is_empty());
    }

    #[test]
    fn test_subscribe_and_emit() {
        let dispatcher = Dispatcher::new();
        let (count, cb) = counter();

        dispatcher.subscribe("tick", &cb);
        assert_eq!(dispatcher.subscriber_count("tick"), 1);

        dispatcher.emit("tick", json!({})).unwrap();
        dispatcher.emit("tick", json!({})).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_same_callback_registered_twice() {
        let dispatcher = Dispatcher::new();
        let (count, cb) = counter();

        dispatcher.subscribe("tick", &cb);
        dispatcher.subscribe("tick", &cb);
        dispatcher.emit("tick", json!(1)).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);

        assert_eq!(dispatcher.unsubscribe("tick", Some(&cb)), 2);
        assert_eq!(dispatcher.subscriber_count("tick"), 0);
    }

    #[test]
    fn test_unsubscribe_by_reference_keeps_key() {
        let dispatcher = Dispatcher::new();
        let (_, cb) = counter();

        dispatcher.subscribe("tick", &cb);
        dispatcher.unsubscribe("tick", Some(&cb));

        assert!(!dispatcher.has_subscribers("tick"));
        assert_eq!(dispatcher.event_names(), vec!["tick".to_string()]);
    }

    #[test]
    fn test_unsubscribe_by_name_removes_key() {
        let dispatcher = Dispatcher::new();
        let (_, cb) = counter();

        dispatcher.subscribe("tick", &cb);
        assert_eq!(dispatcher.unsubscribe("tick", None), 1);
        assert!(dispatcher.event_names().is_empty());
    }

    #[test]
    fn test_unsubscribe_unknown_event() {
        let dispatcher = Dispatcher::new();
        let (_, cb) = counter();

        assert_eq!(dispatcher.unsubscribe("nope", Some(&cb)), 0);
        assert_eq!(dispatcher.unsubscribe("nope", None), 0);
        assert!(dispatcher.event_names().is_empty());
    }

    #[test]
    fn test_unsubscribe_id() {
        let dispatcher = Dispatcher::new();
        let (_, cb) = counter();

        let id = dispatcher.subscribe_with_context("tick", &cb, Arc::new(()));
        assert!(!dispatcher.unsubscribe_id("other", id));
        assert!(dispatcher.unsubscribe_id("tick", id));
        assert!(!dispatcher.unsubscribe_id("tick", id));
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_clones_share_registry() {
        let dispatcher = Dispatcher::new();
        let cloned = dispatcher.clone();
        let (count, cb) = counter();

        cloned.subscribe("tick", &cb);
        dispatcher.emit("tick", json!([])).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn test_independent_dispatchers() {
        let a = Dispatcher::new();
        let b = Dispatcher::new();
        let (count, cb) = counter();

        a.subscribe("tick", &cb);
        b.emit("tick", json!([])).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(b.is_empty());
    }

    #[test]
    fn test_weak_dispatcher_upgrade() {
        let dispatcher = Dispatcher::new();
        let weak = dispatcher.downgrade();
        assert!(weak.upgrade().is_some());

        drop(dispatcher);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_dispatcher_drop_releases_contexts() {
        struct DropNotify(Arc<AtomicUsize>);
        impl Drop for DropNotify {
            fn drop(&mut self) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let drops = Arc::new(AtomicUsize::new(0));
        let dispatcher = Dispatcher::new();
        let (_, cb) = counter();

        dispatcher.subscribe_with_context(
            "tick",
            &cb,
            Arc::new(DropNotify(Arc::clone(&drops))),
        );
        assert_eq!(drops.load(Ordering::SeqCst), 0);

        drop(dispatcher);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_context_emitting_from_drop_does_not_deadlock() {
        struct EmitOnDrop(Dispatcher);
        impl Drop for EmitOnDrop {
            fn drop(&mut self) {
                // Needs the registry lock; must not be called under it.
                self.0.emit("dropped", json!({})).unwrap();
            }
        }

        let dispatcher = Dispatcher::new();
        let (dropped, on_dropped) = counter();
        dispatcher.subscribe("dropped", &on_dropped);

        let (_, cb) = counter();
        let id = dispatcher.subscribe_with_context(
            "tick",
            &cb,
            Arc::new(EmitOnDrop(dispatcher.clone())),
        );

        assert!(dispatcher.unsubscribe_id("tick", id));
        assert_eq!(dropped.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_debug_output() {
        let dispatcher = Dispatcher::new();
        let (_, cb) = counter();
        dispatcher.subscribe("a", &cb);
        dispatcher.subscribe("b", &cb);

        let debug = format!("{dispatcher:?}");
        assert!(debug.contains("event_count: 2"));
        assert!(debug.contains("subscriber_count: 2"));
    }

    #[test]
    fn test_subscriber_id_display() {
        let id = SubscriberId::new();
        assert!(id.to_string().starts_with("subscriber:"));
    }

    #[test]
    fn test_subscriber_ids_are_per_registration() {
        let dispatcher = Dispatcher::new();
        let (count, cb) = counter();

        let first = dispatcher.subscribe("tick", &cb);
        let second = dispatcher.subscribe("tick", &cb);
        assert_ne!(first, second);

        let ids: std::collections::HashSet<SubscriberId> = [first, second, first].into();
        assert_eq!(ids.len(), 2);

        assert!(dispatcher.unsubscribe_id("tick", first));
        dispatcher.emit("tick", json!({})).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
