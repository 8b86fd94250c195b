//! Subscriber callbacks and receiver binding.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{EventsError, HandlerError};

/// Result returned by a subscriber callback.
pub type HandlerResult = Result<(), HandlerError>;

/// Receiver handed to a callback when it runs. `None` for unbound calls.
pub type Receiver<'a> = Option<&'a (dyn Any + Send + Sync)>;

type CallbackFn = dyn Fn(Receiver<'_>, &mut Value) -> HandlerResult + Send + Sync;

fn erase<F>(f: F) -> Arc<CallbackFn>
where
    F: Fn(Receiver<'_>, &mut Value) -> HandlerResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A subscriber callback.
///
/// Cloning a `Callback` is cheap and yields the *same* callback: equality is
/// reference identity, which is what [`Dispatcher::unsubscribe`] compares.
/// [`Callback::bind`] on the other hand produces a new, distinct callback.
///
/// [`Dispatcher::unsubscribe`]: crate::Dispatcher::unsubscribe
#[derive(Clone)]
pub struct Callback {
    inner: Arc<CallbackFn>,
}

impl Callback {
    /// Create a callback from a function of the payload.
    ///
    /// The function ignores any receiver it is bound to.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Value) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            inner: erase(move |_receiver, payload| f(payload)),
        }
    }

    /// Create a callback that runs against a receiver of type `C`.
    ///
    /// The receiver is supplied by [`Callback::bind`]. Invoking the callback
    /// unbound, or bound to a value of another type, fails at call time with
    /// [`EventsError::MissingReceiver`] or [`EventsError::ReceiverMismatch`].
    pub fn method<C, F>(f: F) -> Self
    where
        C: Any + Send + Sync,
        F: Fn(&C, &mut Value) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            inner: erase(move |receiver, payload| {
                let receiver = receiver.ok_or(EventsError::MissingReceiver {
                    expected: type_name::<C>(),
                })?;
                let this =
                    receiver
                        .downcast_ref::<C>()
                        .ok_or(EventsError::ReceiverMismatch {
                            expected: type_name::<C>(),
                        })?;
                f(this, payload)
            }),
        }
    }

    /// Permanently bind this callback to `context`.
    ///
    /// Returns a new callback that is not equal to `self`. Binding an
    /// already-bound callback again has no effect on its receiver.
    #[must_use]
    pub fn bind<C>(&self, context: Arc<C>) -> Self
    where
        C: Any + Send + Sync,
    {
        let target = Arc::clone(&self.inner);
        Self {
            inner: erase(move |_receiver, payload| {
                let receiver: &(dyn Any + Send + Sync) = &*context;
                target(Some(receiver), payload)
            }),
        }
    }

    /// Invoke the callback without a receiver.
    ///
    /// # Errors
    ///
    /// Returns whatever error the underlying function returns.
    pub fn call(&self, payload: &mut Value) -> HandlerResult {
        (self.inner)(None, payload)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Callback {}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("ptr", &Arc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}
