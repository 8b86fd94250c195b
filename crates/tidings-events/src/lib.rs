//! Tidings Events - Synchronous named-event dispatcher.
//!
//! This crate provides:
//! - A [`Dispatcher`] mapping event names to ordered subscriber lists
//! - [`Callback`] values with optional permanent receiver binding
//! - Payload normalization for single-value and variadic emissions
//!
//! # Architecture
//!
//! Every `emit` runs inline: the dispatcher takes a snapshot of the
//! subscribers registered under the event name, releases its lock, and
//! invokes them one after another in registration order. All subscribers of
//! one emission share the same payload value, so a mutation made by an
//! earlier subscriber is visible to the later ones.
//!
//! There are two ways to emit:
//!
//! 1. **Single payload**: `emit(name, value)` delivers objects and arrays
//!    unchanged and wraps a scalar into a one-element array.
//!
//! 2. **Variadic**: `emit_args(name, args)` delivers the first argument alone
//!    when it is structured, otherwise the whole argument list as an array.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use serde_json::json;
//! use tidings_events::{Callback, Dispatcher};
//!
//! let dispatcher = Dispatcher::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! let on_ready = Callback::new(move |menu| {
//!     sink.lock().unwrap().push(menu.clone());
//!     Ok(())
//! });
//!
//! dispatcher.subscribe("breakfast:ready", &on_ready);
//! dispatcher.emit_args("breakfast:ready", ["eggs", "toast"])?;
//! dispatcher.emit("breakfast:ready", json!({"eggs": 2}))?;
//!
//! let seen = seen.lock().unwrap();
//! assert_eq!(seen[0], json!(["eggs", "toast"]));
//! assert_eq!(seen[1], json!({"eggs": 2}));
//! # Ok::<(), tidings_events::EventsError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod payload;
pub mod prelude;

mod callback;
mod dispatcher;
mod error;

pub use callback::{Callback, HandlerResult, Receiver};
pub use dispatcher::{Dispatcher, SubscriberId, WeakDispatcher};
pub use error::{EventsError, EventsResult, HandlerError};
