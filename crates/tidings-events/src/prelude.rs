//! Prelude module - commonly used types for convenient import.
//!
//! Use `use tidings_events::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust
//! use tidings_events::prelude::*;
//!
//! let dispatcher = Dispatcher::new();
//! let noop = Callback::new(|_payload| Ok(()));
//!
//! dispatcher.subscribe("tick", &noop);
//! dispatcher.emit_args("tick", [1, 2, 3])?;
//! # Ok::<(), EventsError>(())
//! ```

// Dispatcher
pub use crate::{Dispatcher, SubscriberId, WeakDispatcher};

// Callbacks
pub use crate::{Callback, HandlerResult, Receiver};

// Errors
pub use crate::{EventsError, EventsResult, HandlerError};
