//! Dispatcher error types.

use thiserror::Error;

/// Error type returned by subscriber callbacks.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while dispatching events.
#[derive(Debug, Error)]
pub enum EventsError {
    /// A subscriber failed; delivery to the remaining subscribers was aborted.
    #[error("Subscriber #{position} of event '{event}' failed: {source}")]
    Handler {
        /// Name of the event being emitted.
        event: String,
        /// Zero-based position of the failing subscriber in the snapshot.
        position: usize,
        /// Error returned by the subscriber.
        #[source]
        source: HandlerError,
    },

    /// A method callback was invoked without a bound receiver.
    #[error("Callback expects a receiver of type {expected} but was invoked unbound")]
    MissingReceiver {
        /// Type name of the receiver the callback was written for.
        expected: &'static str,
    },

    /// A method callback was bound to a receiver of another type.
    #[error("Callback expects a receiver of type {expected} but was bound to another type")]
    ReceiverMismatch {
        /// Type name of the receiver the callback was written for.
        expected: &'static str,
    },
}

/// Result type for dispatcher operations.
pub type EventsResult<T> = Result<T, EventsError>;
