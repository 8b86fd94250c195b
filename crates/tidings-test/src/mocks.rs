//! Recording callbacks for testing.

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use tidings_events::Callback;

use crate::fixtures::Diner;

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Label of the callback that ran.
    pub label: String,
    /// Payload as the callback saw it.
    pub payload: Value,
}

/// Shared call log that hands out labelled callbacks.
///
/// Every callback produced by one recorder appends to the same log, so the
/// log order is the order in which the dispatcher invoked them.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl Recorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, label: String, payload: &Value) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                label,
                payload: payload.clone(),
            });
    }

    /// A callback that records `label` and the payload.
    #[must_use]
    pub fn callback(&self, label: impl Into<String>) -> Callback {
        let recorder = self.clone();
        let label = label.into();
        Callback::new(move |payload| {
            recorder.record(label.clone(), payload);
            Ok(())
        })
    }

    /// A callback that records and then appends `item` to an array payload.
    #[must_use]
    pub fn appending(&self, label: impl Into<String>, item: Value) -> Callback {
        let recorder = self.clone();
        let label = label.into();
        Callback::new(move |payload| {
            recorder.record(label.clone(), payload);
            if let Value::Array(items) = payload {
                items.push(item.clone());
            }
            Ok(())
        })
    }

    /// A callback that records and then fails with `message`.
    #[must_use]
    pub fn failing(&self, label: impl Into<String>, message: impl Into<String>) -> Callback {
        let recorder = self.clone();
        let label = label.into();
        let message = message.into();
        Callback::new(move |payload| {
            recorder.record(label.clone(), payload);
            Err(message.clone().into())
        })
    }

    /// A method callback on [`Diner`] recording `label:diner-name`.
    ///
    /// Must be bound to a `Diner` before it can run successfully.
    #[must_use]
    pub fn diner_method(&self, label: impl Into<String>) -> Callback {
        let recorder = self.clone();
        let label = label.into();
        Callback::method(move |diner: &Diner, payload: &mut Value| {
            recorder.record(format!("{label}:{}", diner.name), payload);
            Ok(())
        })
    }

    /// All recorded calls, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Labels of all recorded calls, oldest first.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.label).collect()
    }

    /// Payloads of all recorded calls, oldest first.
    #[must_use]
    pub fn payloads(&self) -> Vec<Value> {
        self.calls().into_iter().map(|c| c.payload).collect()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

}
