//! Test fixtures for common payloads and receivers.

use serde_json::{Value, json};

/// Receiver type used to exercise context-bound callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diner {
    /// Name recorded by [`Recorder::diner_method`](crate::Recorder::diner_method).
    pub name: String,
}

impl Diner {
    /// Create a diner.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The breakfast menu as scalar arguments.
#[must_use]
pub fn breakfast_items() -> Vec<&'static str> {
    vec!["scrambled eggs", "tomatoes", "bread", "butter"]
}

/// The breakfast menu as a single array payload.
#[must_use]
pub fn breakfast_menu() -> Value {
    json!(breakfast_items())
}

/// A structured object payload.
#[must_use]
pub fn sample_order() -> Value {
    json!({
        "table": 4,
        "items": ["coffee", "toast"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_matches_items() {
        let menu = breakfast_menu();
        assert_eq!(menu.as_array().map(Vec::len), Some(breakfast_items().len()));
    }

    #[test]
    fn test_sample_order_is_object() {
        assert!(sample_order().is_object());
    }
}
