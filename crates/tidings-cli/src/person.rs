//! A diner that reacts to breakfast events.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local};
use serde_json::{Value, json};
use tidings_events::{Callback, Dispatcher, HandlerResult, SubscriberId, WeakDispatcher};
use tracing::debug;

use crate::printer::Printer;

/// Emitted with the menu once breakfast is served.
pub(crate) const BREAKFAST_READY: &str = "breakfast:ready";
/// Emitted by a person with `{"seat", "name", "foods"}` after eating.
pub(crate) const EAT_DONE: &str = "eat:done";

/// Display text for one menu item: strings verbatim, anything else as JSON.
pub(crate) fn food_label(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) struct Person {
    seat: usize,
    name: String,
    foods: Mutex<Vec<String>>,
    events: WeakDispatcher,
    printer: Printer,
    eat: Callback,
    finish_eat: Callback,
}

impl Person {
    /// `seat` identifies the person in `eat:done` payloads; names may repeat.
    pub(crate) fn new(
        seat: usize,
        name: impl Into<String>,
        events: &Dispatcher,
        printer: Printer,
    ) -> Arc<Self> {
        Arc::new(Self {
            seat,
            name: name.into(),
            foods: Mutex::new(Vec::new()),
            events: events.downgrade(),
            printer,
            eat: Callback::method(|person: &Person, payload: &mut Value| person.eat(payload)),
            finish_eat: Callback::method(|person: &Person, _payload: &mut Value| {
                person.finish_eat(Local::now())
            }),
        })
    }

    pub(crate) fn foods(&self) -> Vec<String> {
        self.foods
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Subscribe `eat`, bound to this person, to `breakfast:ready`.
    pub(crate) fn wait_to_eat(self: &Arc<Self>) -> Option<SubscriberId> {
        let events = self.events.upgrade()?;
        Some(events.subscribe_with_context(BREAKFAST_READY, &self.eat, Arc::clone(self)))
    }

    /// Eat everything on the menu, then announce `eat:done`.
    pub(crate) fn eat(&self, menu: &Value) -> HandlerResult {
        let foods: Vec<String> = menu
            .as_array()
            .ok_or_else(|| format!("{} expected a list of foods, got {menu}", self.name))?
            .iter()
            .map(food_label)
            .collect();

        self.printer.row([
            "I'm",
            self.name.as_str(),
            "and I'm eating",
            foods.join(", ").as_str(),
        ])?;

        *self.foods.lock().unwrap_or_else(PoisonError::into_inner) = foods.clone();

        if let Some(events) = self.events.upgrade() {
            let done = json!({ "seat": self.seat, "name": self.name, "foods": foods });
            events.emit(EAT_DONE, done)?;
        }
        Ok(())
    }

    /// Report the time and try to stop listening for breakfast.
    ///
    /// The removal targets the unbound `finish_eat` callback, which was never
    /// subscribed, so the bound `eat` subscription stays in place.
    pub(crate) fn finish_eat(&self, time: DateTime<Local>) -> HandlerResult {
        let time = time.format("%a %b %d %Y %H:%M:%S").to_string();
        self.printer.row([
            "I'm",
            self.name.as_str(),
            "and I finished eating at",
            time.as_str(),
        ])?;

        if let Some(events) = self.events.upgrade() {
            let removed = events.unsubscribe(BREAKFAST_READY, Some(&self.finish_eat));
            debug!(person = %self.name, removed, "Stopped waiting for breakfast");
        }
        Ok(())
    }

    /// Print one line per food eaten.
    pub(crate) fn log_food(&self) -> std::io::Result<()> {
        for item in self.foods() {
            self.printer
                .row([format!("I'm {} and I ate {item}", self.name)])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::testing::capture;

    #[test]
    fn test_wait_to_eat_binds_person() {
        let dispatcher = Dispatcher::new();
        let (printer, buffer) = capture();
        let john = Person::new(0, "John", &dispatcher, printer);

        assert!(john.wait_to_eat().is_some());
        dispatcher
            .emit(BREAKFAST_READY, json!(["eggs", "bread"]))
            .unwrap();

        assert_eq!(buffer.lines(), vec!["I'm John and I'm eating eggs, bread"]);
        assert_eq!(john.foods(), vec!["eggs", "bread"]);
    }

    #[test]
    fn test_eat_announces_done() {
        let dispatcher = Dispatcher::new();
        let (printer, _buffer) = capture();
        let john = Person::new(0, "John", &dispatcher, printer);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        dispatcher.subscribe(
            EAT_DONE,
            &Callback::new(move |payload| {
                sink.lock().unwrap().push(payload.clone());
                Ok(())
            }),
        );

        john.eat(&json!(["toast"])).unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![json!({"seat": 0, "name": "John", "foods": ["toast"]})]
        );
    }

    #[test]
    fn test_eat_rejects_non_list() {
        let dispatcher = Dispatcher::new();
        let (printer, buffer) = capture();
        let john = Person::new(0, "John", &dispatcher, printer);

        assert!(john.eat(&json!({"eggs": 2})).is_err());
        assert!(buffer.lines().is_empty());
    }

    #[test]
    fn test_finish_eat_leaves_bound_subscription() {
        let dispatcher = Dispatcher::new();
        let (printer, buffer) = capture();
        let john = Person::new(0, "John", &dispatcher, printer);
        john.wait_to_eat();

        john.finish_eat(Local::now()).unwrap();

        assert_eq!(dispatcher.subscriber_count(BREAKFAST_READY), 1);
        assert!(buffer.lines()[0].starts_with("I'm John and I finished eating at "));
    }

    #[test]
    fn test_log_food() {
        let dispatcher = Dispatcher::new();
        let (printer, buffer) = capture();
        let john = Person::new(0, "John", &dispatcher, printer);

        john.eat(&json!(["eggs", 2])).unwrap();
        john.log_food().unwrap();

        assert_eq!(
            buffer.lines(),
            vec![
                "I'm John and I'm eating eggs, 2",
                "I'm John and I ate eggs",
                "I'm John and I ate 2",
            ]
        );
    }

    #[test]
    fn test_person_outliving_dispatcher() {
        let dispatcher = Dispatcher::new();
        let (printer, _buffer) = capture();
        let john = Person::new(0, "John", &dispatcher, printer);
        drop(dispatcher);

        assert!(john.wait_to_eat().is_none());
        assert!(john.eat(&json!(["eggs"])).is_ok());
    }
}
