//! `tidings breakfast`: the demo scenario.
//!
//! Wiring order matters: the `eat:done` printer and the menu printer are
//! registered before anyone sits down, and the `finish_eat` hook last, so a
//! single `breakfast:ready` emission prints the whole story in order.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use serde_json::{Value, json};
use tidings_config::DemoSection;
use tidings_events::{Callback, Dispatcher};
use tracing::info;

use crate::person::{BREAKFAST_READY, EAT_DONE, Person, food_label};
use crate::printer::Printer;

fn describe(menu: &Value) -> String {
    match menu {
        Value::Array(items) => items.iter().map(food_label).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

fn person_name(payload: &Value) -> &str {
    payload.get("name").and_then(Value::as_str).unwrap_or("someone")
}

fn seated<'a>(roster: &'a [Arc<Person>], payload: &Value) -> Option<&'a Arc<Person>> {
    let seat = payload.get("seat").and_then(Value::as_u64)?;
    roster.get(usize::try_from(seat).ok()?)
}

pub(crate) fn run(demo: &DemoSection, printer: &Printer) -> Result<()> {
    let dispatcher = Dispatcher::new();

    let out = printer.clone();
    dispatcher.subscribe(
        EAT_DONE,
        &Callback::new(move |person| {
            out.row([person_name(person), "finished eating"])?;
            Ok(())
        }),
    );

    let out = printer.clone();
    dispatcher.subscribe(
        BREAKFAST_READY,
        &Callback::new(move |menu| {
            out.row(["Breakfast is ready with:", describe(menu).as_str()])?;
            Ok(())
        }),
    );

    let people: Vec<Arc<Person>> = demo
        .people
        .iter()
        .enumerate()
        .map(|(seat, name)| Person::new(seat, name.as_str(), &dispatcher, printer.clone()))
        .collect();
    for person in &people {
        person.wait_to_eat();
    }

    let roster = people.clone();
    dispatcher.subscribe(
        EAT_DONE,
        &Callback::new(move |payload| {
            if let Some(person) = seated(&roster, payload) {
                person.finish_eat(Local::now())?;
            }
            Ok(())
        }),
    );

    info!(
        people = people.len(),
        items = demo.menu.len(),
        spread = demo.spread,
        "Serving breakfast"
    );

    let served = if demo.spread {
        dispatcher.emit_args(BREAKFAST_READY, demo.menu.iter().map(String::as_str))
    } else {
        dispatcher.emit(BREAKFAST_READY, json!(demo.menu))
    };
    served.context("breakfast did not go as planned")?;

    for person in &people {
        person.log_food()?;
    }
    Ok(())
}
