use futures::channel::mpsc::Receiver;

use crate::runtime::{msg::Event, Env, Model, RuntimeEvent};

mod env;
pub use env::*;

mod calendar;
mod landing;
mod quote_editor;
mod table_with_filters;

/// Drains the core events emitted so far, skipping state updates.
pub fn core_events<E: Env, M: Model<E>>(rx: &mut Receiver<RuntimeEvent<E, M>>) -> Vec<Event> {
    let mut events = vec![];
    while let Ok(Some(event)) = rx.try_next() {
        if let RuntimeEvent::CoreEvent(event) = event {
            events.push(event);
        }
    }
    events
}
