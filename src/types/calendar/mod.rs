mod calendar_event;
pub use calendar_event::*;

mod month_events;
pub use month_events::*;

mod note;
pub use note::*;
