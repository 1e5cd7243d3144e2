mod item_forms;
pub use item_forms::*;

mod service;
pub use service::*;
