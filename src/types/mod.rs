pub mod api;
pub mod calendar;
pub mod csrf;
pub mod entity;
pub mod format;
pub mod notifications;
pub mod preferences;
pub mod quote;
pub mod share;
pub mod sidebar;
pub mod table;

mod number_or_string;
pub use number_or_string::*;

mod query_params_encode;
pub use query_params_encode::*;
