mod fetch_api;
pub use fetch_api::*;

mod update_preferences;
pub use update_preferences::*;

mod error;
pub use error::*;

mod ctx;
pub use ctx::*;
