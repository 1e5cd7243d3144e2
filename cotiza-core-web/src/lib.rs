pub mod model;

#[cfg(target_arch = "wasm32")]
pub mod env;
#[cfg(target_arch = "wasm32")]
mod cotiza_core_web;
#[cfg(target_arch = "wasm32")]
pub use cotiza_core_web::*;
