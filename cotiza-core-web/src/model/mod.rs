mod serialize_ctx;
pub use serialize_ctx::*;

#[cfg(target_arch = "wasm32")]
mod model;
#[cfg(target_arch = "wasm32")]
pub use model::*;
