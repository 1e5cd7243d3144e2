use gloo_utils::format::JsValueSerdeExt;
use wasm_bindgen::JsValue;

use cotiza_core::models::ctx::Ctx;

pub fn serialize_ctx(ctx: &Ctx) -> JsValue {
    <JsValue as JsValueSerdeExt>::from_serde(&model::Ctx::from(ctx)).expect("JsValue from Ctx")
}

mod model {
    use serde::Serialize;

    use cotiza_core::types::preferences::Preferences;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Ctx<'a> {
        pub preferences: &'a Preferences,
        /// The token itself never leaves the core.
        pub has_csrf_token: bool,
    }

    impl<'a> From<&'a cotiza_core::models::ctx::Ctx> for Ctx<'a> {
        fn from(ctx: &'a cotiza_core::models::ctx::Ctx) -> Self {
            Self {
                preferences: &ctx.preferences,
                has_csrf_token: ctx.csrf_token.is_some(),
            }
        }
    }
}
