use std::sync::RwLock;

use futures::{future, StreamExt};
use gloo_utils::format::JsValueSerdeExt;
use lazy_static::lazy_static;
use tracing::{error, info, Level};
use tracing_wasm::WASMLayerConfigBuilder;
use wasm_bindgen::{prelude::wasm_bindgen, JsValue};

use cotiza_core::{
    models::{common::Loadable, ctx::pull_preferences_from_storage},
    runtime::{
        msg::{Action, ActionCtx, Event},
        read_model, Env, EnvError, Runtime, RuntimeAction, RuntimeEvent,
    },
    types::{format::format_price, sidebar::active_page},
};

use crate::{
    env::WebEnv,
    model::{WebModel, WebModelField},
};

lazy_static! {
    static ref RUNTIME: RwLock<Option<Loadable<Runtime<WebEnv, WebModel>, EnvError>>> =
        Default::default();
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    #[cfg(any(debug_assertions, feature = "log-trace"))]
    let max_level = Level::TRACE;
    #[cfg(all(not(debug_assertions), not(feature = "log-trace")))]
    let max_level = Level::ERROR;

    let config = WASMLayerConfigBuilder::default()
        .set_max_level(max_level)
        .build();
    tracing_wasm::set_as_global_default_with_config(config);

    info!(?max_level, "Logging level");
}

#[wasm_bindgen]
pub async fn initialize_runtime(emit_to_ui: js_sys::Function) -> Result<(), JsValue> {
    if RUNTIME.read().expect("runtime read failed").is_some() {
        panic!("runtime initialization has already started");
    };

    *RUNTIME.write().expect("runtime write failed") = Some(Loadable::Loading);
    match pull_preferences_from_storage::<WebEnv>().await {
        Ok(preferences) => {
            let csrf_token = WebEnv::csrf_sources().resolve();
            if csrf_token.is_none() {
                tracing::warn!("No CSRF token found in the page");
            }
            let model = WebModel::new(csrf_token, preferences);
            let (runtime, rx) = Runtime::<WebEnv, _>::new(model, vec![], 1000);
            WebEnv::exec_concurrent(rx.for_each(move |event| {
                if let RuntimeEvent::CoreEvent(event) = &event {
                    handle_core_event(event);
                };
                emit_to_ui
                    .call1(
                        &JsValue::NULL,
                        &<JsValue as JsValueSerdeExt>::from_serde(&event)
                            .expect("Event handler: JsValue from Event"),
                    )
                    .expect("emit event failed");
                future::ready(())
            }));
            *RUNTIME.write().expect("runtime write failed") = Some(Loadable::Ready(runtime));
            Ok(())
        }
        Err(error) => {
            *RUNTIME.write().expect("runtime write failed") = Some(Loadable::Err(error.to_owned()));
            Err(<JsValue as JsValueSerdeExt>::from_serde(&error)
                .expect("Storage: JsValue from EnvError"))
        }
    }
}

/// Side effects of core events that only the browser can perform.
fn handle_core_event(event: &Event) {
    match event {
        Event::Error { error, source } => {
            error!("{:?} failed: {}", source, error.message());
            WebEnv::alert(&error.message());
        }
        Event::EntityDeleted {
            message: Some(message),
            ..
        } => WebEnv::alert(message),
        Event::PageReloadRequested => WebEnv::reload(),
        Event::NavigationRequested { url } => WebEnv::navigate(url),
        Event::ShareWindowRequested { url } => WebEnv::open_share_window(url),
        _ => {}
    }
}

#[wasm_bindgen]
#[cfg(debug_assertions)]
pub fn get_debug_state() -> JsValue {
    let runtime = RUNTIME.read().expect("runtime read failed");
    let runtime = runtime
        .as_ref()
        .expect("runtime is not ready")
        .as_ref()
        .expect("runtime is not ready");
    let model = read_model(runtime.model());
    <JsValue as JsValueSerdeExt>::from_serde(&*model).expect("JsValue from WebModel")
}

#[wasm_bindgen]
pub fn get_state(field: JsValue) -> JsValue {
    let field = JsValueSerdeExt::into_serde(&field).expect("get state failed");
    let runtime = RUNTIME.read().expect("runtime read failed");
    let runtime = runtime
        .as_ref()
        .expect("runtime is not ready")
        .as_ref()
        .expect("runtime is not ready");
    let model = read_model(runtime.model());
    model.get_state(&field)
}

#[wasm_bindgen]
pub fn dispatch(action: JsValue, field: JsValue) {
    let action: Action =
        JsValueSerdeExt::into_serde(&action).expect("dispatch failed because of Action");
    let field: Option<WebModelField> =
        JsValueSerdeExt::into_serde(&field).expect("dispatch failed because of Field");
    let runtime = RUNTIME.read().expect("runtime read failed");
    let runtime = runtime
        .as_ref()
        .expect("runtime is not ready - None")
        .as_ref()
        .expect("runtime is not ready - Loading or Error");
    runtime.dispatch(RuntimeAction { action, field });
}

/// Re-reads the CSRF sources of the document, e.g. after a form swapped the token.
#[wasm_bindgen]
pub fn refresh_csrf_token() {
    let action = Action::Ctx(ActionCtx::UpdateCsrfSources(WebEnv::csrf_sources()));
    let runtime = RUNTIME.read().expect("runtime read failed");
    let runtime = runtime
        .as_ref()
        .expect("runtime is not ready - None")
        .as_ref()
        .expect("runtime is not ready - Loading or Error");
    runtime.dispatch(RuntimeAction {
        action,
        field: Some(WebModelField::Ctx),
    });
}

#[wasm_bindgen]
pub fn get_active_page(path: String, pages: JsValue) -> JsValue {
    let pages: Vec<String> = JsValueSerdeExt::into_serde(&pages).unwrap_or_default();
    match active_page(&path, &pages) {
        Some(page) => JsValue::from_str(page),
        None => JsValue::NULL,
    }
}

#[wasm_bindgen]
pub fn format_currency(value: f64) -> String {
    format_price(value)
}
