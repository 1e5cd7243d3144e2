use std::time::Duration;

use chrono::{offset::TimeZone, DateTime, NaiveDate, Utc};
use futures::{future, Future, FutureExt, TryFutureExt};
use gloo_timers::future::TimeoutFuture;
use http::{Method, Request};
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlDocument, HtmlInputElement, HtmlMetaElement, Storage, Window};

use cotiza_core::{
    constants::{CSRF_INPUT_NAME, CSRF_META_NAME},
    runtime::{Env, EnvError, EnvFuture, EnvFutureExt, TryEnvFuture},
    types::csrf::CsrfSources,
};

const UNKNOWN_ERROR: &str = "Unknown Error";

pub enum WebEnv {}

impl WebEnv {
    /// Reads every place of the document where the server may have left a CSRF token.
    pub fn csrf_sources() -> CsrfSources {
        let document = global().document();
        let meta = document
            .as_ref()
            .and_then(|document| {
                document
                    .query_selector(&format!("meta[name=\"{CSRF_META_NAME}\"]"))
                    .ok()
                    .flatten()
            })
            .and_then(|element| element.dyn_into::<HtmlMetaElement>().ok())
            .map(|meta| meta.content());
        let input = document
            .as_ref()
            .and_then(|document| {
                document
                    .query_selector(&format!("[name={CSRF_INPUT_NAME}]"))
                    .ok()
                    .flatten()
            })
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value());
        let cookie = document
            .and_then(|document| document.dyn_into::<HtmlDocument>().ok())
            .and_then(|document| document.cookie().ok())
            .unwrap_or_default();
        CsrfSources {
            meta,
            input,
            cookie,
        }
    }
    pub fn alert(message: &str) {
        if let Err(error) = global().alert_with_message(message) {
            tracing::warn!("alert failed: {:?}", error);
        }
    }
    pub fn reload() {
        if let Err(error) = global().location().reload() {
            tracing::warn!("reload failed: {:?}", error);
        }
    }
    pub fn navigate(url: &str) {
        if let Err(error) = global().location().set_href(url) {
            tracing::warn!("navigation to {} failed: {:?}", url, error);
        }
    }
    pub fn open_share_window(url: &str) {
        if let Err(error) =
            global().open_with_url_and_target_and_features(url, "_blank", "width=600,height=400")
        {
            tracing::warn!("share window failed: {:?}", error);
        }
    }
}

impl Env for WebEnv {
    fn fetch<IN, OUT>(request: Request<IN>) -> TryEnvFuture<OUT>
    where
        IN: Serialize,
        for<'de> OUT: Deserialize<'de> + 'static,
    {
        let (parts, body) = request.into_parts();
        let url = parts.uri.to_string();
        let headers = web_sys::Headers::new().expect("headers builder failed");
        for (key, value) in parts.headers.iter() {
            let value = String::from_utf8_lossy(value.as_bytes());
            if let Err(error) = headers.append(key.as_str(), &value) {
                return future::err(EnvError::Fetch(js_error_message(error))).boxed_env();
            }
        }
        // Form payloads arrive already encoded and are sent verbatim.
        let body = match serde_json::to_value(&body) {
            Ok(serde_json::Value::Null) => None,
            Ok(_) if parts.method == Method::GET => None,
            Ok(serde_json::Value::String(body)) => Some(JsValue::from_str(&body)),
            Ok(body) => Some(JsValue::from_str(&body.to_string())),
            Err(error) => return future::err(EnvError::from(error)).boxed_env(),
        };
        let request_options = web_sys::RequestInit::new();
        request_options.set_method(parts.method.as_str());
        request_options.set_headers(&headers);
        if let Some(body) = &body {
            request_options.set_body(body);
        }
        let request = match web_sys::Request::new_with_str_and_init(&url, &request_options) {
            Ok(request) => request,
            Err(error) => return future::err(EnvError::Fetch(js_error_message(error))).boxed_env(),
        };
        let promise = global().fetch_with_request(&request);
        async move {
            let resp = JsFuture::from(promise)
                .await
                .map_err(|error| EnvError::Fetch(js_error_message(error)))?
                .dyn_into::<web_sys::Response>()
                .map_err(|_| EnvError::Fetch(UNKNOWN_ERROR.to_owned()))?;
            if !resp.ok() {
                return Err(EnvError::HttpStatusCode(resp.status()));
            }
            let text = resp
                .text()
                .map_err(|error| EnvError::Fetch(js_error_message(error)))?;
            let text = JsFuture::from(text)
                .await
                .map_err(|error| EnvError::Fetch(js_error_message(error)))?
                .as_string()
                .unwrap_or_default();
            // Endpoints answering with an empty body still count as success.
            let text = if text.trim().is_empty() { "{}" } else { text.as_str() };
            serde_json::from_str(text).map_err(EnvError::from)
        }
        .boxed_local()
    }

    fn get_storage<T>(key: &str) -> TryEnvFuture<Option<T>>
    where
        for<'de> T: Deserialize<'de> + 'static,
    {
        let result = local_storage().and_then(|storage| {
            storage
                .get_item(key)
                .map_err(|error| EnvError::StorageReadError(js_error_message(error)))
        });
        future::ready(result)
            .and_then(|value| async move {
                value
                    .map(|value| serde_json::from_str(&value))
                    .transpose()
                    .map_err(EnvError::from)
            })
            .boxed_local()
    }

    fn set_storage<T: Serialize>(key: &str, value: Option<&T>) -> TryEnvFuture<()> {
        let result = local_storage().and_then(|storage| match value {
            Some(value) => serde_json::to_string(value)
                .map_err(EnvError::from)
                .and_then(|value| {
                    storage
                        .set_item(key, &value)
                        .map_err(|error| EnvError::StorageWriteError(js_error_message(error)))
                }),
            None => storage
                .remove_item(key)
                .map_err(|error| EnvError::StorageWriteError(js_error_message(error))),
        });
        future::ready(result).boxed_local()
    }

    fn exec_concurrent<F>(future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        spawn_local(future)
    }

    fn exec_sequential<F>(future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        spawn_local(future)
    }

    fn sleep(duration: Duration) -> EnvFuture<'static, ()> {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).boxed_env()
    }

    fn now() -> DateTime<Utc> {
        let msecs = js_sys::Date::now() as i64;
        let (secs, nsecs) = (msecs / 1000, msecs % 1000 * 1_000_000);
        Utc.timestamp_opt(secs, nsecs as u32)
            .single()
            .expect("Invalid timestamp")
    }

    /// The browser's local date, not the UTC one.
    fn today() -> NaiveDate {
        let date = js_sys::Date::new_0();
        NaiveDate::from_ymd_opt(
            date.get_full_year() as i32,
            date.get_month() + 1,
            date.get_date(),
        )
        .unwrap_or_else(|| Self::now().date_naive())
    }

    #[cfg(debug_assertions)]
    fn log(message: String) {
        web_sys::console::log_1(&JsValue::from(message));
    }
}

fn js_error_message(error: JsValue) -> String {
    error
        .dyn_into::<js_sys::Error>()
        .map(|error| String::from(error.message()))
        .unwrap_or_else(|_| UNKNOWN_ERROR.to_owned())
}

fn local_storage() -> Result<Storage, EnvError> {
    global()
        .local_storage()
        .map_err(|error| EnvError::StorageReadError(js_error_message(error)))?
        .ok_or(EnvError::StorageUnavailable)
}

fn global() -> Window {
    web_sys::window().expect("window is not available")
}
