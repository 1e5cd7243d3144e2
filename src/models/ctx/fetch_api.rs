use futures::{future, FutureExt, TryFutureExt};
use http::{header::CONTENT_TYPE, Request};
use serde::Deserialize;

use crate::constants::CSRF_HEADER_NAME;
use crate::models::ctx::CtxError;
use crate::runtime::{ConditionalSend, Env, EnvError, EnvFuture, EnvFutureExt};
use crate::types::api::{APIRequest, APIResult, FetchRequestParams};
use crate::types::csrf::CsrfToken;

/// Sends `api_request` to the server, attaching the CSRF token when known.
pub fn fetch_api<E, RESP>(
    api_request: &APIRequest,
    csrf_token: Option<&CsrfToken>,
) -> EnvFuture<'static, Result<RESP, CtxError>>
where
    E: Env + 'static,
    RESP: for<'de> Deserialize<'de> + ConditionalSend + 'static,
{
    let method = api_request.method();
    let url = api_request.url();
    let body = api_request.to_owned().body();
    let mut builder = Request::builder().method(method.to_owned()).uri(url.as_str());
    if let Some(token) = csrf_token {
        builder = builder.header(CSRF_HEADER_NAME, token.as_str());
    }
    if let Some(content_type) = body.content_type() {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    let request = match builder.body(body.into_value()) {
        Ok(request) => request,
        Err(error) => {
            tracing::warn!("Invalid request {} {}: {}", method, url, error);
            return future::err(CtxError::from(EnvError::Fetch(error.to_string()))).boxed_env();
        }
    };
    tracing::debug!("{} {}", method, url);
    #[cfg(debug_assertions)]
    E::log(format!("{} {} {}", method, url, request.body()));
    E::fetch::<_, RESP>(request)
        .map_err(CtxError::from)
        .boxed_env()
}

/// Like [`fetch_api`] for endpoints answering `{success, error?, ...}`.
pub fn fetch_api_result<E, T>(
    api_request: &APIRequest,
    csrf_token: Option<&CsrfToken>,
) -> EnvFuture<'static, Result<T, CtxError>>
where
    E: Env + 'static,
    T: for<'de> Deserialize<'de> + ConditionalSend + 'static,
{
    fetch_api::<E, APIResult<T>>(api_request, csrf_token)
        .map(|result| result.and_then(|result| result.into_result().map_err(CtxError::from)))
        .boxed_env()
}
