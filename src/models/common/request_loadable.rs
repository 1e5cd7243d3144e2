use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::models::{common::Loadable, ctx::CtxError};
use crate::runtime::Effects;

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Content fetched for `request`, tagged with the id of the fetch that owns it.
///
/// Only the most recent fetch may write into `content`: a result is applied
/// when both its request and its id match, everything else is stale.
#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct RequestLoadable<R, T> {
    pub request: R,
    #[serde(skip)]
    pub request_id: u64,
    pub content: Loadable<T, CtxError>,
}

pub enum RequestAction<'a, R, T> {
    Requested {
        request: &'a R,
    },
    RequestResult {
        request: &'a R,
        request_id: u64,
        result: &'a Result<T, CtxError>,
    },
}

/// Starts a fetch for `request` or applies its result.
///
/// Returns the id of the new fetch for `RequestAction::Requested`, the caller
/// tags its future with it.
pub fn request_update<R, T>(
    loadable: &mut Option<RequestLoadable<R, T>>,
    action: RequestAction<R, T>,
) -> (Effects, Option<u64>)
where
    R: Clone + PartialEq + std::fmt::Debug,
    T: Clone + PartialEq,
{
    match action {
        RequestAction::Requested { request } => {
            let request_id = NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed);
            let content = match loadable.as_ref() {
                Some(current) if current.request == *request && current.content.ready().is_some() => {
                    current.content.to_owned()
                }
                _ => Loadable::Loading,
            };
            *loadable = Some(RequestLoadable {
                request: request.to_owned(),
                request_id,
                content,
            });
            (Effects::none(), Some(request_id))
        }
        RequestAction::RequestResult {
            request,
            request_id,
            result,
        } => match loadable {
            Some(current)
                if current.request == *request && current.request_id == request_id =>
            {
                current.content = Loadable::from(result.to_owned());
                (Effects::none(), None)
            }
            _ => {
                tracing::debug!(
                    "Discarded stale response #{} for {:?}",
                    request_id,
                    request
                );
                (Effects::none().unchanged(), None)
            }
        },
    }
}
