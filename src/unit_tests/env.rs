use std::{
    collections::{BTreeMap, HashMap},
    sync::{LockResult, Mutex, MutexGuard, RwLock},
    task::{Context, Poll},
    time::Duration,
};

use chrono::{DateTime, TimeZone, Utc};
use futures::{
    channel::oneshot,
    future,
    task::noop_waker_ref,
    Future, FutureExt, TryFutureExt,
};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::runtime::{ConditionalSend, Env, EnvError, EnvFuture, EnvFutureExt, TryEnvFuture};

lazy_static! {
    static ref ENV_MUTEX: Mutex<()> = Default::default();
    pub static ref FETCH_HANDLER: RwLock<FetchHandler> =
        RwLock::new(Box::new(default_fetch_handler));
    pub static ref REQUESTS: RwLock<Vec<Request>> = Default::default();
    pub static ref STORAGE: RwLock<BTreeMap<String, String>> = Default::default();
    pub static ref NOW: RwLock<DateTime<Utc>> = RwLock::new(default_now());
    static ref EXECUTOR: Mutex<Vec<EnvFuture<'static, ()>>> = Default::default();
    static ref SLEEPS: Mutex<Vec<(Duration, oneshot::Sender<()>)>> = Default::default();
}

/// Answers with the JSON the server would send; `fetch` deserializes it.
pub type FetchHandler =
    Box<dyn Fn(Request) -> TryEnvFuture<serde_json::Value> + Send + Sync + 'static>;

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Request {
    pub url: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl<T: Serialize> From<http::Request<T>> for Request {
    fn from(request: http::Request<T>) -> Self {
        let (head, body) = request.into_parts();
        let body = match serde_json::to_value(&body).unwrap() {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(body) => body,
            body => body.to_string(),
        };
        Request {
            url: head.uri.to_string(),
            method: head.method.as_str().to_owned(),
            headers: head
                .headers
                .iter()
                .map(|(key, value)| (key.as_str().to_owned(), value.to_str().unwrap().to_owned()))
                .collect::<HashMap<_, _>>(),
            body,
        }
    }
}

pub enum TestEnv {}

impl TestEnv {
    pub fn reset() -> LockResult<MutexGuard<'static, ()>> {
        let env_mutex = ENV_MUTEX.lock();
        *FETCH_HANDLER.write().unwrap() = Box::new(default_fetch_handler);
        *REQUESTS.write().unwrap() = vec![];
        *STORAGE.write().unwrap() = BTreeMap::new();
        *NOW.write().unwrap() = default_now();
        EXECUTOR.lock().unwrap().clear();
        SLEEPS.lock().unwrap().clear();
        env_mutex
    }
    /// Runs `runnable` and then drives every spawned future until the only
    /// ones left are waiting on a timer.
    pub fn run<F: FnOnce()>(runnable: F) {
        runnable();
        let mut cx = Context::from_waker(noop_waker_ref());
        loop {
            let futures = std::mem::take(&mut *EXECUTOR.lock().unwrap());
            if futures.is_empty() {
                break;
            }
            let mut progressed = false;
            let mut pending = vec![];
            for mut future in futures {
                match future.poll_unpin(&mut cx) {
                    Poll::Ready(()) => progressed = true,
                    Poll::Pending => pending.push(future),
                }
            }
            let mut executor = EXECUTOR.lock().unwrap();
            progressed = progressed || !executor.is_empty();
            executor.extend(pending);
            if !progressed {
                break;
            }
        }
    }
    /// Durations of the timers not fired yet, in scheduling order.
    pub fn pending_timers() -> Vec<Duration> {
        SLEEPS
            .lock()
            .unwrap()
            .iter()
            .map(|(duration, _)| *duration)
            .collect()
    }
    /// Elapses every pending timer and runs what they unblocked.
    pub fn fire_timers() {
        let sleeps = std::mem::take(&mut *SLEEPS.lock().unwrap());
        TestEnv::run(|| {
            sleeps.into_iter().for_each(|(_, sender)| {
                let _ = sender.send(());
            })
        });
    }
    pub fn advance(duration: Duration) {
        let mut now = NOW.write().unwrap();
        *now = *now + chrono::Duration::from_std(duration).unwrap();
    }
}

impl Env for TestEnv {
    fn fetch<
        IN: Serialize + ConditionalSend + 'static,
        OUT: for<'de> Deserialize<'de> + ConditionalSend + 'static,
    >(
        request: http::Request<IN>,
    ) -> TryEnvFuture<OUT> {
        let request = Request::from(request);
        REQUESTS.write().unwrap().push(request.to_owned());
        FETCH_HANDLER.read().unwrap()(request)
            .and_then(|value| {
                future::ready(serde_json::from_value::<OUT>(value).map_err(EnvError::from))
            })
            .boxed_env()
    }
    fn get_storage<T: for<'de> Deserialize<'de> + ConditionalSend + 'static>(
        key: &str,
    ) -> TryEnvFuture<Option<T>> {
        future::ok(
            STORAGE
                .read()
                .unwrap()
                .get(key)
                .map(|data| serde_json::from_str(data).unwrap()),
        )
        .boxed_env()
    }
    fn set_storage<T: Serialize>(key: &str, value: Option<&T>) -> TryEnvFuture<()> {
        let mut storage = STORAGE.write().unwrap();
        match value {
            Some(v) => storage.insert(key.to_string(), serde_json::to_string(v).unwrap()),
            None => storage.remove(key),
        };
        future::ok(()).boxed_env()
    }
    fn exec_concurrent<F: Future<Output = ()> + ConditionalSend + 'static>(future: F) {
        EXECUTOR.lock().unwrap().push(future.boxed_env());
    }
    fn exec_sequential<F: Future<Output = ()> + ConditionalSend + 'static>(future: F) {
        EXECUTOR.lock().unwrap().push(future.boxed_env());
    }
    fn sleep(duration: Duration) -> EnvFuture<'static, ()> {
        let (sender, receiver) = oneshot::channel();
        SLEEPS.lock().unwrap().push((duration, sender));
        receiver
            .then(|result| match result {
                Ok(()) => future::ready(()).left_future(),
                // Dropped by `reset`, the timer never fires.
                Err(_) => future::pending::<()>().right_future(),
            })
            .boxed_env()
    }
    fn now() -> DateTime<Utc> {
        *NOW.read().unwrap()
    }
    #[cfg(debug_assertions)]
    fn log(message: String) {
        println!("{message}")
    }
}

pub fn default_fetch_handler(request: Request) -> TryEnvFuture<serde_json::Value> {
    panic!("Unhandled fetch request: {request:#?}")
}

fn default_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}
