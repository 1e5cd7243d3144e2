use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::Serialize;

use crate::runtime::{
    msg::{Internal, Msg},
    Effect, EffectFuture, Env, EnvFutureExt,
};

/// Resolves with `msg` once `duration` has elapsed.
pub fn delayed<E: Env + 'static>(duration: Duration, msg: Internal) -> Effect {
    EffectFuture::Concurrent(
        E::sleep(duration)
            .map(move |_| Msg::Internal(msg))
            .boxed_env(),
    )
    .into()
}

/// Only the last scheduled call survives: every `schedule` bumps the sequence
/// and earlier timers find themselves outdated when they fire.
#[derive(Clone, Copy, PartialEq, Eq, Default, Serialize, Debug)]
pub struct Debounce {
    #[serde(skip)]
    sequence: u64,
}

impl Debounce {
    pub fn schedule<E: Env + 'static>(
        &mut self,
        delay: Duration,
        msg: impl FnOnce(u64) -> Internal,
    ) -> Effect {
        self.sequence += 1;
        delayed::<E>(delay, msg(self.sequence))
    }
    pub fn is_current(&self, sequence: u64) -> bool {
        self.sequence == sequence
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Serialize, Debug)]
pub struct Throttle {
    #[serde(skip)]
    last: Option<DateTime<Utc>>,
}

impl Throttle {
    /// Whether a call is allowed now; allowed calls start a new window.
    pub fn acquire<E: Env>(&mut self, interval: Duration) -> bool {
        let now = E::now();
        let allowed = match self.last {
            Some(last) => now
                .signed_duration_since(last)
                .to_std()
                .map(|elapsed| elapsed >= interval)
                .unwrap_or(false),
            None => true,
        };
        if allowed {
            self.last = Some(now);
        }
        allowed
    }
}
