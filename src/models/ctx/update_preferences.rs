use futures::{future, FutureExt, TryFutureExt};
use serde::Serialize;

use crate::constants::{DARK_MODE_STORAGE_KEY, FAVORITES_STORAGE_KEY};
use crate::models::ctx::CtxError;
use crate::runtime::msg::{Event, Msg};
use crate::runtime::{Effect, EffectFuture, Env, EnvError, EnvFuture, EnvFutureExt};
use crate::types::preferences::Preferences;

/// Reads both preference keys; missing keys fall back to the defaults.
pub fn pull_preferences_from_storage<E: Env + 'static>(
) -> EnvFuture<'static, Result<Preferences, EnvError>> {
    future::try_join(
        E::get_storage::<bool>(DARK_MODE_STORAGE_KEY),
        E::get_storage::<Vec<u64>>(FAVORITES_STORAGE_KEY),
    )
    .map_ok(|(dark_mode, favorites)| Preferences {
        dark_mode: dark_mode.unwrap_or_default(),
        favorites: favorites.unwrap_or_default(),
    })
    .boxed_env()
}

pub fn push_to_storage<E: Env + 'static, T: Serialize>(key: &str, value: &T) -> Effect {
    EffectFuture::Sequential(
        E::set_storage(key, Some(value))
            .map(|result| match result {
                Ok(_) => Msg::Event(Event::PreferencesPushedToStorage),
                Err(error) => Msg::Event(Event::Error {
                    error: CtxError::from(error),
                    source: Box::new(Event::PreferencesPushedToStorage),
                }),
            })
            .boxed_env(),
    )
    .into()
}

pub fn push_dark_mode_to_storage<E: Env + 'static>(preferences: &Preferences) -> Effect {
    push_to_storage::<E, _>(DARK_MODE_STORAGE_KEY, &preferences.dark_mode)
}

pub fn push_favorites_to_storage<E: Env + 'static>(preferences: &Preferences) -> Effect {
    push_to_storage::<E, _>(FAVORITES_STORAGE_KEY, &preferences.favorites)
}
