use serde::Serialize;

use crate::models::common::eq_update;
use crate::models::ctx::{push_dark_mode_to_storage, push_favorites_to_storage};
use crate::runtime::msg::{Action, ActionCtx, Event, Internal, Msg};
use crate::runtime::{Effects, Env, Update};
use crate::types::csrf::CsrfToken;
use crate::types::preferences::Preferences;

/// State shared by every screen of the page.
#[derive(Default, Serialize, Clone, Debug)]
pub struct Ctx {
    #[serde(skip)]
    pub csrf_token: Option<CsrfToken>,
    pub preferences: Preferences,
}

impl Ctx {
    pub fn new(csrf_token: Option<CsrfToken>, preferences: Preferences) -> Self {
        Self {
            csrf_token,
            preferences,
        }
    }
}

impl<E: Env + 'static> Update<E> for Ctx {
    fn update(&mut self, msg: &Msg) -> Effects {
        match msg {
            Msg::Action(Action::Ctx(ActionCtx::UpdateCsrfSources(sources))) => {
                let csrf_token = sources.resolve();
                if csrf_token.is_none() {
                    tracing::warn!("No CSRF token found in the page");
                }
                eq_update(&mut self.csrf_token, csrf_token)
            }
            Msg::Action(Action::Ctx(ActionCtx::ToggleDarkMode)) => {
                self.preferences.dark_mode = !self.preferences.dark_mode;
                Effects::one(push_dark_mode_to_storage::<E>(&self.preferences)).join(
                    Effects::msg(Msg::Event(Event::DarkModeToggled {
                        enabled: self.preferences.dark_mode,
                    })),
                )
            }
            Msg::Action(Action::Ctx(ActionCtx::ToggleFavorite(service_id))) => {
                let favorite = self.preferences.toggle_favorite(*service_id);
                Effects::one(push_favorites_to_storage::<E>(&self.preferences)).join(
                    Effects::msgs(vec![
                        Msg::Event(Event::FavoriteToggled {
                            service_id: *service_id,
                            favorite,
                        }),
                        Msg::Internal(Internal::FavoriteToggled(*service_id, favorite)),
                    ]),
                )
            }
            _ => Effects::none().unchanged(),
        }
    }
}
