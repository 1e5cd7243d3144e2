use futures::FutureExt;
use serde::Serialize;

use crate::{
    constants::{NOTIFICATIONS_LIMIT, NOTIFICATIONS_POLL_INTERVAL},
    models::{
        common::{delayed, eq_update, request_update, RequestAction, RequestLoadable},
        ctx::{fetch_api_result, Ctx},
    },
    runtime::{
        msg::{Action, ActionLoad, ActionNotificationBell, Event, Internal, Msg},
        Effect, EffectFuture, Effects, Env, EnvFutureExt, UpdateWithCtx,
    },
    types::{
        api::{APIRequest, EmptyResponse},
        notifications::NotificationsList,
    },
};

/// Every list fetch targets the same resource.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Debug)]
pub struct NotificationsRequest {
    pub limit: usize,
}

#[derive(Default, Clone, PartialEq, Serialize, Debug)]
pub struct NotificationBell {
    pub loaded: bool,
    pub open: bool,
    pub list: Option<RequestLoadable<NotificationsRequest, NotificationsList>>,
    /// Bumped on every load and unload so timers of an older session stop.
    #[serde(skip)]
    pub poll_generation: u64,
}

impl NotificationBell {
    pub fn unread_count(&self) -> u32 {
        self.list
            .as_ref()
            .and_then(|list| list.content.ready())
            .map(|list| list.unread_count)
            .unwrap_or_default()
    }
}

impl<E: Env + 'static> UpdateWithCtx<E> for NotificationBell {
    fn update(&mut self, msg: &Msg, ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::NotificationBell)) => {
                self.poll_generation += 1;
                let loaded_effects = eq_update(&mut self.loaded, true);
                let list_effects = list_update::<E>(&mut self.list, ctx);
                loaded_effects
                    .join(list_effects)
                    .join(Effects::one(poll_timer::<E>(self.poll_generation)).unchanged())
            }
            Msg::Action(Action::Unload) => {
                self.poll_generation += 1;
                let loaded_effects = eq_update(&mut self.loaded, false);
                let open_effects = eq_update(&mut self.open, false);
                let list_effects = eq_update(&mut self.list, None);
                loaded_effects.join(open_effects).join(list_effects)
            }
            Msg::Internal(Internal::NotificationsPollTick(generation))
                if self.loaded && *generation == self.poll_generation =>
            {
                tracing::trace!("Polling notifications");
                list_update::<E>(&mut self.list, ctx)
                    .join(Effects::one(poll_timer::<E>(self.poll_generation)).unchanged())
            }
            Msg::Action(Action::NotificationBell(ActionNotificationBell::ToggleDropdown)) => {
                self.open = !self.open;
                let list_effects = if self.open {
                    list_update::<E>(&mut self.list, ctx)
                } else {
                    Effects::none().unchanged()
                };
                Effects::none().join(list_effects)
            }
            Msg::Action(Action::NotificationBell(ActionNotificationBell::CloseDropdown)) => {
                eq_update(&mut self.open, false)
            }
            Msg::Action(Action::NotificationBell(ActionNotificationBell::MarkAsRead(id))) => {
                let id = *id;
                Effects::future(EffectFuture::Concurrent(
                    fetch_api_result::<E, EmptyResponse>(
                        &APIRequest::MarkNotificationRead { id },
                        ctx.csrf_token.as_ref(),
                    )
                    .map(move |result| {
                        Msg::Internal(Internal::NotificationReadResult {
                            id,
                            result: result.map(|_| ()),
                        })
                    })
                    .boxed_env(),
                ))
                .unchanged()
            }
            Msg::Action(Action::NotificationBell(ActionNotificationBell::MarkAllAsRead)) => {
                Effects::future(EffectFuture::Concurrent(
                    fetch_api_result::<E, EmptyResponse>(
                        &APIRequest::MarkAllNotificationsRead,
                        ctx.csrf_token.as_ref(),
                    )
                    .map(|result| {
                        Msg::Internal(Internal::AllNotificationsReadResult(result.map(|_| ())))
                    })
                    .boxed_env(),
                ))
                .unchanged()
            }
            Msg::Internal(Internal::NotificationsResult(request_id, result)) => {
                let request = match &self.list {
                    Some(list) => list.request,
                    None => return Effects::none().unchanged(),
                };
                let (list_effects, _) = request_update(
                    &mut self.list,
                    RequestAction::RequestResult {
                        request: &request,
                        request_id: *request_id,
                        result,
                    },
                );
                if list_effects.has_changed {
                    match result.as_ref() {
                        Ok(_) => list_effects
                            .join(Effects::msg(Msg::Event(Event::NotificationsLoaded)).unchanged()),
                        Err(error) => {
                            // List failures are only logged.
                            tracing::warn!("Failed to load notifications: {}", error.message());
                            list_effects
                        }
                    }
                } else {
                    list_effects
                }
            }
            Msg::Internal(Internal::NotificationReadResult { id, result }) => {
                // Marking is fire-and-forget: the click is followed whatever the server says.
                let read_effects = match result {
                    Ok(_) => Effects::msg(Msg::Event(Event::NotificationMarkedRead { id: *id }))
                        .unchanged(),
                    Err(error) => {
                        tracing::warn!(
                            "Failed to mark notification {} as read: {}",
                            id,
                            error.message()
                        );
                        Effects::none().unchanged()
                    }
                };
                let url = self
                    .list
                    .as_ref()
                    .and_then(|list| list.content.ready())
                    .and_then(|list| {
                        list.notificaciones
                            .iter()
                            .find(|notification| notification.id == *id)
                    })
                    .and_then(|notification| notification.link())
                    .map(ToOwned::to_owned);
                match url {
                    Some(url) => read_effects.join(
                        Effects::msg(Msg::Event(Event::NavigationRequested { url })).unchanged(),
                    ),
                    None => read_effects.join(list_update::<E>(&mut self.list, ctx)),
                }
            }
            Msg::Internal(Internal::AllNotificationsReadResult(result)) => {
                let read_effects = match result {
                    Ok(_) => Effects::msg(Msg::Event(Event::AllNotificationsMarkedRead)).unchanged(),
                    Err(error) => {
                        tracing::warn!(
                            "Failed to mark all notifications as read: {}",
                            error.message()
                        );
                        Effects::none().unchanged()
                    }
                };
                read_effects.join(list_update::<E>(&mut self.list, ctx))
            }
            _ => Effects::none().unchanged(),
        }
    }
}

fn list_update<E: Env + 'static>(
    list: &mut Option<RequestLoadable<NotificationsRequest, NotificationsList>>,
    ctx: &Ctx,
) -> Effects {
    let request = NotificationsRequest {
        limit: NOTIFICATIONS_LIMIT,
    };
    let (effects, request_id) = request_update(list, RequestAction::Requested { request: &request });
    match request_id {
        Some(request_id) => effects.join(
            Effects::future(EffectFuture::Concurrent(
                fetch_api_result::<E, NotificationsList>(
                    &APIRequest::Notifications {
                        limit: request.limit,
                    },
                    ctx.csrf_token.as_ref(),
                )
                .map(move |result| {
                    Msg::Internal(Internal::NotificationsResult(request_id, Box::new(result)))
                })
                .boxed_env(),
            ))
            .unchanged(),
        ),
        None => effects,
    }
}

fn poll_timer<E: Env + 'static>(generation: u64) -> Effect {
    delayed::<E>(
        NOTIFICATIONS_POLL_INTERVAL,
        Internal::NotificationsPollTick(generation),
    )
}
