use futures::FutureExt;
use serde::Serialize;

use crate::{
    models::{
        common::{confirmation_answer, eq_update, Confirmation},
        ctx::{fetch_api_result, Ctx},
    },
    runtime::{
        msg::{Action, ActionEntityManagement, Event, Internal, Msg},
        Effect, EffectFuture, Effects, Env, EnvFutureExt, UpdateWithCtx,
    },
    types::{
        api::{APIRequest, MessageResponse},
        entity::EntityKind,
    },
};

/// Create modals and deletion of clients, services and materials.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Debug)]
pub struct EntityManagement {
    pub modal: Option<EntityKind>,
    pub confirmation: Option<Confirmation<(EntityKind, u64)>>,
}

impl<E: Env + 'static> UpdateWithCtx<E> for EntityManagement {
    fn update(&mut self, msg: &Msg, ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Unload) => eq_update(self, EntityManagement::default()),
            Msg::Action(Action::EntityManagement(ActionEntityManagement::ShowModal(kind))) => {
                eq_update(&mut self.modal, Some(*kind))
            }
            Msg::Action(Action::EntityManagement(ActionEntityManagement::CloseModal)) => {
                eq_update(&mut self.modal, None)
            }
            Msg::Action(Action::EntityManagement(ActionEntityManagement::Delete {
                kind,
                id,
                name,
            })) => eq_update(
                &mut self.confirmation,
                Some(Confirmation::new(
                    kind.confirmation_message(name),
                    (*kind, *id),
                )),
            ),
            Msg::Action(Action::EntityManagement(ActionEntityManagement::Confirm(accepted))) => {
                match confirmation_answer(&mut self.confirmation, *accepted) {
                    Some((kind, id)) => Effects::one(delete_entity::<E>(kind, id, ctx)),
                    None => Effects::none(),
                }
            }
            Msg::Internal(Internal::EntityDeleteResult(
                APIRequest::DeleteEntity { kind, id },
                result,
            )) => match result {
                Ok(message) => Effects::msgs(vec![
                    Msg::Event(Event::EntityDeleted {
                        kind: *kind,
                        id: *id,
                        message: message.to_owned(),
                    }),
                    Msg::Event(Event::PageReloadRequested),
                ])
                .unchanged(),
                Err(error) => Effects::msg(Msg::Event(Event::Error {
                    error: error.to_owned(),
                    source: Box::new(Event::EntityDeleted {
                        kind: *kind,
                        id: *id,
                        message: None,
                    }),
                }))
                .unchanged(),
            },
            _ => Effects::none().unchanged(),
        }
    }
}

fn delete_entity<E: Env + 'static>(kind: EntityKind, id: u64, ctx: &Ctx) -> Effect {
    let request = APIRequest::DeleteEntity { kind, id };
    tracing::debug!("Deleting {} {}", kind.slug(), id);
    EffectFuture::Concurrent(
        fetch_api_result::<E, MessageResponse>(&request, ctx.csrf_token.as_ref())
            .map(move |result| {
                Msg::Internal(Internal::EntityDeleteResult(
                    request,
                    result.map(|response| response.message),
                ))
            })
            .boxed_env(),
    )
    .into()
}
