use std::{
    marker::PhantomData,
    sync::{Arc, LockResult, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use derivative::Derivative;
use enclose::enclose;
use futures::{
    channel::mpsc::{channel, Receiver, Sender},
    FutureExt,
};
use serde::Serialize;

use crate::runtime::{
    msg::{Action, Event, Msg},
    Effect, EffectFuture, Env, Model,
};

#[derive(Serialize, Debug, PartialEq)]
#[serde(tag = "name", content = "args")]
pub enum RuntimeEvent<E: Env, M: Model<E>> {
    NewState(Vec<M::Field>),
    CoreEvent(Event),
}

#[derive(Debug)]
pub struct RuntimeAction<E: Env, M: Model<E>> {
    pub field: Option<M::Field>,
    pub action: Action,
}

#[derive(Derivative)]
#[derivative(Clone(bound = ""))]
pub struct Runtime<E: Env, M: Model<E>> {
    model: Arc<RwLock<M>>,
    tx: Sender<RuntimeEvent<E, M>>,
    env: PhantomData<E>,
}

impl<E, M> Runtime<E, M>
where
    E: Env + Send + 'static,
    M: Model<E> + Send + Sync + 'static,
{
    pub fn new(
        model: M,
        effects: Vec<Effect>,
        buffer: usize,
    ) -> (Self, Receiver<RuntimeEvent<E, M>>) {
        let (tx, rx) = channel(buffer);
        let model = Arc::new(RwLock::new(model));
        let runtime = Runtime {
            model,
            tx,
            env: PhantomData,
        };
        runtime.handle_effects(effects, vec![]);
        (runtime, rx)
    }
    pub fn model(&self) -> LockResult<RwLockReadGuard<M>> {
        self.model.read()
    }
    /// Write access to the model, surviving a panic of an earlier update.
    fn write_model(&self) -> RwLockWriteGuard<'_, M> {
        self.model.write().unwrap_or_else(|error| {
            tracing::error!("Model lock was poisoned, keeping the last state");
            error.into_inner()
        })
    }
    pub fn dispatch(&self, action: RuntimeAction<E, M>) {
        tracing::trace!("Dispatching {:?}", action.action);
        let (effects, fields) = {
            let mut model = self.write_model();
            match action {
                RuntimeAction {
                    field: Some(field),
                    action,
                } => model.update_field(&Msg::Action(action), &field),
                RuntimeAction { action, .. } => model.update(&Msg::Action(action)),
            }
        };
        self.handle_effects(effects, fields);
    }
    fn emit(&self, event: RuntimeEvent<E, M>) {
        if let Err(error) = self.tx.clone().try_send(event) {
            tracing::warn!("Runtime event dropped: {}", error);
        }
    }
    fn handle_effects(&self, effects: Vec<Effect>, fields: Vec<M::Field>) {
        if !fields.is_empty() {
            self.emit(RuntimeEvent::<E, M>::NewState(fields));
        };
        effects
            .into_iter()
            .for_each(enclose!((self.clone() => runtime) move |effect| {
                match effect {
                    Effect::Msg(msg) => {
                        runtime.handle_effect_output(*msg);
                    }
                    Effect::Future(EffectFuture::Sequential(future)) => {
                        E::exec_sequential(future.then(enclose!((runtime) move |msg| async move {
                            runtime.handle_effect_output(msg);
                        })))
                    },
                    Effect::Future(EffectFuture::Concurrent(future)) => {
                        E::exec_concurrent(future.then(enclose!((runtime) move |msg| async move {
                            runtime.handle_effect_output(msg);
                        })))
                    }
                }
            }));
    }
    fn handle_effect_output(&self, msg: Msg) {
        match msg {
            Msg::Event(event) => {
                self.emit(RuntimeEvent::CoreEvent(event));
            }
            Msg::Internal(_) => {
                let (effects, fields) = self.write_model().update(&msg);
                self.handle_effects(effects, fields);
            }
            Msg::Action(_) => {
                panic!("effects are not allowed to resolve with action");
            }
        }
    }
}

/// Read access for hosts that must keep serving state after a panicked update.
pub fn read_model<M>(lock: LockResult<RwLockReadGuard<'_, M>>) -> RwLockReadGuard<'_, M> {
    lock.unwrap_or_else(PoisonError::into_inner)
}
