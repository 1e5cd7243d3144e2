use futures::FutureExt;
use serde::{Deserialize, Serialize};

use crate::{
    models::{
        common::{
            confirmation_answer, eq_update, request_update, Confirmation, RequestAction,
            RequestLoadable,
        },
        ctx::{fetch_api, fetch_api_result, Ctx, CtxError, OtherError},
    },
    runtime::{
        msg::{Action, ActionLoad, ActionQuoteEditor, Event, Internal, Msg},
        Effect, EffectFuture, Effects, Env, EnvFutureExt, UpdateWithCtx,
    },
    types::{
        api::{APIRequest, EmptyResponse, QuoteTotals},
        format::format_price,
        quote::{
            ItemKind, LaborItemForm, MaterialItemForm, ParameterInput, ServiceItemForm,
        },
    },
};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Selected {
    /// `window.cotizacionId`, missing outside a quote page.
    pub quote_id: Option<u64>,
}

/// What a confirmed dialog goes on to do.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PendingChange {
    DeleteItem { kind: ItemKind, item_id: u64 },
    ChangeStatus(String),
}

#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
pub struct TotalsView {
    pub gastos_traslado: String,
    pub valor_neto: String,
    pub valor_iva: String,
    pub valor_total: String,
}

impl From<&QuoteTotals> for TotalsView {
    fn from(totals: &QuoteTotals) -> Self {
        TotalsView {
            gastos_traslado: format_price(totals.gastos_traslado),
            valor_neto: format_price(totals.valor_neto),
            valor_iva: format_price(totals.valor_iva),
            valor_total: format_price(totals.valor_total),
        }
    }
}

#[derive(Default, Clone, PartialEq, Serialize, Debug)]
pub struct QuoteEditor {
    pub selected: Option<Selected>,
    pub service_form: Option<ServiceItemForm>,
    pub material_form: Option<MaterialItemForm>,
    pub labor_form: Option<LaborItemForm>,
    pub travel_expenses: String,
    /// Last travel expenses sent, keyed by the typed value.
    pub travel_expenses_update: Option<RequestLoadable<String, QuoteTotals>>,
    pub totals: Option<TotalsView>,
    pub status_menu_open: bool,
    pub confirmation: Option<Confirmation<PendingChange>>,
}

impl QuoteEditor {
    fn quote_id(&self) -> Option<u64> {
        self.selected.as_ref().and_then(|selected| selected.quote_id)
    }
    fn close_modal(&mut self, kind: ItemKind) -> Effects {
        match kind {
            ItemKind::Service => eq_update(&mut self.service_form, None),
            ItemKind::Material => eq_update(&mut self.material_form, None),
            ItemKind::Labor => eq_update(&mut self.labor_form, None),
        }
    }
    fn item_request(&self, kind: ItemKind, quote_id: u64) -> Option<Option<APIRequest>> {
        match kind {
            ItemKind::Service => self.service_form.as_ref().map(|form| {
                form.to_request()
                    .map(|item| APIRequest::AddServiceItem { quote_id, item })
            }),
            ItemKind::Material => self.material_form.as_ref().map(|form| {
                form.to_request()
                    .map(|item| APIRequest::AddMaterialItem { quote_id, item })
            }),
            ItemKind::Labor => self.labor_form.as_ref().map(|form| {
                form.to_request()
                    .map(|item| APIRequest::AddLaborItem { quote_id, item })
            }),
        }
    }
}

impl<E: Env + 'static> UpdateWithCtx<E> for QuoteEditor {
    fn update(&mut self, msg: &Msg, ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::QuoteEditor(selected))) => eq_update(
                self,
                QuoteEditor {
                    selected: Some(selected.to_owned()),
                    ..QuoteEditor::default()
                },
            ),
            Msg::Action(Action::Unload) => eq_update(self, QuoteEditor::default()),
            Msg::Action(Action::QuoteEditor(ActionQuoteEditor::ShowModal(kind))) => match kind {
                ItemKind::Service => {
                    eq_update(&mut self.service_form, Some(ServiceItemForm::default()))
                }
                ItemKind::Material => {
                    eq_update(&mut self.material_form, Some(MaterialItemForm::default()))
                }
                ItemKind::Labor => eq_update(&mut self.labor_form, Some(LaborItemForm::default())),
            },
            Msg::Action(Action::QuoteEditor(ActionQuoteEditor::CloseModal(kind))) => {
                self.close_modal(*kind)
            }
            Msg::Action(Action::QuoteEditor(ActionQuoteEditor::SelectCategory(category_id))) => {
                let form = match &mut self.service_form {
                    Some(form) => form,
                    None => return Effects::none().unchanged(),
                };
                let form_effects = eq_update(
                    form,
                    ServiceItemForm {
                        category_id: *category_id,
                        ..ServiceItemForm::default()
                    },
                );
                match category_id {
                    Some(category_id) => {
                        form_effects.join(Effects::one(fetch_services::<E>(*category_id, ctx)).unchanged())
                    }
                    None => form_effects,
                }
            }
            Msg::Action(Action::QuoteEditor(ActionQuoteEditor::SelectService(service_id))) => {
                let form = match &mut self.service_form {
                    Some(form) => form,
                    None => return Effects::none().unchanged(),
                };
                form.service_id = *service_id;
                form.parametros = vec![];
                let selected_service = form
                    .selected_service()
                    .map(|service| (service.precio_base.to_string(), service.es_parametrizable));
                let parametrizable = match selected_service {
                    Some((precio_base, parametrizable)) => {
                        form.precio_unitario = precio_base;
                        parametrizable
                    }
                    None => false,
                };
                match service_id {
                    Some(service_id) if parametrizable => Effects::one(
                        fetch_service_parameters::<E>(*service_id, ctx),
                    ),
                    _ => Effects::none(),
                }
            }
            Msg::Action(Action::QuoteEditor(ActionQuoteEditor::UpdateServiceForm {
                cantidad,
                precio_unitario,
                descripcion_personalizada,
            })) => match &mut self.service_form {
                Some(form) => {
                    let cantidad_effects = eq_update(&mut form.cantidad, cantidad.to_owned());
                    let precio_effects =
                        eq_update(&mut form.precio_unitario, precio_unitario.to_owned());
                    let descripcion_effects = eq_update(
                        &mut form.descripcion_personalizada,
                        descripcion_personalizada.to_owned(),
                    );
                    cantidad_effects
                        .join(precio_effects)
                        .join(descripcion_effects)
                }
                None => Effects::none().unchanged(),
            },
            Msg::Action(Action::QuoteEditor(ActionQuoteEditor::SetParameter {
                parameter_id,
                value,
            })) => match self.service_form.as_mut().and_then(|form| {
                form.parametros
                    .iter_mut()
                    .find(|input| input.parameter.id == *parameter_id)
            }) {
                Some(input) => eq_update(&mut input.value, value.to_owned()),
                None => Effects::none().unchanged(),
            },
            Msg::Action(Action::QuoteEditor(ActionQuoteEditor::SelectMaterial {
                material_id,
                price,
            })) => match &mut self.material_form {
                Some(form) => {
                    let material_effects = eq_update(&mut form.material_id, *material_id);
                    let price_effects = match price {
                        Some(price) => eq_update(&mut form.precio_unitario, price.to_owned()),
                        None => Effects::none().unchanged(),
                    };
                    material_effects.join(price_effects)
                }
                None => Effects::none().unchanged(),
            },
            Msg::Action(Action::QuoteEditor(ActionQuoteEditor::UpdateMaterialForm {
                cantidad,
                precio_unitario,
                descripcion_personalizada,
            })) => match &mut self.material_form {
                Some(form) => {
                    let cantidad_effects = eq_update(&mut form.cantidad, cantidad.to_owned());
                    let precio_effects =
                        eq_update(&mut form.precio_unitario, precio_unitario.to_owned());
                    let descripcion_effects = eq_update(
                        &mut form.descripcion_personalizada,
                        descripcion_personalizada.to_owned(),
                    );
                    cantidad_effects
                        .join(precio_effects)
                        .join(descripcion_effects)
                }
                None => Effects::none().unchanged(),
            },
            Msg::Action(Action::QuoteEditor(ActionQuoteEditor::UpdateLaborForm(next_form))) => {
                match &mut self.labor_form {
                    Some(form) => eq_update(form, next_form.to_owned()),
                    None => Effects::none().unchanged(),
                }
            }
            Msg::Action(Action::QuoteEditor(ActionQuoteEditor::AddItem(kind))) => {
                let source = Event::QuoteItemAdded { kind: *kind };
                let quote_id = match self.quote_id() {
                    Some(quote_id) => quote_id,
                    None => return error_effects(OtherError::QuoteNotSelected.into(), source),
                };
                match self.item_request(*kind, quote_id) {
                    Some(Some(request)) => Effects::one(mutate_quote::<E>(request, ctx)).unchanged(),
                    Some(None) => error_effects(OtherError::RequiredFieldsMissing.into(), source),
                    None => Effects::none().unchanged(),
                }
            }
            Msg::Action(Action::QuoteEditor(ActionQuoteEditor::DeleteItem { kind, item_id })) => {
                if self.quote_id().is_none() {
                    return error_effects(
                        OtherError::QuoteNotSelected.into(),
                        Event::QuoteItemDeleted {
                            kind: *kind,
                            item_id: *item_id,
                        },
                    );
                }
                eq_update(
                    &mut self.confirmation,
                    Some(Confirmation::new(
                        kind.confirmation_message(),
                        PendingChange::DeleteItem {
                            kind: *kind,
                            item_id: *item_id,
                        },
                    )),
                )
            }
            Msg::Action(Action::QuoteEditor(ActionQuoteEditor::UpdateTravelExpenses(value))) => {
                let travel_expenses_effects = eq_update(&mut self.travel_expenses, value.to_owned());
                match self.quote_id() {
                    Some(quote_id) => {
                        let (update_effects, request_id) = request_update(
                            &mut self.travel_expenses_update,
                            RequestAction::Requested { request: value },
                        );
                        let request_id = match request_id {
                            Some(request_id) => request_id,
                            None => return travel_expenses_effects.join(update_effects),
                        };
                        let key = value.to_owned();
                        travel_expenses_effects.join(update_effects).join(
                            Effects::future(EffectFuture::Concurrent(
                                fetch_api_result::<E, QuoteTotals>(
                                    &APIRequest::UpdateTravelExpenses {
                                        quote_id,
                                        gastos_traslado: value.to_owned(),
                                    },
                                    ctx.csrf_token.as_ref(),
                                )
                                .map(move |result| {
                                    Msg::Internal(Internal::TravelExpensesResult(
                                        key,
                                        request_id,
                                        Box::new(result),
                                    ))
                                })
                                .boxed_env(),
                            ))
                            .unchanged(),
                        )
                    }
                    None => travel_expenses_effects,
                }
            }
            Msg::Action(Action::QuoteEditor(ActionQuoteEditor::ToggleStatusMenu)) => {
                self.status_menu_open = !self.status_menu_open;
                Effects::none()
            }
            Msg::Action(Action::QuoteEditor(ActionQuoteEditor::CloseStatusMenu)) => {
                eq_update(&mut self.status_menu_open, false)
            }
            Msg::Action(Action::QuoteEditor(ActionQuoteEditor::ChangeStatus(estado))) => {
                if self.quote_id().is_none() {
                    tracing::debug!("Status change outside of a quote page");
                    return Effects::none().unchanged();
                }
                eq_update(
                    &mut self.confirmation,
                    Some(Confirmation::new(
                        "¿Estás seguro de cambiar el estado de la cotización?",
                        PendingChange::ChangeStatus(estado.to_owned()),
                    )),
                )
            }
            Msg::Action(Action::QuoteEditor(ActionQuoteEditor::Confirm(accepted))) => {
                let pending = confirmation_answer(&mut self.confirmation, *accepted);
                match (pending, self.quote_id()) {
                    (Some(PendingChange::DeleteItem { kind, item_id }), Some(quote_id)) => {
                        Effects::one(mutate_quote::<E>(
                            APIRequest::DeleteItem {
                                quote_id,
                                kind,
                                item_id,
                            },
                            ctx,
                        ))
                    }
                    (Some(PendingChange::ChangeStatus(estado)), Some(quote_id)) => {
                        self.status_menu_open = false;
                        Effects::one(mutate_quote::<E>(
                            APIRequest::ChangeQuoteStatus { quote_id, estado },
                            ctx,
                        ))
                    }
                    _ => Effects::none(),
                }
            }
            Msg::Internal(Internal::ServicesResult(category_id, result)) => {
                let form = match &mut self.service_form {
                    Some(form) if form.category_id == Some(*category_id) => form,
                    _ => {
                        tracing::debug!("Discarded services of category {}", category_id);
                        return Effects::none().unchanged();
                    }
                };
                let source = Event::ServicesLoaded {
                    category_id: *category_id,
                };
                match result.as_ref() {
                    Ok(services) => eq_update(&mut form.services, services.to_owned())
                        .join(Effects::msg(Msg::Event(source)).unchanged()),
                    Err(error) => error_effects(error.to_owned(), source),
                }
            }
            Msg::Internal(Internal::ServiceParametersResult(service_id, result)) => {
                let form = match &mut self.service_form {
                    Some(form) if form.service_id == Some(*service_id) => form,
                    _ => return Effects::none().unchanged(),
                };
                match result.as_ref() {
                    Ok(parameters) => eq_update(
                        &mut form.parametros,
                        parameters
                            .iter()
                            .cloned()
                            .map(ParameterInput::from)
                            .collect(),
                    ),
                    Err(error) => {
                        tracing::warn!(
                            "Failed to load parameters of service {}: {}",
                            service_id,
                            error.message()
                        );
                        Effects::none().unchanged()
                    }
                }
            }
            Msg::Internal(Internal::QuoteMutationResult(request, result)) => {
                let (source, added) = match request {
                    APIRequest::AddServiceItem { .. } => (
                        Event::QuoteItemAdded {
                            kind: ItemKind::Service,
                        },
                        Some(ItemKind::Service),
                    ),
                    APIRequest::AddMaterialItem { .. } => (
                        Event::QuoteItemAdded {
                            kind: ItemKind::Material,
                        },
                        Some(ItemKind::Material),
                    ),
                    APIRequest::AddLaborItem { .. } => (
                        Event::QuoteItemAdded {
                            kind: ItemKind::Labor,
                        },
                        Some(ItemKind::Labor),
                    ),
                    APIRequest::DeleteItem { kind, item_id, .. } => (
                        Event::QuoteItemDeleted {
                            kind: *kind,
                            item_id: *item_id,
                        },
                        None,
                    ),
                    APIRequest::ChangeQuoteStatus { estado, .. } => (
                        Event::QuoteStatusChanged {
                            estado: estado.to_owned(),
                        },
                        None,
                    ),
                    _ => return Effects::none().unchanged(),
                };
                match result {
                    Ok(_) => {
                        let modal_effects = match added {
                            Some(kind) => self.close_modal(kind),
                            None => Effects::none().unchanged(),
                        };
                        modal_effects.join(
                            Effects::msgs(vec![
                                Msg::Event(source),
                                Msg::Event(Event::PageReloadRequested),
                            ])
                            .unchanged(),
                        )
                    }
                    Err(error) => error_effects(error.to_owned(), source),
                }
            }
            Msg::Internal(Internal::TravelExpensesResult(value, request_id, result)) => {
                let (update_effects, _) = request_update(
                    &mut self.travel_expenses_update,
                    RequestAction::RequestResult {
                        request: value,
                        request_id: *request_id,
                        result,
                    },
                );
                if !update_effects.has_changed {
                    return update_effects;
                }
                match result.as_ref() {
                    Ok(totals) => update_effects
                        .join(eq_update(&mut self.totals, Some(TotalsView::from(totals))))
                        .join(
                            Effects::msg(Msg::Event(Event::TravelExpensesUpdated {
                                totals: totals.to_owned(),
                            }))
                            .unchanged(),
                        ),
                    Err(error) => {
                        tracing::warn!("Failed to update travel expenses: {}", error.message());
                        update_effects
                    }
                }
            }
            _ => Effects::none().unchanged(),
        }
    }
}

fn error_effects(error: CtxError, source: Event) -> Effects {
    Effects::msg(Msg::Event(Event::Error {
        error,
        source: Box::new(source),
    }))
    .unchanged()
}

fn fetch_services<E: Env + 'static>(category_id: u64, ctx: &Ctx) -> Effect {
    EffectFuture::Concurrent(
        fetch_api::<E, _>(
            &APIRequest::ServicesByCategory { category_id },
            ctx.csrf_token.as_ref(),
        )
        .map(move |result| Msg::Internal(Internal::ServicesResult(category_id, Box::new(result))))
        .boxed_env(),
    )
    .into()
}

fn fetch_service_parameters<E: Env + 'static>(service_id: u64, ctx: &Ctx) -> Effect {
    EffectFuture::Concurrent(
        fetch_api::<E, _>(
            &APIRequest::ServiceParameters { service_id },
            ctx.csrf_token.as_ref(),
        )
        .map(move |result| {
            Msg::Internal(Internal::ServiceParametersResult(
                service_id,
                Box::new(result),
            ))
        })
        .boxed_env(),
    )
    .into()
}

fn mutate_quote<E: Env + 'static>(request: APIRequest, ctx: &Ctx) -> Effect {
    EffectFuture::Concurrent(
        fetch_api_result::<E, EmptyResponse>(&request, ctx.csrf_token.as_ref())
            .map(move |result| {
                Msg::Internal(Internal::QuoteMutationResult(request, result.map(|_| ())))
            })
            .boxed_env(),
    )
    .into()
}
