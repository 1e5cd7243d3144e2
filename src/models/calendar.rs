use chrono::{Datelike, Duration, NaiveDate};
use derivative::Derivative;
use futures::FutureExt;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{
    constants::CALENDAR_DAY_PREVIEW_SIZE,
    models::{
        common::{
            confirmation_answer, eq_update, request_update, Confirmation, RequestAction,
            RequestLoadable,
        },
        ctx::{fetch_api, fetch_api_result, Ctx, CtxError, OtherError},
    },
    runtime::{
        msg::{Action, ActionCalendar, ActionLoad, Event, Internal, Msg},
        Effect, EffectFuture, Effects, Env, EnvFutureExt, UpdateWithCtx,
    },
    types::{
        api::{APIRequest, EmptyResponse},
        calendar::{Badge, CalendarEvent, EventAction, EventKind, MonthEvents, NoteForm},
        format::{month_title, readable_date},
    },
};

/// The displayed month.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Selected {
    pub year: i32,
    pub month: u32,
}

impl Selected {
    pub fn of(date: NaiveDate) -> Self {
        Selected {
            year: date.year(),
            month: date.month(),
        }
    }
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
    pub fn shift(&self, months: i32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 + months;
        Selected {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }
    pub fn request(&self) -> APIRequest {
        APIRequest::CalendarEvents {
            year: self.year,
            month: self.month,
        }
    }
}

#[derive(Derivative, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[derivative(Default)]
pub struct Filters {
    #[derivative(Default(value = "true"))]
    pub trabajos: bool,
    #[derivative(Default(value = "true"))]
    pub mantenciones: bool,
    #[derivative(Default(value = "true"))]
    pub prestamos: bool,
    #[derivative(Default(value = "true"))]
    pub notas: bool,
}

impl Filters {
    pub fn is_enabled(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Job => self.trabajos,
            EventKind::Maintenance => self.mantenciones,
            EventKind::Loan => self.prestamos,
            EventKind::Note => self.notas,
        }
    }
    pub fn set(&mut self, kind: EventKind, enabled: bool) {
        match kind {
            EventKind::Job => self.trabajos = enabled,
            EventKind::Maintenance => self.mantenciones = enabled,
            EventKind::Loan => self.prestamos = enabled,
            EventKind::Note => self.notas = enabled,
        }
    }
    /// One checkbox per kind, in display priority order.
    pub fn toggles(&self) -> Vec<FilterToggle> {
        EventKind::iter()
            .map(|kind| FilterToggle {
                kind,
                label: kind.label(),
                icon: kind.icon(),
                enabled: self.is_enabled(kind),
            })
            .collect()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
pub struct FilterToggle {
    pub kind: EventKind,
    pub label: &'static str,
    pub icon: &'static str,
    pub enabled: bool,
}

/// An event together with everything the view shows about it.
#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
pub struct EventView {
    pub event: CalendarEvent,
    pub kind: EventKind,
    pub title: String,
    pub icon: &'static str,
    pub color: Option<String>,
    pub badge: Option<Badge>,
    pub actions: Vec<EventAction>,
}

impl From<CalendarEvent> for EventView {
    fn from(event: CalendarEvent) -> Self {
        let kind = event.kind();
        EventView {
            kind,
            title: event.title(),
            icon: kind.icon(),
            color: event.color().map(ToOwned::to_owned),
            badge: event.badge(),
            actions: event.actions(),
            event,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
pub struct GridCell {
    pub date: NaiveDate,
    pub day: u32,
    pub other_month: bool,
    pub today: bool,
    pub selected: bool,
    pub has_events: bool,
    /// First events of the day, the rest is counted in `more`.
    pub events: Vec<EventView>,
    pub more: usize,
}

#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
pub struct NoteEditor {
    /// `None` while creating a note.
    pub id: Option<u64>,
    pub form: NoteForm,
}

#[derive(Default, Clone, PartialEq, Serialize, Debug)]
pub struct Calendar {
    pub selected: Option<Selected>,
    pub filters: Filters,
    pub filter_toggles: Vec<FilterToggle>,
    pub selected_day: Option<NaiveDate>,
    pub month_events: Option<RequestLoadable<Selected, MonthEvents>>,
    pub title: String,
    pub grid: Vec<GridCell>,
    pub day_title: Option<String>,
    pub day_events: Vec<EventView>,
    pub event_details: Option<EventView>,
    pub note_editor: Option<NoteEditor>,
    pub confirmation: Option<Confirmation<u64>>,
}

impl<E: Env + 'static> UpdateWithCtx<E> for Calendar {
    fn update(&mut self, msg: &Msg, ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::Calendar(selected))) => {
                let selected = selected.unwrap_or_else(|| Selected::of(E::today()));
                let selected_effects = eq_update(&mut self.selected, Some(selected));
                let month_events_effects =
                    month_events_update::<E>(&mut self.month_events, &selected, ctx);
                let view_effects = self.view_update(E::today());
                selected_effects
                    .join(month_events_effects)
                    .join(view_effects)
            }
            Msg::Action(Action::Unload) => eq_update(self, Calendar::default()),
            Msg::Action(Action::Calendar(ActionCalendar::PrevMonth)) => {
                self.navigate::<E>(-1, ctx)
            }
            Msg::Action(Action::Calendar(ActionCalendar::NextMonth)) => {
                self.navigate::<E>(1, ctx)
            }
            Msg::Action(Action::Calendar(ActionCalendar::Today)) => {
                let today = E::today();
                let selected = Selected::of(today);
                let selected_effects = eq_update(&mut self.selected, Some(selected));
                let selected_day_effects = eq_update(&mut self.selected_day, Some(today));
                let month_events_effects =
                    month_events_update::<E>(&mut self.month_events, &selected, ctx);
                let view_effects = self.view_update(today);
                selected_effects
                    .join(selected_day_effects)
                    .join(month_events_effects)
                    .join(view_effects)
            }
            Msg::Action(Action::Calendar(ActionCalendar::SetFilter { kind, enabled })) => {
                let mut filters = self.filters;
                filters.set(*kind, *enabled);
                let filters_effects = eq_update(&mut self.filters, filters);
                let view_effects = self.view_update(E::today());
                filters_effects.join(view_effects)
            }
            Msg::Action(Action::Calendar(ActionCalendar::SelectDay(date))) => {
                let selected_day_effects = eq_update(&mut self.selected_day, Some(*date));
                let view_effects = self.view_update(E::today());
                selected_day_effects.join(view_effects)
            }
            Msg::Action(Action::Calendar(ActionCalendar::OpenEvent { kind, index })) => {
                let event = self
                    .month_events
                    .as_ref()
                    .and_then(|month_events| month_events.content.ready())
                    .and_then(|month_events| {
                        month_events
                            .iter()
                            .filter(|event| event.kind() == *kind)
                            .nth(*index)
                    });
                let source = Event::CalendarEventOpened {
                    kind: *kind,
                    index: *index,
                };
                match event {
                    Some(event) => {
                        eq_update(&mut self.event_details, Some(EventView::from(event)))
                            .join(Effects::msg(Msg::Event(source)).unchanged())
                    }
                    None => Effects::msg(Msg::Event(Event::Error {
                        error: CtxError::from(OtherError::EventNotFound),
                        source: Box::new(source),
                    }))
                    .unchanged(),
                }
            }
            Msg::Action(Action::Calendar(ActionCalendar::CloseEvent)) => {
                eq_update(&mut self.event_details, None)
            }
            Msg::Action(Action::Calendar(ActionCalendar::NewNote)) => {
                let date = self.selected_day.unwrap_or_else(E::today);
                eq_update(
                    &mut self.note_editor,
                    Some(NoteEditor {
                        id: None,
                        form: NoteForm::new(date),
                    }),
                )
            }
            Msg::Action(Action::Calendar(ActionCalendar::EditNote(id))) => {
                Effects::one(get_note::<E>(*id, ctx)).unchanged()
            }
            Msg::Action(Action::Calendar(ActionCalendar::UpdateNote(form))) => {
                match &mut self.note_editor {
                    Some(editor) => eq_update(&mut editor.form, form.to_owned()),
                    None => Effects::none().unchanged(),
                }
            }
            Msg::Action(Action::Calendar(ActionCalendar::SaveNote)) => match &self.note_editor {
                Some(NoteEditor { id, form }) if form.is_valid() => {
                    let request = match id {
                        Some(id) => APIRequest::EditNote {
                            id: *id,
                            form: form.to_owned(),
                        },
                        None => APIRequest::CreateNote {
                            form: form.to_owned(),
                        },
                    };
                    Effects::one(write_note::<E>(request, ctx)).unchanged()
                }
                Some(NoteEditor { id, .. }) => Effects::msg(Msg::Event(Event::Error {
                    error: CtxError::from(OtherError::RequiredFieldsMissing),
                    source: Box::new(Event::NoteSaved { id: *id }),
                }))
                .unchanged(),
                None => Effects::none().unchanged(),
            },
            Msg::Action(Action::Calendar(ActionCalendar::CloseNoteEditor)) => {
                eq_update(&mut self.note_editor, None)
            }
            Msg::Action(Action::Calendar(ActionCalendar::DeleteNote(id))) => eq_update(
                &mut self.confirmation,
                Some(Confirmation::new(
                    "¿Estás seguro de eliminar esta nota?",
                    *id,
                )),
            ),
            Msg::Action(Action::Calendar(ActionCalendar::Confirm(accepted))) => {
                match confirmation_answer(&mut self.confirmation, *accepted) {
                    Some(id) => {
                        Effects::one(write_note::<E>(APIRequest::DeleteNote { id }, ctx))
                    }
                    None => Effects::none(),
                }
            }
            Msg::Action(Action::Calendar(ActionCalendar::EventAction(action))) => match action {
                EventAction::EditNote { id } => {
                    Effects::one(get_note::<E>(*id, ctx)).unchanged()
                }
                EventAction::DeleteNote { id } => eq_update(
                    &mut self.confirmation,
                    Some(Confirmation::new(
                        "¿Estás seguro de eliminar esta nota?",
                        *id,
                    )),
                ),
                action => match action.url() {
                    Some(url) => {
                        Effects::msg(Msg::Event(Event::NavigationRequested { url })).unchanged()
                    }
                    None => Effects::none().unchanged(),
                },
            },
            Msg::Internal(Internal::CalendarEventsResult(request, request_id, result)) => {
                let (month_events_effects, _) = request_update(
                    &mut self.month_events,
                    RequestAction::RequestResult {
                        request,
                        request_id: *request_id,
                        result,
                    },
                );
                if !month_events_effects.has_changed {
                    return month_events_effects;
                }
                let view_effects = self.view_update(E::today());
                let source = Event::CalendarEventsLoaded {
                    year: request.year,
                    month: request.month,
                };
                let event_effects = match result.as_ref() {
                    Ok(_) => Effects::msg(Msg::Event(source)).unchanged(),
                    Err(error) => Effects::msg(Msg::Event(Event::Error {
                        error: error.to_owned(),
                        source: Box::new(source),
                    }))
                    .unchanged(),
                };
                month_events_effects
                    .join(view_effects)
                    .join(event_effects)
            }
            Msg::Internal(Internal::NoteResult(id, result)) => match result.as_ref() {
                Ok(note) => {
                    let details_effects = eq_update(&mut self.event_details, None);
                    let editor_effects = eq_update(
                        &mut self.note_editor,
                        Some(NoteEditor {
                            id: Some(*id),
                            form: NoteForm::from(note),
                        }),
                    );
                    details_effects
                        .join(editor_effects)
                        .join(Effects::msg(Msg::Event(Event::NoteLoaded { id: *id })).unchanged())
                }
                Err(error) => Effects::msg(Msg::Event(Event::Error {
                    error: error.to_owned(),
                    source: Box::new(Event::NoteLoaded { id: *id }),
                }))
                .unchanged(),
            },
            Msg::Internal(Internal::NoteWriteResult(request, result)) => {
                let source = match request {
                    APIRequest::CreateNote { .. } => Event::NoteSaved { id: None },
                    APIRequest::EditNote { id, .. } => Event::NoteSaved { id: Some(*id) },
                    APIRequest::DeleteNote { id } => Event::NoteDeleted { id: *id },
                    _ => return Effects::none().unchanged(),
                };
                match result {
                    Ok(_) => {
                        let modal_effects = match source {
                            Event::NoteDeleted { .. } => eq_update(&mut self.event_details, None),
                            _ => eq_update(&mut self.note_editor, None),
                        };
                        let month_events_effects = match self.selected {
                            Some(selected) => {
                                month_events_update::<E>(&mut self.month_events, &selected, ctx)
                            }
                            None => Effects::none().unchanged(),
                        };
                        modal_effects
                            .join(month_events_effects)
                            .join(Effects::msg(Msg::Event(source)).unchanged())
                    }
                    Err(error) => Effects::msg(Msg::Event(Event::Error {
                        error: error.to_owned(),
                        source: Box::new(source),
                    }))
                    .unchanged(),
                }
            }
            _ => Effects::none().unchanged(),
        }
    }
}

impl Calendar {
    fn navigate<E: Env + 'static>(&mut self, months: i32, ctx: &Ctx) -> Effects {
        let selected = match self.selected {
            Some(selected) => selected.shift(months),
            None => return Effects::none().unchanged(),
        };
        let selected_effects = eq_update(&mut self.selected, Some(selected));
        let selected_day_effects = eq_update(&mut self.selected_day, None);
        let month_events_effects = month_events_update::<E>(&mut self.month_events, &selected, ctx);
        let view_effects = self.view_update(E::today());
        selected_effects
            .join(selected_day_effects)
            .join(month_events_effects)
            .join(view_effects)
    }
    /// Recomputes everything derived from the month, the filters and the selected day.
    fn view_update(&mut self, today: NaiveDate) -> Effects {
        let events = self
            .month_events
            .as_ref()
            .and_then(|month_events| month_events.content.ready());
        let (title, grid) = match &self.selected {
            Some(selected) => (
                month_title(selected.year, selected.month),
                month_grid(selected, today, self.selected_day, events, &self.filters),
            ),
            None => (String::new(), vec![]),
        };
        let day_title = self.selected_day.map(readable_date);
        let day_events = match (self.selected_day, events) {
            (Some(date), Some(events)) => events_for_day(events, date, &self.filters)
                .into_iter()
                .map(EventView::from)
                .collect(),
            _ => vec![],
        };
        let filter_toggles_effects = eq_update(&mut self.filter_toggles, self.filters.toggles());
        let title_effects = eq_update(&mut self.title, title);
        let grid_effects = eq_update(&mut self.grid, grid);
        let day_title_effects = eq_update(&mut self.day_title, day_title);
        let day_events_effects = eq_update(&mut self.day_events, day_events);
        filter_toggles_effects
            .join(title_effects)
            .join(grid_effects)
            .join(day_title_effects)
            .join(day_events_effects)
    }
}

/// Events of `date` whose kind is enabled, jobs first, then loans,
/// maintenance and notes. Order within a kind is the server's.
pub fn events_for_day(events: &MonthEvents, date: NaiveDate, filters: &Filters) -> Vec<CalendarEvent> {
    events
        .on(date)
        .filter(|event| filters.is_enabled(event.kind()))
        .sorted_by_key(|event| event.kind().priority())
        .collect()
}

/// Monday-first grid of whole weeks covering the month.
pub fn month_grid(
    selected: &Selected,
    today: NaiveDate,
    selected_day: Option<NaiveDate>,
    events: Option<&MonthEvents>,
    filters: &Filters,
) -> Vec<GridCell> {
    let (first, next_first) = match (selected.first_day(), selected.shift(1).first_day()) {
        (Some(first), Some(next_first)) => (first, next_first),
        _ => return vec![],
    };
    let leading = first.weekday().num_days_from_monday() as i64;
    let days_in_month = next_first.signed_duration_since(first).num_days();
    let cells = (leading + days_in_month + 6) / 7 * 7;
    let start = first - Duration::days(leading);
    (0..cells)
        .filter_map(|offset| start.checked_add_signed(Duration::days(offset)))
        .map(|date| {
            let day_events = events
                .map(|events| events_for_day(events, date, filters))
                .unwrap_or_default();
            let more = day_events.len().saturating_sub(CALENDAR_DAY_PREVIEW_SIZE);
            GridCell {
                date,
                day: date.day(),
                other_month: date.month() != selected.month,
                today: date == today,
                selected: selected_day == Some(date),
                has_events: !day_events.is_empty(),
                events: day_events
                    .into_iter()
                    .take(CALENDAR_DAY_PREVIEW_SIZE)
                    .map(EventView::from)
                    .collect(),
                more,
            }
        })
        .collect()
}

fn month_events_update<E: Env + 'static>(
    month_events: &mut Option<RequestLoadable<Selected, MonthEvents>>,
    selected: &Selected,
    ctx: &Ctx,
) -> Effects {
    let (effects, request_id) =
        request_update(month_events, RequestAction::Requested { request: selected });
    match request_id {
        Some(request_id) => {
            let selected = *selected;
            tracing::debug!(
                request_id,
                "Fetching calendar events for {}-{:02}",
                selected.year,
                selected.month
            );
            effects.join(
                Effects::future(EffectFuture::Concurrent(
                    fetch_api::<E, MonthEvents>(&selected.request(), ctx.csrf_token.as_ref())
                        .map(move |result| {
                            Msg::Internal(Internal::CalendarEventsResult(
                                selected,
                                request_id,
                                Box::new(result),
                            ))
                        })
                        .boxed_env(),
                ))
                .unchanged(),
            )
        }
        None => effects,
    }
}

fn get_note<E: Env + 'static>(id: u64, ctx: &Ctx) -> Effect {
    EffectFuture::Concurrent(
        fetch_api::<E, _>(&APIRequest::GetNote { id }, ctx.csrf_token.as_ref())
            .map(move |result| Msg::Internal(Internal::NoteResult(id, Box::new(result))))
            .boxed_env(),
    )
    .into()
}

fn write_note<E: Env + 'static>(request: APIRequest, ctx: &Ctx) -> Effect {
    // Deleting only checks the status, saving also needs `success: true`.
    let future = match request {
        APIRequest::DeleteNote { .. } => {
            fetch_api::<E, EmptyResponse>(&request, ctx.csrf_token.as_ref())
        }
        _ => fetch_api_result::<E, EmptyResponse>(&request, ctx.csrf_token.as_ref()),
    };
    EffectFuture::Concurrent(
        future
            .map(move |result| {
                Msg::Internal(Internal::NoteWriteResult(request, result.map(|_| ())))
            })
            .boxed_env(),
    )
    .into()
}
