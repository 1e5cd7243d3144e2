use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    models::{
        calendar::Selected as CalendarSelected,
        landing::{ContactField, Selected as LandingSelected, ToastKind},
        quote_editor::Selected as QuoteEditorSelected,
        table_with_filters::Selected as TableWithFiltersSelected,
    },
    types::{
        calendar::{EventAction, EventKind, NoteForm},
        csrf::CsrfSources,
        entity::EntityKind,
        quote::{ItemKind, LaborItemForm},
        share::ShareNetwork,
        table::Selection,
    },
};

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionCtx {
    /// Re-read the CSRF token, e.g. after the host page rotated the cookie.
    UpdateCsrfSources(CsrfSources),
    ToggleDarkMode,
    ToggleFavorite(u64),
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionCalendar {
    PrevMonth,
    NextMonth,
    Today,
    SetFilter {
        kind: EventKind,
        enabled: bool,
    },
    SelectDay(NaiveDate),
    /// `index` points into the month's list of events of that kind.
    OpenEvent {
        kind: EventKind,
        index: usize,
    },
    CloseEvent,
    NewNote,
    EditNote(u64),
    UpdateNote(NoteForm),
    SaveNote,
    CloseNoteEditor,
    DeleteNote(u64),
    Confirm(bool),
    EventAction(EventAction),
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionTableWithFilters {
    Search(String),
    SetDropdown { id: String, selection: Selection },
    ClearFilters,
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionNotificationBell {
    ToggleDropdown,
    CloseDropdown,
    MarkAsRead(u64),
    MarkAllAsRead,
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionQuoteEditor {
    ShowModal(ItemKind),
    CloseModal(ItemKind),
    SelectCategory(Option<u64>),
    SelectService(Option<u64>),
    #[serde(rename_all = "camelCase")]
    UpdateServiceForm {
        cantidad: String,
        precio_unitario: String,
        descripcion_personalizada: String,
    },
    #[serde(rename_all = "camelCase")]
    SetParameter {
        parameter_id: u64,
        value: String,
    },
    /// `price` is the `data-precio` of the selected option.
    #[serde(rename_all = "camelCase")]
    SelectMaterial {
        material_id: Option<u64>,
        price: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    UpdateMaterialForm {
        cantidad: String,
        precio_unitario: String,
        descripcion_personalizada: String,
    },
    UpdateLaborForm(LaborItemForm),
    AddItem(ItemKind),
    #[serde(rename_all = "camelCase")]
    DeleteItem {
        kind: ItemKind,
        item_id: u64,
    },
    UpdateTravelExpenses(String),
    ToggleStatusMenu,
    CloseStatusMenu,
    ChangeStatus(String),
    Confirm(bool),
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionEntityManagement {
    ShowModal(EntityKind),
    CloseModal,
    Delete {
        kind: EntityKind,
        id: u64,
        #[serde(default)]
        name: String,
    },
    Confirm(bool),
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionLanding {
    /// Manual carousel scroll, `1` forward and `-1` back.
    ScrollCarousel(i32),
    #[serde(rename_all = "camelCase")]
    UpdateCarouselMetrics {
        scroll_left: i32,
        client_width: i32,
        scroll_width: i32,
    },
    HoverCarousel(bool),
    ShowToast {
        message: String,
        kind: ToastKind,
    },
    DismissToast(u64),
    SearchServices(String),
    SetRating(u8),
    Share {
        network: ShareNetwork,
        url: String,
        text: String,
    },
    SubmitContact(Vec<ContactField>),
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "model", content = "args")]
pub enum ActionLoad {
    Calendar(Option<CalendarSelected>),
    TableWithFilters(TableWithFiltersSelected),
    NotificationBell,
    QuoteEditor(QuoteEditorSelected),
    Landing(LandingSelected),
}

/// Actions are dispatched by the UI and handled by the models.
#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum Action {
    Ctx(ActionCtx),
    Calendar(ActionCalendar),
    TableWithFilters(ActionTableWithFilters),
    NotificationBell(ActionNotificationBell),
    QuoteEditor(ActionQuoteEditor),
    EntityManagement(ActionEntityManagement),
    Landing(ActionLanding),
    Load(ActionLoad),
    Unload,
}
