use serde::Serialize;

use crate::{
    models::ctx::CtxError,
    types::{api::QuoteTotals, calendar::EventKind, entity::EntityKind, quote::ItemKind},
};

///
/// Those messages are meant to be dispatched by the core and handled by the
/// host (the web bindings or tests).
#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(tag = "event", content = "args")]
pub enum Event {
    PreferencesPushedToStorage,
    DarkModeToggled {
        enabled: bool,
    },
    FavoriteToggled {
        service_id: u64,
        favorite: bool,
    },
    CalendarEventsLoaded {
        year: i32,
        month: u32,
    },
    CalendarEventOpened {
        kind: EventKind,
        index: usize,
    },
    NoteLoaded {
        id: u64,
    },
    NoteSaved {
        id: Option<u64>,
    },
    NoteDeleted {
        id: u64,
    },
    NotificationsLoaded,
    NotificationMarkedRead {
        id: u64,
    },
    AllNotificationsMarkedRead,
    ServicesLoaded {
        category_id: u64,
    },
    QuoteItemAdded {
        kind: ItemKind,
    },
    QuoteItemDeleted {
        kind: ItemKind,
        item_id: u64,
    },
    QuoteStatusChanged {
        estado: String,
    },
    TravelExpensesUpdated {
        totals: QuoteTotals,
    },
    EntityDeleted {
        kind: EntityKind,
        id: u64,
        message: Option<String>,
    },
    PageReloadRequested,
    NavigationRequested {
        url: String,
    },
    ShareWindowRequested {
        url: String,
    },
    ContactFormSubmitted,
    Error {
        error: CtxError,
        source: Box<Event>,
    },
}
