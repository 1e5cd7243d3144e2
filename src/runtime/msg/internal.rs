use crate::{
    models::{calendar::Selected as CalendarSelected, ctx::CtxError},
    types::{
        api::{APIRequest, QuoteTotals},
        calendar::{MonthEvents, Note},
        notifications::NotificationsList,
        quote::{ServiceOption, ServiceParameter},
    },
};

//
// Those messages are meant to be dispatched and handled only inside the core
//
#[derive(Debug)]
pub enum Internal {
    /// Result of a month fetch, tagged with the request and its sequence id.
    CalendarEventsResult(CalendarSelected, u64, Box<Result<MonthEvents, CtxError>>),
    NoteResult(u64, Box<Result<Note, CtxError>>),
    /// Result of creating, editing or deleting a note.
    NoteWriteResult(APIRequest, Result<(), CtxError>),
    NotificationsResult(u64, Box<Result<NotificationsList, CtxError>>),
    /// Poll timer of the given generation elapsed.
    NotificationsPollTick(u64),
    NotificationReadResult {
        id: u64,
        result: Result<(), CtxError>,
    },
    AllNotificationsReadResult(Result<(), CtxError>),
    ServicesResult(u64, Box<Result<Vec<ServiceOption>, CtxError>>),
    ServiceParametersResult(u64, Box<Result<Vec<ServiceParameter>, CtxError>>),
    /// Result of adding or deleting an item, or changing the quote status.
    QuoteMutationResult(APIRequest, Result<(), CtxError>),
    /// Result of saving the travel expenses typed as `String`.
    TravelExpensesResult(String, u64, Box<Result<QuoteTotals, CtxError>>),
    EntityDeleteResult(APIRequest, Result<Option<String>, CtxError>),
    /// Ctx toggled a favorite; `bool` is the new state.
    FavoriteToggled(u64, bool),
    /// Timers of the landing page, tagged with the generation that armed them.
    CarouselTick(u64),
    CounterTick(u64),
    ToastExpired(u64),
    SearchDebounced(u64),
}
