use chrono::NaiveDate;
use cotiza_derive::Model;
use futures::future;
use serde_json::json;

use crate::models::calendar::{Calendar, NoteEditor};
use crate::models::ctx::{Ctx, CtxError, OtherError};
use crate::runtime::msg::{Action, ActionCalendar, ActionLoad, Event};
use crate::runtime::{EnvFutureExt, Runtime, RuntimeAction, TryEnvFuture};
use crate::types::calendar::{NoteForm, NotePriority};
use crate::types::csrf::CsrfToken;
use crate::types::preferences::Preferences;
use crate::unit_tests::{
    core_events, default_fetch_handler, Request, TestEnv, FETCH_HANDLER, REQUESTS,
};

#[derive(Model, Clone, Default)]
#[model(TestEnv)]
struct TestModel {
    ctx: Ctx,
    calendar: Calendar,
}

fn test_model() -> TestModel {
    TestModel {
        ctx: Ctx::new(Some(CsrfToken("t0k3n".to_owned())), Preferences::default()),
        calendar: Calendar::default(),
    }
}

fn fetch_handler(request: Request) -> TryEnvFuture<serde_json::Value> {
    match request {
        Request { url, method, .. }
            if url.starts_with("/notificaciones/api/calendario-eventos/") && method == "GET" =>
        {
            future::ok(json!({ "notas": [{ "id": 4, "titulo": "Llamar", "fecha": "2024-03-15" }] }))
                .boxed_env()
        }
        Request { url, method, .. }
            if url == "/notificaciones/api/nota/crear/" && method == "POST" =>
        {
            future::ok(json!({ "success": true, "nota_id": 9 })).boxed_env()
        }
        Request { url, method, .. } if url == "/notificaciones/api/nota/4/" && method == "GET" => {
            future::ok(json!({
                "id": 4,
                "titulo": "Llamar",
                "descripcion": "Confirmar despacho",
                "fecha": "2024-03-15",
                "prioridad": "alta",
                "color": "#ef4444"
            }))
            .boxed_env()
        }
        Request { url, method, .. }
            if url == "/notificaciones/api/nota/4/editar/" && method == "POST" =>
        {
            future::ok(json!({ "success": false, "error": "Nota bloqueada" })).boxed_env()
        }
        Request { url, method, .. }
            if url == "/notificaciones/api/nota/4/eliminar/" && method == "POST" =>
        {
            future::ok(json!({})).boxed_env()
        }
        _ => default_fetch_handler(request),
    }
}

fn dispatch(runtime: &Runtime<TestEnv, TestModel>, action: Action) {
    TestEnv::run(|| {
        runtime.dispatch(RuntimeAction {
            field: None,
            action,
        })
    });
}

#[test]
fn create_note() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);
    let (runtime, mut rx) = Runtime::<TestEnv, _>::new(test_model(), vec![], 1000);
    dispatch(&runtime, Action::Load(ActionLoad::Calendar(None)));
    dispatch(&runtime, Action::Calendar(ActionCalendar::NewNote));
    let form = runtime
        .model()
        .unwrap()
        .calendar
        .note_editor
        .as_ref()
        .map(|editor| editor.form.to_owned())
        .expect("Note editor is open");
    assert_eq!(form.fecha, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    assert_eq!(form.color, "#3b82f6");
    dispatch(
        &runtime,
        Action::Calendar(ActionCalendar::UpdateNote(NoteForm {
            titulo: "Llamar proveedor".to_owned(),
            ..form
        })),
    );
    core_events(&mut rx);
    dispatch(&runtime, Action::Calendar(ActionCalendar::SaveNote));
    let requests = REQUESTS.read().unwrap();
    let request = requests
        .iter()
        .find(|request| request.url == "/notificaciones/api/nota/crear/")
        .expect("Note has been posted");
    assert_eq!(
        request.body,
        "nota_id=&titulo=Llamar%20proveedor&descripcion=&fecha=2024-03-15&prioridad=media&color=%233b82f6"
    );
    assert_eq!(
        request.headers.get("content-type").map(String::as_str),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(
        request.headers.get("x-csrftoken").map(String::as_str),
        Some("t0k3n"),
        "CSRF token is attached"
    );
    assert_eq!(
        requests
            .iter()
            .filter(|request| request.url.starts_with("/notificaciones/api/calendario-eventos/"))
            .count(),
        2,
        "Month is fetched again after saving"
    );
    assert!(runtime.model().unwrap().calendar.note_editor.is_none());
    assert!(core_events(&mut rx).contains(&Event::NoteSaved { id: None }));
}

#[test]
fn note_without_title_is_not_sent() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);
    let (runtime, mut rx) = Runtime::<TestEnv, _>::new(test_model(), vec![], 1000);
    dispatch(&runtime, Action::Calendar(ActionCalendar::NewNote));
    dispatch(&runtime, Action::Calendar(ActionCalendar::SaveNote));
    assert!(REQUESTS.read().unwrap().is_empty(), "No requests have been sent");
    assert!(runtime.model().unwrap().calendar.note_editor.is_some());
    assert_eq!(
        core_events(&mut rx),
        vec![Event::Error {
            error: CtxError::from(OtherError::RequiredFieldsMissing),
            source: Box::new(Event::NoteSaved { id: None }),
        }]
    );
}

#[test]
fn edit_note_failure_keeps_editor_open() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);
    let (runtime, mut rx) = Runtime::<TestEnv, _>::new(test_model(), vec![], 1000);
    dispatch(&runtime, Action::Calendar(ActionCalendar::EditNote(4)));
    assert_eq!(
        runtime.model().unwrap().calendar.note_editor,
        Some(NoteEditor {
            id: Some(4),
            form: NoteForm {
                titulo: "Llamar".to_owned(),
                descripcion: "Confirmar despacho".to_owned(),
                fecha: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                prioridad: NotePriority::Alta,
                color: "#ef4444".to_owned(),
            },
        }),
        "Editor is filled with the note"
    );
    dispatch(&runtime, Action::Calendar(ActionCalendar::SaveNote));
    assert!(runtime.model().unwrap().calendar.note_editor.is_some());
    let events = core_events(&mut rx);
    assert_eq!(
        events.last(),
        Some(&Event::Error {
            error: CtxError::API(crate::types::api::APIError {
                message: "Nota bloqueada".to_owned()
            }),
            source: Box::new(Event::NoteSaved { id: Some(4) }),
        })
    );
}

#[test]
fn declined_delete_sends_nothing() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);
    let (runtime, _rx) = Runtime::<TestEnv, _>::new(test_model(), vec![], 1000);
    dispatch(&runtime, Action::Calendar(ActionCalendar::DeleteNote(4)));
    assert_eq!(
        runtime
            .model()
            .unwrap()
            .calendar
            .confirmation
            .as_ref()
            .map(|confirmation| confirmation.message.to_owned()),
        Some("¿Estás seguro de eliminar esta nota?".to_owned())
    );
    dispatch(&runtime, Action::Calendar(ActionCalendar::Confirm(false)));
    assert!(runtime.model().unwrap().calendar.confirmation.is_none());
    assert!(REQUESTS.read().unwrap().is_empty(), "No requests have been sent");
}

#[test]
fn accepted_delete() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);
    let (runtime, mut rx) = Runtime::<TestEnv, _>::new(test_model(), vec![], 1000);
    dispatch(&runtime, Action::Load(ActionLoad::Calendar(None)));
    dispatch(&runtime, Action::Calendar(ActionCalendar::DeleteNote(4)));
    dispatch(&runtime, Action::Calendar(ActionCalendar::Confirm(true)));
    let requests = REQUESTS.read().unwrap();
    assert_eq!(
        requests
            .iter()
            .map(|request| (request.method.as_str(), request.url.as_str()))
            .collect::<Vec<_>>(),
        vec![
            ("GET", "/notificaciones/api/calendario-eventos/?mes=3&anio=2024"),
            ("POST", "/notificaciones/api/nota/4/eliminar/"),
            ("GET", "/notificaciones/api/calendario-eventos/?mes=3&anio=2024"),
        ]
    );
    assert_eq!(
        requests[1].headers.get("x-csrftoken").map(String::as_str),
        Some("t0k3n")
    );
    assert!(core_events(&mut rx).contains(&Event::NoteDeleted { id: 4 }));
}
