use std::time::Duration;

use cotiza_derive::Model;
use futures::{future, FutureExt};
use serde_json::json;

use crate::models::ctx::{Ctx, CtxError, OtherError};
use crate::models::quote_editor::{QuoteEditor, Selected, TotalsView};
use crate::runtime::msg::{Action, ActionLoad, ActionQuoteEditor, Event};
use crate::runtime::{Env, EnvFutureExt, Runtime, RuntimeAction, TryEnvFuture};
use crate::types::api::QuoteTotals;
use crate::types::csrf::CsrfToken;
use crate::types::quote::{ItemKind, LaborItemForm};
use crate::unit_tests::{
    core_events, default_fetch_handler, Request, TestEnv, FETCH_HANDLER, REQUESTS,
};

#[derive(Model, Clone, Default)]
#[model(TestEnv)]
struct TestModel {
    ctx: Ctx,
    quote_editor: QuoteEditor,
}

fn fetch_handler(request: Request) -> TryEnvFuture<serde_json::Value> {
    match request {
        Request { url, method, .. }
            if url == "/cotizaciones/api/categoria/3/servicios/" && method == "GET" =>
        {
            future::ok(json!([
                { "id": 10, "nombre": "Instalación tablero", "precio_base": "45000.00", "es_parametrizable": true },
                { "id": 11, "nombre": "Revisión", "precio_base": 15000, "es_parametrizable": false }
            ]))
            .boxed_env()
        }
        Request { url, method, .. }
            if url == "/cotizaciones/api/servicio/10/parametros/" && method == "GET" =>
        {
            future::ok(json!([
                { "id": 1, "nombre": "Fases", "tipo": "select", "opciones_list": ["1", "3"], "valor_por_defecto": "3", "requerido": true },
                { "id": 2, "nombre": "Certificado", "tipo": "boolean" }
            ]))
            .boxed_env()
        }
        Request { url, method, .. }
            if url == "/cotizaciones/12/item-mano-obra/" && method == "POST" =>
        {
            future::ok(json!({ "success": true })).boxed_env()
        }
        Request { url, method, .. }
            if url == "/cotizaciones/12/item-material/5/eliminar/" && method == "DELETE" =>
        {
            future::ok(json!({ "success": true })).boxed_env()
        }
        Request { url, method, .. }
            if url == "/cotizaciones/12/estado/" && method == "POST" =>
        {
            future::ok(json!({ "success": false, "error": "Transición no permitida" })).boxed_env()
        }
        Request { url, method, .. }
            if url == "/cotizaciones/12/gastos-traslado/" && method == "POST" =>
        {
            future::ok(json!({
                "success": true,
                "gastos_traslado": 20000,
                "valor_neto": "120000.00",
                "valor_iva": 22800,
                "valor_total": 142800
            }))
            .boxed_env()
        }
        _ => default_fetch_handler(request),
    }
}

fn test_model(quote_id: Option<u64>) -> TestModel {
    TestModel {
        ctx: Ctx::new(Some(CsrfToken("t0k3n".to_owned())), Default::default()),
        quote_editor: QuoteEditor {
            selected: Some(Selected { quote_id }),
            ..QuoteEditor::default()
        },
    }
}

fn dispatch(runtime: &Runtime<TestEnv, TestModel>, action: ActionQuoteEditor) {
    TestEnv::run(|| {
        runtime.dispatch(RuntimeAction {
            field: None,
            action: Action::QuoteEditor(action),
        })
    });
}

#[test]
fn category_and_service_selection() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);
    let (runtime, mut rx) = Runtime::<TestEnv, _>::new(test_model(Some(12)), vec![], 1000);
    dispatch(&runtime, ActionQuoteEditor::ShowModal(ItemKind::Service));
    dispatch(&runtime, ActionQuoteEditor::SelectCategory(Some(3)));
    assert_eq!(
        core_events(&mut rx),
        vec![Event::ServicesLoaded { category_id: 3 }]
    );
    dispatch(&runtime, ActionQuoteEditor::SelectService(Some(10)));
    {
        let model = runtime.model().unwrap();
        let form = model
            .quote_editor
            .service_form
            .as_ref()
            .expect("Service modal is open");
        assert_eq!(form.services.len(), 2);
        assert_eq!(form.precio_unitario, "45000", "Base price fills the unit price");
        assert_eq!(
            form.parametros
                .iter()
                .map(|input| (input.parameter.id, input.value.as_str()))
                .collect::<Vec<_>>(),
            vec![(1, "1"), (2, "true")],
            "Choice parameters start from their first option"
        );
    }
    dispatch(&runtime, ActionQuoteEditor::SelectService(Some(11)));
    let model = runtime.model().unwrap();
    let form = model.quote_editor.service_form.as_ref().unwrap();
    assert!(form.parametros.is_empty());
    assert_eq!(form.precio_unitario, "15000");
    assert_eq!(
        REQUESTS.read().unwrap().len(),
        2,
        "Plain services do not fetch parameters"
    );
}

#[test]
fn add_item_requires_quote_and_fields() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);
    let (runtime, mut rx) = Runtime::<TestEnv, _>::new(test_model(None), vec![], 1000);
    dispatch(&runtime, ActionQuoteEditor::ShowModal(ItemKind::Labor));
    dispatch(&runtime, ActionQuoteEditor::AddItem(ItemKind::Labor));
    assert_eq!(
        core_events(&mut rx),
        vec![Event::Error {
            error: CtxError::from(OtherError::QuoteNotSelected),
            source: Box::new(Event::QuoteItemAdded {
                kind: ItemKind::Labor
            }),
        }]
    );
    let (runtime, mut rx) = Runtime::<TestEnv, _>::new(test_model(Some(12)), vec![], 1000);
    dispatch(&runtime, ActionQuoteEditor::ShowModal(ItemKind::Labor));
    dispatch(
        &runtime,
        ActionQuoteEditor::UpdateLaborForm(LaborItemForm {
            descripcion: "Cableado".to_owned(),
            horas: "4".to_owned(),
            precio_hora: String::new(),
        }),
    );
    dispatch(&runtime, ActionQuoteEditor::AddItem(ItemKind::Labor));
    assert_eq!(
        core_events(&mut rx),
        vec![Event::Error {
            error: CtxError::from(OtherError::RequiredFieldsMissing),
            source: Box::new(Event::QuoteItemAdded {
                kind: ItemKind::Labor
            }),
        }]
    );
    assert!(REQUESTS.read().unwrap().is_empty(), "No requests have been sent");
}

#[test]
fn add_labor_item() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);
    let (runtime, mut rx) = Runtime::<TestEnv, _>::new(test_model(Some(12)), vec![], 1000);
    dispatch(&runtime, ActionQuoteEditor::ShowModal(ItemKind::Labor));
    dispatch(
        &runtime,
        ActionQuoteEditor::UpdateLaborForm(LaborItemForm {
            descripcion: "Cableado".to_owned(),
            horas: "4".to_owned(),
            precio_hora: "12000".to_owned(),
        }),
    );
    dispatch(&runtime, ActionQuoteEditor::AddItem(ItemKind::Labor));
    let request = REQUESTS.read().unwrap().first().cloned().expect("Item posted");
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&request.body).unwrap(),
        json!({ "descripcion": "Cableado", "horas": "4", "precio_hora": "12000" })
    );
    assert_eq!(
        request.headers.get("x-csrftoken").map(String::as_str),
        Some("t0k3n")
    );
    assert!(runtime.model().unwrap().quote_editor.labor_form.is_none());
    assert_eq!(
        core_events(&mut rx),
        vec![
            Event::QuoteItemAdded {
                kind: ItemKind::Labor
            },
            Event::PageReloadRequested
        ]
    );
}

#[test]
fn delete_item_is_confirmed() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);
    let (runtime, mut rx) = Runtime::<TestEnv, _>::new(test_model(Some(12)), vec![], 1000);
    dispatch(
        &runtime,
        ActionQuoteEditor::DeleteItem {
            kind: ItemKind::Material,
            item_id: 5,
        },
    );
    assert_eq!(
        runtime
            .model()
            .unwrap()
            .quote_editor
            .confirmation
            .as_ref()
            .map(|confirmation| confirmation.message.to_owned()),
        Some("¿Estás seguro de eliminar este material?".to_owned())
    );
    dispatch(&runtime, ActionQuoteEditor::Confirm(false));
    assert!(REQUESTS.read().unwrap().is_empty(), "Declining sends nothing");
    dispatch(
        &runtime,
        ActionQuoteEditor::DeleteItem {
            kind: ItemKind::Material,
            item_id: 5,
        },
    );
    dispatch(&runtime, ActionQuoteEditor::Confirm(true));
    assert_eq!(
        REQUESTS
            .read()
            .unwrap()
            .iter()
            .map(|request| request.method.to_owned())
            .collect::<Vec<_>>(),
        vec!["DELETE".to_owned()]
    );
    assert_eq!(
        core_events(&mut rx),
        vec![
            Event::QuoteItemDeleted {
                kind: ItemKind::Material,
                item_id: 5
            },
            Event::PageReloadRequested
        ]
    );
}

#[test]
fn status_change_failure() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);
    let (runtime, mut rx) = Runtime::<TestEnv, _>::new(test_model(Some(12)), vec![], 1000);
    dispatch(&runtime, ActionQuoteEditor::ToggleStatusMenu);
    dispatch(&runtime, ActionQuoteEditor::ChangeStatus("aprobada".to_owned()));
    dispatch(&runtime, ActionQuoteEditor::Confirm(true));
    assert!(!runtime.model().unwrap().quote_editor.status_menu_open);
    assert_eq!(
        REQUESTS.read().unwrap().first().map(|request| request.body.to_owned()),
        Some(r#"{"estado":"aprobada"}"#.to_owned())
    );
    assert_eq!(
        core_events(&mut rx),
        vec![Event::Error {
            error: CtxError::API(crate::types::api::APIError {
                message: "Transición no permitida".to_owned()
            }),
            source: Box::new(Event::QuoteStatusChanged {
                estado: "aprobada".to_owned()
            }),
        }]
    );
}

#[test]
fn travel_expenses_update_totals() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);
    let (runtime, mut rx) = Runtime::<TestEnv, _>::new(test_model(Some(12)), vec![], 1000);
    dispatch(&runtime, ActionQuoteEditor::UpdateTravelExpenses("20000".to_owned()));
    let totals = QuoteTotals {
        gastos_traslado: 20000.0,
        valor_neto: 120000.0,
        valor_iva: 22800.0,
        valor_total: 142800.0,
    };
    assert_eq!(
        runtime.model().unwrap().quote_editor.totals,
        Some(TotalsView::from(&totals))
    );
    assert_eq!(
        core_events(&mut rx),
        vec![Event::TravelExpensesUpdated { totals }]
    );
}

#[test]
fn stale_travel_expenses_are_discarded() {
    fn fetch_handler(request: Request) -> TryEnvFuture<serde_json::Value> {
        let totals = |gastos: u64| {
            json!({
                "success": true,
                "gastos_traslado": gastos,
                "valor_neto": 100000 + gastos,
                "valor_iva": 19000,
                "valor_total": 119000 + gastos
            })
        };
        match request {
            Request { url, body, .. }
                if url == "/cotizaciones/12/gastos-traslado/" && body.contains("\"1000\"") =>
            {
                // Answered after the newer update.
                TestEnv::sleep(Duration::from_secs(1))
                    .map(move |_| Ok(totals(1000)))
                    .boxed_env()
            }
            Request { url, .. } if url == "/cotizaciones/12/gastos-traslado/" => {
                future::ok(totals(2000)).boxed_env()
            }
            _ => default_fetch_handler(request),
        }
    }
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);
    let (runtime, mut rx) = Runtime::<TestEnv, _>::new(test_model(Some(12)), vec![], 1000);
    dispatch(&runtime, ActionQuoteEditor::UpdateTravelExpenses("1000".to_owned()));
    dispatch(&runtime, ActionQuoteEditor::UpdateTravelExpenses("2000".to_owned()));
    TestEnv::fire_timers();
    assert_eq!(REQUESTS.read().unwrap().len(), 2, "Both updates are sent");
    let model = runtime.model().unwrap();
    assert_eq!(model.quote_editor.travel_expenses, "2000");
    assert_eq!(
        model
            .quote_editor
            .totals
            .as_ref()
            .map(|totals| totals.gastos_traslado.as_str()),
        Some("$2.000"),
        "Latest response wins"
    );
    assert_eq!(
        core_events(&mut rx)
            .into_iter()
            .filter(|event| matches!(event, Event::TravelExpensesUpdated { .. }))
            .count(),
        1,
        "Superseded responses emit nothing"
    );
}

#[test]
fn load_resets_the_editor() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, _rx) = Runtime::<TestEnv, _>::new(test_model(Some(12)), vec![], 1000);
    dispatch(&runtime, ActionQuoteEditor::ShowModal(ItemKind::Material));
    TestEnv::run(|| {
        runtime.dispatch(RuntimeAction {
            field: None,
            action: Action::Load(ActionLoad::QuoteEditor(Selected { quote_id: Some(13) })),
        })
    });
    let model = runtime.model().unwrap();
    assert!(model.quote_editor.material_form.is_none());
    assert_eq!(
        model.quote_editor.selected,
        Some(Selected { quote_id: Some(13) })
    );
}
