use assert_matches::assert_matches;
use cotiza_derive::Model;

use crate::models::ctx::Ctx;
use crate::models::table_with_filters::{Selected, Summary, TableWithFilters};
use crate::runtime::msg::{Action, ActionLoad, ActionTableWithFilters};
use crate::runtime::{Runtime, RuntimeAction};
use crate::types::table::{row, EntityTable, Selection, TableStatistics};
use crate::unit_tests::{TestEnv, REQUESTS};

#[derive(Model, Clone, Default)]
#[model(TestEnv)]
struct TestModel {
    ctx: Ctx,
    table_with_filters: TableWithFilters,
}

fn dispatch(runtime: &Runtime<TestEnv, TestModel>, action: Action) {
    TestEnv::run(|| {
        runtime.dispatch(RuntimeAction {
            field: None,
            action,
        })
    });
}

fn clients() -> Selected {
    Selected {
        entity: EntityTable::Clients,
        rows: vec![
            row(&["Constructora Andes", "2 representantes", "76.123.456-7", "+56 9 1111", "andes@mail.cl"]),
            row(&["Minera Norte", "Sin representantes", "77.000.111-2", "-", "norte@mail.cl"]),
            row(&["Ferretería Sur", "1 representante", "78.222.333-4", "+56 9 2222", "-"]),
        ],
    }
}

#[test]
fn filters_update_summary_and_statistics() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, _rx) = Runtime::<TestEnv, _>::new(TestModel::default(), vec![], 1000);
    dispatch(&runtime, Action::Load(ActionLoad::TableWithFilters(clients())));
    assert_eq!(
        runtime.model().unwrap().table_with_filters.summary,
        Some(Summary {
            visible: 3,
            total: 3,
            text: "3 de 3 clientes".to_owned(),
            filtered: false,
            no_results: false,
        })
    );
    dispatch(
        &runtime,
        Action::TableWithFilters(ActionTableWithFilters::SetDropdown {
            id: "representante".to_owned(),
            selection: Selection {
                value: "con".to_owned(),
                label: None,
            },
        }),
    );
    dispatch(
        &runtime,
        Action::TableWithFilters(ActionTableWithFilters::Search("  FERRE ".to_owned())),
    );
    {
        let model = runtime.model().unwrap();
        assert_eq!(model.table_with_filters.visible, vec![2]);
        assert_eq!(
            model
                .table_with_filters
                .summary
                .as_ref()
                .map(|summary| (summary.text.as_str(), summary.filtered)),
            Some(("1 de 3 clientes", true))
        );
        assert_matches!(
            model.table_with_filters.statistics,
            Some(TableStatistics::Clients { total: 1, .. })
        );
    }
    dispatch(
        &runtime,
        Action::TableWithFilters(ActionTableWithFilters::Search("zzz".to_owned())),
    );
    assert_matches!(
        runtime.model().unwrap().table_with_filters.summary,
        Some(Summary {
            visible: 0,
            no_results: true,
            ..
        })
    );
    dispatch(
        &runtime,
        Action::TableWithFilters(ActionTableWithFilters::ClearFilters),
    );
    let model = runtime.model().unwrap();
    assert_eq!(model.table_with_filters.visible, vec![0, 1, 2]);
    assert!(model.table_with_filters.dropdowns.is_empty());
    assert!(REQUESTS.read().unwrap().is_empty(), "Filtering is local");
}

#[test]
fn unknown_dropdowns_are_ignored() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, _rx) = Runtime::<TestEnv, _>::new(TestModel::default(), vec![], 1000);
    dispatch(&runtime, Action::Load(ActionLoad::TableWithFilters(clients())));
    dispatch(
        &runtime,
        Action::TableWithFilters(ActionTableWithFilters::SetDropdown {
            id: "cargo".to_owned(),
            selection: Selection {
                value: "admin".to_owned(),
                label: None,
            },
        }),
    );
    let model = runtime.model().unwrap();
    assert!(model.table_with_filters.dropdowns.is_empty());
    assert_eq!(model.table_with_filters.visible.len(), 3);
}
