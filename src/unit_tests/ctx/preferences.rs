use cotiza_derive::Model;
use futures::FutureExt;

use crate::constants::{DARK_MODE_STORAGE_KEY, FAVORITES_STORAGE_KEY};
use crate::models::ctx::{pull_preferences_from_storage, Ctx};
use crate::runtime::msg::{Action, ActionCtx, Event};
use crate::runtime::{Runtime, RuntimeAction};
use crate::types::preferences::Preferences;
use crate::unit_tests::{core_events, TestEnv, REQUESTS, STORAGE};

#[derive(Model, Clone, Default)]
#[model(TestEnv)]
struct TestModel {
    ctx: Ctx,
}

#[test]
fn actionctx_toggledarkmode() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, mut rx) = Runtime::<TestEnv, _>::new(TestModel::default(), vec![], 1000);
    TestEnv::run(|| {
        runtime.dispatch(RuntimeAction {
            field: None,
            action: Action::Ctx(ActionCtx::ToggleDarkMode),
        })
    });
    assert!(runtime.model().unwrap().ctx.preferences.dark_mode);
    assert_eq!(
        STORAGE.read().unwrap().get(DARK_MODE_STORAGE_KEY).map(String::as_str),
        Some("true"),
        "Dark mode persisted in storage"
    );
    assert_eq!(
        core_events(&mut rx),
        vec![
            Event::DarkModeToggled { enabled: true },
            Event::PreferencesPushedToStorage
        ]
    );
    assert!(REQUESTS.read().unwrap().is_empty());
}

#[test]
fn actionctx_togglefavorite() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, mut rx) = Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: Ctx::new(
                None,
                Preferences {
                    dark_mode: false,
                    favorites: vec![3],
                },
            ),
        },
        vec![],
        1000,
    );
    TestEnv::run(|| {
        runtime.dispatch(RuntimeAction {
            field: None,
            action: Action::Ctx(ActionCtx::ToggleFavorite(8)),
        });
        runtime.dispatch(RuntimeAction {
            field: None,
            action: Action::Ctx(ActionCtx::ToggleFavorite(3)),
        });
    });
    assert_eq!(runtime.model().unwrap().ctx.preferences.favorites, vec![8]);
    assert_eq!(
        STORAGE.read().unwrap().get(FAVORITES_STORAGE_KEY).map(String::as_str),
        Some("[8]")
    );
    let events = core_events(&mut rx);
    assert!(events.contains(&Event::FavoriteToggled {
        service_id: 8,
        favorite: true
    }));
    assert!(events.contains(&Event::FavoriteToggled {
        service_id: 3,
        favorite: false
    }));
}

#[test]
fn pull_preferences() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    STORAGE
        .write()
        .unwrap()
        .insert(FAVORITES_STORAGE_KEY.to_owned(), "[1,5]".to_owned());
    let preferences = pull_preferences_from_storage::<TestEnv>()
        .now_or_never()
        .expect("Storage answers immediately")
        .expect("Preferences are readable");
    assert_eq!(
        preferences,
        Preferences {
            dark_mode: false,
            favorites: vec![1, 5],
        },
        "Missing keys fall back to defaults"
    );
}
