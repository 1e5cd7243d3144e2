use std::time::Duration;

use cotiza_derive::Model;

use crate::models::ctx::Ctx;
use crate::models::landing::{ContactField, Landing, Selected, ServiceCard, ToastKind};
use crate::runtime::msg::{Action, ActionCtx, ActionLanding, ActionLoad, Event};
use crate::runtime::{Runtime, RuntimeAction};
use crate::types::share::ShareNetwork;
use crate::unit_tests::{core_events, TestEnv, REQUESTS};

#[derive(Model, Clone, Default)]
#[model(TestEnv)]
struct TestModel {
    ctx: Ctx,
    landing: Landing,
}

fn services() -> Selected {
    Selected {
        services: vec![
            ServiceCard {
                id: Some(1),
                title: "Instalación eléctrica".to_owned(),
                description: "Tableros y cableado".to_owned(),
            },
            ServiceCard {
                id: Some(2),
                title: "Gasfitería".to_owned(),
                description: "Reparación de cañerías".to_owned(),
            },
            ServiceCard {
                id: Some(3),
                title: "Pintura".to_owned(),
                description: "Interiores y exteriores".to_owned(),
            },
        ],
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

fn loaded_runtime() -> Runtime<TestEnv, TestModel> {
    let (runtime, _rx) = Runtime::<TestEnv, _>::new(TestModel::default(), vec![], 1000);
    dispatch(&runtime, Action::Load(ActionLoad::Landing(services())));
    runtime
}

#[test]
fn counter_counts_to_twenty() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let runtime = loaded_runtime();
    assert_eq!(
        TestEnv::pending_timers(),
        vec![Duration::from_millis(100), Duration::from_secs(4)]
    );
    for _ in 0..25 {
        TestEnv::fire_timers();
    }
    assert_eq!(runtime.model().unwrap().landing.counter, 20);
    assert_eq!(
        TestEnv::pending_timers(),
        vec![Duration::from_secs(4)],
        "Only the carousel keeps ticking"
    );
}

#[test]
fn carousel_auto_scroll() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let runtime = loaded_runtime();
    dispatch(
        &runtime,
        Action::Landing(ActionLanding::UpdateCarouselMetrics {
            scroll_left: 0,
            client_width: 400,
            scroll_width: 1000,
        }),
    );
    TestEnv::fire_timers();
    assert_eq!(runtime.model().unwrap().landing.carousel.scroll_to, Some(220));
    dispatch(
        &runtime,
        Action::Landing(ActionLanding::UpdateCarouselMetrics {
            scroll_left: 595,
            client_width: 400,
            scroll_width: 1000,
        }),
    );
    TestEnv::fire_timers();
    assert_eq!(
        runtime.model().unwrap().landing.carousel.scroll_to,
        Some(0),
        "Wraps to the start near the end"
    );
    dispatch(&runtime, Action::Landing(ActionLanding::HoverCarousel(true)));
    dispatch(
        &runtime,
        Action::Landing(ActionLanding::UpdateCarouselMetrics {
            scroll_left: 100,
            client_width: 400,
            scroll_width: 1000,
        }),
    );
    TestEnv::fire_timers();
    assert_eq!(
        runtime.model().unwrap().landing.carousel.scroll_to,
        Some(0),
        "Hovering pauses the carousel"
    );
    dispatch(&runtime, Action::Landing(ActionLanding::HoverCarousel(false)));
    TestEnv::fire_timers();
    assert_eq!(runtime.model().unwrap().landing.carousel.scroll_to, Some(320));
}

#[test]
fn manual_scroll_is_throttled() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let runtime = loaded_runtime();
    dispatch(
        &runtime,
        Action::Landing(ActionLanding::UpdateCarouselMetrics {
            scroll_left: 500,
            client_width: 400,
            scroll_width: 1000,
        }),
    );
    dispatch(&runtime, Action::Landing(ActionLanding::ScrollCarousel(1)));
    assert_eq!(
        runtime.model().unwrap().landing.carousel.scroll_to,
        Some(600),
        "Clamped to the scrollable width"
    );
    dispatch(&runtime, Action::Landing(ActionLanding::ScrollCarousel(-1)));
    assert_eq!(runtime.model().unwrap().landing.carousel.scroll_to, Some(600));
    TestEnv::advance(Duration::from_millis(100));
    dispatch(&runtime, Action::Landing(ActionLanding::ScrollCarousel(-1)));
    assert_eq!(runtime.model().unwrap().landing.carousel.scroll_to, Some(380));
}

#[test]
fn service_search_is_debounced() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let runtime = loaded_runtime();
    dispatch(
        &runtime,
        Action::Landing(ActionLanding::SearchServices("gas".to_owned())),
    );
    dispatch(
        &runtime,
        Action::Landing(ActionLanding::SearchServices("PINT".to_owned())),
    );
    assert_eq!(
        runtime.model().unwrap().landing.visible_services,
        vec![0, 1, 2],
        "Nothing is filtered before the delay"
    );
    TestEnv::fire_timers();
    assert_eq!(runtime.model().unwrap().landing.visible_services, vec![2]);
}

#[test]
fn toasts_expire() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let runtime = loaded_runtime();
    dispatch(
        &runtime,
        Action::Landing(ActionLanding::ShowToast {
            message: "¡Copiado al portapapeles!".to_owned(),
            kind: ToastKind::Success,
        }),
    );
    dispatch(&runtime, Action::Ctx(ActionCtx::ToggleFavorite(2)));
    {
        let model = runtime.model().unwrap();
        assert_eq!(
            model
                .landing
                .toasts
                .iter()
                .map(|toast| (toast.message.as_str(), toast.kind, toast.icon))
                .collect::<Vec<_>>(),
            vec![
                ("¡Copiado al portapapeles!", ToastKind::Success, "✓"),
                ("Servicio agregado a favoritos", ToastKind::Success, "✓"),
            ]
        );
    }
    assert!(TestEnv::pending_timers().contains(&Duration::from_secs(5)));
    TestEnv::fire_timers();
    assert!(runtime.model().unwrap().landing.toasts.is_empty());
    dispatch(&runtime, Action::Ctx(ActionCtx::ToggleFavorite(2)));
    let model = runtime.model().unwrap();
    assert_eq!(model.landing.toasts.len(), 1);
    assert_eq!(model.landing.toasts[0].message, "Servicio removido de favoritos");
    assert_eq!(model.landing.toasts[0].kind, ToastKind::Info);
}

#[test]
fn contact_form() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, mut rx) = Runtime::<TestEnv, _>::new(TestModel::default(), vec![], 1000);
    dispatch(&runtime, Action::Load(ActionLoad::Landing(Selected::default())));
    let field = |name: &str, value: &str| ContactField {
        name: name.to_owned(),
        value: value.to_owned(),
        required: true,
    };
    dispatch(
        &runtime,
        Action::Landing(ActionLanding::SubmitContact(vec![
            field("nombre", "Ana"),
            field("mensaje", " "),
        ])),
    );
    assert_eq!(
        runtime.model().unwrap().landing.contact_errors,
        vec!["mensaje".to_owned()]
    );
    assert!(core_events(&mut rx).is_empty());
    dispatch(
        &runtime,
        Action::Landing(ActionLanding::SubmitContact(vec![
            field("nombre", "Ana"),
            field("mensaje", "Necesito una cotización"),
        ])),
    );
    let model = runtime.model().unwrap();
    assert!(model.landing.contact_errors.is_empty());
    assert_eq!(
        model.landing.toasts.last().map(|toast| toast.message.as_str()),
        Some("¡Gracias por contactarnos! Te responderemos pronto.")
    );
    assert_eq!(core_events(&mut rx), vec![Event::ContactFormSubmitted]);
    assert!(REQUESTS.read().unwrap().is_empty(), "Nothing is sent to the server");
}

#[test]
fn rating_and_share() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, mut rx) = Runtime::<TestEnv, _>::new(TestModel::default(), vec![], 1000);
    dispatch(&runtime, Action::Landing(ActionLanding::SetRating(9)));
    assert_eq!(runtime.model().unwrap().landing.rating, 5);
    dispatch(
        &runtime,
        Action::Landing(ActionLanding::Share {
            network: ShareNetwork::Twitter,
            url: "https://cotiza.cl/".to_owned(),
            text: "Hola mundo".to_owned(),
        }),
    );
    assert_eq!(
        core_events(&mut rx),
        vec![Event::ShareWindowRequested {
            url: "https://twitter.com/intent/tweet?url=https%3A%2F%2Fcotiza.cl%2F&text=Hola%20mundo"
                .to_owned()
        }]
    );
}
