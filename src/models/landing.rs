use std::cmp;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        CAROUSEL_INTERVAL, CAROUSEL_STEP, CAROUSEL_WRAP_TOLERANCE, COUNTER_DURATION,
        COUNTER_TARGET, RATING_MAX, SCROLL_THROTTLE, SEARCH_DEBOUNCE, TOAST_DURATION,
    },
    models::{
        common::{delayed, eq_update, Debounce, Throttle},
        ctx::Ctx,
    },
    runtime::{
        msg::{Action, ActionLanding, ActionLoad, Event, Internal, Msg},
        Effect, Effects, Env, UpdateWithCtx,
    },
};

const CONTACT_THANKS_MESSAGE: &str = "¡Gracias por contactarnos! Te responderemos pronto.";
const FAVORITE_ADDED_MESSAGE: &str = "Servicio agregado a favoritos";
const FAVORITE_REMOVED_MESSAGE: &str = "Servicio removido de favoritos";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCard {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl ServiceCard {
    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Selected {
    /// Service cards in page order.
    #[serde(default)]
    pub services: Vec<ServiceCard>,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastKind {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✕",
            ToastKind::Info | ToastKind::Warning => "ℹ",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub icon: &'static str,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct ContactField {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Default, Clone, Copy, PartialEq, Eq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CarouselMetrics {
    pub scroll_left: i32,
    pub client_width: i32,
    pub scroll_width: i32,
}

impl CarouselMetrics {
    fn max_scroll_left(&self) -> i32 {
        cmp::max(self.scroll_width - self.client_width, 0)
    }
    fn at_end(&self) -> bool {
        self.scroll_left + self.client_width >= self.scroll_width - CAROUSEL_WRAP_TOLERANCE
    }
}

#[derive(Default, Clone, PartialEq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Carousel {
    pub metrics: CarouselMetrics,
    /// Position the view should scroll to.
    pub scroll_to: Option<i32>,
    pub hovered: bool,
    #[serde(skip)]
    generation: u64,
    #[serde(skip)]
    throttle: Throttle,
}

#[derive(Default, Clone, PartialEq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Landing {
    pub selected: Option<Selected>,
    pub carousel: Carousel,
    pub counter: u32,
    pub toasts: Vec<Toast>,
    pub search: String,
    /// Indices into `selected.services`.
    pub visible_services: Vec<usize>,
    pub rating: u8,
    /// Names of the required contact fields left blank.
    pub contact_errors: Vec<String>,
    #[serde(skip)]
    counter_generation: u64,
    #[serde(skip)]
    next_toast_id: u64,
    #[serde(skip)]
    search_debounce: Debounce,
}

impl<E: Env + 'static> UpdateWithCtx<E> for Landing {
    fn update(&mut self, msg: &Msg, _: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::Landing(selected))) => {
                let visible_services = (0..selected.services.len()).collect();
                let selected_effects = eq_update(&mut self.selected, Some(selected.to_owned()));
                let search_effects = eq_update(&mut self.search, String::new());
                let visible_effects = eq_update(&mut self.visible_services, visible_services);
                let counter_effects = self.counter_restart::<E>();
                let carousel_effects = self.carousel_restart::<E>();
                selected_effects
                    .join(search_effects)
                    .join(visible_effects)
                    .join(counter_effects)
                    .join(carousel_effects)
            }
            Msg::Action(Action::Unload) => {
                // Bump the generations so timers still in flight are ignored.
                let carousel_generation = self.carousel.generation + 1;
                let counter_generation = self.counter_generation + 1;
                let next_toast_id = self.next_toast_id;
                let effects = eq_update(self, Landing::default());
                self.carousel.generation = carousel_generation;
                self.counter_generation = counter_generation;
                self.next_toast_id = next_toast_id;
                effects
            }
            Msg::Action(Action::Landing(ActionLanding::ScrollCarousel(direction))) => {
                if *direction == 0 || !self.carousel.throttle.acquire::<E>(SCROLL_THROTTLE) {
                    return Effects::none().unchanged();
                }
                let metrics = self.carousel.metrics;
                let target = (metrics.scroll_left + direction.signum() * CAROUSEL_STEP)
                    .clamp(0, metrics.max_scroll_left());
                self.scroll_update(target)
            }
            Msg::Action(Action::Landing(ActionLanding::UpdateCarouselMetrics {
                scroll_left,
                client_width,
                scroll_width,
            })) => eq_update(
                &mut self.carousel.metrics,
                CarouselMetrics {
                    scroll_left: *scroll_left,
                    client_width: *client_width,
                    scroll_width: *scroll_width,
                },
            ),
            Msg::Action(Action::Landing(ActionLanding::HoverCarousel(hovered))) => {
                if self.carousel.hovered == *hovered {
                    return Effects::none().unchanged();
                }
                self.carousel.hovered = *hovered;
                if *hovered {
                    self.carousel.generation += 1;
                    Effects::none()
                } else {
                    Effects::none().join(self.carousel_restart::<E>())
                }
            }
            Msg::Internal(Internal::CarouselTick(generation))
                if self.selected.is_some()
                    && !self.carousel.hovered
                    && *generation == self.carousel.generation =>
            {
                let metrics = self.carousel.metrics;
                let target = if metrics.at_end() {
                    0
                } else {
                    metrics.scroll_left + CAROUSEL_STEP
                };
                self.scroll_update(target).join(
                    Effects::one(carousel_timer::<E>(self.carousel.generation)).unchanged(),
                )
            }
            Msg::Internal(Internal::CounterTick(generation))
                if *generation == self.counter_generation && self.counter < COUNTER_TARGET =>
            {
                self.counter += 1;
                if self.counter < COUNTER_TARGET {
                    Effects::one(counter_timer::<E>(self.counter_generation))
                } else {
                    Effects::none()
                }
            }
            Msg::Action(Action::Landing(ActionLanding::ShowToast { message, kind })) => {
                self.show_toast::<E>(message, *kind)
            }
            Msg::Action(Action::Landing(ActionLanding::DismissToast(id)))
            | Msg::Internal(Internal::ToastExpired(id)) => {
                let toasts = self
                    .toasts
                    .iter()
                    .filter(|toast| toast.id != *id)
                    .cloned()
                    .collect();
                eq_update(&mut self.toasts, toasts)
            }
            Msg::Internal(Internal::FavoriteToggled(_, favorite)) if self.selected.is_some() => {
                if *favorite {
                    self.show_toast::<E>(FAVORITE_ADDED_MESSAGE, ToastKind::Success)
                } else {
                    self.show_toast::<E>(FAVORITE_REMOVED_MESSAGE, ToastKind::Info)
                }
            }
            Msg::Action(Action::Landing(ActionLanding::SearchServices(query))) => {
                let search_effects = eq_update(&mut self.search, query.to_owned());
                let debounce_effect = self
                    .search_debounce
                    .schedule::<E>(SEARCH_DEBOUNCE, Internal::SearchDebounced);
                search_effects.join(Effects::one(debounce_effect).unchanged())
            }
            Msg::Internal(Internal::SearchDebounced(sequence))
                if self.search_debounce.is_current(*sequence) =>
            {
                let visible_services = self
                    .selected
                    .as_ref()
                    .map(|selected| visible_services(&selected.services, &self.search))
                    .unwrap_or_default();
                eq_update(&mut self.visible_services, visible_services)
            }
            Msg::Action(Action::Landing(ActionLanding::SetRating(stars))) => {
                eq_update(&mut self.rating, cmp::min(*stars, RATING_MAX))
            }
            Msg::Action(Action::Landing(ActionLanding::Share { network, url, text })) => {
                Effects::msg(Msg::Event(Event::ShareWindowRequested {
                    url: network.share_url(url, text),
                }))
                .unchanged()
            }
            Msg::Action(Action::Landing(ActionLanding::SubmitContact(fields))) => {
                let contact_errors = missing_required_fields(fields);
                if contact_errors.is_empty() {
                    let errors_effects = eq_update(&mut self.contact_errors, vec![]);
                    let toast_effects =
                        self.show_toast::<E>(CONTACT_THANKS_MESSAGE, ToastKind::Success);
                    errors_effects.join(toast_effects).join(
                        Effects::msg(Msg::Event(Event::ContactFormSubmitted)).unchanged(),
                    )
                } else {
                    eq_update(&mut self.contact_errors, contact_errors)
                }
            }
            _ => Effects::none().unchanged(),
        }
    }
}

impl Landing {
    fn show_toast<E: Env + 'static>(&mut self, message: &str, kind: ToastKind) -> Effects {
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        self.toasts.push(Toast {
            id,
            message: message.to_owned(),
            kind,
            icon: kind.icon(),
        });
        Effects::one(delayed::<E>(TOAST_DURATION, Internal::ToastExpired(id)))
    }
    fn scroll_update(&mut self, target: i32) -> Effects {
        let scroll_to_effects = eq_update(&mut self.carousel.scroll_to, Some(target));
        let metrics_effects = eq_update(&mut self.carousel.metrics.scroll_left, target);
        scroll_to_effects.join(metrics_effects)
    }
    fn carousel_restart<E: Env + 'static>(&mut self) -> Effects {
        self.carousel.generation += 1;
        Effects::one(carousel_timer::<E>(self.carousel.generation)).unchanged()
    }
    fn counter_restart<E: Env + 'static>(&mut self) -> Effects {
        self.counter_generation += 1;
        let counter_effects = eq_update(&mut self.counter, 0);
        counter_effects.join(Effects::one(counter_timer::<E>(self.counter_generation)).unchanged())
    }
}

fn carousel_timer<E: Env + 'static>(generation: u64) -> Effect {
    delayed::<E>(CAROUSEL_INTERVAL, Internal::CarouselTick(generation))
}

fn counter_timer<E: Env + 'static>(generation: u64) -> Effect {
    delayed::<E>(
        COUNTER_DURATION / COUNTER_TARGET,
        Internal::CounterTick(generation),
    )
}

/// Cards whose title or description contains `query`, ignoring case.
pub fn visible_services(services: &[ServiceCard], query: &str) -> Vec<usize> {
    services
        .iter()
        .enumerate()
        .filter(|(_, service)| service.matches(query))
        .map(|(index, _)| index)
        .collect()
}

pub fn missing_required_fields(fields: &[ContactField]) -> Vec<String> {
    fields
        .iter()
        .filter(|field| field.required && field.value.trim().is_empty())
        .map(|field| field.name.to_owned())
        .collect()
}
