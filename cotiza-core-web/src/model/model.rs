use gloo_utils::format::JsValueSerdeExt;
#[cfg(debug_assertions)]
use serde::Serialize;
use wasm_bindgen::JsValue;

use cotiza_core::{
    models::{
        calendar::Calendar, ctx::Ctx, entity_management::EntityManagement, landing::Landing,
        notification_bell::NotificationBell, quote_editor::QuoteEditor,
        table_with_filters::TableWithFilters,
    },
    types::{csrf::CsrfToken, preferences::Preferences},
    Model,
};

use crate::{env::WebEnv, model::serialize_ctx};

#[derive(Model, Clone)]
#[cfg_attr(debug_assertions, derive(Serialize))]
#[model(WebEnv)]
pub struct WebModel {
    pub ctx: Ctx,
    pub calendar: Calendar,
    pub table_with_filters: TableWithFilters,
    pub notification_bell: NotificationBell,
    pub quote_editor: QuoteEditor,
    pub entity_management: EntityManagement,
    pub landing: Landing,
}

impl WebModel {
    pub fn new(csrf_token: Option<CsrfToken>, preferences: Preferences) -> WebModel {
        WebModel {
            ctx: Ctx::new(csrf_token, preferences),
            calendar: Default::default(),
            table_with_filters: Default::default(),
            notification_bell: Default::default(),
            quote_editor: Default::default(),
            entity_management: Default::default(),
            landing: Default::default(),
        }
    }
    pub fn get_state(&self, field: &WebModelField) -> JsValue {
        match field {
            WebModelField::Ctx => serialize_ctx(&self.ctx),
            WebModelField::Calendar => <JsValue as JsValueSerdeExt>::from_serde(&self.calendar)
                .expect("JsValue from Calendar"),
            WebModelField::TableWithFilters => {
                <JsValue as JsValueSerdeExt>::from_serde(&self.table_with_filters)
                    .expect("JsValue from TableWithFilters")
            }
            WebModelField::NotificationBell => {
                <JsValue as JsValueSerdeExt>::from_serde(&self.notification_bell)
                    .expect("JsValue from NotificationBell")
            }
            WebModelField::QuoteEditor => {
                <JsValue as JsValueSerdeExt>::from_serde(&self.quote_editor)
                    .expect("JsValue from QuoteEditor")
            }
            WebModelField::EntityManagement => {
                <JsValue as JsValueSerdeExt>::from_serde(&self.entity_management)
                    .expect("JsValue from EntityManagement")
            }
            WebModelField::Landing => <JsValue as JsValueSerdeExt>::from_serde(&self.landing)
                .expect("JsValue from Landing"),
        }
    }
}
