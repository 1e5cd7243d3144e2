use http::Method;
use serde::Serialize;

use crate::constants::{NOTIFICATIONS_API_PREFIX, QUOTES_PREFIX};
use crate::types::calendar::NoteForm;
use crate::types::entity::EntityKind;
use crate::types::query_params_encode;
use crate::types::quote::{ItemKind, LaborItemRequest, MaterialItemRequest, ServiceItemRequest};

pub trait FetchRequestParams<T> {
    fn method(&self) -> Method;
    fn path(&self) -> String;
    fn query(&self) -> Option<String>;
    fn body(self) -> T;
}

/// Body of a request as handed to [`Env::fetch`](crate::runtime::Env::fetch).
#[derive(Clone, PartialEq, Debug)]
pub enum APIRequestBody {
    Empty,
    Json(serde_json::Value),
    /// Already encoded `application/x-www-form-urlencoded` payload.
    Form(String),
}

impl APIRequestBody {
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            APIRequestBody::Empty => None,
            APIRequestBody::Json(_) => Some("application/json"),
            APIRequestBody::Form(_) => Some("application/x-www-form-urlencoded"),
        }
    }
    /// The web env sends string bodies verbatim and anything else as JSON text.
    pub fn into_value(self) -> serde_json::Value {
        match self {
            APIRequestBody::Empty => serde_json::Value::Null,
            APIRequestBody::Json(value) => value,
            APIRequestBody::Form(form) => serde_json::Value::String(form),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Debug)]
#[serde(tag = "type")]
pub enum APIRequest {
    ServicesByCategory {
        category_id: u64,
    },
    ServiceParameters {
        service_id: u64,
    },
    AddServiceItem {
        quote_id: u64,
        item: ServiceItemRequest,
    },
    AddMaterialItem {
        quote_id: u64,
        item: MaterialItemRequest,
    },
    AddLaborItem {
        quote_id: u64,
        item: LaborItemRequest,
    },
    DeleteItem {
        quote_id: u64,
        kind: ItemKind,
        item_id: u64,
    },
    UpdateTravelExpenses {
        quote_id: u64,
        gastos_traslado: String,
    },
    ChangeQuoteStatus {
        quote_id: u64,
        estado: String,
    },
    DeleteEntity {
        kind: EntityKind,
        id: u64,
    },
    CalendarEvents {
        year: i32,
        month: u32,
    },
    CreateNote {
        form: NoteForm,
    },
    EditNote {
        id: u64,
        form: NoteForm,
    },
    DeleteNote {
        id: u64,
    },
    GetNote {
        id: u64,
    },
    Notifications {
        limit: usize,
    },
    MarkNotificationRead {
        id: u64,
    },
    MarkAllNotificationsRead,
}

impl APIRequest {
    pub fn url(&self) -> String {
        match self.query() {
            Some(query) => format!("{}?{}", self.path(), query),
            None => self.path(),
        }
    }
}

impl FetchRequestParams<APIRequestBody> for APIRequest {
    fn method(&self) -> Method {
        match self {
            APIRequest::ServicesByCategory { .. }
            | APIRequest::ServiceParameters { .. }
            | APIRequest::CalendarEvents { .. }
            | APIRequest::GetNote { .. }
            | APIRequest::Notifications { .. } => Method::GET,
            APIRequest::DeleteItem { .. } | APIRequest::DeleteEntity { .. } => Method::DELETE,
            _ => Method::POST,
        }
    }
    fn path(&self) -> String {
        match self {
            APIRequest::ServicesByCategory { category_id } => {
                format!("{QUOTES_PREFIX}/api/categoria/{category_id}/servicios/")
            }
            APIRequest::ServiceParameters { service_id } => {
                format!("{QUOTES_PREFIX}/api/servicio/{service_id}/parametros/")
            }
            APIRequest::AddServiceItem { quote_id, .. } => {
                format!("{QUOTES_PREFIX}/{quote_id}/item-servicio/")
            }
            APIRequest::AddMaterialItem { quote_id, .. } => {
                format!("{QUOTES_PREFIX}/{quote_id}/item-material/")
            }
            APIRequest::AddLaborItem { quote_id, .. } => {
                format!("{QUOTES_PREFIX}/{quote_id}/item-mano-obra/")
            }
            APIRequest::DeleteItem {
                quote_id,
                kind,
                item_id,
            } => format!(
                "{QUOTES_PREFIX}/{quote_id}/item-{}/{item_id}/eliminar/",
                kind.slug()
            ),
            APIRequest::UpdateTravelExpenses { quote_id, .. } => {
                format!("{QUOTES_PREFIX}/{quote_id}/gastos-traslado/")
            }
            APIRequest::ChangeQuoteStatus { quote_id, .. } => {
                format!("{QUOTES_PREFIX}/{quote_id}/estado/")
            }
            APIRequest::DeleteEntity { kind, id } => {
                format!("{QUOTES_PREFIX}/{}/{id}/eliminar/", kind.slug())
            }
            APIRequest::CalendarEvents { .. } => {
                format!("{NOTIFICATIONS_API_PREFIX}/calendario-eventos/")
            }
            APIRequest::CreateNote { .. } => format!("{NOTIFICATIONS_API_PREFIX}/nota/crear/"),
            APIRequest::EditNote { id, .. } => {
                format!("{NOTIFICATIONS_API_PREFIX}/nota/{id}/editar/")
            }
            APIRequest::DeleteNote { id } => {
                format!("{NOTIFICATIONS_API_PREFIX}/nota/{id}/eliminar/")
            }
            APIRequest::GetNote { id } => format!("{NOTIFICATIONS_API_PREFIX}/nota/{id}/"),
            APIRequest::Notifications { .. } => format!("{NOTIFICATIONS_API_PREFIX}/lista/"),
            APIRequest::MarkNotificationRead { id } => {
                format!("{NOTIFICATIONS_API_PREFIX}/marcar-leida/{id}/")
            }
            APIRequest::MarkAllNotificationsRead => {
                format!("{NOTIFICATIONS_API_PREFIX}/marcar-todas-leidas/")
            }
        }
    }
    fn query(&self) -> Option<String> {
        match self {
            APIRequest::CalendarEvents { year, month } => Some(query_params_encode(&[
                ("mes", month.to_string()),
                ("anio", year.to_string()),
            ])),
            APIRequest::Notifications { limit } => {
                Some(query_params_encode(&[("limit", limit.to_string())]))
            }
            _ => None,
        }
    }
    fn body(self) -> APIRequestBody {
        match self {
            APIRequest::AddServiceItem { item, .. } => APIRequestBody::Json(json_body(&item)),
            APIRequest::AddMaterialItem { item, .. } => APIRequestBody::Json(json_body(&item)),
            APIRequest::AddLaborItem { item, .. } => APIRequestBody::Json(json_body(&item)),
            APIRequest::UpdateTravelExpenses {
                gastos_traslado, ..
            } => APIRequestBody::Json(serde_json::json!({ "gastos_traslado": gastos_traslado })),
            APIRequest::ChangeQuoteStatus { estado, .. } => {
                APIRequestBody::Json(serde_json::json!({ "estado": estado }))
            }
            APIRequest::CreateNote { form } => APIRequestBody::Form(form.encode(None)),
            APIRequest::EditNote { id, form } => APIRequestBody::Form(form.encode(Some(id))),
            _ => APIRequestBody::Empty,
        }
    }
}

fn json_body<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).expect("request body serialization failed")
}
