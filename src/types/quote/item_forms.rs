use std::collections::BTreeMap;

use boolinator::Boolinator;
use serde::{Deserialize, Serialize};

use crate::types::quote::{ParameterInput, ServiceOption};

/// Line item kinds of a quote.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Service,
    Material,
    Labor,
}

impl ItemKind {
    pub fn slug(&self) -> &'static str {
        match self {
            ItemKind::Service => "servicio",
            ItemKind::Material => "material",
            ItemKind::Labor => "mano-obra",
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Service => "servicio",
            ItemKind::Material => "material",
            ItemKind::Labor => "trabajo",
        }
    }
    pub fn confirmation_message(&self) -> String {
        format!("¿Estás seguro de eliminar este {}?", self.label())
    }
    pub fn failure_message(&self) -> String {
        format!("Error al eliminar el {}", self.label())
    }
}

fn filled(values: &[&str]) -> bool {
    values.iter().all(|value| !value.trim().is_empty())
}

#[derive(Clone, PartialEq, Default, Serialize, Deserialize, Debug)]
pub struct ServiceItemForm {
    pub category_id: Option<u64>,
    pub services: Vec<ServiceOption>,
    pub service_id: Option<u64>,
    pub cantidad: String,
    pub precio_unitario: String,
    pub descripcion_personalizada: String,
    pub parametros: Vec<ParameterInput>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ServiceItemRequest {
    pub servicio_id: String,
    pub cantidad: String,
    pub precio_unitario: String,
    pub descripcion_personalizada: String,
    pub parametros: BTreeMap<String, String>,
}

impl ServiceItemForm {
    pub fn selected_service(&self) -> Option<&ServiceOption> {
        self.service_id
            .and_then(|id| self.services.iter().find(|service| service.id == id))
    }
    pub fn to_request(&self) -> Option<ServiceItemRequest> {
        let service_id = self.service_id?;
        if !filled(&[&self.cantidad, &self.precio_unitario]) {
            return None;
        }
        Some(ServiceItemRequest {
            servicio_id: service_id.to_string(),
            cantidad: self.cantidad.to_owned(),
            precio_unitario: self.precio_unitario.to_owned(),
            descripcion_personalizada: self.descripcion_personalizada.to_owned(),
            parametros: self
                .parametros
                .iter()
                .map(|input| (input.parameter.id.to_string(), input.value.to_owned()))
                .collect(),
        })
    }
}

#[derive(Clone, PartialEq, Default, Serialize, Deserialize, Debug)]
pub struct MaterialItemForm {
    pub material_id: Option<u64>,
    pub cantidad: String,
    pub precio_unitario: String,
    pub descripcion_personalizada: String,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct MaterialItemRequest {
    pub material_id: String,
    pub cantidad: String,
    pub precio_unitario: String,
    pub descripcion_personalizada: String,
}

impl MaterialItemForm {
    pub fn to_request(&self) -> Option<MaterialItemRequest> {
        let material_id = self.material_id?;
        if !filled(&[&self.cantidad, &self.precio_unitario]) {
            return None;
        }
        Some(MaterialItemRequest {
            material_id: material_id.to_string(),
            cantidad: self.cantidad.to_owned(),
            precio_unitario: self.precio_unitario.to_owned(),
            descripcion_personalizada: self.descripcion_personalizada.to_owned(),
        })
    }
}

#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize, Debug)]
pub struct LaborItemForm {
    pub descripcion: String,
    pub horas: String,
    pub precio_hora: String,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct LaborItemRequest {
    pub descripcion: String,
    pub horas: String,
    pub precio_hora: String,
}

impl LaborItemForm {
    pub fn to_request(&self) -> Option<LaborItemRequest> {
        filled(&[&self.descripcion, &self.horas, &self.precio_hora]).as_some_from(|| LaborItemRequest {
            descripcion: self.descripcion.to_owned(),
            horas: self.horas.to_owned(),
            precio_hora: self.precio_hora.to_owned(),
        })
    }
}
