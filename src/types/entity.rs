use serde::{Deserialize, Serialize};

/// Catalog entities that can be deleted from their management pages.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Client,
    Service,
    Material,
}

impl EntityKind {
    pub fn slug(&self) -> &'static str {
        match self {
            EntityKind::Client => "cliente",
            EntityKind::Service => "servicio",
            EntityKind::Material => "material",
        }
    }
    pub fn confirmation_message(&self, name: &str) -> String {
        if name.is_empty() {
            format!("¿Estás seguro de eliminar este {}?", self.slug())
        } else {
            format!("¿Estás seguro de eliminar {} \"{}\"?", self.slug(), name)
        }
    }
    pub fn failure_message(&self) -> String {
        format!("Error al eliminar el {}", self.slug())
    }
}
