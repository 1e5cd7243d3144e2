use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Notification {
    pub id: u64,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub mensaje: String,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub leida: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub tiempo_relativo: Option<String>,
}

impl Notification {
    pub fn icon(&self) -> &'static str {
        match self.tipo.as_str() {
            "info" => "ℹ️",
            "success" => "✅",
            "warning" => "⚠️",
            _ => "❌",
        }
    }
    pub fn time_label(&self) -> &str {
        self.tiempo_relativo
            .as_deref()
            .filter(|label| !label.is_empty())
            .unwrap_or("Hace un momento")
    }
    /// Target page, empty urls count as none.
    pub fn link(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize, Debug)]
pub struct NotificationsList {
    #[serde(default, alias = "no_leidas")]
    pub unread_count: u32,
    #[serde(default)]
    pub notificaciones: Vec<Notification>,
}
