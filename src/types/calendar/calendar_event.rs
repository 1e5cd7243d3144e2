use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::constants::{LOANS_PATH, QUOTES_PREFIX};
use crate::types::calendar::NotePriority;
use crate::types::number_or_string::string_or_number;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Job {
    pub id: u64,
    #[serde(deserialize_with = "string_or_number")]
    pub numero: String,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub cliente: String,
    #[serde(default)]
    pub referencia: String,
    #[serde(default)]
    pub lugar: String,
    #[serde(default)]
    pub estado: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Maintenance {
    pub material_id: u64,
    pub material: String,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub tipo_mantenimiento: String,
    #[serde(default)]
    pub descripcion: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Loan {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub material: String,
    pub codigo: String,
    pub prestado_a: String,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub estado_texto: String,
    #[serde(default)]
    pub urgencia: String,
    #[serde(default)]
    pub observaciones: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Note {
    pub id: u64,
    pub titulo: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub prioridad: Option<NotePriority>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Kinds of calendar entries, declared in display priority order.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Serialize, Deserialize, Debug,
)]
pub enum EventKind {
    #[serde(rename = "trabajo")]
    Job,
    #[serde(rename = "prestamo")]
    Loan,
    #[serde(rename = "mantencion")]
    Maintenance,
    #[serde(rename = "nota")]
    Note,
}

impl EventKind {
    pub fn priority(&self) -> u8 {
        match self {
            EventKind::Job => 1,
            EventKind::Loan => 2,
            EventKind::Maintenance => 3,
            EventKind::Note => 4,
        }
    }
    pub fn icon(&self) -> &'static str {
        match self {
            EventKind::Job => "🔧",
            EventKind::Loan => "📦",
            EventKind::Maintenance => "⚙️",
            EventKind::Note => "📝",
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Job => "Trabajo",
            EventKind::Loan => "Préstamo",
            EventKind::Maintenance => "Mantención",
            EventKind::Note => "Nota",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Badge {
    pub class: String,
    pub text: String,
}

impl Badge {
    fn new(class: &str, text: &str) -> Self {
        Badge {
            class: class.to_owned(),
            text: text.to_owned(),
        }
    }
}

/// Follow-up offered from an event's detail view.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum EventAction {
    ViewQuote { id: u64 },
    RegisterMaintenance { material_id: u64 },
    ViewLoans,
    EditNote { id: u64 },
    DeleteNote { id: u64 },
}

impl EventAction {
    /// Page the action navigates to, if it is a plain link.
    pub fn url(&self) -> Option<String> {
        match self {
            EventAction::ViewQuote { id } => Some(format!("{QUOTES_PREFIX}/{id}/")),
            EventAction::RegisterMaintenance { material_id } => Some(format!(
                "{QUOTES_PREFIX}/material/{material_id}/registrar-mantenimiento/"
            )),
            EventAction::ViewLoans => Some(LOANS_PATH.to_owned()),
            EventAction::EditNote { .. } | EventAction::DeleteNote { .. } => None,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(tag = "tipo")]
pub enum CalendarEvent {
    #[serde(rename = "trabajo")]
    Job(Job),
    #[serde(rename = "mantencion")]
    Maintenance(Maintenance),
    #[serde(rename = "prestamo")]
    Loan(Loan),
    #[serde(rename = "nota")]
    Note(Note),
}

impl CalendarEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            CalendarEvent::Job(_) => EventKind::Job,
            CalendarEvent::Maintenance(_) => EventKind::Maintenance,
            CalendarEvent::Loan(_) => EventKind::Loan,
            CalendarEvent::Note(_) => EventKind::Note,
        }
    }
    pub fn date(&self) -> NaiveDate {
        match self {
            CalendarEvent::Job(job) => job.fecha,
            CalendarEvent::Maintenance(maintenance) => maintenance.fecha,
            CalendarEvent::Loan(loan) => loan.fecha,
            CalendarEvent::Note(note) => note.fecha,
        }
    }
    pub fn title(&self) -> String {
        match self {
            CalendarEvent::Job(job) => format!("Cot. {}", job.numero),
            CalendarEvent::Maintenance(maintenance) => maintenance.material.to_owned(),
            CalendarEvent::Loan(loan) => format!("{} - {}", loan.codigo, loan.prestado_a),
            CalendarEvent::Note(note) => note.titulo.to_owned(),
        }
    }
    /// Only notes carry a custom color.
    pub fn color(&self) -> Option<&str> {
        match self {
            CalendarEvent::Note(note) => note.color.as_deref(),
            _ => None,
        }
    }
    pub fn badge(&self) -> Option<Badge> {
        match self {
            CalendarEvent::Job(job) => job.estado.as_deref().map(quote_status_badge),
            CalendarEvent::Loan(loan) => Some(loan_urgency_badge(&loan.urgencia)),
            CalendarEvent::Note(note) => {
                let priority = note.prioridad.unwrap_or_default();
                Some(Badge {
                    class: priority.as_str().to_owned(),
                    text: format!("{} {}", priority.icon(), priority.label()),
                })
            }
            CalendarEvent::Maintenance(_) => None,
        }
    }
    pub fn actions(&self) -> Vec<EventAction> {
        match self {
            CalendarEvent::Job(job) => vec![EventAction::ViewQuote { id: job.id }],
            CalendarEvent::Maintenance(maintenance) => vec![EventAction::RegisterMaintenance {
                material_id: maintenance.material_id,
            }],
            CalendarEvent::Loan(_) => vec![EventAction::ViewLoans],
            CalendarEvent::Note(note) => vec![
                EventAction::EditNote { id: note.id },
                EventAction::DeleteNote { id: note.id },
            ],
        }
    }
}

pub fn quote_status_badge(status: &str) -> Badge {
    match status {
        "aprobada" => Badge::new("aprobada", "Aprobada"),
        "enviada" => Badge::new("enviada", "Enviada"),
        "finalizada" => Badge::new("aprobada", "Finalizada"),
        other => {
            let mut chars = other.chars();
            let text = match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            };
            Badge {
                class: other.to_owned(),
                text,
            }
        }
    }
}

pub fn loan_urgency_badge(urgency: &str) -> Badge {
    match urgency {
        "vencido" => Badge::new("rechazada", "🚨 VENCIDO"),
        "proximo" => Badge::new("vencida", "⚠️ PRÓXIMO"),
        _ => Badge::new("enviada", "✓ PROGRAMADO"),
    }
}
