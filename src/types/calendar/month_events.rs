use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::calendar::{CalendarEvent, Job, Loan, Maintenance, Note};

/// Payload of the calendar endpoint for a single month.
#[derive(Clone, PartialEq, Default, Serialize, Deserialize, Debug)]
pub struct MonthEvents {
    #[serde(default)]
    pub trabajos: Vec<Job>,
    #[serde(default)]
    pub mantenciones: Vec<Maintenance>,
    #[serde(default)]
    pub prestamos: Vec<Loan>,
    #[serde(default)]
    pub notas: Vec<Note>,
}

impl MonthEvents {
    pub fn iter(&self) -> impl Iterator<Item = CalendarEvent> + '_ {
        self.trabajos
            .iter()
            .cloned()
            .map(CalendarEvent::Job)
            .chain(self.mantenciones.iter().cloned().map(CalendarEvent::Maintenance))
            .chain(self.prestamos.iter().cloned().map(CalendarEvent::Loan))
            .chain(self.notas.iter().cloned().map(CalendarEvent::Note))
    }
    pub fn on(&self, date: NaiveDate) -> impl Iterator<Item = CalendarEvent> + '_ {
        self.iter().filter(move |event| event.date() == date)
    }
    pub fn note(&self, id: u64) -> Option<&Note> {
        self.notas.iter().find(|note| note.id == id)
    }
    pub fn len(&self) -> usize {
        self.trabajos.len() + self.mantenciones.len() + self.prestamos.len() + self.notas.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
