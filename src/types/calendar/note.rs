use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_NOTE_COLOR;
use crate::types::calendar::Note;
use crate::types::query_params_encode;

#[derive(Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum NotePriority {
    Alta,
    #[default]
    Media,
    Baja,
}

impl NotePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotePriority::Alta => "alta",
            NotePriority::Media => "media",
            NotePriority::Baja => "baja",
        }
    }
    pub fn icon(&self) -> &'static str {
        match self {
            NotePriority::Alta => "🔴",
            NotePriority::Media => "🟡",
            NotePriority::Baja => "🟢",
        }
    }
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

/// Contents of the note editor.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct NoteForm {
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub prioridad: NotePriority,
    pub color: String,
}

impl NoteForm {
    pub fn new(fecha: NaiveDate) -> Self {
        NoteForm {
            titulo: String::new(),
            descripcion: String::new(),
            fecha,
            prioridad: NotePriority::default(),
            color: DEFAULT_NOTE_COLOR.to_owned(),
        }
    }
    pub fn is_valid(&self) -> bool {
        !self.titulo.trim().is_empty()
    }
    /// Encodes the form the way a browser submits it, `nota_id` first and empty for new notes.
    pub fn encode(&self, id: Option<u64>) -> String {
        query_params_encode(&[
            ("nota_id", id.map(|id| id.to_string()).unwrap_or_default()),
            ("titulo", self.titulo.to_owned()),
            ("descripcion", self.descripcion.to_owned()),
            ("fecha", self.fecha.format("%Y-%m-%d").to_string()),
            ("prioridad", self.prioridad.as_str().to_owned()),
            ("color", self.color.to_owned()),
        ])
    }
}

impl From<&Note> for NoteForm {
    fn from(note: &Note) -> Self {
        NoteForm {
            titulo: note.titulo.to_owned(),
            descripcion: note.descripcion.to_owned().unwrap_or_default(),
            fecha: note.fecha,
            prioridad: note.prioridad.unwrap_or_default(),
            color: note
                .color
                .to_owned()
                .unwrap_or_else(|| DEFAULT_NOTE_COLOR.to_owned()),
        }
    }
}
