use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A status badge rendered inside a cell.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize, Debug)]
pub struct Pill {
    pub text: String,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl Pill {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|candidate| candidate == class)
    }
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }
}

#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize, Debug)]
pub struct TableCell {
    pub text: String,
    #[serde(default)]
    pub pills: Vec<Pill>,
    #[serde(default)]
    pub colspan: Option<u32>,
}

/// Snapshot of one `<tr>` of a server rendered table.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize, Debug)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    /// `data-*` attributes of the row, keyed without the `data-` prefix.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl TableRow {
    /// Rows made of a single spanning cell are "no data" notices, not records.
    pub fn is_placeholder(&self) -> bool {
        self.cells.iter().any(|cell| cell.colspan.is_some())
    }
    pub fn cell_text(&self, column: usize) -> &str {
        self.cells
            .get(column)
            .map(|cell| cell.text.as_str())
            .unwrap_or_default()
    }
    pub fn text(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
    pub fn pills(&self) -> impl Iterator<Item = &Pill> {
        self.cells.iter().flat_map(|cell| cell.pills.iter())
    }
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[cfg(test)]
pub(crate) fn row(cells: &[&str]) -> TableRow {
    TableRow {
        cells: cells
            .iter()
            .map(|text| TableCell {
                text: (*text).to_owned(),
                ..Default::default()
            })
            .collect(),
        attributes: HashMap::new(),
    }
}
