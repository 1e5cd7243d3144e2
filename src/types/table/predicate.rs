use serde::{Deserialize, Serialize};

use crate::types::table::TableRow;

/// Text the free-text search is matched against.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SearchScope {
    Row,
    Columns(&'static [usize]),
}

impl SearchScope {
    /// Case-insensitive, trimmed substring match. An empty query matches everything.
    pub fn matches(&self, row: &TableRow, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        match self {
            SearchScope::Row => row.text().to_lowercase().contains(&query),
            SearchScope::Columns(columns) => columns
                .iter()
                .any(|column| row.cell_text(*column).to_lowercase().contains(&query)),
        }
    }
}

/// `column` text (lowercased) contains `needle`, or does not when `present` is false.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CellTest {
    pub column: usize,
    pub needle: &'static str,
    pub present: bool,
}

impl CellTest {
    pub fn matches(&self, row: &TableRow) -> bool {
        row.cell_text(self.column).to_lowercase().contains(self.needle) == self.present
    }
}

/// Current value of a dropdown control and the text of the selected option.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize, Debug)]
pub struct Selection {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl Selection {
    pub fn is_active(&self) -> bool {
        !self.value.is_empty()
    }
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DropdownPredicate {
    /// The first pill carrying a class that starts with `prefix` must carry `prefix` + value.
    PillClassPrefix { prefix: &'static str },
    /// The pill at `index` has `class` iff the selected value is `truthy`.
    PillFlag {
        index: usize,
        class: &'static str,
        truthy: &'static str,
    },
    /// Row attribute compared as an ISO date string: attribute >= value.
    AttributeAtLeast { attribute: &'static str },
    /// `column` text contains the selected value.
    CellContainsValue { column: usize },
    /// `column` text contains the selected option's text.
    CellContainsLabel { column: usize },
    /// Each option value maps to cell tests that must all pass.
    Conditions(&'static [(&'static str, &'static [CellTest])]),
}

impl DropdownPredicate {
    /// Inactive selections and predicates whose target is missing from the row pass.
    pub fn matches(&self, row: &TableRow, selection: &Selection) -> bool {
        if !selection.is_active() {
            return true;
        }
        match self {
            DropdownPredicate::PillClassPrefix { prefix } => row
                .pills()
                .map(|pill| pill.class_name())
                .find(|class_name| class_name.contains(prefix))
                .map(|class_name| class_name.contains(&format!("{}{}", prefix, selection.value)))
                .unwrap_or(true),
            DropdownPredicate::PillFlag {
                index,
                class,
                truthy,
            } => row
                .pills()
                .nth(*index)
                .map(|pill| pill.has_class(class) == (selection.value == *truthy))
                .unwrap_or(true),
            DropdownPredicate::AttributeAtLeast { attribute } => row
                .attribute(attribute)
                .map(|value| value >= selection.value.as_str())
                .unwrap_or(true),
            DropdownPredicate::CellContainsValue { column } => row
                .cells
                .get(*column)
                .map(|cell| {
                    cell.text
                        .to_lowercase()
                        .contains(&selection.value.to_lowercase())
                })
                .unwrap_or(true),
            DropdownPredicate::CellContainsLabel { column } => row
                .cell_text(*column)
                .trim()
                .to_lowercase()
                .contains(&selection.label().trim().to_lowercase()),
            DropdownPredicate::Conditions(options) => options
                .iter()
                .find(|(value, _)| *value == selection.value)
                .map(|(_, tests)| tests.iter().all(|test| test.matches(row)))
                .unwrap_or(true),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Dropdown {
    pub id: &'static str,
    pub predicate: DropdownPredicate,
}
