use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    models::{common::eq_update, ctx::Ctx},
    runtime::{
        msg::{Action, ActionLoad, ActionTableWithFilters, Msg},
        Effects, Env, UpdateWithCtx,
    },
    types::table::{EntityTable, Selection, TableRow, TableStatistics},
};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Selected {
    pub entity: EntityTable,
    /// Rows in document order, as rendered by the server.
    pub rows: Vec<TableRow>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
pub struct Summary {
    pub visible: usize,
    pub total: usize,
    /// `N de M clientes`
    pub text: String,
    pub filtered: bool,
    pub no_results: bool,
}

#[derive(Default, Clone, PartialEq, Serialize, Debug)]
pub struct TableWithFilters {
    pub selected: Option<Selected>,
    pub search: String,
    pub dropdowns: BTreeMap<String, Selection>,
    /// Indices into `selected.rows`, ascending.
    pub visible: Vec<usize>,
    pub statistics: Option<TableStatistics>,
    pub summary: Option<Summary>,
}

impl<E: Env + 'static> UpdateWithCtx<E> for TableWithFilters {
    fn update(&mut self, msg: &Msg, _: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::TableWithFilters(selected))) => {
                let selected_effects = eq_update(&mut self.selected, Some(selected.to_owned()));
                let search_effects = eq_update(&mut self.search, String::new());
                let dropdowns_effects = eq_update(&mut self.dropdowns, BTreeMap::new());
                let visibility_effects = self.visibility_update();
                selected_effects
                    .join(search_effects)
                    .join(dropdowns_effects)
                    .join(visibility_effects)
            }
            Msg::Action(Action::Unload) => eq_update(self, TableWithFilters::default()),
            Msg::Action(Action::TableWithFilters(ActionTableWithFilters::Search(search))) => {
                let search_effects = eq_update(&mut self.search, search.to_owned());
                let visibility_effects = self.visibility_update();
                search_effects.join(visibility_effects)
            }
            Msg::Action(Action::TableWithFilters(ActionTableWithFilters::SetDropdown {
                id,
                selection,
            })) => {
                let known = self
                    .selected
                    .as_ref()
                    .map(|selected| {
                        selected
                            .entity
                            .dropdowns()
                            .iter()
                            .any(|dropdown| dropdown.id == id.as_str())
                    })
                    .unwrap_or_default();
                if !known {
                    tracing::debug!("Ignoring unknown dropdown {}", id);
                    return Effects::none().unchanged();
                }
                let mut dropdowns = self.dropdowns.to_owned();
                if selection.is_active() {
                    dropdowns.insert(id.to_owned(), selection.to_owned());
                } else {
                    dropdowns.remove(id);
                }
                let dropdowns_effects = eq_update(&mut self.dropdowns, dropdowns);
                let visibility_effects = self.visibility_update();
                dropdowns_effects.join(visibility_effects)
            }
            Msg::Action(Action::TableWithFilters(ActionTableWithFilters::ClearFilters)) => {
                let search_effects = eq_update(&mut self.search, String::new());
                let dropdowns_effects = eq_update(&mut self.dropdowns, BTreeMap::new());
                let visibility_effects = self.visibility_update();
                search_effects
                    .join(dropdowns_effects)
                    .join(visibility_effects)
            }
            _ => Effects::none().unchanged(),
        }
    }
}

impl TableWithFilters {
    fn visibility_update(&mut self) -> Effects {
        let (visible, statistics, summary) = match &self.selected {
            Some(selected) => {
                let visible = visible_rows(selected.entity, &selected.rows, &self.search, &self.dropdowns);
                let visible_rows = visible
                    .iter()
                    .map(|index| &selected.rows[*index])
                    .collect::<Vec<_>>();
                let statistics = selected.entity.statistics(&visible_rows);
                let total = selected
                    .rows
                    .iter()
                    .filter(|row| !row.is_placeholder())
                    .count();
                let filtered = !self.search.trim().is_empty() || !self.dropdowns.is_empty();
                let summary = Summary {
                    visible: visible.len(),
                    total,
                    text: format!("{} de {} {}", visible.len(), total, selected.entity.noun()),
                    filtered,
                    no_results: visible.is_empty() && total > 0,
                };
                (visible, Some(statistics), Some(summary))
            }
            None => (vec![], None, None),
        };
        let visible_effects = eq_update(&mut self.visible, visible);
        let statistics_effects = eq_update(&mut self.statistics, statistics);
        let summary_effects = eq_update(&mut self.summary, summary);
        visible_effects
            .join(statistics_effects)
            .join(summary_effects)
    }
}

/// Indices of the rows matching the search and every active dropdown, in
/// their original order. Placeholder rows never match.
pub fn visible_rows(
    entity: EntityTable,
    rows: &[TableRow],
    search: &str,
    dropdowns: &BTreeMap<String, Selection>,
) -> Vec<usize> {
    let scope = entity.search_scope();
    let predicates = entity
        .dropdowns()
        .into_iter()
        .filter_map(|dropdown| {
            dropdowns
                .get(dropdown.id)
                .map(|selection| (dropdown.predicate, selection))
        })
        .collect::<Vec<_>>();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| !row.is_placeholder())
        .filter(|(_, row)| scope.matches(row, search))
        .filter(|(_, row)| {
            predicates
                .iter()
                .all(|(predicate, selection)| predicate.matches(row, selection))
        })
        .map(|(index, _)| index)
        .collect()
}
