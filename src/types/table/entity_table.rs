use serde::{Deserialize, Serialize};

use crate::types::table::{
    clients_statistics, materials_statistics, services_statistics, users_statistics, CellTest,
    Dropdown, DropdownPredicate, SearchScope, TableRow, TableStatistics,
};

const NO_REPRESENTATIVES: &str = "sin representantes";
const EMPTY_CONTACT: &str = "-";

const CLIENT_REPRESENTATIVE_OPTIONS: &[(&str, &[CellTest])] = &[
    (
        "con",
        &[CellTest {
            column: 1,
            needle: NO_REPRESENTATIVES,
            present: false,
        }],
    ),
    (
        "sin",
        &[CellTest {
            column: 1,
            needle: NO_REPRESENTATIVES,
            present: true,
        }],
    ),
];

const CLIENT_CONTACT_OPTIONS: &[(&str, &[CellTest])] = &[
    (
        "email",
        &[CellTest {
            column: 4,
            needle: EMPTY_CONTACT,
            present: false,
        }],
    ),
    (
        "telefono",
        &[CellTest {
            column: 3,
            needle: EMPTY_CONTACT,
            present: false,
        }],
    ),
    (
        "ambos",
        &[
            CellTest {
                column: 4,
                needle: EMPTY_CONTACT,
                present: false,
            },
            CellTest {
                column: 3,
                needle: EMPTY_CONTACT,
                present: false,
            },
        ],
    ),
    (
        "ninguno",
        &[
            CellTest {
                column: 4,
                needle: EMPTY_CONTACT,
                present: true,
            },
            CellTest {
                column: 3,
                needle: EMPTY_CONTACT,
                present: true,
            },
        ],
    ),
];

/// Management pages sharing the filter engine, each with its own columns.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum EntityTable {
    Users,
    Clients,
    Materials,
    Services,
}

impl EntityTable {
    pub fn search_scope(&self) -> SearchScope {
        match self {
            EntityTable::Clients => SearchScope::Columns(&[0, 1, 2, 3, 4]),
            EntityTable::Users | EntityTable::Materials | EntityTable::Services => {
                SearchScope::Row
            }
        }
    }
    pub fn dropdowns(&self) -> Vec<Dropdown> {
        match self {
            EntityTable::Users => vec![
                Dropdown {
                    id: "cargo",
                    predicate: DropdownPredicate::PillClassPrefix { prefix: "cargo-" },
                },
                Dropdown {
                    id: "activo",
                    predicate: DropdownPredicate::PillFlag {
                        index: 1,
                        class: "activo",
                        truthy: "1",
                    },
                },
                Dropdown {
                    id: "fecha",
                    predicate: DropdownPredicate::AttributeAtLeast {
                        attribute: "fecha-ingreso",
                    },
                },
            ],
            EntityTable::Clients => vec![
                Dropdown {
                    id: "representante",
                    predicate: DropdownPredicate::Conditions(CLIENT_REPRESENTATIVE_OPTIONS),
                },
                Dropdown {
                    id: "contacto",
                    predicate: DropdownPredicate::Conditions(CLIENT_CONTACT_OPTIONS),
                },
            ],
            EntityTable::Materials => vec![Dropdown {
                id: "categoria",
                predicate: DropdownPredicate::CellContainsValue { column: 2 },
            }],
            EntityTable::Services => vec![Dropdown {
                id: "categoria",
                predicate: DropdownPredicate::CellContainsLabel { column: 1 },
            }],
        }
    }
    pub fn statistics(&self, rows: &[&TableRow]) -> TableStatistics {
        match self {
            EntityTable::Users => users_statistics(rows),
            EntityTable::Clients => clients_statistics(rows),
            EntityTable::Materials => materials_statistics(rows),
            EntityTable::Services => services_statistics(rows),
        }
    }
    pub fn noun(&self) -> &'static str {
        match self {
            EntityTable::Users => "usuarios",
            EntityTable::Clients => "clientes",
            EntityTable::Materials => "materiales",
            EntityTable::Services => "servicios",
        }
    }
    /// Width of the "no results" row.
    pub fn columns(&self) -> u32 {
        match self {
            EntityTable::Users => 6,
            EntityTable::Clients | EntityTable::Materials | EntityTable::Services => 7,
        }
    }
}
