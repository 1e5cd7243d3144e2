use itertools::Itertools;
use serde::Serialize;

use crate::constants::NO_CATEGORY_LABEL;
use crate::types::format::parse_digits;
use crate::types::table::TableRow;

/// KPI cards of a management page, computed over the visible rows only.
#[derive(Clone, PartialEq, Serialize, Debug)]
#[serde(tag = "entity", rename_all = "camelCase")]
pub enum TableStatistics {
    #[serde(rename_all = "camelCase")]
    Users {
        total: usize,
        active: usize,
        inactive: usize,
        active_percent: u32,
        roles: usize,
    },
    #[serde(rename_all = "camelCase")]
    Clients {
        total: usize,
        with_representatives: usize,
        with_email: usize,
        with_phone: usize,
    },
    #[serde(rename_all = "camelCase")]
    Materials {
        total: usize,
        categories: usize,
        active: usize,
        average_price: f64,
    },
    #[serde(rename_all = "camelCase")]
    Services {
        total: usize,
        parametrizable: usize,
        categories: usize,
        active: usize,
    },
}

fn first_pill<'a>(row: &'a TableRow, column: usize) -> Option<&'a crate::types::table::Pill> {
    row.cells.get(column).and_then(|cell| cell.pills.first())
}

pub fn users_statistics(rows: &[&TableRow]) -> TableStatistics {
    let total = rows.len();
    let roles = rows
        .iter()
        .filter_map(|row| first_pill(row, 2))
        .map(|pill| pill.text.trim())
        .unique()
        .count();
    let (active, inactive) = rows
        .iter()
        .filter_map(|row| first_pill(row, 4))
        .fold((0, 0), |(active, inactive), pill| {
            if pill.has_class("activo") {
                (active + 1, inactive)
            } else {
                (active, inactive + 1)
            }
        });
    let active_percent = if total > 0 {
        (active as f64 / total as f64 * 100.0).round() as u32
    } else {
        0
    };
    TableStatistics::Users {
        total,
        active,
        inactive,
        active_percent,
        roles,
    }
}

pub fn clients_statistics(rows: &[&TableRow]) -> TableStatistics {
    TableStatistics::Clients {
        total: rows.len(),
        with_representatives: rows
            .iter()
            .filter(|row| !row.cell_text(1).contains("Sin representantes"))
            .count(),
        with_email: rows
            .iter()
            .filter(|row| row.cell_text(4).trim() != "-")
            .count(),
        with_phone: rows
            .iter()
            .filter(|row| row.cell_text(3).trim() != "-")
            .count(),
    }
}

pub fn materials_statistics(rows: &[&TableRow]) -> TableStatistics {
    let total = rows.len();
    let categories = rows
        .iter()
        .map(|row| row.cell_text(2).trim())
        .filter(|category| !category.contains(NO_CATEGORY_LABEL))
        .unique()
        .count();
    let price_sum = rows
        .iter()
        .map(|row| parse_digits(row.cell_text(3)))
        .sum::<f64>();
    let average_price = if total > 0 {
        (price_sum / total as f64).round()
    } else {
        0.0
    };
    TableStatistics::Materials {
        total,
        categories,
        active: rows
            .iter()
            .filter(|row| row.cell_text(5).contains("Activo"))
            .count(),
        average_price,
    }
}

pub fn services_statistics(rows: &[&TableRow]) -> TableStatistics {
    TableStatistics::Services {
        total: rows.len(),
        parametrizable: rows
            .iter()
            .filter(|row| row.cell_text(4).contains("Sí"))
            .count(),
        categories: rows
            .iter()
            .map(|row| row.cell_text(1).trim())
            .filter(|category| !category.is_empty())
            .unique()
            .count(),
        active: rows
            .iter()
            .filter(|row| row.cell_text(5).contains("Activo"))
            .count(),
    }
}
