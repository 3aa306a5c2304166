//! Page definitions.
//!
//! Each list view is described once: which resource it reads, how its rows
//! are keyed, its columns and filters, its default sort and the base name of
//! its exports. The UI and the headless exporter both build from these.
//! [`overview`] and [`reports`] describe the two screens that are not lists.

pub mod alerts;
pub mod overview;
pub mod reactivations;
pub mod reports;
pub mod transactions;

mod cells;

use crate::backend::{ListResource, SortOrder};
use crate::grid::{Column, RowKey};
use crate::list::{FilterSet, ListController};

/// Currency suffix of amount columns
pub const CURRENCY: &str = "MAD";

/// Static description of one list view
#[derive(Debug, Clone)]
pub struct PageDefinition {
    pub resource: ListResource,
    pub title: &'static str,
    /// Base name of CSV exports (`{export_name}_{date}.csv`)
    pub export_name: &'static str,
    pub row_key: RowKey,
    pub columns: Vec<Column>,
    pub filters: FilterSet,
    pub sort_by: &'static str,
    pub sort_order: SortOrder,
    /// Sortable fields as `(field, label)`
    pub sort_fields: Vec<(&'static str, &'static str)>,
    /// Counters shown above the grid
    pub stat_cards: Vec<StatCard>,
}

/// One counter of the statistics strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    /// Key in the statistics response
    pub key: &'static str,
    pub label: &'static str,
    /// Appended to the value, e.g. `" days"`
    pub suffix: &'static str,
    /// Fraction digits kept; counters are whole numbers
    pub decimals: u8,
}

impl StatCard {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            suffix: "",
            decimals: 0,
        }
    }

    pub const fn with_suffix(key: &'static str, label: &'static str, suffix: &'static str) -> Self {
        Self {
            key,
            label,
            suffix,
            decimals: 0,
        }
    }

    pub const fn with_decimals(self, decimals: u8) -> Self {
        Self { decimals, ..self }
    }

    /// Counter value rounded to `decimals`; missing or non-numeric reads as 0
    pub fn value(&self, statistics: &crate::backend::Statistics) -> String {
        let value = statistics
            .get(self.key)
            .and_then(crate::utils::format::as_number)
            .unwrap_or(0.0);
        let scale = 10f64.powi(i32::from(self.decimals));
        format!(
            "{}{}",
            crate::utils::format::group_thousands((value * scale).round() / scale),
            self.suffix
        )
    }
}

impl PageDefinition {
    /// A fresh controller for this page
    pub fn controller(&self, per_page: u32) -> ListController {
        ListController::new(
            self.resource,
            self.row_key.clone(),
            self.filters.clone(),
            self.sort_by,
            self.sort_order,
            per_page,
        )
    }

    /// Label of the sort field currently selected, or the raw field name
    pub fn sort_label<'a>(&'a self, field: &'a str) -> &'a str {
        self.sort_fields
            .iter()
            .find(|(name, _)| *name == field)
            .map_or(field, |(_, label)| label)
    }

    /// Sort field following `field` in the page's list, wrapping around
    pub fn next_sort_field(&self, field: &str) -> &'static str {
        let position = self.sort_fields.iter().position(|(name, _)| *name == field);
        match position {
            Some(index) => self.sort_fields[(index + 1) % self.sort_fields.len()].0,
            None => self.sort_by,
        }
    }
}

/// Definition of the page that lists `resource`
pub fn definition(resource: ListResource) -> PageDefinition {
    match resource {
        ListResource::Transactions => transactions::page(),
        ListResource::Alerts => alerts::page(),
        ListResource::Reactivations => reactivations::page(),
    }
}
