use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::{
    models::{Dataset, RenderRow, SortDirection},
    value_utils::{value_to_number, value_to_search_string},
};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const PAGE_SIZE_CHOICES: [usize; 4] = [10, 20, 50, 100];

/// Ephemeral presentation settings, owned by the controller and independent
/// of the Dataset lifecycle.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub search_term: String,
    pub sort: Option<(String, SortDirection)>,
    pub hidden_columns: Vec<String>,
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort: None,
            hidden_columns: Vec::new(),
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewState {
    /// Cycles the sort on repeated selection of the same column:
    /// ascending -> descending -> none. A different column starts ascending.
    pub fn toggle_sort(&mut self, column: &str) {
        self.sort = match self.sort.take() {
            Some((current, SortDirection::Ascending)) if current == column => {
                Some((current, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == column => None,
            _ => Some((column.to_string(), SortDirection::Ascending)),
        };
    }

    /// Settings that survive a dataset replacement: page size is kept, hidden
    /// columns are kept where the new dataset has the same column name, and
    /// search, sort, and page index reset to defaults.
    pub fn carry_over(&self, columns: &[String]) -> ViewState {
        ViewState {
            search_term: String::new(),
            sort: None,
            hidden_columns: self
                .hidden_columns
                .iter()
                .filter(|name| columns.contains(name))
                .cloned()
                .collect(),
            page_index: 0,
            page_size: self.page_size,
        }
    }
}

/// The render-ready window: one page of rows after filter, sort, and column
/// projection, plus the counters the presentation layer shows.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub rows: Vec<RenderRow>,
    pub columns: Vec<String>,
    pub sort: Option<(String, SortDirection)>,
    pub page_index: usize,
    pub page_count: usize,
    pub total_rows: usize,
    pub filtered_rows: usize,
}

impl ViewSnapshot {
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            columns: Vec::new(),
            sort: None,
            page_index: 0,
            page_count: 0,
            total_rows: 0,
            filtered_rows: 0,
        }
    }

    /// Per-column display width over the window's header and cell texts.
    pub fn column_widths(&self) -> HashMap<String, usize> {
        let mut widths: HashMap<String, usize> = self
            .columns
            .iter()
            .map(|name| (name.clone(), name.chars().count()))
            .collect();
        for row in &self.rows {
            for column in &self.columns {
                let len = row
                    .data
                    .get(column)
                    .map(crate::value_utils::value_display_length)
                    .unwrap_or(0);
                if let Some(entry) = widths.get_mut(column) {
                    if len > *entry {
                        *entry = len;
                    }
                }
            }
        }
        widths
    }
}

/// Computes the row window for the current state without touching the
/// Dataset: global filter, then sort, then column projection, then paging.
pub fn compute_view(dataset: &Dataset, state: &ViewState) -> ViewSnapshot {
    let mut indices = filter_indices(dataset, &state.search_term);
    if let Some((column, direction)) = &state.sort {
        sort_indices(dataset, &mut indices, column, *direction);
    }

    let page_size = state.page_size.max(1);
    let filtered = indices.len();
    let pages = page_count(filtered, page_size);
    let page_index = clamp_page_index(filtered, page_size, state.page_index);
    let start = page_index * page_size;
    let end = usize::min(start + page_size, filtered);

    let rows = indices[start..end]
        .iter()
        .map(|&row_index| RenderRow {
            row_index,
            data: dataset.rows[row_index].clone(),
        })
        .collect();

    ViewSnapshot {
        rows,
        columns: visible_columns(dataset, &state.hidden_columns),
        sort: state.sort.clone(),
        page_index,
        page_count: pages,
        total_rows: dataset.rows.len(),
        filtered_rows: filtered,
    }
}

/// Rows whose stringified cells contain the term case-insensitively, in
/// dataset order. Hidden columns still participate; visibility is purely a
/// rendering concern. An empty term passes every row.
pub fn filter_indices(dataset: &Dataset, search_term: &str) -> Vec<usize> {
    if search_term.is_empty() {
        return (0..dataset.rows.len()).collect();
    }
    let needle = search_term.to_lowercase();
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            dataset.columns.iter().any(|column| {
                row.get(column)
                    .and_then(value_to_search_string)
                    .map(|text| text.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Stable sort of row indices by one column. The comparison is numeric when
/// the majority of the column's observed values coerce to numbers, lexical
/// (case-insensitive) otherwise; absent values order after present ones.
pub fn sort_indices(
    dataset: &Dataset,
    indices: &mut [usize],
    column: &str,
    direction: SortDirection,
) {
    if !dataset.columns.iter().any(|name| name == column) {
        return;
    }

    let mut present = 0usize;
    let mut numeric = 0usize;
    for &idx in indices.iter() {
        let value = dataset.rows[idx].get(column);
        if value.and_then(value_to_search_string).is_some() {
            present += 1;
            if value.and_then(value_to_number).is_some() {
                numeric += 1;
            }
        }
    }
    let numeric_order = present > 0 && numeric * 2 > present;

    indices.sort_by(|a, b| {
        let a_value = dataset.rows[*a].get(column);
        let b_value = dataset.rows[*b].get(column);
        let mut ord = if numeric_order {
            let a_num = a_value.and_then(value_to_number);
            let b_num = b_value.and_then(value_to_number);
            a_num
                .unwrap_or(f64::INFINITY)
                .partial_cmp(&b_num.unwrap_or(f64::INFINITY))
                .unwrap_or(Ordering::Equal)
        } else {
            let a_text = a_value.and_then(value_to_search_string);
            let b_text = b_value.and_then(value_to_search_string);
            match (&a_text, &b_text) {
                (Some(a_str), Some(b_str)) => {
                    a_str.to_lowercase().cmp(&b_str.to_lowercase())
                }
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        };
        if direction.is_descending() {
            ord = ord.reverse();
        }
        ord
    });
}

/// Dataset columns in display order with hidden ones removed.
pub fn visible_columns(dataset: &Dataset, hidden_columns: &[String]) -> Vec<String> {
    dataset
        .columns
        .iter()
        .filter(|name| !hidden_columns.contains(name))
        .cloned()
        .collect()
}

pub fn page_count(row_count: usize, page_size: usize) -> usize {
    if row_count == 0 {
        0
    } else {
        row_count.div_ceil(page_size.max(1))
    }
}

pub fn clamp_page_index(row_count: usize, page_size: usize, page_index: usize) -> usize {
    let pages = page_count(row_count, page_size);
    if pages == 0 {
        0
    } else {
        page_index.min(pages - 1)
    }
}
