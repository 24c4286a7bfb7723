use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The full in-memory table built from one successful CSV load.
///
/// Replaced wholesale on the next successful load; never patched. `raw_csv`
/// is the exact input text captured at load time and backs export.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub rows: Vec<HashMap<String, Value>>,
    pub columns: Vec<String>,
    pub raw_csv: String,
    pub scryfall_column: Option<String>,
}

/// One row of the computed view window, keyed back to the Dataset by index.
#[derive(Debug, Clone, Serialize)]
pub struct RenderRow {
    pub row_index: usize,
    pub data: HashMap<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn is_descending(self) -> bool {
        matches!(self, SortDirection::Descending)
    }
}

/// A resolved card image URL with its fetch timestamp.
///
/// Field names match the persisted JSON shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry {
    pub img: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
