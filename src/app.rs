use std::sync::Arc;

use crate::{
    cache::ImageCache,
    dataset::{estimated_value, parse_csv, row_display_name},
    error::AppError,
    models::Dataset,
    sample::SAMPLE_CSV,
    scryfall::ImageResolver,
    storage::{self, BlobStore},
    view::{self, compute_view, ViewSnapshot, ViewState},
};

pub const EXPORT_FILE_NAME: &str = "collection.csv";
pub const EXPORT_MIME_TYPE: &str = "text/csv";

/// Owns the loaded Dataset, the view settings, and the image cache, and
/// exposes every state transition the presentation layer needs. The view
/// itself stays a pure function; this type only decides when state changes.
pub struct App {
    dataset: Option<Dataset>,
    view: ViewState,
    cache: ImageCache,
    store: Arc<dyn BlobStore>,
}

impl App {
    /// Builds the controller and best-effort restores the last session's
    /// CSV from the store. Any restore failure means a cold start.
    pub fn new(store: Arc<dyn BlobStore>, resolver: Box<dyn ImageResolver>) -> Self {
        let cache = ImageCache::new(store.clone(), resolver);
        let mut app = Self {
            dataset: None,
            view: ViewState::default(),
            cache,
            store,
        };
        app.restore_persisted();
        app
    }

    fn restore_persisted(&mut self) {
        match storage::load_csv_data(self.store.as_ref()) {
            Ok(Some(text)) => {
                // The text just came from the store; no need to write it back.
                if let Err(err) = self.install_dataset(&text) {
                    eprintln!("warning: ignoring persisted CSV data: {err}");
                }
            }
            Ok(None) => {}
            Err(err) => eprintln!("warning: failed to read persisted CSV data: {err:#}"),
        }
    }

    /// Replaces the Dataset wholesale from raw CSV text. On parse failure the
    /// previous Dataset and view settings stay untouched. On success the raw
    /// text is persisted best-effort and the view state carries over per the
    /// reload rules (page size and recurring hidden columns survive).
    pub fn load_csv(&mut self, text: &str) -> Result<(), AppError> {
        self.install_dataset(text)?;
        if let Err(err) = storage::save_csv_data(self.store.as_ref(), text) {
            eprintln!("warning: failed to persist CSV data: {err:#}");
        }
        Ok(())
    }

    fn install_dataset(&mut self, text: &str) -> Result<(), AppError> {
        let dataset = parse_csv(text).map_err(|err| AppError::Parse(format!("{err:#}")))?;
        self.view = self.view.carry_over(&dataset.columns);
        self.dataset = Some(dataset);
        Ok(())
    }

    pub fn load_sample(&mut self) -> Result<(), AppError> {
        self.load_csv(SAMPLE_CSV)
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// The render-ready window for the current state; the no-data view when
    /// nothing has been loaded.
    pub fn view(&self) -> ViewSnapshot {
        match &self.dataset {
            Some(dataset) => compute_view(dataset, &self.view),
            None => ViewSnapshot::empty(),
        }
    }

    pub fn set_search(&mut self, term: &str) {
        self.view.search_term = term.to_string();
        self.reset_page_if_out_of_range();
    }

    pub fn toggle_sort(&mut self, column: &str) {
        self.view.toggle_sort(column);
        self.reset_page_if_out_of_range();
    }

    // A filter or sort change that leaves the current page out of range
    // resets to the first page, never to a clamped last page.
    fn reset_page_if_out_of_range(&mut self) {
        let filtered = match &self.dataset {
            Some(dataset) => view::filter_indices(dataset, &self.view.search_term).len(),
            None => 0,
        };
        let pages = view::page_count(filtered, self.view.page_size);
        if pages == 0 || self.view.page_index >= pages {
            self.view.page_index = 0;
        }
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.view.page_size = size.max(1);
        self.view.page_index = 0;
    }

    pub fn set_page(&mut self, index: usize) {
        let filtered = match &self.dataset {
            Some(dataset) => view::filter_indices(dataset, &self.view.search_term).len(),
            None => 0,
        };
        self.view.page_index = view::clamp_page_index(filtered, self.view.page_size, index);
    }

    pub fn set_column_hidden(&mut self, column: &str, hidden: bool) {
        let known = self
            .dataset
            .as_ref()
            .map(|dataset| dataset.columns.iter().any(|name| name == column))
            .unwrap_or(false);
        if !known {
            return;
        }
        if hidden {
            if !self.view.hidden_columns.iter().any(|name| name == column) {
                self.view.hidden_columns.push(column.to_string());
            }
        } else {
            self.view.hidden_columns.retain(|name| name != column);
        }
    }

    /// The exact input text captured at load time, never a re-serialization
    /// of the current view.
    pub fn export(&self) -> Result<&str, AppError> {
        self.dataset
            .as_ref()
            .map(|dataset| dataset.raw_csv.as_str())
            .ok_or(AppError::NoData)
    }

    pub fn estimated_value(&self) -> f64 {
        self.dataset
            .as_ref()
            .map(estimated_value)
            .unwrap_or(0.0)
    }

    /// Whether the current Dataset offers the image affordance at all.
    pub fn has_images(&self) -> bool {
        self.dataset
            .as_ref()
            .map(|dataset| dataset.scryfall_column.is_some())
            .unwrap_or(false)
    }

    pub fn card_name(&self, row_index: usize) -> Option<String> {
        self.dataset
            .as_ref()
            .and_then(|dataset| dataset.rows.get(row_index))
            .map(row_display_name)
    }

    /// Resolves the display image for a Dataset row. The row index is
    /// validated against the current Dataset first, so a request made for a
    /// since-replaced table cannot apply to the wrong row.
    pub fn card_image(&self, row_index: usize) -> Result<String, AppError> {
        let dataset = self.dataset.as_ref().ok_or(AppError::NoData)?;
        let column = dataset
            .scryfall_column
            .as_ref()
            .ok_or_else(|| AppError::Resolve("dataset has no Scryfall ID column".into()))?;
        let row = dataset
            .rows
            .get(row_index)
            .ok_or_else(|| AppError::Resolve(format!("row {} is out of range", row_index)))?;
        let id = row
            .get(column)
            .and_then(crate::value_utils::value_to_search_string)
            .unwrap_or_default();
        if id.is_empty() {
            return Err(AppError::Resolve(format!(
                "row {} has no Scryfall identifier",
                row_index
            )));
        }
        self.cache
            .get_image(&id)
            .ok_or_else(|| AppError::Resolve(format!("could not resolve an image for {}", id)))
    }
}
