pub mod app;
pub mod cache;
pub mod dataset;
pub mod error;
pub mod models;
pub mod sample;
pub mod scryfall;
pub mod storage;
pub mod value_utils;
pub mod view;

pub use app::{App, EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
pub use error::AppError;
pub use models::{CacheEntry, Dataset, RenderRow, SortDirection};
pub use view::{ViewSnapshot, ViewState, DEFAULT_PAGE_SIZE};
