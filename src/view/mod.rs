//! Client-side collection view engine.
//!
//! Listing commands fetch a full record list from the marketplace API
//! and project it through this module: free-text search and discrete /
//! range filters, a stable sort over dotted field paths, then
//! pagination with a windowed page-button bar. The projection is a
//! pure function of `(records, ViewState)`; all interactive behavior
//! funnels through [`ViewState`] mutators.

pub mod engine;
pub mod filter;
pub mod page;
pub mod path;
pub mod sort;
pub mod value;

pub use engine::{CollectionView, ViewModel, ViewState};
pub use filter::{FilterSpec, FilterTest};
pub use page::{PageSpec, clamp_page, page_window, total_pages};
pub use path::{FieldPath, Record};
pub use sort::{Direction, SortSpec};
pub use value::FieldValue;
