//! Catalog query engine: filtering and ordering of the course list.

mod bookmarks;
pub use bookmarks::Bookmarks;

mod loader;
pub use loader::{CatalogLoader, CatalogView};

mod query;
pub use query::{ALL, CatalogQuery, Selection, SortOrder, query};
