//! CLEOPE Catalogue - OData query composition and paginated search
//!
//! This crate builds catalogue search expressions from a `SearchFilter`,
//! defines the `CatalogueClient` port with its HTTP adapter, pages through
//! search results, and looks products up by name to locate them on the
//! shared mount.

pub mod endpoint;
pub mod expression;
pub mod lookup;
pub mod onda;
pub mod paginator;
pub mod ports;
mod response;

// Re-export main types
pub use endpoint::Endpoint;
pub use expression::{build_filter_expression, build_plain_expression, encode_expression};
pub use lookup::{is_restored, mount_path, mount_paths, normalize_product_name, ProductLookup};
pub use onda::OndaClient;
pub use paginator::{plan_pages, PageRequest, Paginator};
pub use ports::CatalogueClient;
