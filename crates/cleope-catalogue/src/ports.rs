//! Catalogue port definitions

use cleope_core::error::Result;

/// Port for issuing catalogue GET requests
pub trait CatalogueClient: Send + Sync {
    /// Fetch a URL and decode the body as JSON
    ///
    /// # Arguments
    /// * `url` - Fully composed request URL, already percent-encoded
    ///
    /// # Returns
    /// The decoded JSON document
    fn get_json(&self, url: &str) -> Result<serde_json::Value>;

    /// Fetch a URL and return the raw body
    fn get_text(&self, url: &str) -> Result<String>;
}
