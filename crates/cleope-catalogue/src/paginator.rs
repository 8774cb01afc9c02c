//! Counting and paginated retrieval of search results.

use cleope_core::config::Settings;
use cleope_core::error::Result;
use cleope_core::models::{ResultTable, SearchFilter};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::endpoint::Endpoint;
use crate::expression::build_filter_expression;
use crate::ports::CatalogueClient;
use crate::response::{parse_count, parse_products};

/// One page to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: usize,
    pub top: usize,
    pub skip: usize,
}

/// Plan the pages needed to fetch `total` results.
///
/// The page size is capped at `total`. Full pages come first; a non-zero
/// remainder is fetched last, starting right after the full pages.
pub fn plan_pages(total: u64, page_size: usize) -> Vec<PageRequest> {
    let total = total as usize;
    if total == 0 || page_size == 0 {
        return Vec::new();
    }

    let size = page_size.min(total);
    let page_count = total / size;
    let remainder = total - page_count * size;

    let mut pages: Vec<PageRequest> = (0..page_count)
        .map(|page| PageRequest { page, top: size, skip: page * size })
        .collect();

    if remainder > 0 {
        pages.push(PageRequest {
            page: page_count,
            top: remainder,
            skip: page_count * size,
        });
    }

    pages
}

/// Counts and pages through catalogue search results
pub struct Paginator<'a> {
    client: &'a dyn CatalogueClient,
    endpoint: Endpoint,
    page_size: usize,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a dyn CatalogueClient, settings: &Settings) -> Self {
        Self {
            client,
            endpoint: Endpoint::new(settings.catalogue_url.clone()),
            page_size: settings.page_size,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Count URL for a filter
    pub fn count_url(&self, filter: &SearchFilter) -> Result<String> {
        Ok(self.endpoint.count_url(&build_filter_expression(filter)?))
    }

    /// Search URLs that a search over `total` results would request
    pub fn page_urls(&self, filter: &SearchFilter, total: u64) -> Result<Vec<String>> {
        let expression = build_filter_expression(filter)?;
        Ok(plan_pages(total, self.page_size)
            .iter()
            .map(|p| self.endpoint.search_url(&expression, p.top, p.skip))
            .collect())
    }

    /// Number of products matching the filter
    pub fn count(&self, filter: &SearchFilter) -> Result<u64> {
        let url = self.count_url(filter)?;
        debug!(url = %url, "Counting products");

        let total = parse_count(&self.client.get_text(&url)?)?;
        if total == 0 {
            warn!("0 products found");
        } else {
            info!("{} products found", total);
        }
        Ok(total)
    }

    /// Fetch `total` results page by page
    pub fn search(&self, total: u64, filter: &SearchFilter) -> Result<ResultTable> {
        self.search_with_progress(total, filter, |_| {})
    }

    /// Fetch `total` results, reporting each page once it has arrived
    pub fn search_with_progress<F>(
        &self,
        total: u64,
        filter: &SearchFilter,
        mut on_page: F,
    ) -> Result<ResultTable>
    where
        F: FnMut(&PageRequest),
    {
        let mut table = ResultTable::new();

        let pages = plan_pages(total, self.page_size);
        if pages.is_empty() {
            warn!("0 products found, nothing to fetch");
            return Ok(table);
        }

        let expression = build_filter_expression(filter)?;
        for request in &pages {
            let url = self.endpoint.search_url(&expression, request.top, request.skip);
            debug!(page = request.page, url = %url, "Fetching page");

            let products = parse_products(&self.client.get_json(&url)?)?;
            if products.len() != request.top {
                warn!(
                    page = request.page,
                    expected = request.top,
                    received = products.len(),
                    "Page size differs from the requested size"
                );
            }

            table.push_page(request.page, products);
            on_page(request);
        }

        info!(rows = table.len(), pages = pages.len(), "Search complete");
        Ok(table)
    }

    /// Validate the area of interest, count, then fetch every result
    pub fn search_filter(&self, filter: &SearchFilter) -> Result<ResultTable> {
        cleope_geo::ensure_valid(filter.footprint())?;
        let total = self.count(filter)?;
        self.search(total, filter)
    }
}
