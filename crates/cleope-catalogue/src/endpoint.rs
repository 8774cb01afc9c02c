/// Catalogue endpoint URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Base URL without trailing slash (e.g. "https://catalogue.onda-dias.eu/dias-catalogue")
    base: String,
}

impl Endpoint {
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self { base: base.trim_end_matches('/').to_string() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// One page of search results, oldest products first
    pub fn search_url(&self, expression: &str, top: usize, skip: usize) -> String {
        format!(
            "{}/Products?$search=%22{}%22&$format=json&orderby=creationDate%20asc&$top={}&$skip={}",
            self.base, expression, top, skip
        )
    }

    /// Number of products matching the expression
    pub fn count_url(&self, expression: &str) -> String {
        format!("{}/Products/$count?$search=%22{}%22", self.base, expression)
    }

    /// Lookup of a product by its file name
    pub fn lookup_url(&self, product_name: &str) -> String {
        format!(
            "{}/Products?$search=%22{}%22&$top=10&$format=json",
            self.base, product_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let endpoint = Endpoint::new("https://catalogue.onda-dias.eu/dias-catalogue/");
        assert_eq!(endpoint.base(), "https://catalogue.onda-dias.eu/dias-catalogue");

        assert_eq!(
            endpoint.search_url("EXPR", 100, 200),
            "https://catalogue.onda-dias.eu/dias-catalogue/Products?$search=%22EXPR%22\
             &$format=json&orderby=creationDate%20asc&$top=100&$skip=200"
        );
        assert_eq!(
            endpoint.count_url("EXPR"),
            "https://catalogue.onda-dias.eu/dias-catalogue/Products/$count?$search=%22EXPR%22"
        );
        assert_eq!(
            endpoint.lookup_url("S2A_MSIL2A.zip"),
            "https://catalogue.onda-dias.eu/dias-catalogue/Products?$search=%22S2A_MSIL2A.zip%22\
             &$top=10&$format=json"
        );
    }
}
