use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::error::{CleopeError, Result};

/// One product record returned by the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueResult {
    pub id: String,
    pub name: String,

    /// Directory hint inside the shared mount
    pub pseudopath: String,

    /// Sensing begin time
    pub begin_position: DateTime<Utc>,

    /// Coverage as a WKT polygon or multipolygon
    pub footprint: String,

    /// Size in bytes
    pub size: u64,

    /// Archived and not immediately retrievable
    pub offline: bool,
}

/// A result together with the page it arrived in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub page: usize,

    /// Position inside the page
    pub index: usize,

    pub product: CatalogueResult,
}

/// Combined result of a paginated search, in arrival order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

const CSV_HEADER: [&str; 9] = [
    "page",
    "index",
    "id",
    "name",
    "pseudopath",
    "beginPosition",
    "footprint",
    "size",
    "offline",
];

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one fetched page; rows are indexed from zero within the page
    pub fn push_page(&mut self, page: usize, products: Vec<CatalogueResult>) {
        self.rows.extend(
            products
                .into_iter()
                .enumerate()
                .map(|(index, product)| ResultRow { page, index, product }),
        );
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultRow> {
        self.rows.iter()
    }

    pub fn products(&self) -> impl Iterator<Item = &CatalogueResult> {
        self.rows.iter().map(|row| &row.product)
    }

    /// Number of archived products
    pub fn offline_count(&self) -> usize {
        self.rows.iter().filter(|row| row.product.offline).count()
    }

    /// Write the table as CSV (`query.csv` layout)
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(CSV_HEADER)?;

        for row in &self.rows {
            let p = &row.product;
            csv_writer.write_record([
                row.page.to_string(),
                row.index.to_string(),
                p.id.clone(),
                p.name.clone(),
                p.pseudopath.clone(),
                p.begin_position.to_rfc3339(),
                p.footprint.clone(),
                p.size.to_string(),
                p.offline.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Read a table previously written by [`ResultTable::write_csv`]
    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut rows = Vec::new();

        for record in csv_reader.records() {
            let record = record?;
            if record.len() != CSV_HEADER.len() {
                return Err(CleopeError::Serialization(format!(
                    "expected {} columns, found {}",
                    CSV_HEADER.len(),
                    record.len()
                )));
            }

            let field = |i: usize| record.get(i).unwrap_or_default();
            let begin_position = DateTime::parse_from_rfc3339(field(5))
                .map_err(|e| CleopeError::Serialization(format!("beginPosition: {}", e)))?
                .with_timezone(&Utc);

            rows.push(ResultRow {
                page: parse_column(field(0), "page")?,
                index: parse_column(field(1), "index")?,
                product: CatalogueResult {
                    id: field(2).to_string(),
                    name: field(3).to_string(),
                    pseudopath: field(4).to_string(),
                    begin_position,
                    footprint: field(6).to_string(),
                    size: parse_column(field(7), "size")?,
                    offline: parse_column(field(8), "offline")?,
                },
            });
        }

        Ok(Self { rows })
    }
}

fn parse_column<T: std::str::FromStr>(value: &str, column: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CleopeError::Serialization(format!("invalid {} value: {}", column, value)))
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a ResultRow;
    type IntoIter = std::slice::Iter<'a, ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(id: &str, offline: bool) -> CatalogueResult {
        CatalogueResult {
            id: id.to_string(),
            name: format!("S2A_MSIL2A_{}", id),
            pseudopath: "S2/2A/LEVEL-2A/2020/01/01".to_string(),
            begin_position: Utc.with_ymd_and_hms(2020, 1, 1, 10, 10, 21).unwrap(),
            footprint: "POLYGON((10 40,12 40,12 42,10 40))".to_string(),
            size: 1024,
            offline,
        }
    }

    #[test]
    fn test_page_scoped_indices() {
        let mut table = ResultTable::new();
        table.push_page(0, vec![product("a", false), product("b", true)]);
        table.push_page(1, vec![product("c", false)]);

        let indices: Vec<(usize, usize)> = table.iter().map(|r| (r.page, r.index)).collect();
        assert_eq!(indices, vec![(0, 0), (0, 1), (1, 0)]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.offline_count(), 1);
    }

    #[test]
    fn test_csv_roundtrip_preserves_order() {
        let mut table = ResultTable::new();
        table.push_page(0, vec![product("a", false), product("b", true)]);

        let mut buffer = Vec::new();
        table.write_csv(&mut buffer).unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("page,index,id,name,pseudopath,beginPosition,footprint,size,offline"));

        let restored = ResultTable::read_csv(buffer.as_slice()).unwrap();
        assert_eq!(restored, table);
    }

    #[test]
    fn test_read_csv_rejects_bad_size() {
        let text = "page,index,id,name,pseudopath,beginPosition,footprint,size,offline\n\
                    0,0,a,n,p,2020-01-01T00:00:00+00:00,POLYGON,big,false\n";
        assert!(ResultTable::read_csv(text.as_bytes()).is_err());
    }
}
