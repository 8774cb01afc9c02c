use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::geometry::Footprint;
use super::mission::Mission;
use crate::error::{CleopeError, Result};

/// Inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensingRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl SensingRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(CleopeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range covering a single day
    pub fn single(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Catalogue interval from the first to the last millisecond of the range
    pub fn interval(&self) -> String {
        format!(
            "[{}T00:00:00.000Z TO {}T23:59:59.999Z]",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// One catalogue query intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    footprint: Footprint,
    mission: Option<Mission>,
    product_type: Option<String>,
    sensing: Option<SensingRange>,
}

impl SearchFilter {
    pub fn builder(footprint: Footprint) -> SearchFilterBuilder {
        SearchFilterBuilder::new(footprint)
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    pub fn mission(&self) -> Option<Mission> {
        self.mission
    }

    pub fn product_type(&self) -> Option<&str> {
        self.product_type.as_deref()
    }

    pub fn sensing(&self) -> Option<&SensingRange> {
        self.sensing.as_ref()
    }
}

/// Builder for [`SearchFilter`]
#[derive(Debug, Clone)]
pub struct SearchFilterBuilder {
    footprint: Footprint,
    mission: Option<Mission>,
    product_type: Option<String>,
    sensing: Option<SensingRange>,
}

impl SearchFilterBuilder {
    pub fn new(footprint: Footprint) -> Self {
        Self {
            footprint,
            mission: None,
            product_type: None,
            sensing: None,
        }
    }

    pub fn mission(mut self, mission: Option<Mission>) -> Self {
        self.mission = mission;
        self
    }

    pub fn product_type(mut self, product_type: Option<String>) -> Self {
        self.product_type = product_type;
        self
    }

    pub fn sensing(mut self, sensing: Option<SensingRange>) -> Self {
        self.sensing = sensing;
        self
    }

    /// Validate and freeze the filter
    ///
    /// The footprint must close into a ring, and a product type needs a
    /// mission whose table lists it.
    pub fn build(self) -> Result<SearchFilter> {
        self.footprint.closed_ring()?;

        if let Some(product_type) = &self.product_type {
            match self.mission {
                Some(mission) => mission.validate_product_type(product_type)?,
                None => {
                    return Err(CleopeError::UnknownProductType {
                        mission: "All".to_string(),
                        product_type: product_type.clone(),
                    })
                }
            }
        }

        Ok(SearchFilter {
            footprint: self.footprint,
            mission: self.mission,
            product_type: self.product_type,
            sensing: self.sensing,
        })
    }
}
