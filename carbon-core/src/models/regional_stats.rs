use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Filter for the regional statistics endpoint. Both parts are optional; an
/// empty query aggregates the whole country.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegionQuery {
    pub city: Option<String>,
    pub district: Option<String>,
}

impl RegionQuery {
    pub fn new(
        city: Option<&str>,
        district: Option<&str>,
    ) -> Self {
        let clean = |s: Option<&str>| {
            s.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            city: clean(city),
            district: clean(district),
        }
    }

    /// Changing the city always clears the district filter.
    pub fn set_city(
        &mut self,
        city: Option<&str>,
    ) {
        *self = Self::new(city, None);
    }

    pub fn set_district(
        &mut self,
        district: Option<&str>,
    ) {
        let city = self.city.take();
        *self = Self::new(city.as_deref(), district);
    }

    /// Non-empty filters as query-string pairs.
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(city) = &self.city {
            pairs.push(("city", city.as_str()));
        }
        if let Some(district) = &self.district {
            pairs.push(("district", district.as_str()));
        }
        pairs
    }
}

/// One bar of the regional chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: Decimal,
}

/// Aggregated footprint of every user in a region.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegionalStats {
    #[serde(default)]
    pub sample_count: u64,
    #[serde(default)]
    pub avg_total: Decimal,
    #[serde(default)]
    pub breakdown_avg: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub top_source: String,
    #[serde(default)]
    pub chart_data: Vec<ChartPoint>,
}

impl RegionalStats {
    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }
}
