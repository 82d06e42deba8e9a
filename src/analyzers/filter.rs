//! Dashboard filter selection.

use serde::Serialize;
use std::str::FromStr;

use crate::record::SurveyRecord;

/// Store selector: every store, or one store by exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum StoreFilter {
    #[default]
    All,
    Exact(String),
}

impl StoreFilter {
    pub fn matches(&self, store: &str) -> bool {
        match self {
            StoreFilter::All => true,
            StoreFilter::Exact(name) => name == store,
        }
    }
}

impl FromStr for StoreFilter {
    type Err = std::convert::Infallible;

    /// `"all"` (any case) or an empty string selects every store.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(StoreFilter::All)
        } else {
            Ok(StoreFilter::Exact(s.to_string()))
        }
    }
}

/// Rating bucket selector. A record falls in a bucket when either of its
/// ratings does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBucket {
    #[default]
    All,
    /// Either rating is 4 or 5.
    Excellent,
    /// Either rating is exactly 3.
    Neutral,
    /// Either rating is 1 or 2.
    Poor,
}

impl RatingBucket {
    pub fn matches(self, record: &SurveyRecord) -> bool {
        let service = record.service_rating().value();
        let recommendation = record.recommendation_rating().value();
        match self {
            RatingBucket::All => true,
            RatingBucket::Excellent => service >= 4 || recommendation >= 4,
            RatingBucket::Neutral => service == 3 || recommendation == 3,
            RatingBucket::Poor => service <= 2 || recommendation <= 2,
        }
    }
}

impl FromStr for RatingBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(RatingBucket::All),
            "excellent" => Ok(RatingBucket::Excellent),
            "neutral" => Ok(RatingBucket::Neutral),
            "poor" => Ok(RatingBucket::Poor),
            other => Err(format!(
                "unknown rating bucket '{other}' (expected all, excellent, neutral or poor)"
            )),
        }
    }
}

/// Active dashboard filters. All three must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub store: StoreFilter,
    pub rating: RatingBucket,
    /// Case-insensitive substring searched in name, email and phone.
    pub search: String,
}

impl FilterCriteria {
    pub fn matches(&self, record: &SurveyRecord) -> bool {
        self.store.matches(record.store())
            && self.matches_search(record)
            && self.rating.matches(record)
    }

    fn matches_search(&self, record: &SurveyRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        [record.customer_name(), record.email(), record.phone()]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
