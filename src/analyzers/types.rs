//! Data types produced by the aggregation pipeline.

use serde::Serialize;

use crate::analyzers::filter::FilterCriteria;
use crate::record::SurveyRecord;

/// Recommendation-rating split used for the promoter index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NpsBreakdown {
    /// Recommendation rating 4 or 5.
    pub promoters: usize,
    /// Recommendation rating 3.
    pub neutrals: usize,
    /// Recommendation rating 1 or 2.
    pub detractors: usize,
    /// `(promoters - detractors) / total * 100`, rounded; 0 when empty.
    pub score: i32,
}

/// Per-store comparison row, always computed over every loaded record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSummary {
    pub store: String,
    pub total: usize,
    pub mean_service: f64,
    pub mean_recommendation: f64,
    pub mean_overall: f64,
}

/// Count of records holding one rating value, per dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistogramBucket {
    pub rating: u8,
    pub service: usize,
    pub recommendation: usize,
}

/// One date group of the trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub total: usize,
    pub mean_service: f64,
    pub mean_recommendation: f64,
}

/// Everything the dashboard renders. Rebuilt on every filter change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateView {
    pub filter: FilterCriteria,
    /// Records loaded, before filtering.
    pub total_loaded: usize,
    /// Records matching the filter.
    pub total: usize,
    pub mean_service: f64,
    pub mean_recommendation: f64,
    pub nps: NpsBreakdown,
    pub stores: Vec<StoreSummary>,
    pub histogram: Vec<HistogramBucket>,
    pub worst: Vec<SurveyRecord>,
    pub best: Vec<SurveyRecord>,
    pub trend: Vec<TrendPoint>,
}
