use crate::analyzers::date_key::{DateKeyExtractor, FirstSeparator};
use crate::analyzers::filter::FilterCriteria;
use crate::analyzers::types::{
    AggregateView, HistogramBucket, NpsBreakdown, StoreSummary, TrendPoint,
};
use crate::analyzers::utility::{percentage_index, round_one_decimal, rounded_mean};
use crate::record::{Rating, SurveyRecord};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

/// Length of the best and worst lists.
pub const RANKING_LIMIT: usize = 10;

/// Number of most recent date groups kept in the trend series.
pub const TREND_LIMIT: usize = 30;

/// Store names shown in the comparison when nothing else is configured.
pub const DEFAULT_STORES: &[&str] = &["Barra Blue", "Shopping Recreio"];

/// Settings that stay fixed across filter changes.
#[derive(Clone)]
pub struct AggregateOptions {
    /// Known stores, in display order. Each gets a comparison row even with no records.
    pub stores: Vec<String>,
    pub date_key: Arc<dyn DateKeyExtractor>,
}

impl AggregateOptions {
    pub fn new(stores: Vec<String>) -> Self {
        Self {
            stores,
            date_key: Arc::new(FirstSeparator),
        }
    }

    pub fn with_date_key(mut self, date_key: Arc<dyn DateKeyExtractor>) -> Self {
        self.date_key = date_key;
        self
    }
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self::new(DEFAULT_STORES.iter().map(|s| s.to_string()).collect())
    }
}

impl std::fmt::Debug for AggregateOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregateOptions")
            .field("stores", &self.stores)
            .finish_non_exhaustive()
    }
}

/// Builds the dashboard view for `records` under `filter`.
///
/// KPIs, histogram and rankings use only the filtered records. The store
/// comparison and trend always use the full set so the active filter cannot
/// skew them.
pub fn aggregate(
    records: &[SurveyRecord],
    filter: &FilterCriteria,
    options: &AggregateOptions,
) -> AggregateView {
    let filtered: Vec<&SurveyRecord> = records.iter().filter(|r| filter.matches(r)).collect();

    AggregateView {
        filter: filter.clone(),
        total_loaded: records.len(),
        total: filtered.len(),
        mean_service: rounded_mean(filtered.iter().map(|r| r.service_rating().value())),
        mean_recommendation: rounded_mean(
            filtered.iter().map(|r| r.recommendation_rating().value()),
        ),
        nps: nps(&filtered),
        stores: store_summaries(records, &options.stores),
        histogram: histogram(&filtered),
        worst: worst(&filtered),
        best: best(&filtered),
        trend: trend(records, options.date_key.as_ref()),
    }
}

fn nps(records: &[&SurveyRecord]) -> NpsBreakdown {
    let mut breakdown = NpsBreakdown::default();

    for r in records {
        match r.recommendation_rating().value() {
            1 | 2 => breakdown.detractors += 1,
            3 => breakdown.neutrals += 1,
            _ => breakdown.promoters += 1,
        }
    }

    breakdown.score = percentage_index(breakdown.promoters, breakdown.detractors, records.len());
    breakdown
}

fn store_summaries(records: &[SurveyRecord], stores: &[String]) -> Vec<StoreSummary> {
    stores
        .iter()
        .map(|store| {
            let rows: Vec<&SurveyRecord> =
                records.iter().filter(|r| r.store() == store).collect();

            if rows.is_empty() {
                return StoreSummary {
                    store: store.clone(),
                    total: 0,
                    mean_service: 0.0,
                    mean_recommendation: 0.0,
                    mean_overall: 0.0,
                };
            }

            let mean_service = rounded_mean(rows.iter().map(|r| r.service_rating().value()));
            let mean_recommendation =
                rounded_mean(rows.iter().map(|r| r.recommendation_rating().value()));

            StoreSummary {
                store: store.clone(),
                total: rows.len(),
                mean_service,
                mean_recommendation,
                mean_overall: round_one_decimal((mean_service + mean_recommendation) / 2.0),
            }
        })
        .collect()
}

fn histogram(records: &[&SurveyRecord]) -> Vec<HistogramBucket> {
    (Rating::MIN..=Rating::MAX)
        .map(|rating| HistogramBucket {
            rating,
            service: records
                .iter()
                .filter(|r| r.service_rating().value() == rating)
                .count(),
            recommendation: records
                .iter()
                .filter(|r| r.recommendation_rating().value() == rating)
                .count(),
        })
        .collect()
}

// `sort_by_key` is stable, so equal scores keep input order.
fn worst(records: &[&SurveyRecord]) -> Vec<SurveyRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by_key(|r| r.rating_sum());
    ranked.into_iter().take(RANKING_LIMIT).cloned().collect()
}

fn best(records: &[&SurveyRecord]) -> Vec<SurveyRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by_key(|r| Reverse(r.rating_sum()));
    ranked.into_iter().take(RANKING_LIMIT).cloned().collect()
}

fn trend(records: &[SurveyRecord], extractor: &dyn DateKeyExtractor) -> Vec<TrendPoint> {
    // Groups in first-appearance order.
    let mut groups: Vec<(&str, Vec<&SurveyRecord>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for r in records {
        let key = extractor.date_key(r.submitted_at());
        match index.get(key).copied() {
            Some(i) => groups[i].1.push(r),
            None => {
                index.insert(key, groups.len());
                groups.push((key, vec![r]));
            }
        }
    }

    let skip = groups.len().saturating_sub(TREND_LIMIT);
    groups
        .into_iter()
        .skip(skip)
        .map(|(date, rows)| TrendPoint {
            date: date.to_string(),
            total: rows.len(),
            mean_service: rounded_mean(rows.iter().map(|r| r.service_rating().value())),
            mean_recommendation: rounded_mean(
                rows.iter().map(|r| r.recommendation_rating().value()),
            ),
        })
        .collect()
}
