//! In-memory dashboard state: the loaded records and the active filter.

use tracing::{error, info, warn};

use crate::analyzers::aggregate::{AggregateOptions, aggregate};
use crate::analyzers::filter::FilterCriteria;
use crate::analyzers::types::AggregateView;
use crate::error::LoadError;
use crate::fetch::{HttpClient, read_source};
use crate::parser::parse_survey_csv;
use crate::record::SurveyRecord;

/// Identifies one refresh so late results can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// Result of a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Records were loaded.
    Loaded(usize),
    /// The export was fetched but held no valid rows.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshResult {
    Applied(LoadOutcome),
    /// A newer refresh was already applied; these records were discarded.
    Stale,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    records: Vec<SurveyRecord>,
    filter: FilterCriteria,
    options: AggregateOptions,
    issued: u64,
    applied: Option<RefreshTicket>,
}

impl Dashboard {
    pub fn new(options: AggregateOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn records(&self) -> &[SurveyRecord] {
        &self.records
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    /// Starts a refresh. Pass the ticket back to [`Dashboard::apply_refresh`].
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Replaces the records with a refresh result, unless a newer refresh
    /// has already been applied.
    pub fn apply_refresh(
        &mut self,
        ticket: RefreshTicket,
        records: Vec<SurveyRecord>,
    ) -> RefreshResult {
        if self.applied.is_some_and(|last| ticket < last) {
            warn!(ticket = ticket.0, "Discarding stale refresh");
            return RefreshResult::Stale;
        }

        self.applied = Some(ticket);
        self.records = records;

        let outcome = if self.records.is_empty() {
            warn!("No reviews found in survey export");
            LoadOutcome::Empty
        } else {
            info!(count = self.records.len(), "Survey records loaded");
            LoadOutcome::Loaded(self.records.len())
        };
        RefreshResult::Applied(outcome)
    }

    /// Swaps the filter and recomputes the view.
    pub fn set_filter(&mut self, filter: FilterCriteria) -> AggregateView {
        self.filter = filter;
        self.view()
    }

    pub fn view(&self) -> AggregateView {
        aggregate(&self.records, &self.filter, &self.options)
    }

    /// Reads, parses and applies the export at `source` (URL or file path).
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] when the export cannot be read; the
    /// current records are kept in that case.
    pub async fn refresh<C: HttpClient>(
        &mut self,
        client: &C,
        source: &str,
    ) -> Result<RefreshResult, LoadError> {
        let ticket = self.begin_refresh();
        let raw = read_source(client, source).await.inspect_err(|e| {
            error!(error = %e, "Could not load survey data");
        })?;
        Ok(self.apply_refresh(ticket, parse_survey_csv(&raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::filter::StoreFilter;
    use crate::record::Rating;

    fn record(store: &str, rating: i64) -> SurveyRecord {
        SurveyRecord::new(
            "01/01/2024, 10:00:00",
            store,
            "Ana",
            "21999990000",
            "ana@example.com",
            "ABC1D23",
            Rating::new(rating).unwrap(),
            Rating::new(rating).unwrap(),
            None,
        )
    }

    #[test]
    fn test_apply_reports_empty_and_loaded() {
        let mut dash = Dashboard::default();

        let t = dash.begin_refresh();
        assert_eq!(
            dash.apply_refresh(t, vec![]),
            RefreshResult::Applied(LoadOutcome::Empty)
        );

        let t = dash.begin_refresh();
        assert_eq!(
            dash.apply_refresh(t, vec![record("Barra Blue", 5)]),
            RefreshResult::Applied(LoadOutcome::Loaded(1))
        );
    }

    #[test]
    fn test_out_of_order_refresh_is_discarded() {
        let mut dash = Dashboard::default();
        let first = dash.begin_refresh();
        let second = dash.begin_refresh();

        dash.apply_refresh(second, vec![record("Barra Blue", 5), record("Barra Blue", 4)]);
        assert_eq!(
            dash.apply_refresh(first, vec![record("Barra Blue", 1)]),
            RefreshResult::Stale
        );
        assert_eq!(dash.records().len(), 2);
    }

    #[test]
    fn test_set_filter_recomputes_view() {
        let mut dash = Dashboard::default();
        let t = dash.begin_refresh();
        dash.apply_refresh(t, vec![record("Barra Blue", 5), record("Shopping Recreio", 1)]);

        assert_eq!(dash.view().total, 2);

        let view = dash.set_filter(FilterCriteria {
            store: StoreFilter::Exact("Shopping Recreio".into()),
            ..Default::default()
        });
        assert_eq!(view.total, 1);
        assert_eq!(view.mean_service, 1.0);
        assert_eq!(view.stores[0].total, 1);
        assert_eq!(dash.filter().store, StoreFilter::Exact("Shopping Recreio".into()));
    }

    #[tokio::test]
    async fn test_refresh_from_local_file() {
        let path = std::env::temp_dir().join("survey_pulse_test_dashboard.csv");
        std::fs::write(
            &path,
            "header\n\"01/01/2024, 10:00:00\",Barra Blue,Ana,111,a@x.com,ABC1234,4,5,\n",
        )
        .unwrap();

        let client = crate::fetch::BasicClient::new().unwrap();
        let mut dash = Dashboard::default();
        let result = dash.refresh(&client, path.to_str().unwrap()).await.unwrap();

        assert_eq!(result, RefreshResult::Applied(LoadOutcome::Loaded(1)));
        assert_eq!(dash.view().mean_recommendation, 5.0);

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_refresh_missing_file_keeps_records() {
        let mut dash = Dashboard::default();
        let t = dash.begin_refresh();
        dash.apply_refresh(t, vec![record("Barra Blue", 3)]);

        let client = crate::fetch::BasicClient::new().unwrap();
        let result = dash.refresh(&client, "/nonexistent/survey_pulse/export.csv").await;

        assert!(matches!(result, Err(LoadError::Io(_))));
        assert_eq!(dash.records().len(), 1);
    }
}
