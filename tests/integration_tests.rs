use survey_pulse::analyzers::aggregate::{AggregateOptions, aggregate};
use survey_pulse::analyzers::filter::{FilterCriteria, RatingBucket, StoreFilter};
use survey_pulse::parser::parse_survey_csv;
use survey_pulse::record::NO_COMMENT;

const FIXTURE: &str = include_str!("fixtures/responses.csv");

#[test]
fn test_full_pipeline() {
    let records = parse_survey_csv(FIXTURE);

    // Invalid rating, blank and short lines are dropped.
    let names: Vec<_> = records.iter().map(|r| r.customer_name()).collect();
    assert_eq!(
        names,
        vec!["Ana Souza", "Bruno Lima", "Carla Dias", "Fabio Rocha", "Gabi Nunes"]
    );
    assert_eq!(records[0].comment(), "Great, really!");
    assert_eq!(records[2].comment(), NO_COMMENT);

    let view = aggregate(&records, &FilterCriteria::default(), &AggregateOptions::default());

    assert_eq!(view.total, 5);
    // service 5,2,4,3,1 ; recommendation 5,1,3,4,2
    assert_eq!(view.mean_service, 3.0);
    assert_eq!(view.mean_recommendation, 3.0);
    assert_eq!(view.nps.promoters, 2);
    assert_eq!(view.nps.neutrals, 1);
    assert_eq!(view.nps.detractors, 2);
    assert_eq!(view.nps.score, 0);

    assert_eq!(view.stores[0].store, "Barra Blue");
    assert_eq!(view.stores[0].total, 3);
    assert_eq!(view.stores[0].mean_service, 3.3);
    assert_eq!(view.stores[0].mean_recommendation, 3.3);
    assert_eq!(view.stores[1].total, 2);
    assert_eq!(view.stores[1].mean_service, 2.5);

    let dates: Vec<_> = view.trend.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, vec!["01/03/2024", "02/03/2024", "03/03/2024"]);
    assert_eq!(view.trend[0].total, 3);

    assert_eq!(view.worst[0].customer_name(), "Bruno Lima");
    assert_eq!(view.worst[1].customer_name(), "Gabi Nunes");
    assert_eq!(view.best[0].customer_name(), "Ana Souza");
}

#[test]
fn test_filtered_pipeline_keeps_store_comparison() {
    let records = parse_survey_csv(FIXTURE);
    let filter = FilterCriteria {
        store: StoreFilter::Exact("Shopping Recreio".into()),
        rating: RatingBucket::Excellent,
        search: String::new(),
    };
    let view = aggregate(&records, &filter, &AggregateOptions::default());

    assert_eq!(view.total, 1);
    assert_eq!(view.best[0].customer_name(), "Fabio Rocha");
    assert_eq!(view.stores[0].total, 3);
    assert_eq!(view.stores[1].total, 2);
    assert_eq!(view.trend.len(), 3);
}
