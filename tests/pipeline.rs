mod common;

use common::{LISTINGS_CSV, text, two_cranes};
use crane_listings::{
    coerce::{self, PRICE_COLUMN},
    columns::normalize_columns,
    criteria::{self, Criteria, PriceRange},
    data::{Dataset, Value},
    error::PipelineError,
    filter::{Predicate, apply_filters},
    load, pipeline,
};
use encoding_rs::UTF_8;
use proptest::prelude::*;

fn titles(dataset: &Dataset) -> Vec<String> {
    dataset
        .column_values("title")
        .expect("title column")
        .map(Value::as_display)
        .collect()
}

#[test]
fn title_and_condition_predicates_combine_with_and() {
    let prepared = pipeline::prepare(two_cranes());
    let predicates = vec![
        Predicate::contains("title", "crane a"),
        Predicate::equals("condition", "Used"),
    ];
    let filtered = apply_filters(&prepared, &predicates);
    assert_eq!(titles(&filtered), vec!["Crane A"]);
}

#[test]
fn price_range_is_inclusive_on_both_ends() {
    let prepared = pipeline::prepare(two_cranes());

    let both = apply_filters(&prepared, &[Predicate::range(PRICE_COLUMN, 10000.0, 25000.0)]);
    assert_eq!(titles(&both), vec!["Crane A", "Crane B"]);

    let upper = apply_filters(&prepared, &[Predicate::range(PRICE_COLUMN, 10001.0, 25000.0)]);
    assert_eq!(titles(&upper), vec!["Crane B"]);
}

#[test]
fn criteria_drive_the_same_result_as_hand_built_predicates() {
    let criteria = Criteria {
        title: Some("crane a".into()),
        condition: Some("Used".into()),
        ..Criteria::default()
    };
    let outcome = pipeline::run(two_cranes(), &criteria).expect("run pipeline");
    assert_eq!(titles(&outcome.filtered), vec!["Crane A"]);
    assert_eq!(outcome.prepared.len(), 2);
}

#[test]
fn requested_price_bounds_override_observed_bounds() {
    let criteria = Criteria {
        price_range: Some(PriceRange {
            min: Some(10001),
            max: None,
        }),
        ..Criteria::default()
    };
    let outcome = pipeline::run(two_cranes(), &criteria).expect("run pipeline");
    assert_eq!(titles(&outcome.filtered), vec!["Crane B"]);
}

#[test]
fn null_prices_are_dropped_by_the_default_range() {
    let raw = Dataset::new(
        vec!["title".into(), "crane type".into(), "price".into()],
        vec![
            vec![text("Priced"), text("Tower"), text("$5,000")],
            vec![text("Unpriced"), text("Tower"), text("Call for price")],
        ],
    );
    let outcome = pipeline::run(raw, &Criteria::default()).expect("run pipeline");
    assert_eq!(titles(&outcome.filtered), vec!["Priced"]);
}

#[test]
fn search_narrowed_to_unpriced_listings_keeps_them() {
    let raw = load::parse_csv(LISTINGS_CSV.as_bytes(), UTF_8).expect("parse listings");
    let criteria = Criteria {
        title: Some("manitowoc".into()),
        ..Criteria::default()
    };
    let outcome = pipeline::run(raw, &criteria).expect("run pipeline");
    assert_eq!(titles(&outcome.filtered), vec!["Manitowoc 999 Crawler"]);
    assert_eq!(outcome.filtered.rows()[0][4], Value::Null);
}

#[test]
fn prices_beyond_i64_stay_inside_the_default_range() {
    let raw = Dataset::new(
        vec!["title".into(), "crane type".into(), "price".into()],
        vec![
            vec![text("Cheap"), text("Tower"), text("$1")],
            vec![text("Huge"), text("Tower"), text("100000000000000000000")],
        ],
    );
    let outcome = pipeline::run(raw, &Criteria::default()).expect("run pipeline");
    assert_eq!(titles(&outcome.filtered), vec!["Cheap", "Huge"]);
}

#[test]
fn all_null_prices_skip_the_range_filter() {
    let raw = Dataset::new(
        vec!["title".into(), "crane type".into(), "price".into()],
        vec![
            vec![text("One"), text("Tower"), text("TBD")],
            vec![text("Two"), text("Tower"), Value::Null],
        ],
    );
    let outcome = pipeline::run(raw, &Criteria::default()).expect("run pipeline");
    assert_eq!(outcome.filtered.len(), 2);
}

#[test]
fn categorical_enumeration_sorts_and_drops_nulls() {
    let dataset = Dataset::new(
        vec!["condition".into()],
        vec![
            vec![text("Used")],
            vec![text("New")],
            vec![text("New")],
            vec![Value::Null],
        ],
    );
    let options = criteria::categorical_options(&dataset, "condition").expect("options");
    assert_eq!(options, vec!["New", "Used"]);
}

#[test]
fn dataset_without_crane_type_fails_with_missing_column() {
    let raw = Dataset::new(
        vec!["Title".into(), "Condition".into()],
        vec![vec![text("Crane A"), text("Used")]],
    );
    let err = pipeline::run(raw, &Criteria::default()).expect_err("missing crane type");
    match err {
        PipelineError::MissingColumn { column } => assert_eq!(column, "crane type"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn filtering_leaves_the_input_untouched() {
    let prepared = pipeline::prepare(two_cranes());
    let snapshot = prepared.clone();
    let _ = apply_filters(&prepared, &[Predicate::contains("title", "b")]);
    assert_eq!(prepared, snapshot);
}

fn cell_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        "[A-Za-z ]{0,6}".prop_map(Value::Text),
        "\\$?[0-9]{1,3}(,[0-9]{3})?".prop_map(Value::Text),
    ]
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    proptest::collection::vec(
        (cell_strategy(), cell_strategy(), cell_strategy()),
        0..12,
    )
    .prop_map(|rows| {
        let rows = rows
            .into_iter()
            .map(|(title, kind, price)| vec![title, kind, price])
            .collect();
        pipeline::prepare(Dataset::new(
            vec!["Title".into(), "Crane Type".into(), "Price".into()],
            rows,
        ))
    })
}

fn predicate_strategy() -> impl Strategy<Value = Predicate> {
    prop_oneof![
        "[a-z]{0,2}".prop_map(|needle| Predicate::contains("title", &needle)),
        "[A-Za-z]{1,3}".prop_map(|value| Predicate::equals("crane type", &value)),
        (0u32..1000, 0u32..1000).prop_map(|(a, b)| {
            Predicate::range("price", a.min(b) as f64, a.max(b) as f64)
        }),
    ]
}

proptest! {
    #[test]
    fn normalizing_twice_is_a_noop(dataset in dataset_strategy()) {
        let again = normalize_columns(dataset.clone());
        prop_assert_eq!(again, dataset);
    }

    #[test]
    fn empty_predicate_set_is_identity(dataset in dataset_strategy()) {
        prop_assert_eq!(apply_filters(&dataset, &[]), dataset);
    }

    #[test]
    fn adding_a_predicate_never_grows_the_result(
        dataset in dataset_strategy(),
        base in proptest::collection::vec(predicate_strategy(), 1..3),
        extra in predicate_strategy(),
    ) {
        let before = apply_filters(&dataset, &base).len();
        let mut extended = base.clone();
        extended.push(extra);
        let after = apply_filters(&dataset, &extended).len();
        prop_assert!(after <= before);
    }

    #[test]
    fn coercing_stripped_text_matches_direct_parse(raw in "[0-9]{1,6}(\\.[0-9]{1,2})?") {
        let stripped = coerce::strip_non_numeric(&raw);
        prop_assert_eq!(&stripped, &raw);
        let expected = raw.parse::<f64>().ok();
        prop_assert_eq!(coerce::parse_numeric(&stripped), expected);
    }

    #[test]
    fn text_without_digits_coerces_to_null(raw in "[A-Za-z $,]{0,10}") {
        prop_assert_eq!(coerce::coerce_value(&Value::Text(raw)), Value::Null);
    }
}
