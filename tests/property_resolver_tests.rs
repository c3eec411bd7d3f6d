use mortality_chart::api::{ChartFrame, ChartParameterResolver, MarkerSizes, ResolverConfig};
use mortality_chart::core::{
    MortalityRow, Table, compute_growth_range, compute_marker_sizes, filter_by_category,
    list_categories,
};
use proptest::prelude::*;

const CAUSES: [&str; 5] = ["Flu", "Cancer", "Stroke", "Overdose", "Diabetes"];
const STATES: [&str; 6] = ["CA", "NY", "TX", "WV", "FL", "OH"];

fn row_strategy() -> impl Strategy<Value = MortalityRow> {
    (
        0usize..CAUSES.len(),
        0usize..STATES.len(),
        -1.0f64..5.0,
        0.0f64..500.0,
    )
        .prop_map(|(cause, state, growth, latest_rate)| {
            MortalityRow::new(CAUSES[cause], STATES[state], growth, latest_rate)
        })
}

fn located_row_strategy() -> impl Strategy<Value = MortalityRow> {
    (
        row_strategy(),
        prop::option::of(0.0f64..200.0),
        prop::option::of((24.0f64..50.0, -125.0f64..-66.0)),
    )
        .prop_map(|(row, earliest_rate, coordinates)| {
            let row = match earliest_rate {
                Some(rate) => row.with_earliest_rate(rate),
                None => row,
            };
            match coordinates {
                Some((lat, long)) => row.with_coordinates(lat, long),
                None => row,
            }
        })
}

fn table_strategy() -> impl Strategy<Value = Table> {
    prop::collection::vec(row_strategy(), 1..64)
        .prop_map(|rows| Table::new(rows).expect("generated rows are valid"))
}

proptest! {
    #[test]
    fn categories_are_unique_and_in_first_seen_order(table in table_strategy()) {
        let categories = list_categories(&table).expect("categories");

        let mut expected: Vec<&str> = Vec::new();
        for row in table.rows() {
            if !expected.contains(&row.cause.as_str()) {
                expected.push(row.cause.as_str());
            }
        }
        prop_assert_eq!(categories, expected);
    }

    #[test]
    fn filter_returns_exactly_the_matching_rows(table in table_strategy()) {
        for category in list_categories(&table).expect("categories") {
            let filtered = filter_by_category(&table, &category);
            prop_assert!(filtered.iter().all(|row| row.cause == category));

            let expected_count = table.rows().iter().filter(|row| row.cause == category).count();
            prop_assert_eq!(filtered.len(), expected_count);
        }
    }

    #[test]
    fn growth_range_bounds_every_scaled_value(table in table_strategy()) {
        let range = compute_growth_range(table.rows()).expect("range");
        prop_assert!(range.min <= range.max);
        for row in table.rows() {
            let percent = row.growth * 100.0;
            prop_assert!(range.min <= percent && percent <= range.max);
        }
    }

    #[test]
    fn marker_sizes_stay_within_scale_and_hit_the_top(
        rows in prop::collection::vec(row_strategy(), 1..64),
        base_size in 0.5f64..10.0,
        scaling_factor in 1.0f64..80.0
    ) {
        let max_rate = rows.iter().map(|row| row.latest_rate).fold(f64::MIN, f64::max);
        prop_assume!(max_rate > 0.0);

        let sizes = compute_marker_sizes(&rows, base_size, scaling_factor).expect("sizes");
        prop_assert_eq!(sizes.len(), rows.len());
        for (size, row) in sizes.iter().zip(&rows) {
            prop_assert!(*size >= base_size);
            prop_assert!(*size <= base_size + scaling_factor);
            if row.latest_rate == max_rate {
                prop_assert_eq!(*size, base_size + scaling_factor);
            }
        }
    }

    #[test]
    fn frames_are_idempotent_and_internally_consistent(table in table_strategy()) {
        let resolver = ChartParameterResolver::new(table, ResolverConfig::bubble())
            .expect("resolver");
        for category in resolver.categories() {
            let first = resolver.build_chart_frame(&category).expect("frame");
            let second = resolver.build_chart_frame(&category).expect("frame");
            prop_assert_eq!(&first, &second);

            prop_assert_eq!(first.locations.len(), first.rows.len());
            prop_assert_eq!(first.values.len(), first.rows.len());
            prop_assert_eq!(first.hover_text.len(), first.rows.len());
            prop_assert_eq!(first.marker_sizes.len(), first.rows.len());
            for value in &first.values {
                prop_assert!(first.growth_range.contains(*value));
            }
            if let MarkerSizes::Constant { size, .. } = first.marker_sizes {
                prop_assert_eq!(size, resolver.config().marker_scale.base_size);
            }
        }
    }

    #[test]
    fn frame_json_round_trips_exactly(
        rows in prop::collection::vec(located_row_strategy(), 1..32),
        bubble in any::<bool>()
    ) {
        let table = Table::new(rows).expect("generated rows are valid");
        let config = if bubble {
            ResolverConfig::bubble()
        } else {
            ResolverConfig::growth_detail()
        };
        let resolver = ChartParameterResolver::new(table, config).expect("resolver");
        for category in resolver.categories() {
            let frame = resolver.build_chart_frame(&category).expect("frame");

            let contract = frame.to_json_contract_v1_pretty().expect("contract json");
            let parsed = ChartFrame::from_json_compat_str(&contract).expect("parse contract");
            prop_assert_eq!(&parsed, &frame);

            let bare = frame.to_json_pretty().expect("frame json");
            let parsed = ChartFrame::from_json_compat_str(&bare).expect("parse frame");
            prop_assert_eq!(&parsed, &frame);
        }
    }
}
