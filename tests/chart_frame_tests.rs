use std::sync::Arc;

use mortality_chart::api::{
    ChartFrame, ChartKind, ChartParameterResolver, ColorScale, MarkerSizes, PlotTrace,
    ResolverConfig, build_chart_frame,
};
use mortality_chart::core::{GrowthRange, MarkerScale, MortalityRow, Table, list_categories};
use mortality_chart::error::ChartError;

fn table() -> Table {
    Table::new(vec![
        MortalityRow::new("Flu", "CA", 0.25, 5.0)
            .with_name("California")
            .with_coordinates(36.7, -119.4),
        MortalityRow::new("Cancer", "CA", -0.125, 140.0)
            .with_name("California")
            .with_coordinates(36.7, -119.4),
        MortalityRow::new("Flu", "NY", 0.5, 10.0)
            .with_name("New York")
            .with_coordinates(42.9, -75.5),
        MortalityRow::new("Overdose", "NY", 1.5, 0.0).with_name("New York"),
    ])
    .expect("table")
}

fn resolver(config: ResolverConfig) -> ChartParameterResolver {
    ChartParameterResolver::new(table(), config).expect("resolver")
}

#[test]
fn choropleth_frame_carries_range_values_and_labels() {
    let frame = resolver(ResolverConfig::choropleth())
        .build_chart_frame("Flu")
        .expect("frame");

    assert_eq!(frame.category, "Flu");
    assert_eq!(frame.kind, ChartKind::Choropleth);
    assert_eq!(frame.color_scale, ColorScale::RdGy);
    assert_eq!(
        frame.title,
        "Death Rate Percentage Growth from 1999 to 2020: Flu"
    );
    assert_eq!(frame.locations, vec!["CA", "NY"]);
    assert_eq!(frame.values, vec![25.0, 50.0]);
    assert_eq!(frame.growth_range, GrowthRange { min: 25.0, max: 50.0 });
    assert_eq!(
        frame.hover_text,
        vec![
            "CA<br>Growth in deaths from '99 to '20: 25%",
            "NY<br>Growth in deaths from '99 to '20: 50%",
        ]
    );
    assert_eq!(
        frame.marker_sizes,
        MarkerSizes::Scaled {
            sizes: vec![18.5, 36.0]
        }
    );
}

#[test]
fn frame_values_stay_inside_growth_range() {
    let frame = resolver(ResolverConfig::growth_detail())
        .build_chart_frame("Cancer")
        .expect("frame");
    assert_eq!(frame.values, vec![-12.5]);
    assert!(frame.values.iter().all(|value| frame.growth_range.contains(*value)));
}

#[test]
fn bubble_frame_uses_rate_tooltip_and_title() {
    let frame = resolver(ResolverConfig::bubble())
        .build_chart_frame("Flu")
        .expect("frame");
    assert_eq!(frame.kind, ChartKind::Bubble);
    assert_eq!(frame.title, "Age-Adjusted Deaths per state: Flu");
    assert_eq!(
        frame.hover_text,
        vec![
            "California<br>Deaths per 100,000 people: 5",
            "New York<br>Deaths per 100,000 people: 10",
        ]
    );
}

#[test]
fn degenerate_rate_scale_falls_back_to_constant_markers() {
    let config =
        ResolverConfig::bubble().with_marker_scale(MarkerScale::new(4.0, 20.0).expect("scale"));
    let frame = resolver(config)
        .build_chart_frame("Overdose")
        .expect("frame");
    assert_eq!(
        frame.marker_sizes,
        MarkerSizes::Constant {
            size: 4.0,
            count: 1
        }
    );
    assert_eq!(frame.marker_sizes.to_vec(), vec![4.0]);
}

#[test]
fn unknown_category_yields_empty_range() {
    let err = resolver(ResolverConfig::choropleth())
        .build_chart_frame("Measles")
        .expect_err("no rows");
    assert!(matches!(err, ChartError::EmptyRange));
}

#[test]
fn empty_frame_has_flat_color_domain() {
    let frame = resolver(ResolverConfig::choropleth()).empty_frame("Measles");
    assert!(frame.is_empty());
    assert_eq!(frame.growth_range, GrowthRange::FLAT);
    assert!(frame.marker_sizes.is_empty());
    assert!(frame.hover_text.is_empty());
}

#[test]
fn build_chart_frame_is_idempotent() {
    let resolver = resolver(ResolverConfig::growth_detail());
    let first = resolver.build_chart_frame("Flu").expect("first");
    let second = resolver.build_chart_frame("Flu").expect("second");
    assert_eq!(first, second);
}

#[test]
fn free_function_matches_indexed_resolver() {
    let table = table();
    let config = ResolverConfig::choropleth();
    let direct = build_chart_frame(&table, "Flu", &config).expect("direct");
    let indexed = ChartParameterResolver::new(table, config)
        .expect("resolver")
        .build_chart_frame("Flu")
        .expect("indexed");
    assert_eq!(direct, indexed);
}

#[test]
fn custom_hover_formatter_overrides_template() {
    let resolver = resolver(ResolverConfig::choropleth())
        .with_hover_formatter(Arc::new(|index: usize, row: &MortalityRow| {
            format!("#{index} {}", row.state)
        }));
    let frame = resolver.build_chart_frame("Flu").expect("frame");
    assert_eq!(frame.hover_text, vec!["#0 CA", "#1 NY"]);
}

#[test]
fn resolver_rejects_invalid_marker_scale() {
    let config = ResolverConfig::bubble().with_marker_scale(MarkerScale {
        base_size: 0.0,
        scaling_factor: 35.0,
    });
    let err = ChartParameterResolver::new(table(), config).expect_err("invalid scale");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn resolver_lists_categories_in_first_seen_order() {
    let resolver = resolver(ResolverConfig::choropleth());
    let categories = resolver.categories();
    assert_eq!(categories, vec!["Flu", "Cancer", "Overdose"]);
    assert_eq!(
        categories,
        list_categories(resolver.table()).expect("table categories")
    );
}

#[test]
fn frame_json_contract_round_trips() {
    let frame = resolver(ResolverConfig::growth_detail())
        .build_chart_frame("Flu")
        .expect("frame");
    let json = frame.to_json_contract_v1_pretty().expect("contract json");
    assert!(json.contains("\"schema_version\": 1"));

    let parsed = ChartFrame::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed, frame);

    let bare = frame.to_json_pretty().expect("bare json");
    assert_eq!(ChartFrame::from_json_compat_str(&bare).expect("parse bare"), frame);
}

#[test]
fn frame_json_contract_rejects_unknown_schema_version() {
    let frame = resolver(ResolverConfig::choropleth())
        .build_chart_frame("Cancer")
        .expect("frame");
    let json = frame
        .to_json_contract_v1_pretty()
        .expect("contract json")
        .replace("\"schema_version\": 1", "\"schema_version\": 9");
    let err = ChartFrame::from_json_compat_str(&json).expect_err("unsupported version");
    assert!(err.to_string().contains("unsupported frame schema version"));
}

#[test]
fn choropleth_trace_pins_color_domain() {
    let frame = resolver(ResolverConfig::choropleth())
        .build_chart_frame("Flu")
        .expect("frame");
    match frame.to_trace().expect("trace") {
        PlotTrace::Choropleth {
            locationmode,
            locations,
            z,
            zmin,
            zmax,
            colorscale,
            ..
        } => {
            assert_eq!(locationmode, "USA-states");
            assert_eq!(locations, vec!["CA", "NY"]);
            assert_eq!(z, vec![25.0, 50.0]);
            assert_eq!((zmin, zmax), (25.0, 50.0));
            assert_eq!(colorscale, "rdgy");
        }
        other => panic!("unexpected trace: {other:?}"),
    }
}

#[test]
fn bubble_trace_carries_coordinates_and_sizes() {
    let resolver = resolver(ResolverConfig::bubble());
    let frame = resolver.build_chart_frame("Flu").expect("frame");
    let payload = frame
        .to_plot_payload(&resolver.config().layout)
        .expect("payload");
    assert_eq!(payload.layout.title, "Age-Adjusted Deaths per state: Flu");
    assert_eq!(payload.layout.showlegend, Some(false));

    let json = payload.to_json_pretty().expect("payload json");
    assert!(json.contains("\"type\": \"scattergeo\""));
    assert!(json.contains("\"type\": \"albers usa\""));
    assert!(json.contains("\"showlegend\": false"));
    match &payload.data[0] {
        PlotTrace::Scattergeo { lat, lon, marker, .. } => {
            assert_eq!(lat, &vec![36.7, 42.9]);
            assert_eq!(lon, &vec![-119.4, -75.5]);
            assert_eq!(marker.size, vec![18.5, 36.0]);
        }
        other => panic!("unexpected trace: {other:?}"),
    }
}

#[test]
fn choropleth_payload_uses_preset_geo_layout() {
    let config = ResolverConfig::growth_detail();
    let resolver = resolver(config.clone());
    let frame = resolver.build_chart_frame("Flu").expect("frame");
    let payload = frame.to_plot_payload(&config.layout).expect("payload");
    assert_eq!(payload.layout.geo, config.layout.geo);
    assert!(payload.layout.geo.showlakes);

    let json = payload.to_json_pretty().expect("payload json");
    assert!(!json.contains("showlegend"));
    assert!(!json.contains("projection"));
    assert!(json.contains("\"scope\": \"usa\""));
}

#[test]
fn bubble_trace_requires_coordinates() {
    let frame = resolver(ResolverConfig::bubble())
        .build_chart_frame("Overdose")
        .expect("frame");
    let err = frame.to_trace().expect_err("missing coordinates");
    assert!(matches!(err, ChartError::InvalidData(_)));
}
