mod chart_frame;
mod hover_text;
mod json_contract;
mod plot_trace;
mod resolver;
mod resolver_config;

pub use chart_frame::{ChartFrame, MarkerSizes};
pub use hover_text::{HoverFormatterFn, HoverTemplate, HoverTextConfig, build_hover_text};
pub use json_contract::{CHART_FRAME_JSON_SCHEMA_V1, ChartFrameJsonContractV1};
pub use plot_trace::{
    BORDER_COLOR, GeoLayout, GeoProjection, LAND_COLOR, MapLayout, PlotLayout, PlotPayload,
    PlotTrace, TraceMarker, TraceMarkerLine, USA_GEO_SCOPE, USA_STATES_LOCATION_MODE,
};
pub use resolver::{ChartParameterResolver, build_chart_frame};
pub(crate) use resolver::assemble_frame;
pub use resolver_config::{
    ChartKind, ChartPreset, ColorScale, ResolverConfig, TITLE_CATEGORY_PLACEHOLDER,
};
