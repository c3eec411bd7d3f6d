use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::{ChartFrame, ChartKind};

pub const USA_STATES_LOCATION_MODE: &str = "USA-states";
pub const USA_GEO_SCOPE: &str = "usa";

/// Payload for a generic geo plotting surface.
///
/// Field names follow the plotting surface's trace schema, not Rust style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlotTrace {
    Choropleth {
        locationmode: String,
        locations: Vec<String>,
        z: Vec<f64>,
        zmin: f64,
        zmax: f64,
        text: Vec<String>,
        colorscale: String,
    },
    Scattergeo {
        locationmode: String,
        lat: Vec<f64>,
        lon: Vec<f64>,
        text: Vec<String>,
        marker: TraceMarker,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceMarker {
    pub size: Vec<f64>,
    pub line: TraceMarkerLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceMarkerLine {
    pub color: String,
    pub width: f64,
}

impl Default for TraceMarkerLine {
    fn default() -> Self {
        Self {
            color: "black".to_owned(),
            width: 2.0,
        }
    }
}

pub const LAND_COLOR: &str = "rgb(217, 217, 217)";
pub const BORDER_COLOR: &str = "rgb(255, 255, 255)";

/// Map projection; `kind` is serialized as the surface's `type` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoProjection {
    #[serde(rename = "type")]
    pub kind: String,
}

impl GeoProjection {
    #[must_use]
    pub fn albers_usa() -> Self {
        Self {
            kind: "albers usa".to_owned(),
        }
    }
}

/// Base map styling under the layout's `geo` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLayout {
    pub scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<GeoProjection>,
    pub showland: bool,
    pub landcolor: String,
    pub showlakes: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lakecolor: Option<String>,
    pub subunitcolor: String,
    pub countrycolor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subunitwidth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countrywidth: Option<f64>,
}

impl Default for GeoLayout {
    fn default() -> Self {
        Self {
            scope: USA_GEO_SCOPE.to_owned(),
            projection: None,
            showland: true,
            landcolor: LAND_COLOR.to_owned(),
            showlakes: false,
            lakecolor: Some(BORDER_COLOR.to_owned()),
            subunitcolor: BORDER_COLOR.to_owned(),
            countrycolor: BORDER_COLOR.to_owned(),
            subunitwidth: None,
            countrywidth: None,
        }
    }
}

impl GeoLayout {
    #[must_use]
    pub fn with_lakes(mut self, showlakes: bool) -> Self {
        self.showlakes = showlakes;
        self
    }

    /// Albers USA projection with 1px state and country borders, no lakes.
    #[must_use]
    pub fn albers_usa() -> Self {
        Self {
            projection: Some(GeoProjection::albers_usa()),
            lakecolor: None,
            subunitwidth: Some(1.0),
            countrywidth: Some(1.0),
            ..Self::default()
        }
    }
}

/// Layout-level options a chart variant controls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapLayout {
    /// Left to the surface's default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_legend: Option<bool>,
    #[serde(default)]
    pub geo: GeoLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    pub geo: GeoLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPayload {
    pub data: Vec<PlotTrace>,
    pub layout: PlotLayout,
}

impl ChartFrame {
    /// Maps the frame onto the plotting surface's trace schema.
    ///
    /// Bubble frames need coordinates on every row.
    pub fn to_trace(&self) -> ChartResult<PlotTrace> {
        match self.kind {
            ChartKind::Choropleth => Ok(PlotTrace::Choropleth {
                locationmode: USA_STATES_LOCATION_MODE.to_owned(),
                locations: self.locations.clone(),
                z: self.values.clone(),
                zmin: self.growth_range.min,
                zmax: self.growth_range.max,
                text: self.hover_text.clone(),
                colorscale: self.color_scale.name().to_owned(),
            }),
            ChartKind::Bubble => {
                let mut lat = Vec::with_capacity(self.rows.len());
                let mut lon = Vec::with_capacity(self.rows.len());
                for row in &self.rows {
                    let (Some(row_lat), Some(row_long)) = (row.lat, row.long) else {
                        return Err(ChartError::InvalidData(format!(
                            "bubble trace requires coordinates for {}/{}",
                            row.cause, row.state
                        )));
                    };
                    lat.push(row_lat);
                    lon.push(row_long);
                }
                Ok(PlotTrace::Scattergeo {
                    locationmode: USA_STATES_LOCATION_MODE.to_owned(),
                    lat,
                    lon,
                    text: self.hover_text.clone(),
                    marker: TraceMarker {
                        size: self.marker_sizes.to_vec(),
                        line: TraceMarkerLine::default(),
                    },
                })
            }
        }
    }

    /// Trace plus layout, ready to hand to the plotting surface.
    pub fn to_plot_payload(&self, layout: &MapLayout) -> ChartResult<PlotPayload> {
        Ok(PlotPayload {
            data: vec![self.to_trace()?],
            layout: PlotLayout {
                title: self.title.clone(),
                showlegend: layout.show_legend,
                geo: layout.geo.clone(),
            },
        })
    }
}
