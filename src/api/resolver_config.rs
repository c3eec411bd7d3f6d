use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::MarkerScale;
use crate::error::{ChartError, ChartResult};

use super::{GeoLayout, HoverTemplate, HoverTextConfig, MapLayout};

/// Placeholder replaced by the selected category in title templates.
pub const TITLE_CATEGORY_PLACEHOLDER: &str = "{cause}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Region shading keyed by state code.
    Choropleth,
    /// Sized markers at state coordinates.
    Bubble,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScale {
    #[serde(rename = "Viridis")]
    Viridis,
    #[serde(rename = "rdgy")]
    RdGy,
}

impl ColorScale {
    /// Name understood by the plotting surface.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Viridis => "Viridis",
            Self::RdGy => "rdgy",
        }
    }
}

/// Everything that distinguishes one map variant from another.
///
/// This type is serializable so hosts can keep variants in JSON next to the
/// dataset instead of hard-coding them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_kind")]
    pub kind: ChartKind,
    #[serde(default = "default_color_scale")]
    pub color_scale: ColorScale,
    #[serde(default = "default_hover")]
    pub hover: HoverTextConfig,
    #[serde(default)]
    pub marker_scale: MarkerScale,
    #[serde(default = "default_title_template")]
    pub title_template: String,
    #[serde(default)]
    pub layout: MapLayout,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::choropleth()
    }
}

impl ResolverConfig {
    /// Growth choropleth with a diverging scale and a one-line tooltip.
    #[must_use]
    pub fn choropleth() -> Self {
        Self {
            kind: default_kind(),
            color_scale: default_color_scale(),
            hover: default_hover(),
            marker_scale: MarkerScale::default(),
            title_template: default_title_template(),
            layout: MapLayout::default(),
        }
    }

    /// Growth choropleth with Viridis and the detailed rate tooltip.
    #[must_use]
    pub fn growth_detail() -> Self {
        Self {
            kind: ChartKind::Choropleth,
            color_scale: ColorScale::Viridis,
            hover: HoverTextConfig::new(HoverTemplate::GrowthDetail),
            marker_scale: MarkerScale::default(),
            title_template: "Death Rate (Age-Adj) From 1999 to 2020".to_owned(),
            layout: MapLayout {
                show_legend: None,
                geo: GeoLayout::default().with_lakes(true),
            },
        }
    }

    /// Bubble map sized by latest rate.
    #[must_use]
    pub fn bubble() -> Self {
        Self {
            kind: ChartKind::Bubble,
            color_scale: ColorScale::Viridis,
            hover: HoverTextConfig::new(HoverTemplate::DeathRate),
            marker_scale: MarkerScale::default(),
            title_template: format!("Age-Adjusted Deaths per state: {TITLE_CATEGORY_PLACEHOLDER}"),
            layout: MapLayout {
                show_legend: Some(false),
                geo: GeoLayout::albers_usa(),
            },
        }
    }

    #[must_use]
    pub fn with_color_scale(mut self, color_scale: ColorScale) -> Self {
        self.color_scale = color_scale;
        self
    }

    #[must_use]
    pub fn with_hover(mut self, hover: HoverTextConfig) -> Self {
        self.hover = hover;
        self
    }

    #[must_use]
    pub fn with_marker_scale(mut self, marker_scale: MarkerScale) -> Self {
        self.marker_scale = marker_scale;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: MapLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_title_template(mut self, title_template: impl Into<String>) -> Self {
        self.title_template = title_template.into();
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.marker_scale.validate()?;
        if self.hover.growth_precision > 10 {
            return Err(ChartError::InvalidData(
                "hover growth precision must be <= 10".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn title_for(&self, category: &str) -> String {
        self.title_template
            .replace(TITLE_CATEGORY_PLACEHOLDER, category)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse resolver config json: {e}"))
        })?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize resolver config json: {e}"))
        })
    }
}

/// Named resolver configurations matching the published map variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartPreset {
    Choropleth,
    GrowthDetail,
    Bubble,
}

impl ChartPreset {
    pub const ALL: [Self; 3] = [Self::Choropleth, Self::GrowthDetail, Self::Bubble];

    #[must_use]
    pub fn config(self) -> ResolverConfig {
        match self {
            Self::Choropleth => ResolverConfig::choropleth(),
            Self::GrowthDetail => ResolverConfig::growth_detail(),
            Self::Bubble => ResolverConfig::bubble(),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Choropleth => "choropleth",
            Self::GrowthDetail => "growth-detail",
            Self::Bubble => "bubble",
        }
    }
}

impl fmt::Display for ChartPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartPreset {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown chart preset `{s}`")))
    }
}

fn default_kind() -> ChartKind {
    ChartKind::Choropleth
}

fn default_color_scale() -> ColorScale {
    ColorScale::RdGy
}

fn default_hover() -> HoverTextConfig {
    HoverTextConfig::new(HoverTemplate::GrowthSummary)
}

fn default_title_template() -> String {
    format!("Death Rate Percentage Growth from 1999 to 2020: {TITLE_CATEGORY_PLACEHOLDER}")
}
