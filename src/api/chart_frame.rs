use serde::{Deserialize, Serialize};

use crate::core::{GrowthRange, MortalityRow};

use super::{ChartKind, ColorScale};

/// Marker sizes for one frame, parallel to the frame rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MarkerSizes {
    Scaled { sizes: Vec<f64> },
    /// Every marker uses `size`; chosen when the rate scale is degenerate.
    Constant { size: f64, count: usize },
}

impl MarkerSizes {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Scaled { sizes } => sizes.len(),
            Self::Constant { count, .. } => *count,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Self::Scaled { sizes } => sizes.clone(),
            Self::Constant { size, count } => vec![*size; *count],
        }
    }
}

/// Render-ready projection of one category.
///
/// `locations`, `values`, `marker_sizes` and `hover_text` are index-aligned
/// with `rows`. `values` and `growth_range` are both in percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub category: String,
    pub kind: ChartKind,
    pub title: String,
    pub color_scale: ColorScale,
    pub rows: Vec<MortalityRow>,
    pub locations: Vec<String>,
    pub values: Vec<f64>,
    pub growth_range: GrowthRange,
    pub marker_sizes: MarkerSizes,
    pub hover_text: Vec<String>,
}

impl ChartFrame {
    /// Frame with no series and a flat color domain.
    #[must_use]
    pub fn empty(
        category: impl Into<String>,
        kind: ChartKind,
        title: impl Into<String>,
        color_scale: ColorScale,
    ) -> Self {
        Self {
            category: category.into(),
            kind,
            title: title.into(),
            color_scale,
            rows: Vec::new(),
            locations: Vec::new(),
            values: Vec::new(),
            growth_range: GrowthRange::FLAT,
            marker_sizes: MarkerSizes::Scaled { sizes: Vec::new() },
            hover_text: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
