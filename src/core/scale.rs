use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::types::MortalityRow;
use crate::error::{ChartError, ChartResult};

/// Fixed color-scale domain for one category, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthRange {
    pub min: f64,
    pub max: f64,
}

impl GrowthRange {
    /// Flat domain used when a category has nothing to normalize against.
    pub const FLAT: Self = Self { min: 0.0, max: 0.0 };

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }
}

/// Scans growth values and returns their bounds scaled to percentage points.
///
/// The range is meant to pin the color domain per category, so intensities
/// are comparable only within the selected cause. Non-finite growth is
/// rejected with `InvalidData`.
pub fn compute_growth_range(rows: &[MortalityRow]) -> ChartResult<GrowthRange> {
    let mut bounds: Option<(OrderedFloat<f64>, OrderedFloat<f64>)> = None;
    for row in rows {
        let percent = row.growth_percent();
        if !percent.is_finite() {
            return Err(non_finite(row, "growth", row.growth));
        }
        let percent = OrderedFloat(percent);
        bounds = Some(match bounds {
            None => (percent, percent),
            Some((min, max)) => (min.min(percent), max.max(percent)),
        });
    }
    let (min, max) = bounds.ok_or(ChartError::EmptyRange)?;

    Ok(GrowthRange {
        min: min.into_inner(),
        max: max.into_inner(),
    })
}

fn non_finite(row: &MortalityRow, field: &str, value: f64) -> ChartError {
    ChartError::InvalidData(format!(
        "{}/{}: `{field}` must be finite, got {value}",
        row.cause, row.state
    ))
}

/// Bubble sizing parameters: sizes span `[base_size, base_size + scaling_factor]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerScale {
    pub base_size: f64,
    pub scaling_factor: f64,
}

impl Default for MarkerScale {
    fn default() -> Self {
        Self {
            base_size: 1.0,
            scaling_factor: 35.0,
        }
    }
}

impl MarkerScale {
    pub fn new(base_size: f64, scaling_factor: f64) -> ChartResult<Self> {
        Self {
            base_size,
            scaling_factor,
        }
        .validate()
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.base_size, "base_size"),
            (self.scaling_factor, "scaling_factor"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "marker scale `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn max_size(self) -> f64 {
        self.base_size + self.scaling_factor
    }
}

/// Maps each row's latest rate to a marker size relative to the largest rate.
///
/// Fails with `DegenerateScale` when the largest rate is zero; callers are
/// expected to fall back to a constant size. Rates must be finite and
/// non-negative.
pub fn compute_marker_sizes(
    rows: &[MortalityRow],
    base_size: f64,
    scaling_factor: f64,
) -> ChartResult<Vec<f64>> {
    let scale = MarkerScale::new(base_size, scaling_factor)?;
    for row in rows {
        if !row.latest_rate.is_finite() {
            return Err(non_finite(row, "latest_rate", row.latest_rate));
        }
        if row.latest_rate < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{}/{}: `latest_rate` must be >= 0, got {}",
                row.cause, row.state, row.latest_rate
            )));
        }
    }
    let Some(max_rate) = rows.iter().map(|row| OrderedFloat(row.latest_rate)).max() else {
        return Ok(Vec::new());
    };
    let max_rate = max_rate.into_inner();
    if max_rate == 0.0 {
        return Err(ChartError::DegenerateScale { max_rate });
    }

    Ok(rows
        .iter()
        .map(|row| {
            let ratio = row.latest_rate / max_rate;
            // Exact top end for the max row; guards against rounding past it.
            if row.latest_rate == max_rate {
                scale.max_size()
            } else {
                (scale.base_size + scale.scaling_factor * ratio)
                    .clamp(scale.base_size, scale.max_size())
            }
        })
        .collect())
}
