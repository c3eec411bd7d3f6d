use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ChartError, ChartResult};

/// Factor that turns a growth fraction into percentage points.
pub const PERCENT_SCALE: f64 = 100.0;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Converts a growth fraction (`0.15`) into percentage points (`15.0`).
///
/// Both range bounds and per-row series values go through this helper so the
/// two can never drift apart.
#[must_use]
pub fn growth_to_percent(growth: f64) -> f64 {
    growth * PERCENT_SCALE
}

/// Formats `value` with exactly `precision` fractional digits.
///
/// Rounds the exact binary value half away from zero, so `12.5` at
/// precision 0 renders as `13`, `30.000000000000004` renders as `30`, and
/// `14.499999999999998` renders as `14`.
#[must_use]
pub fn format_fixed(value: f64, precision: u8) -> String {
    match Decimal::from_f64_retain(value) {
        Some(decimal) => {
            let scale = u32::from(precision);
            let mut rounded =
                decimal.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(scale);
            rounded.to_string()
        }
        None => {
            let precision = usize::from(precision);
            format!("{value:.precision$}")
        }
    }
}
