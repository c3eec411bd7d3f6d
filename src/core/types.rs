use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{decimal_to_f64, growth_to_percent};
use crate::error::{ChartError, ChartResult};

/// One state/cause observation as it appears in the source table.
///
/// Field names follow the CSV header (`Cause`, `State`, `Growth`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MortalityRow {
    pub cause: String,
    pub state: String,
    /// Growth as a fraction, `0.15` meaning 15%.
    pub growth: f64,
    pub latest_rate: f64,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub earliest_rate: Option<f64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub long: Option<f64>,
}

impl MortalityRow {
    #[must_use]
    pub fn new(
        cause: impl Into<String>,
        state: impl Into<String>,
        growth: f64,
        latest_rate: f64,
    ) -> Self {
        Self {
            cause: cause.into(),
            state: state.into(),
            growth,
            latest_rate,
            earliest_rate: None,
            name: String::new(),
            lat: None,
            long: None,
        }
    }

    /// Builds a row from decimal inputs, as produced by exact-arithmetic
    /// upstream pipelines.
    pub fn from_decimal(
        cause: impl Into<String>,
        state: impl Into<String>,
        growth: Decimal,
        latest_rate: Decimal,
        earliest_rate: Option<Decimal>,
    ) -> ChartResult<Self> {
        let earliest_rate = earliest_rate
            .map(|rate| decimal_to_f64(rate, "earliest_rate"))
            .transpose()?;
        Ok(Self::new(
            cause,
            state,
            decimal_to_f64(growth, "growth")?,
            decimal_to_f64(latest_rate, "latest_rate")?,
        )
        .with_earliest_rate_opt(earliest_rate))
    }

    #[must_use]
    pub fn with_earliest_rate(self, rate: f64) -> Self {
        self.with_earliest_rate_opt(Some(rate))
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_coordinates(mut self, lat: f64, long: f64) -> Self {
        self.lat = Some(lat);
        self.long = Some(long);
        self
    }

    fn with_earliest_rate_opt(mut self, rate: Option<f64>) -> Self {
        self.earliest_rate = rate;
        self
    }

    /// Growth in percentage points, the unit used by range bounds and series.
    #[must_use]
    pub fn growth_percent(&self) -> f64 {
        growth_to_percent(self.growth)
    }

    /// Checks the numeric invariants the resolver relies on.
    ///
    /// - `growth` and `latest_rate` are finite
    /// - `latest_rate >= 0`
    /// - optional decimals are finite when present
    pub fn validate(&self) -> ChartResult<()> {
        if !self.growth.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "growth must be finite for {}/{}",
                self.cause, self.state
            )));
        }
        if !self.latest_rate.is_finite() || self.latest_rate < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "latest rate must be finite and >= 0 for {}/{}",
                self.cause, self.state
            )));
        }
        for (value, name) in [
            (self.earliest_rate, "earliest rate"),
            (self.lat, "lat"),
            (self.long, "long"),
        ] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite for {}/{}",
                    self.cause, self.state
                )));
            }
        }
        Ok(())
    }
}
