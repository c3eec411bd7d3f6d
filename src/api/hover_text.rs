use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{MortalityRow, format_fixed};

/// Caller-supplied hover formatter, called with the row's position in the
/// filtered series.
pub type HoverFormatterFn = Arc<dyn Fn(usize, &MortalityRow) -> String + Send + Sync + 'static>;

/// Built-in tooltip layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverTemplate {
    /// State, growth, earliest and latest rate on separate lines.
    GrowthDetail,
    /// State and growth only.
    GrowthSummary,
    /// Display name and latest rate, for bubble maps.
    DeathRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverTextConfig {
    pub template: HoverTemplate,
    /// Fractional digits used for percentage growth.
    #[serde(default)]
    pub growth_precision: u8,
}

impl HoverTextConfig {
    #[must_use]
    pub fn new(template: HoverTemplate) -> Self {
        Self {
            template,
            growth_precision: 0,
        }
    }

    #[must_use]
    pub fn with_growth_precision(mut self, precision: u8) -> Self {
        self.growth_precision = precision;
        self
    }

    #[must_use]
    pub fn render(self, row: &MortalityRow) -> String {
        let growth = format_fixed(row.growth_percent(), self.growth_precision);
        match self.template {
            HoverTemplate::GrowthDetail => format!(
                "{}<br>Growth: {growth}%<br>Earliest Rate: {}<br>Latest Rate: {}",
                row.state,
                format_optional_rate(row.earliest_rate),
                format_rate(row.latest_rate)
            ),
            HoverTemplate::GrowthSummary => format!(
                "{}<br>Growth in deaths from '99 to '20: {growth}%",
                row.state
            ),
            HoverTemplate::DeathRate => format!(
                "{}<br>Deaths per 100,000 people: {}",
                display_name(row),
                format_rate(row.latest_rate)
            ),
        }
    }
}

/// Produces one label per row, index-aligned with `rows`.
pub fn build_hover_text<F>(rows: &[MortalityRow], template: F) -> Vec<String>
where
    F: Fn(usize, &MortalityRow) -> String,
{
    rows.iter()
        .enumerate()
        .map(|(index, row)| template(index, row))
        .collect()
}

fn format_rate(rate: f64) -> String {
    rate.to_string()
}

fn format_optional_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| "n/a".to_owned(), format_rate)
}

// Falls back to the state code for sources without a `Name` column.
fn display_name(row: &MortalityRow) -> &str {
    if row.name.is_empty() {
        &row.state
    } else {
        &row.name
    }
}

#[cfg(test)]
mod tests {
    use super::{HoverTemplate, HoverTextConfig, format_rate};
    use crate::core::MortalityRow;

    #[test]
    fn rates_render_without_trailing_zeros() {
        assert_eq!(format_rate(5.0), "5");
        assert_eq!(format_rate(12.25), "12.25");
    }

    #[test]
    fn death_rate_falls_back_to_state_when_name_missing() {
        let row = MortalityRow::new("Flu", "CA", 0.1, 7.5);
        let text = HoverTextConfig::new(HoverTemplate::DeathRate).render(&row);
        assert_eq!(text, "CA<br>Deaths per 100,000 people: 7.5");
    }
}
