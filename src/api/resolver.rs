use std::fmt;

use tracing::{debug, warn};

use crate::core::{
    CategoryIndex, MortalityRow, Table, compute_growth_range, compute_marker_sizes,
    filter_by_category,
};
use crate::error::{ChartError, ChartResult};

use super::{ChartFrame, HoverFormatterFn, MarkerSizes, ResolverConfig, build_hover_text};

/// Derives chart frames for a loaded table.
///
/// The category index is built once at construction; every
/// `build_chart_frame` call reads from it instead of rescanning the table.
pub struct ChartParameterResolver {
    table: Table,
    index: CategoryIndex,
    config: ResolverConfig,
    hover_formatter: Option<HoverFormatterFn>,
}

impl fmt::Debug for ChartParameterResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartParameterResolver")
            .field("rows", &self.table.len())
            .field("categories", &self.index.category_count())
            .field("config", &self.config)
            .field("custom_hover", &self.hover_formatter.is_some())
            .finish()
    }
}

impl ChartParameterResolver {
    pub fn new(table: Table, config: ResolverConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let index = CategoryIndex::build(&table)?;
        Ok(Self {
            table,
            index,
            config,
            hover_formatter: None,
        })
    }

    /// Replaces the built-in hover template with `formatter`.
    #[must_use]
    pub fn with_hover_formatter(mut self, formatter: HoverFormatterFn) -> Self {
        self.hover_formatter = Some(formatter);
        self
    }

    pub fn clear_hover_formatter(&mut self) {
        self.hover_formatter = None;
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Categories for selector population, first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.index.categories().map(str::to_owned).collect()
    }

    /// Builds the frame for `category`: filter, range, sizes, labels.
    ///
    /// A degenerate rate scale falls back to constant markers of
    /// `base_size`. A category without rows yields `EmptyRange`.
    pub fn build_chart_frame(&self, category: &str) -> ChartResult<ChartFrame> {
        let rows = self.index.rows(&self.table, category);
        assemble_frame(&self.config, self.hover_formatter.as_ref(), category, rows)
    }

    /// Frame used in place of a failed build: no series, flat color domain.
    #[must_use]
    pub fn empty_frame(&self, category: &str) -> ChartFrame {
        ChartFrame::empty(
            category,
            self.config.kind,
            self.config.title_for(category),
            self.config.color_scale,
        )
    }
}

/// One-shot frame build over an unindexed table.
///
/// Hosts rendering several categories should keep a `ChartParameterResolver`
/// instead, which groups the table once.
pub fn build_chart_frame(
    table: &Table,
    category: &str,
    config: &ResolverConfig,
) -> ChartResult<ChartFrame> {
    let config = config.clone().validate()?;
    let rows = filter_by_category(table, category);
    assemble_frame(&config, None, category, rows)
}

pub(crate) fn assemble_frame(
    config: &ResolverConfig,
    hover_formatter: Option<&HoverFormatterFn>,
    category: &str,
    rows: Vec<MortalityRow>,
) -> ChartResult<ChartFrame> {
    let growth_range = compute_growth_range(&rows)?;
    let marker_sizes = resolve_marker_sizes(config, category, &rows)?;
    let hover_text = match hover_formatter {
        Some(formatter) => build_hover_text(&rows, |index, row| formatter(index, row)),
        None => {
            let hover = config.hover;
            build_hover_text(&rows, |_, row| hover.render(row))
        }
    };
    let locations = rows.iter().map(|row| row.state.clone()).collect();
    let values = rows.iter().map(MortalityRow::growth_percent).collect();

    debug!(
        category,
        row_count = rows.len(),
        growth_min = growth_range.min,
        growth_max = growth_range.max,
        "chart frame built"
    );

    Ok(ChartFrame {
        category: category.to_owned(),
        kind: config.kind,
        title: config.title_for(category),
        color_scale: config.color_scale,
        rows,
        locations,
        values,
        growth_range,
        marker_sizes,
        hover_text,
    })
}

fn resolve_marker_sizes(
    config: &ResolverConfig,
    category: &str,
    rows: &[MortalityRow],
) -> ChartResult<MarkerSizes> {
    let scale = config.marker_scale;
    match compute_marker_sizes(rows, scale.base_size, scale.scaling_factor) {
        Ok(sizes) => Ok(MarkerSizes::Scaled { sizes }),
        Err(ChartError::DegenerateScale { max_rate }) => {
            warn!(
                category,
                max_rate, "degenerate marker scale, using constant marker size"
            );
            Ok(MarkerSizes::Constant {
                size: scale.base_size,
                count: rows.len(),
            })
        }
        Err(err) => Err(err),
    }
}
