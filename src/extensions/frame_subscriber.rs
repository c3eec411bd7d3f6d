use std::fmt;

use tracing::warn;

use crate::api::{ChartFrame, HoverFormatterFn, ResolverConfig, assemble_frame};
use crate::error::ChartResult;

use super::{ChartSubscriber, SelectionContext, SelectionEvent};

/// Subscriber that keeps the latest frame for one chart configuration.
///
/// Each event replaces the previous frame; nothing from earlier selections
/// is retained.
#[derive(Clone)]
pub struct FrameSubscriber {
    id: String,
    config: ResolverConfig,
    hover_formatter: Option<HoverFormatterFn>,
    latest: Option<ChartFrame>,
    frames_built: u64,
}

impl fmt::Debug for FrameSubscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameSubscriber")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("custom_hover", &self.hover_formatter.is_some())
            .field("latest", &self.latest)
            .field("frames_built", &self.frames_built)
            .finish()
    }
}

impl FrameSubscriber {
    pub fn new(id: impl Into<String>, config: ResolverConfig) -> ChartResult<Self> {
        Ok(Self {
            id: id.into(),
            config: config.validate()?,
            hover_formatter: None,
            latest: None,
            frames_built: 0,
        })
    }

    /// Labels dispatched frames with `formatter` instead of the config's template.
    #[must_use]
    pub fn with_hover_formatter(mut self, formatter: HoverFormatterFn) -> Self {
        self.hover_formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn frames_built(&self) -> u64 {
        self.frames_built
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

impl ChartSubscriber for FrameSubscriber {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &SelectionEvent, context: SelectionContext<'_>) {
        let category = event.category();
        let rows = context.index.rows(context.table, category);
        if rows.is_empty() {
            warn!(
                subscriber = %self.id,
                category,
                "selected category resolved to zero rows"
            );
        }

        let frame = match assemble_frame(
            &self.config,
            self.hover_formatter.as_ref(),
            category,
            rows,
        ) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(
                    subscriber = %self.id,
                    category,
                    error = %err,
                    "falling back to empty frame"
                );
                ChartFrame::empty(
                    category,
                    self.config.kind,
                    self.config.title_for(category),
                    self.config.color_scale,
                )
            }
        };
        self.latest = Some(frame);
        self.frames_built += 1;
    }

    fn latest_frame(&self) -> Option<&ChartFrame> {
        self.latest.as_ref()
    }
}
