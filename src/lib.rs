//! mortality-chart-rs: per-category chart frames for mortality growth maps.
//!
//! A loaded table of state/cause rows is grouped once; each selected cause
//! resolves to an immutable [`api::ChartFrame`] carrying the color domain,
//! series values, marker sizes and hover text a plotting surface needs.

pub mod api;
pub mod core;
pub mod dataset;
pub mod error;
pub mod extensions;
pub mod telemetry;

pub use api::{ChartFrame, ChartParameterResolver, ResolverConfig};
pub use error::{ChartError, ChartResult};
