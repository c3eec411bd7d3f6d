pub mod primitives;
pub mod scale;
pub mod table;
pub mod types;

pub use primitives::{PERCENT_SCALE, format_fixed, growth_to_percent};
pub use scale::{GrowthRange, MarkerScale, compute_growth_range, compute_marker_sizes};
pub use table::{CategoryIndex, Table, filter_by_category, list_categories};
pub use types::MortalityRow;
