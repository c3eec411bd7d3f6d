use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::core::types::MortalityRow;
use crate::error::{ChartError, ChartResult};

/// Ordered, immutable set of rows loaded once per session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    rows: Vec<MortalityRow>,
}

impl Table {
    /// Builds a table after validating every row.
    pub fn new(rows: Vec<MortalityRow>) -> ChartResult<Self> {
        for (index, row) in rows.iter().enumerate() {
            row.validate().map_err(|err| match err {
                ChartError::InvalidData(message) => {
                    ChartError::InvalidData(format!("row {index}: {message}"))
                }
                other => other,
            })?;
        }
        debug!(row_count = rows.len(), "table loaded");
        Ok(Self { rows })
    }

    #[must_use]
    pub fn rows(&self) -> &[MortalityRow] {
        &self.rows
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

/// Returns distinct causes in first-seen order.
pub fn list_categories(table: &Table) -> ChartResult<Vec<String>> {
    if table.is_empty() {
        return Err(ChartError::EmptyTable);
    }

    let seen: IndexSet<&str> = table.rows().iter().map(|row| row.cause.as_str()).collect();
    Ok(seen.into_iter().map(str::to_owned).collect())
}

/// Returns rows whose cause equals `category`, in table order.
#[must_use]
pub fn filter_by_category(table: &Table, category: &str) -> Vec<MortalityRow> {
    table
        .rows()
        .iter()
        .filter(|row| row.cause == category)
        .cloned()
        .collect()
}

/// Category → row positions, grouped once after load.
///
/// Category order is first appearance in the table; row order within a
/// category is table order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryIndex {
    groups: IndexMap<String, Vec<usize>>,
}

impl CategoryIndex {
    pub fn build(table: &Table) -> ChartResult<Self> {
        if table.is_empty() {
            return Err(ChartError::EmptyTable);
        }

        let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (position, row) in table.rows().iter().enumerate() {
            groups.entry(row.cause.clone()).or_default().push(position);
        }
        debug!(
            row_count = table.len(),
            category_count = groups.len(),
            "category index built"
        );
        Ok(Self { groups })
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.groups.contains_key(category)
    }

    #[must_use]
    pub fn positions(&self, category: &str) -> &[usize] {
        self.groups.get(category).map_or(&[], Vec::as_slice)
    }

    /// Materializes the rows of `category`. `table` must be the table the
    /// index was built from.
    #[must_use]
    pub fn rows(&self, table: &Table, category: &str) -> Vec<MortalityRow> {
        self.positions(category)
            .iter()
            .filter_map(|&position| table.rows().get(position))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryIndex, Table};
    use crate::core::MortalityRow;

    #[test]
    fn table_rejects_negative_latest_rate_with_row_position() {
        let err = Table::new(vec![
            MortalityRow::new("Flu", "CA", 0.1, 5.0),
            MortalityRow::new("Flu", "NY", 0.2, -1.0),
        ])
        .expect_err("negative rate");
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn index_positions_are_empty_for_unknown_category() {
        let table = Table::new(vec![MortalityRow::new("Flu", "CA", 0.1, 5.0)]).expect("table");
        let index = CategoryIndex::build(&table).expect("index");
        assert!(index.positions("Cancer").is_empty());
        assert!(!index.contains("Cancer"));
    }
}
