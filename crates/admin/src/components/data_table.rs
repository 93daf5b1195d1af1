//! Data table component types.
//!
//! These types describe the product table the listing page renders: its
//! columns, the search box and the page-size selector.

use serde::{Deserialize, Serialize};

use crate::config::PAGE_SIZE_CHOICES;

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Optional tooltip shown next to the header.
    pub hint: Option<String>,
}

impl TableColumn {
    /// Create a new column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            hint: None,
        }
    }

    /// Attach a header tooltip.
    #[must_use]
    pub fn hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }
}

/// Option in the page-size selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizeOption {
    /// Rows per page.
    pub value: usize,
    /// Whether this is the active size.
    pub selected: bool,
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Search placeholder text.
    pub search_placeholder: String,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
    /// Offered page sizes.
    pub page_sizes: Vec<usize>,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            search_placeholder: "Search...".to_string(),
            empty_title: "No items found".to_string(),
            empty_description: None,
            page_sizes: PAGE_SIZE_CHOICES.to_vec(),
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = placeholder.to_string();
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, title: &str, description: Option<&str>) -> Self {
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }

    /// Page-size selector options with `current` marked.
    #[must_use]
    pub fn page_size_options(&self, current: usize) -> Vec<PageSizeOption> {
        self.page_sizes
            .iter()
            .map(|&value| PageSizeOption {
                value,
                selected: value == current,
            })
            .collect()
    }
}

/// Build the products table configuration.
#[must_use]
pub fn products_table_config() -> DataTableConfig {
    DataTableConfig::new("products")
        .column(TableColumn::new("logo", "Logo"))
        .column(TableColumn::new("name", "Product name"))
        .column(TableColumn::new("description", "Description").hint("Product summary"))
        .column(TableColumn::new("date_release", "Release date").hint("Date the product goes live"))
        .column(TableColumn::new("date_revision", "Revision date").hint("Date of the next review"))
        .search_placeholder("Search...")
        .empty_state(
            "No products found",
            Some("Try a different search term or add a new product"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_table_columns() {
        let config = products_table_config();
        let keys: Vec<&str> = config.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(
            keys,
            ["logo", "name", "description", "date_release", "date_revision"]
        );
    }

    #[test]
    fn test_page_size_options_mark_current() {
        let options = products_table_config().page_size_options(10);
        assert_eq!(options.len(), 3);
        assert!(options.iter().any(|o| o.value == 10 && o.selected));
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
    }
}
