//! Reusable UI component definitions.

pub mod data_table;

pub use data_table::{DataTableConfig, PageSizeOption, TableColumn, products_table_config};
