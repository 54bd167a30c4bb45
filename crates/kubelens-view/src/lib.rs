//! Presentation layer for kubelens
//!
//! This crate turns raw cluster objects into table rows and detail views,
//! orders rows by column and filters by namespace.

pub mod clock;
mod filter;
pub mod formatters;
mod present;
mod sort;

pub use filter::{NamespaceFilter, NamespaceSelection, derive_namespaces, filter_by_namespace};
pub use formatters::{RowFormatter, formatter_for};
pub use present::{Presentation, describe, present};
pub use sort::{SortState, is_sortable, sort_rows};

// Re-export types used in our public API
pub use kube::core::DynamicObject;
pub use kubelens_types::{
    Column, DetailView, FieldValue, PresentationRow, SortDirection, SortKey, SortSpec,
};
