//! Shared types for kubelens
//!
//! This crate contains the resource catalog and the data structures passed
//! between the cluster adapter, the row formatters and the front end.

pub mod catalog;
mod detail;
mod error;
mod row;
mod sort;

pub use catalog::{ApiGroup, FormatterKind, ResourceCategory, ResourceKind};
pub use detail::{DetailSection, DetailView, SectionBody};
pub use error::{BoxError, Error, Result};
pub use row::{Column, FieldValue, PresentationRow, SortKey, StatusBadge};
pub use sort::{SortDirection, SortSpec};
