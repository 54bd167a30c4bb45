//! Per-kind row formatters.
//!
//! Each formatter declares its columns and maps a raw object into a row with
//! one value per column, plus a detail view. Formatters are pure: no I/O and
//! no state, with the current time passed in.

mod cronjob;
mod generic;
mod job;
mod pod;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use kube::core::DynamicObject;
use serde_json::Value;

use kubelens_types::{
    Column, DetailView, Error, FormatterKind, PresentationRow, Result, SortKey, StatusBadge,
};

pub use cronjob::CronJobFormatter;
pub use generic::GenericFormatter;
pub use job::JobFormatter;
pub use pod::{PodFormatter, PodPhase};

pub trait RowFormatter: Send + Sync {
    /// Declared columns, in display order
    fn columns(&self) -> &'static [Column];

    fn format_row(&self, object: &DynamicObject, now: DateTime<Utc>) -> Result<PresentationRow>;

    fn format_details(&self, object: &DynamicObject, now: DateTime<Utc>) -> Result<DetailView>;
}

/// Resolve the formatter a catalog entry asks for
pub fn formatter_for(kind: FormatterKind) -> &'static dyn RowFormatter {
    match kind {
        FormatterKind::Pod => &PodFormatter,
        FormatterKind::Job => &JobFormatter,
        FormatterKind::CronJob => &CronJobFormatter,
        FormatterKind::Generic => &GenericFormatter,
    }
}

/// Icon, CSS class and tooltip for one status tag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusStyle {
    pub icon: &'static str,
    pub class: &'static str,
    pub tooltip: &'static str,
}

impl StatusStyle {
    pub const fn new(icon: &'static str, class: &'static str, tooltip: &'static str) -> Self {
        Self {
            icon,
            class,
            tooltip,
        }
    }

    pub fn badge(&self, sort: impl Into<SortKey>) -> StatusBadge {
        StatusBadge {
            icon: self.icon,
            class: self.class,
            tooltip: self.tooltip,
            sort: sort.into(),
        }
    }

    /// Badge ordered by its own tooltip
    pub fn badge_by_tooltip(&self) -> StatusBadge {
        self.badge(self.tooltip)
    }
}

pub(crate) const NOT_AVAILABLE: &str = "N/A";

/// Required metadata every formatter relies on
pub(crate) struct Meta<'a> {
    pub name: &'a str,
    pub namespace: Option<&'a str>,
    pub created: DateTime<Utc>,
    pub uid: Option<&'a str>,
}

impl<'a> Meta<'a> {
    pub fn read(object: &'a DynamicObject, kind: &str) -> Result<Self> {
        let metadata = &object.metadata;
        let name = metadata
            .name
            .as_deref()
            .ok_or_else(|| violated(kind, "metadata.name"))?;
        let created = metadata
            .creation_timestamp
            .as_ref()
            .map(|t| t.0)
            .ok_or_else(|| violated(kind, "metadata.creationTimestamp"))?;

        Ok(Self {
            name,
            namespace: metadata.namespace.as_deref().filter(|ns| !ns.is_empty()),
            created,
            uid: metadata.uid.as_deref(),
        })
    }

    pub fn namespace_or_na(&self) -> &'a str {
        self.namespace.unwrap_or(NOT_AVAILABLE)
    }
}

fn violated(kind: &str, field: &'static str) -> Error {
    Error::FormattingAssumptionViolated {
        kind: kind.to_string(),
        field,
    }
}

/// `status` or `spec` substructure, `Null` when absent
pub(crate) fn section<'a>(object: &'a DynamicObject, key: &str) -> &'a Value {
    &object.data[key]
}

pub(crate) fn int(value: &Value) -> i64 {
    value.as_i64().unwrap_or(0)
}

pub(crate) fn text(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

pub(crate) fn time(value: &Value) -> Option<DateTime<Utc>> {
    value.as_str().and_then(|s| s.parse().ok())
}

pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn string_map(map: Option<&BTreeMap<String, String>>) -> Value {
    Value::Object(
        map.into_iter()
            .flatten()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

pub(crate) fn labels(object: &DynamicObject) -> Value {
    string_map(object.metadata.labels.as_ref())
}

pub(crate) fn annotations(object: &DynamicObject) -> Value {
    string_map(object.metadata.annotations.as_ref())
}
