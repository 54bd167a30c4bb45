use chrono::{DateTime, Utc};
use kube::core::DynamicObject;

use kubelens_types::{Column, DetailView, PresentationRow, Result};

use super::{Meta, NOT_AVAILABLE, RowFormatter, annotations, labels};
use crate::clock;

static COLUMNS: [Column; 3] = [
    Column::new("name", "Name"),
    Column::new("namespace", "Namespace"),
    Column::new("age", "Age"),
];

/// Fallback for kinds without bespoke columns
pub struct GenericFormatter;

fn kind_of(object: &DynamicObject) -> &str {
    object
        .types
        .as_ref()
        .map_or("resource", |t| t.kind.as_str())
}

impl RowFormatter for GenericFormatter {
    fn columns(&self) -> &'static [Column] {
        &COLUMNS
    }

    fn format_row(&self, object: &DynamicObject, now: DateTime<Utc>) -> Result<PresentationRow> {
        let meta = Meta::read(object, kind_of(object))?;

        Ok(PresentationRow::new(
            &COLUMNS,
            vec![
                meta.name.into(),
                meta.namespace_or_na().into(),
                clock::age(meta.created, now),
            ],
        ))
    }

    fn format_details(&self, object: &DynamicObject, _now: DateTime<Utc>) -> Result<DetailView> {
        let kind = kind_of(object);
        let meta = Meta::read(object, kind)?;

        let mut view = DetailView::new(format!("{}: {}", kind, meta.name))
            .table(
                "Metadata",
                [
                    ("Name", meta.name.to_string()),
                    ("Namespace", meta.namespace_or_na().to_string()),
                    ("Created", clock::timestamp(meta.created)),
                    ("UID", meta.uid.unwrap_or(NOT_AVAILABLE).to_string()),
                ],
            )
            .json("Labels", labels(object))
            .json("Annotations", annotations(object));

        if let Some(spec) = object.data.get("spec") {
            view = view.json("Spec", spec.clone());
        }
        if let Some(status) = object.data.get("status") {
            view = view.json("Status", status.clone());
        }
        // ConfigMap and Secret payloads: keys only
        if let Some(data) = object.data.get("data").and_then(|d| d.as_object()) {
            view = view.list("Data Keys", data.keys().cloned().collect());
        }

        Ok(view)
    }
}
