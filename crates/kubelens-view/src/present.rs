use chrono::{DateTime, Utc};
use kube::core::DynamicObject;

use kubelens_types::{Column, DetailView, PresentationRow, ResourceKind, Result, SortSpec};

use crate::filter::{NamespaceFilter, NamespaceSelection, derive_namespaces, filter_by_namespace};
use crate::formatters::formatter_for;
use crate::sort::sort_rows;

/// One rendered list view
#[derive(Debug)]
pub struct Presentation {
    pub kind: &'static ResourceKind,
    pub columns: &'static [Column],
    pub rows: Vec<PresentationRow>,
    /// Namespaces observed in the unfiltered batch
    pub namespaces: NamespaceFilter,
}

/// Turn a fetched batch into sorted rows for `selection`
///
/// The selection falls back to `all` when the batch no longer contains its
/// namespace. A single object the formatter cannot read fails the batch.
pub fn present(
    kind: &'static ResourceKind,
    items: &[DynamicObject],
    selection: &mut NamespaceSelection,
    spec: &SortSpec,
    now: DateTime<Utc>,
) -> Result<Presentation> {
    let namespaces = derive_namespaces(items);
    selection.refresh(&namespaces);

    let formatter = formatter_for(kind.formatter);
    let mut rows = filter_by_namespace(items, selection)
        .map(|object| formatter.format_row(object, now))
        .collect::<Result<Vec<_>>>()?;
    sort_rows(&mut rows, spec);

    tracing::debug!(
        kind = kind.name,
        fetched = items.len(),
        shown = rows.len(),
        selection = %selection,
        "presented rows"
    );

    Ok(Presentation {
        kind,
        columns: formatter.columns(),
        rows,
        namespaces,
    })
}

/// Detail payload for one object of `kind`
pub fn describe(
    kind: &ResourceKind,
    object: &DynamicObject,
    now: DateTime<Utc>,
) -> Result<DetailView> {
    formatter_for(kind.formatter).format_details(object, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::fixtures;
    use crate::sort::SortState;
    use kubelens_types::catalog::{CONFIG_MAPS, CRON_JOBS, JOBS, PODS};
    use kubelens_types::{Error, SortDirection};
    use serde_json::json;

    fn pods() -> Vec<DynamicObject> {
        let running = json!({
            "spec": { "nodeName": "node-1" },
            "status": { "phase": "Running" }
        });
        vec![
            fixtures::object("Pod", "web-b", Some("web"), 300, running.clone()),
            fixtures::object("Pod", "job-a", Some("batch"), 100, running.clone()),
            fixtures::object("Pod", "web-a", Some("web"), 200, running),
        ]
    }

    fn names(presentation: &Presentation) -> Vec<String> {
        presentation
            .rows
            .iter()
            .map(|r| r.get("name").unwrap().display().into_owned())
            .collect()
    }

    #[test]
    fn test_present_all_sorted() {
        let mut selection = NamespaceSelection::All;
        let view = present(
            &PODS,
            &pods(),
            &mut selection,
            &SortSpec::default(),
            fixtures::now(),
        )
        .unwrap();

        assert_eq!(view.columns.len(), 8);
        assert_eq!(names(&view), vec!["job-a", "web-a", "web-b"]);
        assert_eq!(
            view.namespaces.namespaces().collect::<Vec<_>>(),
            vec!["batch", "web"]
        );
    }

    #[test]
    fn test_present_filters_and_sorts_by_age() {
        let mut selection = NamespaceSelection::parse("web");
        let view = present(
            &PODS,
            &pods(),
            &mut selection,
            &SortSpec::new("age", SortDirection::Descending),
            fixtures::now(),
        )
        .unwrap();

        // Newest creation time first
        assert_eq!(names(&view), vec!["web-a", "web-b"]);
        assert_eq!(selection, NamespaceSelection::Named("web".into()));
    }

    #[test]
    fn test_present_resets_vanished_namespace() {
        let mut selection = NamespaceSelection::parse("gone");
        let view = present(
            &PODS,
            &pods(),
            &mut selection,
            &SortSpec::default(),
            fixtures::now(),
        )
        .unwrap();

        assert!(selection.is_all());
        assert_eq!(view.rows.len(), 3);
    }

    #[test]
    fn test_present_empty_batch() {
        let mut selection = NamespaceSelection::All;
        let view = present(
            &CONFIG_MAPS,
            &[],
            &mut selection,
            &SortSpec::default(),
            fixtures::now(),
        )
        .unwrap();

        assert!(view.rows.is_empty());
        assert_eq!(view.columns.len(), 3);
        assert_eq!(view.namespaces.options(), vec![NamespaceSelection::All]);
    }

    #[test]
    fn test_present_fails_on_unreadable_object() {
        let mut items = pods();
        items[1].metadata.creation_timestamp = None;

        let mut selection = NamespaceSelection::All;
        let err = present(
            &PODS,
            &items,
            &mut selection,
            &SortSpec::default(),
            fixtures::now(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::FormattingAssumptionViolated { .. }));
    }

    #[test]
    fn test_status_column_does_not_reorder() {
        let phase = |phase: &str| json!({ "status": { "phase": phase } });
        let items = vec![
            fixtures::object("Pod", "a", Some("web"), 60, phase("Running")),
            fixtures::object("Pod", "b", Some("web"), 60, phase("Failed")),
        ];
        let mut selection = NamespaceSelection::All;
        let view = present(
            &PODS,
            &items,
            &mut selection,
            &SortSpec::ascending("status"),
            fixtures::now(),
        )
        .unwrap();
        assert_eq!(names(&view), vec!["a", "b"]);
    }

    fn container(ready: bool, restarts: i64) -> serde_json::Value {
        json!({ "name": "app", "ready": ready, "restartCount": restarts })
    }

    /// Three objects per kind, pairwise distinct on every sortable column
    fn batches() -> Vec<(&'static ResourceKind, Vec<DynamicObject>)> {
        let pods = vec![
            fixtures::object(
                "Pod",
                "pod-a",
                Some("alpha"),
                300,
                json!({
                    "spec": { "nodeName": "node-c" },
                    "status": {
                        "phase": "Running",
                        "podIP": "10.0.0.3",
                        "containerStatuses": [container(true, 5)]
                    }
                }),
            ),
            fixtures::object(
                "Pod",
                "pod-b",
                Some("beta"),
                100,
                json!({
                    "spec": { "nodeName": "node-a" },
                    "status": {
                        "phase": "Pending",
                        "podIP": "10.0.0.1",
                        "containerStatuses": [container(true, 0), container(false, 0)]
                    }
                }),
            ),
            fixtures::object(
                "Pod",
                "pod-c",
                Some("gamma"),
                200,
                json!({
                    "spec": { "nodeName": "node-b" },
                    "status": {
                        "phase": "Failed",
                        "podIP": "10.0.0.2",
                        "containerStatuses": [container(false, 2)]
                    }
                }),
            ),
        ];

        let jobs = vec![
            fixtures::object(
                "Job",
                "job-a",
                Some("alpha"),
                7200,
                json!({
                    "spec": { "completions": 3 },
                    "status": {
                        "succeeded": 3,
                        "startTime": "2024-06-01T10:00:00Z",
                        "completionTime": "2024-06-01T11:00:00Z"
                    }
                }),
            ),
            fixtures::object(
                "Job",
                "job-b",
                Some("beta"),
                60,
                json!({ "spec": { "completions": 1 }, "status": {} }),
            ),
            fixtures::object(
                "Job",
                "job-c",
                Some("gamma"),
                3600,
                json!({
                    "spec": { "completions": 2 },
                    "status": {
                        "succeeded": 1,
                        "active": 1,
                        "startTime": "2024-06-01T11:50:00Z"
                    }
                }),
            ),
        ];

        let cron_jobs = vec![
            fixtures::object(
                "CronJob",
                "cron-a",
                Some("alpha"),
                86400,
                json!({
                    "spec": { "schedule": "0 * * * *" },
                    "status": {
                        "lastScheduleTime": "2024-06-01T11:00:00Z",
                        "active": [{ "name": "cron-a-1" }, { "name": "cron-a-2" }]
                    }
                }),
            ),
            fixtures::object(
                "CronJob",
                "cron-b",
                Some("beta"),
                600,
                json!({ "spec": { "schedule": "*/5 * * * *" } }),
            ),
            fixtures::object(
                "CronJob",
                "cron-c",
                Some("gamma"),
                7200,
                json!({
                    "spec": { "schedule": "30 2 * * *" },
                    "status": {
                        "lastScheduleTime": "2024-06-01T09:00:00Z",
                        "active": [{ "name": "cron-c-1" }]
                    }
                }),
            ),
        ];

        let config_maps = vec![
            fixtures::object("ConfigMap", "cm-b", Some("gamma"), 500, json!({})),
            fixtures::object("ConfigMap", "cm-c", Some("alpha"), 40, json!({})),
            fixtures::object("ConfigMap", "cm-a", Some("beta"), 9000, json!({})),
        ];

        vec![
            (&PODS, pods),
            (&JOBS, jobs),
            (&CRON_JOBS, cron_jobs),
            (&CONFIG_MAPS, config_maps),
        ]
    }

    #[test]
    fn test_selecting_column_twice_reverses_for_every_kind() {
        for (kind, items) in batches() {
            let columns = formatter_for(kind.formatter).columns();
            for column in columns.iter().filter(|c| c.sortable) {
                let mut state = SortState::new(SortSpec::ascending(column.key));
                let render = |spec: &SortSpec| {
                    let mut selection = NamespaceSelection::All;
                    names(&present(kind, &items, &mut selection, spec, fixtures::now()).unwrap())
                };

                let ascending = render(state.spec());
                assert_eq!(state.select(column.key).direction, SortDirection::Descending);
                let descending = render(state.spec());

                let mut reversed = ascending.clone();
                reversed.reverse();
                assert_eq!(descending, reversed, "{} by {}", kind.name, column.key);
                assert_eq!(ascending.len(), 3);

                assert_eq!(state.select(column.key).direction, SortDirection::Ascending);
                assert_eq!(
                    render(state.spec()),
                    ascending,
                    "{} by {}",
                    kind.name,
                    column.key
                );
            }
        }
    }

    #[test]
    fn test_describe_uses_kind_formatter() {
        let cm = fixtures::object(
            "ConfigMap",
            "settings",
            Some("web"),
            60,
            json!({ "data": { "a": "1" } }),
        );
        let details = describe(&CONFIG_MAPS, &cm, fixtures::now()).unwrap();
        assert_eq!(details.title, "ConfigMap: settings");
    }
}
