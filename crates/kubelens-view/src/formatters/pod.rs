use chrono::{DateTime, Utc};
use kube::core::DynamicObject;
use serde_json::Value;

use kubelens_types::{Column, DetailView, FieldValue, PresentationRow, Result};

use super::{
    Meta, NOT_AVAILABLE, RowFormatter, StatusStyle, annotations, int, labels, section, text, yes_no,
};
use crate::clock;

static COLUMNS: [Column; 8] = [
    Column::fixed("status", "Status", 40),
    Column::new("name", "Name"),
    Column::new("namespace", "Namespace"),
    Column::new("ready", "Ready"),
    Column::new("restarts", "Restarts"),
    Column::new("age", "Age"),
    Column::new("ip", "IP"),
    Column::new("node", "Node"),
];

/// Pod lifecycle phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PodPhase {
    Running,
    Pending,
    Succeeded,
    Failed,
    Unknown,
}

impl PodPhase {
    /// Case-insensitive; anything unrecognised is `Unknown`
    pub fn parse(phase: &str) -> Self {
        match phase.to_ascii_lowercase().as_str() {
            "running" => Self::Running,
            "pending" => Self::Pending,
            "succeeded" => Self::Succeeded,
            "failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }

    pub fn style(&self) -> StatusStyle {
        match self {
            Self::Running => StatusStyle::new("check_circle", "status-running", "Running"),
            Self::Pending => StatusStyle::new("pending", "status-pending", "Pending"),
            Self::Succeeded => {
                StatusStyle::new("task_alt", "status-succeeded", "Completed Successfully")
            }
            Self::Failed => StatusStyle::new("error", "status-failed", "Failed"),
            Self::Unknown => StatusStyle::new("help", "status-unknown", "Unknown Status"),
        }
    }
}

/// Readiness and restarts of one container
struct ContainerState<'a> {
    name: &'a str,
    ready: bool,
    restart_count: i64,
    image: Option<&'a str>,
    container_id: Option<&'a str>,
}

fn container_states(status: &Value) -> Vec<ContainerState<'_>> {
    status["containerStatuses"]
        .as_array()
        .map(|statuses| {
            statuses
                .iter()
                .map(|cs| ContainerState {
                    name: text(&cs["name"]).unwrap_or(NOT_AVAILABLE),
                    ready: cs["ready"].as_bool().unwrap_or(false),
                    restart_count: int(&cs["restartCount"]),
                    image: text(&cs["image"]),
                    container_id: text(&cs["containerID"]),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn readiness(containers: &[ContainerState<'_>]) -> FieldValue {
    let ready = containers.iter().filter(|c| c.ready).count();
    let total = containers.len();
    FieldValue::measured(
        format!("{ready}/{total}"),
        ready as f64 / total.max(1) as f64,
    )
}

fn restarts(containers: &[ContainerState<'_>]) -> i64 {
    containers.iter().map(|c| c.restart_count).sum()
}

pub struct PodFormatter;

impl RowFormatter for PodFormatter {
    fn columns(&self) -> &'static [Column] {
        &COLUMNS
    }

    fn format_row(&self, object: &DynamicObject, now: DateTime<Utc>) -> Result<PresentationRow> {
        let meta = Meta::read(object, "Pod")?;
        let status = section(object, "status");
        let spec = section(object, "spec");
        let containers = container_states(status);

        let phase = text(&status["phase"]).unwrap_or("Unknown");
        let badge = PodPhase::parse(phase).style().badge(phase);

        Ok(PresentationRow::new(
            &COLUMNS,
            vec![
                badge.into(),
                meta.name.into(),
                meta.namespace_or_na().into(),
                readiness(&containers),
                FieldValue::Count(restarts(&containers)),
                clock::age(meta.created, now),
                text(&status["podIP"]).unwrap_or(NOT_AVAILABLE).into(),
                text(&spec["nodeName"]).unwrap_or(NOT_AVAILABLE).into(),
            ],
        ))
    }

    fn format_details(&self, object: &DynamicObject, _now: DateTime<Utc>) -> Result<DetailView> {
        let meta = Meta::read(object, "Pod")?;
        let status = section(object, "status");
        let spec = section(object, "spec");
        let containers = container_states(status);
        let or_na = |v: &Value| text(v).unwrap_or(NOT_AVAILABLE).to_string();

        let mut view = DetailView::new(format!("Pod: {}", meta.name)).table(
            "Pod Details",
            [
                ("Name", meta.name.to_string()),
                ("Namespace", meta.namespace_or_na().to_string()),
                ("Node", or_na(&spec["nodeName"])),
                ("Pod IP", or_na(&status["podIP"])),
                ("Host IP", or_na(&status["hostIP"])),
                ("QoS Class", or_na(&status["qosClass"])),
                ("Phase", text(&status["phase"]).unwrap_or("Unknown").to_string()),
                ("Created", clock::timestamp(meta.created)),
                ("Ready", readiness(&containers).display().into_owned()),
                ("Restarts", restarts(&containers).to_string()),
            ],
        );

        for container in &containers {
            view = view.table(
                &format!("Container: {}", container.name),
                [
                    ("Ready", yes_no(container.ready).to_string()),
                    ("Restart Count", container.restart_count.to_string()),
                    ("Image", container.image.unwrap_or(NOT_AVAILABLE).to_string()),
                    (
                        "Container ID",
                        container.container_id.unwrap_or(NOT_AVAILABLE).to_string(),
                    ),
                ],
            );
        }

        Ok(view
            .json("Labels", labels(object))
            .json("Annotations", annotations(object)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::fixtures;
    use kubelens_types::{SectionBody, SortKey};
    use serde_json::json;

    fn running_pod() -> DynamicObject {
        fixtures::object(
            "Pod",
            "web-0",
            Some("default"),
            3 * 3600,
            json!({
                "spec": { "nodeName": "node-a" },
                "status": {
                    "phase": "Running",
                    "podIP": "10.0.0.7",
                    "containerStatuses": [
                        { "name": "app", "ready": true, "restartCount": 1, "image": "nginx:1.25" },
                        { "name": "sidecar", "ready": true, "restartCount": 2, "image": "envoy" }
                    ]
                }
            }),
        )
    }

    #[test]
    fn test_running_pod_row() {
        let row = PodFormatter.format_row(&running_pod(), fixtures::now()).unwrap();

        match row.get("status") {
            Some(FieldValue::Status(badge)) => {
                assert_eq!(badge.tooltip, "Running");
                assert_eq!(badge.icon, "check_circle");
                assert_eq!(badge.class, "status-running");
            }
            other => panic!("unexpected status {other:?}"),
        }

        let ready = row.get("ready").unwrap();
        assert_eq!(ready.display(), "2/2");
        assert_eq!(ready.sort_key(), SortKey::Float(1.0));
        assert_eq!(row.get("restarts"), Some(&FieldValue::Count(3)));
        assert_eq!(row.get("age").unwrap().display(), "3h");
        assert_eq!(row.get("ip").unwrap().display(), "10.0.0.7");
        assert_eq!(row.get("node").unwrap().display(), "node-a");
    }

    #[test]
    fn test_phase_is_case_insensitive() {
        assert_eq!(PodPhase::parse("running"), PodPhase::Running);
        assert_eq!(PodPhase::parse("FAILED"), PodPhase::Failed);
        assert_eq!(PodPhase::parse("Evicted"), PodPhase::Unknown);
    }

    #[test]
    fn test_pod_without_status() {
        let pod = fixtures::object("Pod", "bare", Some("default"), 30, json!({ "spec": {} }));
        let row = PodFormatter.format_row(&pod, fixtures::now()).unwrap();

        match row.get("status") {
            Some(FieldValue::Status(badge)) => assert_eq!(badge.icon, "help"),
            other => panic!("unexpected status {other:?}"),
        }
        let ready = row.get("ready").unwrap();
        assert_eq!(ready.display(), "0/0");
        assert_eq!(ready.sort_key(), SortKey::Float(0.0));
        assert_eq!(row.get("restarts"), Some(&FieldValue::Count(0)));
        assert_eq!(row.get("ip").unwrap().display(), "N/A");
        assert_eq!(row.get("node").unwrap().display(), "N/A");
    }

    #[test]
    fn test_partial_readiness_ratio() {
        let pod = fixtures::object(
            "Pod",
            "half",
            Some("default"),
            30,
            json!({ "status": { "phase": "Pending", "containerStatuses": [
                { "name": "a", "ready": true, "restartCount": 0 },
                { "name": "b", "ready": false, "restartCount": 0 }
            ]}}),
        );
        let row = PodFormatter.format_row(&pod, fixtures::now()).unwrap();
        assert_eq!(row.get("ready").unwrap().sort_key(), SortKey::Float(0.5));
    }

    #[test]
    fn test_pod_details() {
        let details = PodFormatter.format_details(&running_pod(), fixtures::now()).unwrap();
        assert_eq!(details.title, "Pod: web-0");

        let pod = details.section("Pod Details").unwrap();
        assert_eq!(pod.lookup("Node"), Some("node-a"));
        assert_eq!(pod.lookup("Host IP"), Some("N/A"));
        assert_eq!(pod.lookup("Ready"), Some("2/2"));
        assert_eq!(pod.lookup("Restarts"), Some("3"));

        let sidecar = details.section("Container: sidecar").unwrap();
        assert_eq!(sidecar.lookup("Ready"), Some("Yes"));
        assert_eq!(sidecar.lookup("Restart Count"), Some("2"));
        assert_eq!(sidecar.lookup("Container ID"), Some("N/A"));

        assert_eq!(
            details.section("Labels"),
            Some(&SectionBody::Json(json!({})))
        );
    }
}
