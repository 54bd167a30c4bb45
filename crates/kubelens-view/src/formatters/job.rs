use chrono::{DateTime, Utc};
use kube::core::DynamicObject;
use serde_json::Value;

use kubelens_types::{Column, DetailView, FieldValue, PresentationRow, Result};

use super::{Meta, RowFormatter, StatusStyle, int, labels, section, time};
use crate::clock;

static COLUMNS: [Column; 6] = [
    Column::fixed("status", "Status", 40),
    Column::new("name", "Name"),
    Column::new("namespace", "Namespace"),
    Column::new("completions", "Completions"),
    Column::new("duration", "Duration"),
    Column::new("age", "Age"),
];

const SUCCEEDED: StatusStyle =
    StatusStyle::new("task_alt", "status-succeeded", "Completed Successfully");
const FAILED: StatusStyle = StatusStyle::new("error", "status-failed", "Failed");
const RUNNING: StatusStyle = StatusStyle::new("play_circle", "status-running", "Running");
const UNKNOWN: StatusStyle = StatusStyle::new("help", "status-unknown", "Unknown Status");

/// Pod counters from `status`; absent counters are zero
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct JobCounts {
    active: i64,
    succeeded: i64,
    failed: i64,
}

impl JobCounts {
    fn read(status: &Value) -> Self {
        Self {
            active: int(&status["active"]),
            succeeded: int(&status["succeeded"]),
            failed: int(&status["failed"]),
        }
    }

    /// First match wins: succeeded, failed, active
    fn style(&self) -> StatusStyle {
        if self.succeeded > 0 {
            SUCCEEDED
        } else if self.failed > 0 {
            FAILED
        } else if self.active > 0 {
            RUNNING
        } else {
            UNKNOWN
        }
    }
}

/// `spec.completions`, treating absent or zero as one
fn desired_completions(spec: &Value) -> i64 {
    spec["completions"].as_i64().filter(|n| *n > 0).unwrap_or(1)
}

fn completions(succeeded: i64, desired: i64) -> FieldValue {
    FieldValue::measured(
        format!("{succeeded}/{desired}"),
        succeeded as f64 / desired as f64,
    )
}

pub struct JobFormatter;

impl RowFormatter for JobFormatter {
    fn columns(&self) -> &'static [Column] {
        &COLUMNS
    }

    fn format_row(&self, object: &DynamicObject, now: DateTime<Utc>) -> Result<PresentationRow> {
        let meta = Meta::read(object, "Job")?;
        let status = section(object, "status");
        let counts = JobCounts::read(status);

        Ok(PresentationRow::new(
            &COLUMNS,
            vec![
                counts.style().badge_by_tooltip().into(),
                meta.name.into(),
                meta.namespace_or_na().into(),
                completions(counts.succeeded, desired_completions(section(object, "spec"))),
                clock::job_duration(
                    time(&status["startTime"]),
                    time(&status["completionTime"]),
                    now,
                ),
                clock::age(meta.created, now),
            ],
        ))
    }

    fn format_details(&self, object: &DynamicObject, now: DateTime<Utc>) -> Result<DetailView> {
        let meta = Meta::read(object, "Job")?;
        let status = section(object, "status");
        let spec = section(object, "spec");
        let counts = JobCounts::read(status);
        let desired = desired_completions(spec);
        let start = time(&status["startTime"]);
        let completion = time(&status["completionTime"]);

        let mut rows = vec![
            ("Name", meta.name.to_string()),
            ("Namespace", meta.namespace_or_na().to_string()),
            ("Created", clock::timestamp(meta.created)),
            ("Completions", desired.to_string()),
            (
                "Parallelism",
                spec["parallelism"]
                    .as_i64()
                    .filter(|n| *n > 0)
                    .unwrap_or(1)
                    .to_string(),
            ),
            ("Active", counts.active.to_string()),
            ("Succeeded", counts.succeeded.to_string()),
            ("Failed", counts.failed.to_string()),
            (
                "Progress",
                completions(counts.succeeded, desired).display().into_owned(),
            ),
            (
                "Duration",
                clock::job_duration(start, completion, now)
                    .display()
                    .into_owned(),
            ),
        ];
        if let Some(start) = start {
            rows.push(("Start Time", clock::timestamp(start)));
        }
        if let Some(completion) = completion {
            rows.push(("Completion Time", clock::timestamp(completion)));
        }

        Ok(DetailView::new(format!("Job: {}", meta.name))
            .table("Job Details", rows)
            .json("Pod Template", spec["template"].clone())
            .json("Labels", labels(object)))
    }
}
