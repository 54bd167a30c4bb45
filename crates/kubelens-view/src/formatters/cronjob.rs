use chrono::{DateTime, Utc};
use kube::core::DynamicObject;
use serde_json::Value;

use kubelens_types::{Column, DetailView, FieldValue, PresentationRow, Result};

use super::{Meta, NOT_AVAILABLE, RowFormatter, StatusStyle, labels, section, text, time, yes_no};
use crate::clock;

static COLUMNS: [Column; 7] = [
    Column::fixed("status", "Status", 40),
    Column::new("name", "Name"),
    Column::new("namespace", "Namespace"),
    Column::new("schedule", "Schedule"),
    Column::new("lastSchedule", "Last Schedule"),
    Column::new("active", "Active"),
    Column::new("age", "Age"),
];

const SUSPENDED: StatusStyle = StatusStyle::new("pause_circle", "status-suspended", "Suspended");
const ACTIVE: StatusStyle =
    StatusStyle::new("play_circle", "status-running", "Active Jobs Running");
const SCHEDULED: StatusStyle = StatusStyle::new("schedule", "status-scheduled", "Scheduled");
const WAITING: StatusStyle =
    StatusStyle::new("pending", "status-pending", "Waiting for First Schedule");

/// Names of the jobs currently running for this cron job
fn active_jobs(status: &Value) -> Vec<&str> {
    status["active"]
        .as_array()
        .map(|refs| refs.iter().filter_map(|r| r["name"].as_str()).collect())
        .unwrap_or_default()
}

fn active_count(status: &Value) -> usize {
    status["active"].as_array().map_or(0, Vec::len)
}

/// Suspension beats running jobs, which beat a recorded schedule
fn status_style(spec: &Value, status: &Value) -> StatusStyle {
    if spec["suspend"].as_bool().unwrap_or(false) {
        SUSPENDED
    } else if active_count(status) > 0 {
        ACTIVE
    } else if time(&status["lastScheduleTime"]).is_some() {
        SCHEDULED
    } else {
        WAITING
    }
}

pub struct CronJobFormatter;

impl RowFormatter for CronJobFormatter {
    fn columns(&self) -> &'static [Column] {
        &COLUMNS
    }

    fn format_row(&self, object: &DynamicObject, now: DateTime<Utc>) -> Result<PresentationRow> {
        let meta = Meta::read(object, "CronJob")?;
        let spec = section(object, "spec");
        let status = section(object, "status");

        Ok(PresentationRow::new(
            &COLUMNS,
            vec![
                status_style(spec, status).badge_by_tooltip().into(),
                meta.name.into(),
                meta.namespace_or_na().into(),
                text(&spec["schedule"]).unwrap_or(NOT_AVAILABLE).into(),
                clock::last_schedule(time(&status["lastScheduleTime"]), now),
                FieldValue::Count(active_count(status) as i64),
                clock::age(meta.created, now),
            ],
        ))
    }

    fn format_details(&self, object: &DynamicObject, now: DateTime<Utc>) -> Result<DetailView> {
        let meta = Meta::read(object, "CronJob")?;
        let spec = section(object, "spec");
        let status = section(object, "status");
        let last = time(&status["lastScheduleTime"]);

        let mut view = DetailView::new(format!("CronJob: {}", meta.name)).table(
            "CronJob Details",
            [
                ("Name", meta.name.to_string()),
                ("Namespace", meta.namespace_or_na().to_string()),
                (
                    "Schedule",
                    text(&spec["schedule"]).unwrap_or(NOT_AVAILABLE).to_string(),
                ),
                (
                    "Suspended",
                    yes_no(spec["suspend"].as_bool().unwrap_or(false)).to_string(),
                ),
                (
                    "Concurrency Policy",
                    text(&spec["concurrencyPolicy"])
                        .unwrap_or("Allow")
                        .to_string(),
                ),
                (
                    "Last Schedule",
                    last.map(clock::timestamp)
                        .unwrap_or_else(|| "Never".to_string()),
                ),
                (
                    "Since Last Schedule",
                    clock::last_schedule(last, now).display().into_owned(),
                ),
                ("Created", clock::timestamp(meta.created)),
            ],
        );

        let active = active_jobs(status);
        if !active.is_empty() {
            view = view.list(
                "Active Jobs",
                active.into_iter().map(str::to_string).collect(),
            );
        }

        Ok(view
            .json("Job Template", spec["jobTemplate"].clone())
            .json("Labels", labels(object)))
    }
}
