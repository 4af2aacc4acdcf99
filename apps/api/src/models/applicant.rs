#![allow(dead_code)]

//! Applicant record + the status vocabulary shared with the recruitment backend.
//!
//! The backend speaks a wider raw status vocabulary than the screen does.
//! `ApplicantStatus` is the closed display set; the raw↔display mapping is
//! fixed and exhaustive, and unknown raw codes always land on `Pending`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Display status of an applicant — the closed set the applicant-list screen
/// filters and batches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplicantStatus {
    Pending,
    DocumentPassed,
    DocumentFailed,
    InterviewScheduled,
    FinalPassed,
    FinalFailed,
}

impl Default for ApplicantStatus {
    fn default() -> Self {
        ApplicantStatus::Pending
    }
}

impl ApplicantStatus {
    /// Maps a raw backend status code onto the display vocabulary.
    /// Unrecognized codes fall back to `Pending`.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "pending" | "reviewing" => ApplicantStatus::Pending,
            "approved" | "interview_scheduled" => ApplicantStatus::FinalPassed,
            "reviewed" | "passed" => ApplicantStatus::DocumentPassed,
            "rejected" => ApplicantStatus::DocumentFailed,
            _ => ApplicantStatus::Pending,
        }
    }

    /// Canonical raw code sent to the backend on a status change.
    /// `FinalFailed` shares the backend's `rejected` code — the backend has
    /// no narrower form for it.
    pub fn as_raw(&self) -> &'static str {
        match self {
            ApplicantStatus::Pending => "pending",
            ApplicantStatus::DocumentPassed => "passed",
            ApplicantStatus::DocumentFailed => "rejected",
            ApplicantStatus::InterviewScheduled => "interview_scheduled",
            ApplicantStatus::FinalPassed => "approved",
            ApplicantStatus::FinalFailed => "rejected",
        }
    }

    /// Kebab-case label, as serialized to the screen.
    pub fn label(&self) -> &'static str {
        match self {
            ApplicantStatus::Pending => "pending",
            ApplicantStatus::DocumentPassed => "document-passed",
            ApplicantStatus::DocumentFailed => "document-failed",
            ApplicantStatus::InterviewScheduled => "interview-scheduled",
            ApplicantStatus::FinalPassed => "final-passed",
            ApplicantStatus::FinalFailed => "final-failed",
        }
    }

    /// Parses a display label (the query-string form). `None` for anything
    /// outside the closed set.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label {
            "pending" => Some(ApplicantStatus::Pending),
            "document-passed" => Some(ApplicantStatus::DocumentPassed),
            "document-failed" => Some(ApplicantStatus::DocumentFailed),
            "interview-scheduled" => Some(ApplicantStatus::InterviewScheduled),
            "final-passed" => Some(ApplicantStatus::FinalPassed),
            "final-failed" => Some(ApplicantStatus::FinalFailed),
            _ => None,
        }
    }
}

/// One candidate's canonical record, as handed to the pipeline.
///
/// Records arrive from the recruitment backend with `id` as the only
/// guaranteed field; everything else defaults. `id` tolerates both string
/// and numeric JSON forms, and `status` arrives in the raw backend
/// vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Applicant {
    #[serde(deserialize_with = "de_opaque_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, alias = "jobPostingId")]
    pub job_posting_id: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "de_status_from_raw")]
    pub status: ApplicantStatus,
    #[serde(default, alias = "experienceYears")]
    pub experience_years: f64,
    #[serde(default, alias = "appliedAt")]
    pub applied_at: Option<DateTime<Utc>>,
}

/// Accepts `"42"`, `42`, or any JSON string as an opaque identifier.
fn de_opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "applicant id must be a string or number, got {other}"
        ))),
    }
}

/// Deserializes a raw backend status code through the vocabulary mapping.
/// Missing or null statuses fall back to `Pending`.
fn de_status_from_raw<'de, D>(deserializer: D) -> Result<ApplicantStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(ApplicantStatus::from_raw)
        .unwrap_or_default())
}
