#![allow(dead_code)]

//! Filter predicate engine for the applicant list.
//!
//! Filtering is a conjunction of per-field conditions; each condition is a
//! disjunction over that field's selected values, and an empty disjunction
//! is vacuously true. An empty `FilterCriteria` therefore matches every
//! applicant. `matches` is pure and O(|skills| + |criteria fields|).

use serde::{Deserialize, Serialize};

use crate::models::applicant::{Applicant, ApplicantStatus};

/// Named experience buckets selectable on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceBucket {
    #[serde(rename = "1-3y")]
    OneToThree,
    #[serde(rename = "3-5y")]
    ThreeToFive,
    #[serde(rename = "5y+")]
    FivePlus,
}

impl ExperienceBucket {
    pub fn contains(&self, years: f64) -> bool {
        match self {
            ExperienceBucket::OneToThree => (1.0..3.0).contains(&years),
            ExperienceBucket::ThreeToFive => (3.0..5.0).contains(&years),
            ExperienceBucket::FivePlus => years >= 5.0,
        }
    }

    /// Parses the query-string form. `None` for unknown bucket names.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label {
            "1-3y" => Some(ExperienceBucket::OneToThree),
            "3-5y" => Some(ExperienceBucket::ThreeToFive),
            "5y+" => Some(ExperienceBucket::FivePlus),
            _ => None,
        }
    }
}

/// The active set of user-chosen inclusion constraints.
/// The default value constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Matched case-insensitively against name, position, email, and each
    /// skill entry.
    #[serde(default)]
    pub search_text: String,
    /// Substring tags against `position`; any hit qualifies.
    #[serde(default)]
    pub job_tags: Vec<String>,
    /// Experience buckets; any hit qualifies.
    #[serde(default)]
    pub experience_tags: Vec<ExperienceBucket>,
    /// Display statuses; any hit qualifies.
    #[serde(default)]
    pub status_tags: Vec<ApplicantStatus>,
    /// Exact-match constraint when present.
    #[serde(default)]
    pub job_posting_id: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }
}

/// Evaluates `criteria` against one applicant. All active field groups must
/// hold; inactive (empty) groups impose no constraint.
pub fn matches(applicant: &Applicant, criteria: &FilterCriteria) -> bool {
    matches_search(applicant, &criteria.search_text)
        && matches_job_tags(applicant, &criteria.job_tags)
        && matches_experience(applicant, &criteria.experience_tags)
        && matches_status(applicant, &criteria.status_tags)
        && matches_job_posting(applicant, criteria.job_posting_id.as_deref())
}

fn matches_search(applicant: &Applicant, search_text: &str) -> bool {
    if search_text.is_empty() {
        return true;
    }
    // Lower-case the needle once; candidate fields per call.
    let needle = search_text.to_lowercase();
    applicant.name.to_lowercase().contains(&needle)
        || applicant.position.to_lowercase().contains(&needle)
        || applicant.email.to_lowercase().contains(&needle)
        || applicant
            .skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(&needle))
}

fn matches_job_tags(applicant: &Applicant, tags: &[String]) -> bool {
    tags.is_empty() || tags.iter().any(|tag| applicant.position.contains(tag))
}

fn matches_experience(applicant: &Applicant, buckets: &[ExperienceBucket]) -> bool {
    buckets.is_empty()
        || buckets
            .iter()
            .any(|bucket| bucket.contains(applicant.experience_years))
}

fn matches_status(applicant: &Applicant, statuses: &[ApplicantStatus]) -> bool {
    statuses.is_empty() || statuses.contains(&applicant.status)
}

fn matches_job_posting(applicant: &Applicant, job_posting_id: Option<&str>) -> bool {
    match job_posting_id {
        Some(wanted) => applicant.job_posting_id.as_deref() == Some(wanted),
        None => true,
    }
}
