//! Normalized view of one applicant's AI evaluation.
//!
//! Everything here is a plain value type produced by the normalizer
//! (`analysis::normalizer`). Scores are integers in `[0, 100]` and every
//! grade is a pure function of its score, so a summary can be rebuilt from
//! raw payloads at any time without drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Letter rank derived from a score. Thresholds live in `analysis::grading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeRank {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
}

/// Display tier a rank belongs to. Two ranks share each tier except `D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeTier {
    Excellent,
    Good,
    Average,
    Poor,
}

impl GradeRank {
    pub fn tier(&self) -> GradeTier {
        match self {
            GradeRank::APlus | GradeRank::A => GradeTier::Excellent,
            GradeRank::BPlus | GradeRank::B => GradeTier::Good,
            GradeRank::CPlus | GradeRank::C => GradeTier::Average,
            GradeRank::D => GradeTier::Poor,
        }
    }
}

impl GradeTier {
    /// Fixed presentation tokens. These are display metadata only and never
    /// feed back into scoring.
    pub fn color_token(&self) -> &'static str {
        match self {
            GradeTier::Excellent => "green",
            GradeTier::Good => "blue",
            GradeTier::Average => "yellow",
            GradeTier::Poor => "red",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            GradeTier::Excellent => "trophy",
            GradeTier::Good => "thumbs-up",
            GradeTier::Average => "minus-circle",
            GradeTier::Poor => "alert-triangle",
        }
    }
}

/// Score-derived rank/tier/display triple. Fully determined by the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeLabel {
    pub rank: GradeRank,
    pub tier: GradeTier,
    pub color_token: String,
    pub icon: String,
}

impl GradeLabel {
    pub fn of(rank: GradeRank) -> Self {
        let tier = rank.tier();
        GradeLabel {
            rank,
            tier,
            color_token: tier.color_token().to_string(),
            icon: tier.icon().to_string(),
        }
    }
}

/// One scored dimension: the integer score plus its derived grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: u8,
    pub grade: GradeLabel,
}

/// The five mandatory evaluation categories. A category missing from the raw
/// payload defaults to score 0 — distinct from the optional categories,
/// which stay absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub education: CategoryScore,
    pub experience: CategoryScore,
    pub skills: CategoryScore,
    pub projects: CategoryScore,
    pub growth: CategoryScore,
}

/// A feedback string paired with its emphasis-annotated rendition.
/// `display` only ever adds markup around `text`; the underlying content is
/// never altered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedText {
    pub text: String,
    pub display: String,
}

/// Free-text feedback sections of an analysis, each entry annotated for
/// display emphasis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub strengths: Vec<AnnotatedText>,
    pub improvements: Vec<AnnotatedText>,
    pub recommendations: Vec<AnnotatedText>,
    pub overall_feedback: Option<AnnotatedText>,
}

/// Canonical, graded view of one applicant's AI evaluation.
///
/// Attached to an applicant id by the pipeline; never owned by the
/// `Applicant` record itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub overall: CategoryScore,
    pub categories: CategoryScores,
    /// Present only for engines that grade grammar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar: Option<CategoryScore>,
    /// Present only for engines that grade job-posting match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_matching: Option<CategoryScore>,
    pub feedback: Feedback,
    /// Which backend engine produced the raw payload. `"unknown"` when the
    /// payload does not say.
    pub analysis_type: String,
    pub created_at: Option<DateTime<Utc>>,
}
