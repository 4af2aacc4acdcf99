//! Ranking computation over the filtered applicant set.
//!
//! Scores come from attached analysis summaries; applicants without one get
//! a fixed baseline. The descending sort is stable, so equal scores keep
//! the relative order of the filtered input and the ranking is fully
//! deterministic.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::analysis::AnalysisSummary;
use crate::models::applicant::Applicant;
use crate::triage::filter::{self, FilterCriteria};

/// Score assigned to an applicant with no analysis summary. A constant
/// placeholder by contract — there is no specified scoring formula for
/// unanalyzed applicants, and inventing one here would silently reorder the
/// screen.
pub const BASELINE_SCORE: u8 = 50;

/// One applicant's position within a ranked, filtered view.
#[derive(Debug, Clone, Serialize)]
pub struct RankingResult {
    pub applicant: Applicant,
    /// 1-based position.
    pub rank: usize,
    pub score: u8,
}

/// Filters `applicants` with `criteria`, scores the survivors, and returns
/// them ordered by descending score with 1-based ranks assigned.
pub fn rank(
    applicants: &[Applicant],
    summaries: &HashMap<String, AnalysisSummary>,
    criteria: &FilterCriteria,
) -> Vec<RankingResult> {
    let mut scored: Vec<(&Applicant, u8)> = applicants
        .iter()
        .filter(|applicant| filter::matches(applicant, criteria))
        .map(|applicant| {
            let score = summaries
                .get(&applicant.id)
                .map(|summary| summary.overall.score)
                .unwrap_or(BASELINE_SCORE);
            (applicant, score)
        })
        .collect();

    // Stable sort: ties keep their filtered-input order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored
        .into_iter()
        .enumerate()
        .map(|(index, (applicant, score))| RankingResult {
            applicant: applicant.clone(),
            rank: index + 1,
            score,
        })
        .collect()
}
