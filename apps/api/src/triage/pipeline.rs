#![allow(dead_code)]

//! The triage pipeline orchestrator the applicant-list screen binds to.
//!
//! Composes FilterEngine → RankingEngine → PaginationController over the
//! in-memory applicant collection, and tracks the batch-selection set
//! alongside the filtered view. All computation is synchronous; the async
//! edges (loading applicants, fetching analyses) live in the handlers, and
//! their results re-enter through the epoch-guarded load methods so a slow
//! fetch can never clobber a newer one (last-write-wins).

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::models::analysis::AnalysisSummary;
use crate::models::applicant::Applicant;
use crate::triage::filter::FilterCriteria;
use crate::triage::pagination::{self, Page};
use crate::triage::ranking::{self, RankingResult};
use crate::triage::selection::SelectionSet;

/// Load status of the applicant collection. A failed load keeps the
/// last-known-good collection — stale but available.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    Ready,
    Loading,
    Failed { message: String },
}

/// What the screen renders: one page of the filtered, ranked view plus the
/// navigation and selection counters around it.
#[derive(Debug, Clone, Serialize)]
pub struct TriageView {
    pub entries: Vec<RankingResult>,
    pub total_matched: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub load_state: LoadState,
    pub selected_count: usize,
    pub all_visible_selected: bool,
}

/// Single-viewer orchestrator owning the pipeline's only mutable state.
#[derive(Debug)]
pub struct TriagePipeline {
    applicants: Vec<Applicant>,
    summaries: HashMap<String, AnalysisSummary>,
    criteria: FilterCriteria,
    selection: SelectionSet,
    page_size: usize,
    current_page: usize,
    /// Most recently issued load epoch; only its completion may land.
    latest_epoch: u64,
    load_state: LoadState,
}

impl TriagePipeline {
    pub fn new(page_size: usize) -> Self {
        TriagePipeline {
            applicants: Vec::new(),
            summaries: HashMap::new(),
            criteria: FilterCriteria::default(),
            selection: SelectionSet::default(),
            page_size: page_size.max(1),
            current_page: 1,
            latest_epoch: 0,
            load_state: LoadState::Ready,
        }
    }

    // ── Criteria and navigation ─────────────────────────────────────────

    /// Installs new filter criteria. A criteria change resets the page to 1
    /// — the pagination controller itself never does, so the reset is owned
    /// here. The selection set is intentionally left alone (see
    /// `SelectionSet`).
    pub fn apply_criteria(&mut self, criteria: FilterCriteria) {
        if self.criteria != criteria {
            self.criteria = criteria;
            self.current_page = 1;
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Changing the page size keeps the current page; the screen resets
    /// explicitly when it wants to.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    // ── Applicant collection loading (epoch-guarded) ────────────────────

    /// Starts a load and returns its epoch token. Calling again before the
    /// previous load lands supersedes it: only the newest epoch may
    /// complete.
    pub fn begin_load(&mut self) -> u64 {
        self.latest_epoch += 1;
        self.load_state = LoadState::Loading;
        self.latest_epoch
    }

    /// Installs a fetched collection if `epoch` is still the newest one.
    /// Returns whether the result was installed; a stale result is
    /// discarded without touching the view.
    pub fn complete_load(&mut self, epoch: u64, applicants: Vec<Applicant>) -> bool {
        if epoch != self.latest_epoch {
            debug!(epoch, latest = self.latest_epoch, "discarding stale load");
            return false;
        }
        self.applicants = applicants;
        self.load_state = LoadState::Ready;
        true
    }

    /// Records a load failure, keeping the previous collection intact.
    /// A stale failure is ignored the same way a stale success is.
    pub fn fail_load(&mut self, epoch: u64, message: impl Into<String>) -> bool {
        if epoch != self.latest_epoch {
            return false;
        }
        self.load_state = LoadState::Failed {
            message: message.into(),
        };
        true
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn applicant_count(&self) -> usize {
        self.applicants.len()
    }

    // ── Analysis summaries ──────────────────────────────────────────────

    /// Attaches a freshly normalized summary to an applicant id. This is
    /// the only way analysis data enters the pipeline.
    pub fn merge_analysis(&mut self, id: impl Into<String>, summary: AnalysisSummary) {
        self.summaries.insert(id.into(), summary);
    }

    pub fn analysis_for(&self, id: &str) -> Option<&AnalysisSummary> {
        self.summaries.get(id)
    }

    // ── Selection ───────────────────────────────────────────────────────

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn toggle_selection(&mut self, id: impl Into<String>) {
        self.selection.toggle(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selects exactly the ids of the current filtered view (all pages of
    /// it, not just the visible slice).
    pub fn select_all_visible(&mut self) {
        let ids = self.visible_ids();
        self.selection.select_all(ids);
    }

    pub fn selection_ids(&self) -> Vec<String> {
        self.selection.ids()
    }

    /// Ids of the current filtered, ranked view in rank order.
    pub fn visible_ids(&self) -> Vec<String> {
        ranking::rank(&self.applicants, &self.summaries, &self.criteria)
            .into_iter()
            .map(|result| result.applicant.id)
            .collect()
    }

    // ── The view ────────────────────────────────────────────────────────

    /// Recomputes the filtered → ranked → paginated view.
    pub fn view(&self) -> TriageView {
        let ranked = ranking::rank(&self.applicants, &self.summaries, &self.criteria);
        let total_matched = ranked.len();
        let all_visible_selected = self
            .selection
            .is_all_selected(ranked.iter().map(|r| r.applicant.id.as_str()));

        let Page {
            items,
            total_pages,
            current_page,
        } = pagination::paginate(&ranked, self.page_size, self.current_page);

        TriageView {
            entries: items,
            total_matched,
            total_pages,
            current_page,
            page_size: self.page_size,
            load_state: self.load_state.clone(),
            selected_count: self.selection.len(),
            all_visible_selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::normalize;
    use serde_json::json;

    fn make_applicant(id: &str, name: &str, position: &str) -> Applicant {
        Applicant {
            id: id.to_string(),
            name: name.to_string(),
            email: String::new(),
            phone: String::new(),
            position: position.to_string(),
            job_posting_id: None,
            skills: Vec::new(),
            status: Default::default(),
            experience_years: 0.0,
            applied_at: None,
        }
    }

    fn loaded_pipeline(applicants: Vec<Applicant>) -> TriagePipeline {
        let mut pipeline = TriagePipeline::new(10);
        let epoch = pipeline.begin_load();
        assert!(pipeline.complete_load(epoch, applicants));
        pipeline
    }

    #[test]
    fn test_view_composes_filter_rank_paginate() {
        let mut pipeline = loaded_pipeline(vec![
            make_applicant("1", "Kim", "Backend"),
            make_applicant("2", "Lee", "Frontend"),
        ]);
        pipeline.merge_analysis(
            "2",
            normalize(Some(&json!({"overall_score": 91}))).unwrap(),
        );

        let view = pipeline.view();
        assert_eq!(view.total_matched, 2);
        assert_eq!(view.entries[0].applicant.id, "2");
        assert_eq!(view.entries[0].score, 91);
        assert_eq!(view.entries[1].score, ranking::BASELINE_SCORE);
        assert_eq!(view.load_state, LoadState::Ready);
    }

    #[test]
    fn test_criteria_change_resets_page() {
        let mut pipeline = loaded_pipeline(
            (0..30)
                .map(|i| make_applicant(&i.to_string(), "Kim", "Backend"))
                .collect(),
        );
        pipeline.set_page(3);
        assert_eq!(pipeline.view().current_page, 3);

        pipeline.apply_criteria(FilterCriteria {
            search_text: "kim".to_string(),
            ..Default::default()
        });
        assert_eq!(pipeline.view().current_page, 1);
    }

    #[test]
    fn test_reapplying_same_criteria_keeps_page() {
        let criteria = FilterCriteria {
            search_text: "kim".to_string(),
            ..Default::default()
        };
        let mut pipeline = loaded_pipeline(
            (0..30)
                .map(|i| make_applicant(&i.to_string(), "Kim", "Backend"))
                .collect(),
        );
        pipeline.apply_criteria(criteria.clone());
        pipeline.set_page(2);
        pipeline.apply_criteria(criteria);
        assert_eq!(pipeline.view().current_page, 2);
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut pipeline = TriagePipeline::new(10);
        let first = pipeline.begin_load();
        let second = pipeline.begin_load();

        // The slower first fetch lands after the newer one began: discarded.
        assert!(!pipeline.complete_load(first, vec![make_applicant("old", "Old", "")]));
        assert_eq!(pipeline.applicant_count(), 0);

        assert!(pipeline.complete_load(second, vec![make_applicant("new", "New", "")]));
        assert_eq!(pipeline.applicant_count(), 1);
        assert_eq!(pipeline.view().entries[0].applicant.id, "new");
    }

    #[test]
    fn test_failed_load_keeps_stale_view() {
        let mut pipeline = loaded_pipeline(vec![make_applicant("1", "Kim", "Backend")]);

        let epoch = pipeline.begin_load();
        assert!(pipeline.fail_load(epoch, "connection refused"));

        let view = pipeline.view();
        assert_eq!(view.total_matched, 1, "stale view must remain available");
        assert_eq!(
            view.load_state,
            LoadState::Failed {
                message: "connection refused".to_string()
            }
        );
    }

    #[test]
    fn test_stale_failure_does_not_mask_newer_load() {
        let mut pipeline = TriagePipeline::new(10);
        let first = pipeline.begin_load();
        let second = pipeline.begin_load();

        assert!(pipeline.complete_load(second, vec![make_applicant("1", "Kim", "")]));
        assert!(!pipeline.fail_load(first, "timed out"));
        assert_eq!(pipeline.load_state(), &LoadState::Ready);
    }

    #[test]
    fn test_selection_not_pruned_by_filter_change() {
        let mut pipeline = loaded_pipeline(vec![
            make_applicant("1", "Kim", "Backend"),
            make_applicant("2", "Lee", "Frontend"),
        ]);
        pipeline.toggle_selection("1");
        pipeline.toggle_selection("2");

        pipeline.apply_criteria(FilterCriteria {
            search_text: "lee".to_string(),
            ..Default::default()
        });

        // "1" is filtered out of view but stays selected.
        assert_eq!(pipeline.view().total_matched, 1);
        assert_eq!(pipeline.selection_ids(), vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_select_all_visible_scopes_to_filtered_view() {
        let mut pipeline = loaded_pipeline(vec![
            make_applicant("1", "Kim", "Backend"),
            make_applicant("2", "Lee", "Frontend"),
            make_applicant("3", "Park", "Backend"),
        ]);
        pipeline.apply_criteria(FilterCriteria {
            job_tags: vec!["Backend".to_string()],
            ..Default::default()
        });
        pipeline.select_all_visible();

        assert_eq!(
            pipeline.selection_ids(),
            vec!["1".to_string(), "3".to_string()]
        );
        assert!(pipeline.view().all_visible_selected);
    }

    #[test]
    fn test_merged_analysis_feeds_ranking() {
        let mut pipeline = loaded_pipeline(vec![
            make_applicant("1", "Kim", "Backend"),
            make_applicant("2", "Lee", "Backend"),
        ]);
        pipeline.merge_analysis(
            "1",
            normalize(Some(&json!({"overall_score": 30}))).unwrap(),
        );

        // 30 < baseline 50, so the unanalyzed applicant ranks first.
        let view = pipeline.view();
        assert_eq!(view.entries[0].applicant.id, "2");
        assert!(pipeline.analysis_for("1").is_some());
        assert!(pipeline.analysis_for("2").is_none());
    }

    #[test]
    fn test_pagination_state_in_view() {
        let mut pipeline = loaded_pipeline(
            (0..25)
                .map(|i| make_applicant(&format!("{i:02}"), "Kim", "Backend"))
                .collect(),
        );
        pipeline.set_page_size(10);
        pipeline.set_page(3);

        let view = pipeline.view();
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.entries.len(), 5);
        assert_eq!(view.total_matched, 25);
    }
}
