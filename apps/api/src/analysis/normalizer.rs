//! Score normalizer — turns a raw, shape-varying analysis payload into the
//! canonical `AnalysisSummary`.
//!
//! Two payload generations exist: the legacy shape nests scoring fields
//! under an `analysis_result` wrapper, the current shape exposes them at the
//! top level. Every field is probed nested-first with a flat fallback,
//! independently of the others, so mixed payloads normalize too. This is the
//! only module allowed to silently substitute defaults; nothing downstream
//! ever sees a raw payload.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::analysis::emphasis::apply_emphasis;
use crate::analysis::grading::scored;
use crate::models::analysis::{
    AnalysisSummary, AnnotatedText, CategoryScore, CategoryScores, Feedback,
};

/// Normalizes a raw analysis payload. Returns `None` only when the payload
/// itself is absent; a malformed payload degrades to defaults instead.
pub fn normalize(payload: Option<&Value>) -> Option<AnalysisSummary> {
    let payload = payload?;

    let categories = CategoryScores {
        education: mandatory_category(payload, &["education_score", "educationScore"]),
        experience: mandatory_category(payload, &["experience_score", "experienceScore"]),
        skills: mandatory_category(payload, &["skills_score", "skillsScore"]),
        projects: mandatory_category(payload, &["projects_score", "projectsScore"]),
        growth: mandatory_category(payload, &["growth_score", "growthScore"]),
    };

    Some(AnalysisSummary {
        overall: mandatory_category(payload, &["overall_score", "overallScore"]),
        categories,
        grammar: optional_category(payload, &["grammar_score", "grammarScore"]),
        job_matching: optional_category(
            payload,
            &["job_matching_score", "jobMatchingScore", "job_matching"],
        ),
        feedback: extract_feedback(payload),
        analysis_type: probe_any(payload, &["analysis_type", "analysisType"])
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string(),
        created_at: probe_any(payload, &["created_at", "createdAt"])
            .and_then(Value::as_str)
            .and_then(parse_timestamp),
    })
}

/// Probes one key: `analysis_result.<key>` first, then the flat `<key>`.
fn probe<'a>(payload: &'a Value, key: &str) -> Option<&'a Value> {
    payload
        .get("analysis_result")
        .and_then(|nested| nested.get(key))
        .or_else(|| payload.get(key))
}

/// Probes a list of key spellings in order, nested-first for each.
fn probe_any<'a>(payload: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| probe(payload, key))
}

/// A mandatory category defaults to score 0 when the payload omits it.
fn mandatory_category(payload: &Value, keys: &[&str]) -> CategoryScore {
    scored(probe_any(payload, keys).and_then(as_score).unwrap_or(0))
}

/// An optional category stays absent when the payload omits it — absence is
/// meaningful (the engine never graded it) and is not coerced to zero.
fn optional_category(payload: &Value, keys: &[&str]) -> Option<CategoryScore> {
    probe_any(payload, keys).and_then(as_score).map(scored)
}

/// Reads a score value as an integer in `[0, 100]`. Accepts integers,
/// floats, and numeric strings; everything else is treated as absent.
fn as_score(value: &Value) -> Option<u8> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    if !number.is_finite() {
        return None;
    }
    Some(number.round().clamp(0.0, 100.0) as u8)
}

fn extract_feedback(payload: &Value) -> Feedback {
    Feedback {
        strengths: string_list(probe(payload, "strengths")),
        improvements: string_list(probe(payload, "improvements")),
        recommendations: recommendation_list(probe(payload, "recommendations")),
        overall_feedback: probe_any(payload, &["overall_feedback", "overallFeedback"])
            .and_then(Value::as_str)
            .map(annotate),
    }
}

/// A plain sequence of strings; non-string elements are skipped.
fn string_list(value: Option<&Value>) -> Vec<AnnotatedText> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(annotate)
                .collect()
        })
        .unwrap_or_default()
}

/// Recommendations come in two shapes: plain strings (older engines) or
/// structured objects exposing an `action` string (newer engines). The
/// first element decides which shape the list is read as.
fn recommendation_list(value: Option<&Value>) -> Vec<AnnotatedText> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    let structured = matches!(items.first(), Some(Value::Object(_)));
    items
        .iter()
        .filter_map(|item| {
            if structured {
                item.get("action").and_then(Value::as_str)
            } else {
                item.as_str()
            }
        })
        .map(annotate)
        .collect()
}

fn annotate(text: &str) -> AnnotatedText {
    AnnotatedText {
        text: text.to_string(),
        display: apply_emphasis(text),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::GradeRank;
    use serde_json::json;

    #[test]
    fn test_absent_payload_normalizes_to_none() {
        assert_eq!(normalize(None), None);
    }

    #[test]
    fn test_flat_payload_overall_grade() {
        let summary = normalize(Some(&json!({"overall_score": 73}))).unwrap();
        assert_eq!(summary.overall.score, 73);
        assert_eq!(summary.overall.grade.rank, GradeRank::BPlus);
    }

    #[test]
    fn test_legacy_nested_payload_with_structured_recommendations() {
        let payload = json!({
            "analysis_result": {"overall_score": 95, "education_score": 90},
            "recommendations": [{"action": "Add metrics"}]
        });
        let summary = normalize(Some(&payload)).unwrap();
        assert_eq!(summary.overall.grade.rank, GradeRank::APlus);
        assert_eq!(summary.categories.education.score, 90);
        // experience missing from both locations → mandatory default 0
        assert_eq!(summary.categories.experience.score, 0);
        assert_eq!(summary.feedback.recommendations.len(), 1);
        assert_eq!(summary.feedback.recommendations[0].text, "Add metrics");
    }

    #[test]
    fn test_nested_location_wins_over_flat_per_field() {
        let payload = json!({
            "analysis_result": {"overall_score": 88},
            "overall_score": 12,
            "skills_score": 61
        });
        let summary = normalize(Some(&payload)).unwrap();
        // overall resolved from the wrapper, skills fell back to flat
        assert_eq!(summary.overall.score, 88);
        assert_eq!(summary.categories.skills.score, 61);
    }

    #[test]
    fn test_plain_string_recommendations() {
        let payload = json!({"recommendations": ["포트폴리오 보강", "Add tests"]});
        let summary = normalize(Some(&payload)).unwrap();
        let texts: Vec<&str> = summary
            .feedback
            .recommendations
            .iter()
            .map(|r| r.text.as_str())
            .collect();
        assert_eq!(texts, vec!["포트폴리오 보강", "Add tests"]);
    }

    #[test]
    fn test_optional_categories_absent_stay_absent() {
        let summary = normalize(Some(&json!({"overall_score": 50}))).unwrap();
        assert!(summary.grammar.is_none());
        assert!(summary.job_matching.is_none());
    }

    #[test]
    fn test_optional_categories_present_are_graded() {
        let payload = json!({"grammar_score": 81, "job_matching_score": 44});
        let summary = normalize(Some(&payload)).unwrap();
        assert_eq!(summary.grammar.as_ref().unwrap().grade.rank, GradeRank::A);
        assert_eq!(
            summary.job_matching.as_ref().unwrap().grade.rank,
            GradeRank::C
        );
    }

    #[test]
    fn test_scores_clamp_to_hundred() {
        let summary = normalize(Some(&json!({"overall_score": 140}))).unwrap();
        assert_eq!(summary.overall.score, 100);
    }

    #[test]
    fn test_numeric_string_scores_accepted() {
        let summary = normalize(Some(&json!({"overall_score": "67"}))).unwrap();
        assert_eq!(summary.overall.score, 67);
        assert_eq!(summary.overall.grade.rank, GradeRank::B);
    }

    #[test]
    fn test_malformed_payload_degrades_to_defaults() {
        let payload = json!({
            "overall_score": "not-a-number",
            "strengths": "should be a list",
            "recommendations": [17, true]
        });
        let summary = normalize(Some(&payload)).unwrap();
        assert_eq!(summary.overall.score, 0);
        assert!(summary.feedback.strengths.is_empty());
        assert!(summary.feedback.recommendations.is_empty());
        assert_eq!(summary.analysis_type, "unknown");
        assert!(summary.created_at.is_none());
    }

    #[test]
    fn test_feedback_strings_are_annotated() {
        let payload = json!({"strengths": ["React 경험이 우수함"]});
        let summary = normalize(Some(&payload)).unwrap();
        let strength = &summary.feedback.strengths[0];
        assert_eq!(strength.text, "React 경험이 우수함");
        assert!(strength.display.contains(r#"<em class="tech">React</em>"#));
    }

    #[test]
    fn test_analysis_type_and_timestamp_resolved() {
        let payload = json!({
            "analysis_type": "resume-v2",
            "created_at": "2026-03-01T09:30:00Z"
        });
        let summary = normalize(Some(&payload)).unwrap();
        assert_eq!(summary.analysis_type, "resume-v2");
        assert!(summary.created_at.is_some());
    }
}
