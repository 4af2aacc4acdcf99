#![allow(dead_code)]

//! Feedback text emphasis — a fixed, ordered rule list applied left-to-right.
//!
//! Rules only wrap matched substrings in presentation markup; the underlying
//! text is never altered. Rules are NOT mutually exclusive: a later rule may
//! re-wrap text a previous rule already wrapped (e.g. a technology keyword
//! inside a highlighted score phrase). That overlap is the long-standing
//! display behavior of the applicant screen and is kept as-is, not
//! deduplicated.

use std::sync::LazyLock;

use regex::Regex;

/// Integer-followed-by-"점" score tokens, e.g. "92점".
static SCORE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+점").expect("valid score-token regex"));

/// Positive sentiment markers seen in evaluator feedback.
const POSITIVE_KEYWORDS: &[&str] = &[
    "우수", "뛰어난", "탁월", "강점", "excellent", "outstanding", "strong",
];

/// Negative sentiment / improvement markers.
const NEGATIVE_KEYWORDS: &[&str] = &[
    "부족", "미흡", "아쉬운", "개선", "보완", "weak", "lacking",
];

/// Technology keywords worth calling out in a candidate's feedback.
const TECH_KEYWORDS: &[&str] = &[
    "Java", "Python", "JavaScript", "TypeScript", "React", "Spring",
    "Kubernetes", "Docker", "AWS", "SQL", "Kotlin", "Rust",
];

/// Engineering-process keywords.
const PROCESS_KEYWORDS: &[&str] = &[
    "CI/CD", "TDD", "코드 리뷰", "애자일", "스크럼", "페어 프로그래밍",
];

/// Applies the emphasis rules in their fixed order and returns the marked-up
/// rendition. The input text always survives verbatim inside the markup.
pub fn apply_emphasis(text: &str) -> String {
    let mut out = SCORE_TOKEN
        .replace_all(text, |caps: &regex::Captures| wrap(&caps[0], "score"))
        .into_owned();
    out = wrap_keywords(&out, POSITIVE_KEYWORDS, "positive");
    out = wrap_keywords(&out, NEGATIVE_KEYWORDS, "negative");
    out = wrap_keywords(&out, TECH_KEYWORDS, "tech");
    out = wrap_keywords(&out, PROCESS_KEYWORDS, "process");
    out
}

fn wrap(text: &str, class: &str) -> String {
    format!(r#"<em class="{class}">{text}</em>"#)
}

fn wrap_keywords(text: &str, keywords: &[&str], class: &str) -> String {
    let mut out = text.to_string();
    for keyword in keywords {
        if out.contains(keyword) {
            out = out.replace(keyword, &wrap(keyword, class));
        }
    }
    out
}

/// Strips every emphasis tag, recovering the original text.
pub fn strip_emphasis(display: &str) -> String {
    static TAGS: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"</?em(?: class="[a-z]+")?>"#).expect("valid tag regex"));
    TAGS.replace_all(display, "").into_owned()
}
