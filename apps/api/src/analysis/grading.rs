//! Score → grade mapping. Fixed, non-overlapping thresholds, highest first.

use crate::models::analysis::{CategoryScore, GradeLabel, GradeRank};

/// Derives the grade for an integer score in `[0, 100]`.
pub fn grade_for_score(score: u8) -> GradeLabel {
    let rank = if score >= 90 {
        GradeRank::APlus
    } else if score >= 80 {
        GradeRank::A
    } else if score >= 70 {
        GradeRank::BPlus
    } else if score >= 60 {
        GradeRank::B
    } else if score >= 50 {
        GradeRank::CPlus
    } else if score >= 40 {
        GradeRank::C
    } else {
        GradeRank::D
    };
    GradeLabel::of(rank)
}

/// Pairs a score with its derived grade.
pub fn scored(score: u8) -> CategoryScore {
    CategoryScore {
        score,
        grade: grade_for_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::GradeTier;

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(grade_for_score(100).rank, GradeRank::APlus);
        assert_eq!(grade_for_score(90).rank, GradeRank::APlus);
        assert_eq!(grade_for_score(89).rank, GradeRank::A);
        assert_eq!(grade_for_score(80).rank, GradeRank::A);
        assert_eq!(grade_for_score(79).rank, GradeRank::BPlus);
        assert_eq!(grade_for_score(73).rank, GradeRank::BPlus);
        assert_eq!(grade_for_score(70).rank, GradeRank::BPlus);
        assert_eq!(grade_for_score(69).rank, GradeRank::B);
        assert_eq!(grade_for_score(60).rank, GradeRank::B);
        assert_eq!(grade_for_score(59).rank, GradeRank::CPlus);
        assert_eq!(grade_for_score(50).rank, GradeRank::CPlus);
        assert_eq!(grade_for_score(49).rank, GradeRank::C);
        assert_eq!(grade_for_score(40).rank, GradeRank::C);
        assert_eq!(grade_for_score(39).rank, GradeRank::D);
        assert_eq!(grade_for_score(0).rank, GradeRank::D);
    }

    #[test]
    fn test_grades_are_monotonic_in_score() {
        // Walking the full range must never produce a better grade for a
        // lower score.
        let order = [
            GradeRank::D,
            GradeRank::C,
            GradeRank::CPlus,
            GradeRank::B,
            GradeRank::BPlus,
            GradeRank::A,
            GradeRank::APlus,
        ];
        let position =
            |r: GradeRank| order.iter().position(|o| *o == r).expect("known rank");

        let mut last = 0;
        for score in 0..=100u8 {
            let current = position(grade_for_score(score).rank);
            assert!(current >= last, "grade regressed at score {score}");
            last = current;
        }
    }

    #[test]
    fn test_scored_carries_matching_grade() {
        let cs = scored(95);
        assert_eq!(cs.score, 95);
        assert_eq!(cs.grade.rank, GradeRank::APlus);
        assert_eq!(cs.grade.tier, GradeTier::Excellent);
    }
}
