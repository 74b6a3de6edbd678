//! Turns raw student assessment records into a ranked leaderboard.
//!
//! Scores are normalized per workshop before they are averaged across
//! workshops, so a workshop with many quizzes weighs the same as a workshop
//! with a single exam.

use itertools::Itertools;

use crate::model::{AssessmentResult, LeaderboardEntry, Medal, Student};

/// Rank students by their overall score, highest first.
///
/// Students without assessment results are left out entirely. Ties keep
/// their input order.
pub fn rank_students(students: &[Student]) -> Vec<LeaderboardEntry> {
    let mut entries = students.iter().filter_map(leaderboard_entry).collect_vec();
    // `sort_by` is stable, equal scores keep their input order.
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    entries
}

/// The first three entries with their podium medal.
pub fn podium(entries: &[LeaderboardEntry]) -> impl Iterator<Item = (Medal, &LeaderboardEntry)> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(rank, entry)| Medal::for_rank(rank).map(|medal| (medal, entry)))
}

fn leaderboard_entry(student: &Student) -> Option<LeaderboardEntry> {
    let results = student
        .assessment_results
        .as_deref()
        .filter(|results| !results.is_empty())?;

    let workshops = results
        .iter()
        .into_group_map_by(|&result| &result.workshop_id);

    // Key order fixes the summation order so repeated runs agree bit for bit.
    let workshop_scores = workshops
        .iter()
        .sorted_by_key(|(workshop_id, _)| **workshop_id)
        .map(|(_, group)| mean(group.iter().map(|result| percentage(result))))
        .collect_vec();

    Some(LeaderboardEntry {
        id: student.id.clone(),
        name: format!("{} {}", student.first_name, student.last_name),
        email: student.email.clone(),
        score: round_to_hundredths(mean(workshop_scores)),
        assessment_count: results.len(),
        workshop_count: workshops.len(),
    })
}

/// Percentage of a single result. Anything that does not produce a finite
/// number (missing score, missing or zero total, bad marks) counts as 0.
fn percentage(result: &AssessmentResult) -> f64 {
    result
        .score
        .and_then(|score| Some(score.obtained_marks? / score.total_marks? * 100.0))
        .filter(|pct| pct.is_finite())
        .unwrap_or(0.0)
}

fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Score, WorkshopKey};

    fn student(id: &str, results: Option<Vec<AssessmentResult>>) -> Student {
        Student {
            id: Some(id.to_string()),
            first_name: id.to_uppercase(),
            last_name: "Doe".to_string(),
            email: format!("{id}@example.com"),
            assessment_results: results,
        }
    }

    fn result(workshop: &str, obtained: f64, total: f64) -> AssessmentResult {
        AssessmentResult::new(workshop, Score::new(obtained, total))
    }

    fn ids(entries: &[LeaderboardEntry]) -> Vec<&str> {
        entries.iter().filter_map(|e| e.id.as_deref()).collect()
    }

    #[test]
    fn test_two_level_average() {
        let students = vec![
            student("b", Some(vec![result("w1", 100.0, 100.0), result("w2", 0.0, 50.0)])),
            student("a", Some(vec![result("w1", 80.0, 100.0), result("w1", 60.0, 100.0)])),
            student("c", None),
        ];

        let ranked = rank_students(&students);

        assert_eq!(ids(&ranked), vec!["a", "b"]);
        assert_eq!(ranked[0].score, 70.0);
        assert_eq!(ranked[0].assessment_count, 2);
        assert_eq!(ranked[0].workshop_count, 1);
        assert_eq!(ranked[1].score, 50.0);
        assert_eq!(ranked[1].assessment_count, 2);
        assert_eq!(ranked[1].workshop_count, 2);
        assert_eq!(ranked[0].name, "A Doe");
        assert_eq!(ranked[0].email, "a@example.com");
    }

    #[test]
    fn test_workshops_weigh_equally() {
        // Four quizzes at 100% in one workshop, one exam at 0% in another.
        let students = vec![student(
            "q",
            Some(vec![
                result("quiz", 10.0, 10.0),
                result("quiz", 10.0, 10.0),
                result("quiz", 10.0, 10.0),
                result("quiz", 10.0, 10.0),
                result("exam", 0.0, 100.0),
            ]),
        )];

        let ranked = rank_students(&students);
        assert_eq!(ranked[0].score, 50.0);
        assert_eq!(ranked[0].assessment_count, 5);
        assert_eq!(ranked[0].workshop_count, 2);
    }

    #[test]
    fn test_students_without_results_are_excluded() {
        let students = vec![
            student("empty", Some(vec![])),
            student("absent", None),
            student("zero", Some(vec![result("w1", 0.0, 10.0)])),
        ];

        let ranked = rank_students(&students);
        assert_eq!(ids(&ranked), vec!["zero"]);
        assert_eq!(ranked[0].score, 0.0);
    }

    #[test]
    fn test_zero_total_contributes_zero_but_counts() {
        // Quirk kept on purpose: a zero total is a 0% result, not a skip.
        let students = vec![student(
            "z",
            Some(vec![result("w1", 90.0, 100.0), result("w1", 5.0, 0.0)]),
        )];

        let ranked = rank_students(&students);
        assert_eq!(ranked[0].score, 45.0);
        assert_eq!(ranked[0].assessment_count, 2);
    }

    #[test]
    fn test_missing_marks_contribute_zero() {
        let students = vec![student(
            "m",
            Some(vec![
                result("w1", 100.0, 100.0),
                AssessmentResult {
                    workshop_id: WorkshopKey::Id("w1".to_string()),
                    score: None,
                },
                AssessmentResult {
                    workshop_id: WorkshopKey::Id("w1".to_string()),
                    score: Some(Score {
                        obtained_marks: Some(3.0),
                        total_marks: None,
                    }),
                },
                AssessmentResult {
                    workshop_id: WorkshopKey::Id("w1".to_string()),
                    score: Some(Score {
                        obtained_marks: None,
                        total_marks: Some(10.0),
                    }),
                },
            ]),
        )];

        let ranked = rank_students(&students);
        assert_eq!(ranked[0].score, 25.0);
        assert!(ranked[0].score.is_finite());
    }

    #[test]
    fn test_missing_and_null_workshop_ids_are_separate_groups() {
        let keyed = |workshop_id: WorkshopKey, obtained: f64| AssessmentResult {
            workshop_id,
            score: Some(Score::new(obtained, 100.0)),
        };
        let students = vec![student(
            "u",
            Some(vec![
                keyed(WorkshopKey::Missing, 100.0),
                keyed(WorkshopKey::Null, 0.0),
                keyed(WorkshopKey::Null, 0.0),
            ]),
        )];

        let ranked = rank_students(&students);
        assert_eq!(ranked[0].workshop_count, 2);
        assert_eq!(ranked[0].score, 50.0);
    }

    #[test]
    fn test_untagged_results_group_together() {
        let untagged = |obtained: f64| AssessmentResult {
            workshop_id: WorkshopKey::Missing,
            score: Some(Score::new(obtained, 100.0)),
        };
        let students = vec![student(
            "u",
            Some(vec![untagged(20.0), untagged(40.0), result("w1", 90.0, 100.0)]),
        )];

        let ranked = rank_students(&students);
        assert_eq!(ranked[0].workshop_count, 2);
        assert_eq!(ranked[0].score, 60.0);
    }

    #[test]
    fn test_numeric_and_text_ids_share_a_workshop() {
        let students: Vec<Student> = serde_json::from_value(serde_json::json!([{
            "_id": "n",
            "assessmentResults": [
                { "workshopId": 7, "score": { "obtainedMarks": 100, "totalMarks": 100 } },
                { "workshopId": 7.0, "score": { "obtainedMarks": 0, "totalMarks": 100 } },
                { "workshopId": "7", "score": { "obtainedMarks": 50, "totalMarks": 100 } }
            ]
        }]))
        .unwrap();

        let ranked = rank_students(&students);
        assert_eq!(ranked[0].workshop_count, 1);
        assert_eq!(ranked[0].score, 50.0);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let students = vec![student(
            "r",
            Some(vec![result("w1", 1.0, 3.0), result("w2", 2.0, 3.0), result("w3", 2.0, 3.0)]),
        )];

        let ranked = rank_students(&students);
        assert_eq!(ranked[0].score, 55.56);
    }

    #[test]
    fn test_descending_and_stable() {
        let students = vec![
            student("first", Some(vec![result("w1", 50.0, 100.0)])),
            student("top", Some(vec![result("w1", 99.0, 100.0)])),
            student("second", Some(vec![result("w9", 1.0, 2.0)])),
            student("low", Some(vec![result("w1", 1.0, 100.0)])),
            student("third", Some(vec![result("w1", 50.0, 100.0), result("w1", 50.0, 100.0)])),
        ];

        let ranked = rank_students(&students);
        assert_eq!(ids(&ranked), vec!["top", "first", "second", "third", "low"]);
        assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn test_idempotent() {
        let students = vec![
            student("a", Some(vec![result("w1", 3.0, 7.0), result("w2", 5.0, 0.0)])),
            student("b", Some(vec![result("w1", 6.0, 7.0)])),
            student("c", Some(vec![])),
        ];

        assert_eq!(rank_students(&students), rank_students(&students));
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_students(&[]).is_empty());
        assert_eq!(podium(&[]).count(), 0);
    }

    #[test]
    fn test_podium_tags_top_three() {
        let students = (0..5)
            .map(|i| student(&format!("s{i}"), Some(vec![result("w", (90 - i * 10) as f64, 100.0)])))
            .collect_vec();
        let ranked = rank_students(&students);

        let medals = podium(&ranked)
            .map(|(medal, entry)| (medal, entry.id.as_deref().unwrap_or_default()))
            .collect_vec();
        assert_eq!(
            medals,
            vec![(Medal::Gold, "s0"), (Medal::Silver, "s1"), (Medal::Bronze, "s2")]
        );
    }

    #[test]
    fn test_mean_of_nothing_is_zero() {
        assert_eq!(mean(Vec::new()), 0.0);
    }
}
