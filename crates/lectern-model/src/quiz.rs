use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Quiz {
    pub id: Uuid,
    pub course_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<Uuid>,
    pub title: String,
    #[schema(minimum = 0, maximum = 100)]
    pub passing_score: u8,
    /// `None` means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    pub published: bool,
}

/// A multiple choice question including its solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub position: u32,
    pub text: String,
    pub options: Vec<String>,
    pub correct_option: u32,
    pub points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// The option a student picked for one question. `selected_option: null` leaves the question unanswered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Answer {
    pub question_id: Uuid,
    #[serde(default)]
    pub selected_option: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuestionResult {
    pub question_id: Uuid,
    pub selected_option: Option<u32>,
    pub correct_option: u32,
    pub correct: bool,
    pub points_awarded: u32,
    pub points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Outcome of grading, before anything is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GradeOutcome {
    pub score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub questions: Vec<QuestionResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuizAttemptResult {
    pub attempt_id: Uuid,
    pub quiz_id: Uuid,
    pub student_id: Uuid,
    pub attempt_number: u32,
    pub score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub passing_score: u8,
    pub passed: bool,
    /// `None` if the number of attempts is unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_attempts: Option<u32>,
    pub submitted_at: NaiveDateTime,
    pub questions: Vec<QuestionResult>,
}

/// A stored attempt without its answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttemptSummary {
    pub attempt_id: Uuid,
    pub attempt_number: u32,
    pub score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub passed: bool,
    pub submitted_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuizStatistics {
    pub quiz_id: Uuid,
    pub attempts: u64,
    pub passed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_percentage: Option<f64>,
    /// Share of passed attempts in percent, `None` without attempts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_without_selection() {
        let id = Uuid::new_v4();
        let answer: Answer = serde_json::from_str(&format!(r#"{{"question_id":"{id}"}}"#)).unwrap();
        assert_eq!(
            answer,
            Answer {
                question_id: id,
                selected_option: None
            }
        );
    }
}
