use lectern_model::actor::{Capability, MissingCapability};
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::borrow::Cow;
use strum::{AsRefStr, Display};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Rejected input. Nothing was written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("lesson {lesson_id} does not belong to course {course_id}")]
    LessonNotInCourse { lesson_id: Uuid, course_id: Uuid },
    #[error("question {0} is not part of the quiz")]
    UnknownQuestion(Uuid),
    #[error("question {0} was answered more than once")]
    DuplicateAnswer(Uuid),
    #[error("option {selected} of question {question_id} does not exist ({options} options)")]
    OptionOutOfRange {
        question_id: Uuid,
        selected: u32,
        options: usize,
    },
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
    #[error("passing score must be at most 100, got {0}")]
    InvalidPassingScore(u8),
    #[error("a question needs at least two options")]
    NotEnoughOptions,
    #[error("correct option {correct} is out of range ({options} options)")]
    CorrectOptionOutOfRange { correct: u32, options: usize },
    #[error("a question is worth at least one point")]
    InvalidPoints,
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("slug {0:?} may only contain lowercase letters, digits and dashes")]
    InvalidSlug(String),
    #[error("slug {0:?} is already taken")]
    SlugTaken(String),
    #[error("quiz has no questions")]
    NoQuestions,
    #[error("a completed enrollment cannot be dropped")]
    EnrollmentCompleted,
    #[error("the course has to be completed first")]
    CourseNotCompleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Forbidden {
    #[error("role {role} lacks capability {capability}")]
    MissingCapability {
        role: lectern_model::actor::Role,
        capability: Capability,
    },
    #[error("course {0} is owned by another instructor")]
    NotCourseOwner(Uuid),
}

#[derive(Debug, Error)]
pub enum LearningError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("not enrolled in course {course_id}")]
    NotEnrolled { course_id: Uuid },
    #[error("attempt limit of {limit} reached")]
    AttemptLimitExceeded { limit: u32 },
    #[error("course {course_id} was already reviewed")]
    DuplicateReview { course_id: Uuid },
    #[error(transparent)]
    Forbidden(#[from] Forbidden),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },
    #[error("concurrent update, gave up after {retries} retries")]
    Conflict { retries: u32 },
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    #[error("Invalid stored data: {0}")]
    StoredData(#[from] lectern_model_tools::error::Error),
}

impl From<MissingCapability> for LearningError {
    fn from(value: MissingCapability) -> Self {
        Forbidden::MissingCapability {
            role: value.role,
            capability: value.capability,
        }
        .into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotEnrolled,
    AttemptLimitExceeded,
    DuplicateReview,
    Forbidden,
    NotFound,
    Conflict,
    Database,
}

/// User facing error description.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorData {
    pub error: ErrorKind,
    pub error_description: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl ErrorData {
    pub fn new<A: Into<Cow<'static, str>>>(error: ErrorKind, error_description: A) -> Self {
        Self {
            error,
            error_description: error_description.into(),
            data: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        if let Value::Object(map) = data {
            self.data = Some(map);
        }
        self
    }
}

impl LearningError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotEnrolled { .. } => ErrorKind::NotEnrolled,
            Self::AttemptLimitExceeded { .. } => ErrorKind::AttemptLimitExceeded,
            Self::DuplicateReview { .. } => ErrorKind::DuplicateReview,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Database(_) | Self::StoredData(_) => ErrorKind::Database,
        }
    }

    /// Internal errors carry no user data.
    #[must_use]
    pub fn error_data(&self) -> Option<ErrorData> {
        let kind = self.kind();
        let res = match self {
            Self::Validation(error) => ErrorData::new(kind, error.to_string()),
            Self::NotEnrolled { course_id } => {
                ErrorData::new(kind, "not enrolled in this course").with_data(json!({ "course_id": course_id }))
            }
            Self::AttemptLimitExceeded { limit } => {
                ErrorData::new(kind, "no attempts left for this quiz").with_data(json!({ "limit": limit }))
            }
            Self::DuplicateReview { course_id } => {
                ErrorData::new(kind, "course was already reviewed").with_data(json!({ "course_id": course_id }))
            }
            Self::Forbidden(_) => ErrorData::new(kind, "not allowed"),
            Self::NotFound { entity, .. } => ErrorData::new(kind, format!("{entity} not found")),
            Self::Conflict { .. } => ErrorData::new(kind, "concurrent update, please retry"),
            Self::Database(_) | Self::StoredData(_) => return None,
        };
        Some(res)
    }

    pub(crate) fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_model::actor::Role;

    #[test]
    fn test_error_data() {
        let data = LearningError::AttemptLimitExceeded { limit: 3 }.error_data().unwrap();
        assert_eq!(data.error, ErrorKind::AttemptLimitExceeded);
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({
                "error": "attempt_limit_exceeded",
                "error_description": "no attempts left for this quiz",
                "data": { "limit": 3 }
            })
        );
    }

    #[test]
    fn test_database_error_is_hidden() {
        let error = LearningError::from(DbErr::Custom("connection reset".to_owned()));
        assert_eq!(error.kind(), ErrorKind::Database);
        assert!(error.error_data().is_none());
    }

    #[test]
    fn test_missing_capability() {
        let error: LearningError = MissingCapability {
            role: Role::Instructor,
            capability: Capability::SubmitQuiz,
        }
        .into();
        assert_eq!(error.kind(), ErrorKind::Forbidden);
        assert_eq!(error.to_string(), "role instructor lacks capability submit_quiz");
    }

    #[test]
    fn test_validation_description() {
        let data = LearningError::from(ValidationError::InvalidRating(7)).error_data().unwrap();
        assert_eq!(data.error_description, "rating must be between 1 and 5, got 7");
        assert!(data.data.is_none());
    }
}
