use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EnrollmentStatus {
    /// Enrolled, no lesson completed yet.
    Active,
    InProgress,
    Completed,
    Dropped,
}

/// The progress of one student in one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentState {
    pub enrollment_id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub status: EnrollmentStatus,
    #[schema(minimum = 0, maximum = 100)]
    pub progress: u8,
    pub completed_lessons: u64,
    pub total_lessons: u64,
    pub enrolled_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDateTime>,
    pub last_accessed: NaiveDateTime,
}

/// Number of enrollments per status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CourseProgressSummary {
    pub course_id: Uuid,
    pub active: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub dropped: u64,
}

impl CourseProgressSummary {
    #[must_use]
    pub fn enrolled(&self) -> u64 {
        self.active + self.in_progress + self.completed
    }

    pub fn add(&mut self, status: EnrollmentStatus, count: u64) {
        let slot = match status {
            EnrollmentStatus::Active => &mut self.active,
            EnrollmentStatus::InProgress => &mut self.in_progress,
            EnrollmentStatus::Completed => &mut self.completed,
            EnrollmentStatus::Dropped => &mut self.dropped,
        };
        *slot += count;
    }
}
