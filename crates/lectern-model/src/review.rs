use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub course_id: Uuid,
    pub student_id: Uuid,
    #[schema(minimum = 1, maximum = 5)]
    pub rating: u8,
    pub comment: String,
    /// Set when the reviewer completed the course.
    pub verified: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourseRating {
    pub course_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    pub count: u64,
}
