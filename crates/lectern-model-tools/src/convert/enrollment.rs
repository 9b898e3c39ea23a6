use crate::convert::{FromDbModel, IntoDbModel, TryFromDbModel};
use crate::error::Error;
use lectern_entity::enrollment::{Model as EnrollmentModel, Status as EnrollmentStatusModel};
use lectern_model::enrollment::{EnrollmentState, EnrollmentStatus};
use num_traits::ToPrimitive;

/// Number of completed lessons and lessons in the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonCounts {
    pub completed: u64,
    pub total: u64,
}

impl FromDbModel<EnrollmentStatusModel> for EnrollmentStatus {
    fn from_db_model(model: EnrollmentStatusModel) -> Self {
        match model {
            EnrollmentStatusModel::Active => Self::Active,
            EnrollmentStatusModel::InProgress => Self::InProgress,
            EnrollmentStatusModel::Completed => Self::Completed,
            EnrollmentStatusModel::Dropped => Self::Dropped,
        }
    }
}

impl IntoDbModel<EnrollmentStatusModel> for EnrollmentStatus {
    fn into_db_model(self) -> EnrollmentStatusModel {
        match self {
            Self::Active => EnrollmentStatusModel::Active,
            Self::InProgress => EnrollmentStatusModel::InProgress,
            Self::Completed => EnrollmentStatusModel::Completed,
            Self::Dropped => EnrollmentStatusModel::Dropped,
        }
    }
}

impl TryFromDbModel<(EnrollmentModel, LessonCounts)> for EnrollmentState {
    type Error = Error;

    fn try_from_db_model((model, counts): (EnrollmentModel, LessonCounts)) -> Result<Self, Self::Error> {
        Ok(Self {
            enrollment_id: model.id,
            student_id: model.student_id,
            course_id: model.course_id,
            status: FromDbModel::from_db_model(model.status),
            progress: model.progress.to_u8().ok_or(Error::NumConversion)?,
            completed_lessons: counts.completed,
            total_lessons: counts.total,
            enrolled_at: model.enrolled_at,
            completed_at: model.completed_at,
            last_accessed: model.last_accessed,
        })
    }
}
