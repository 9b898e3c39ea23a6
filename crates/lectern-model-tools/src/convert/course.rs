use crate::convert::{FromDbModel, IntoDbModel, TryFromDbModel};
use crate::error::Error;
use lectern_entity::course::{Model as CourseModel, Status as CourseStatusModel};
use lectern_entity::lesson::Model as LessonModel;
use lectern_model::course::{Course, CourseStatus, Lesson};
use num_traits::ToPrimitive;

impl FromDbModel<CourseStatusModel> for CourseStatus {
    fn from_db_model(model: CourseStatusModel) -> Self {
        match model {
            CourseStatusModel::Draft => Self::Draft,
            CourseStatusModel::Published => Self::Published,
            CourseStatusModel::Archived => Self::Archived,
        }
    }
}

impl IntoDbModel<CourseStatusModel> for CourseStatus {
    fn into_db_model(self) -> CourseStatusModel {
        match self {
            Self::Draft => CourseStatusModel::Draft,
            Self::Published => CourseStatusModel::Published,
            Self::Archived => CourseStatusModel::Archived,
        }
    }
}

impl FromDbModel<CourseModel> for Course {
    fn from_db_model(model: CourseModel) -> Self {
        Self {
            id: model.id,
            instructor_id: model.instructor_id,
            title: model.title,
            slug: model.slug,
            description: model.description,
            status: FromDbModel::from_db_model(model.status),
            created_at: model.created_at,
        }
    }
}

impl TryFromDbModel<LessonModel> for Lesson {
    type Error = Error;

    fn try_from_db_model(model: LessonModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            course_id: model.course_id,
            title: model.title,
            position: model.position.to_u32().ok_or(Error::NumConversion)?,
            content_url: model.content_url,
        })
    }
}
