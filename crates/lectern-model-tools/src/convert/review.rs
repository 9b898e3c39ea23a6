use crate::convert::TryFromDbModel;
use crate::error::Error;
use lectern_entity::review::Model as ReviewModel;
use lectern_model::review::Review;
use num_traits::ToPrimitive;

impl TryFromDbModel<ReviewModel> for Review {
    type Error = Error;

    fn try_from_db_model(model: ReviewModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            course_id: model.course_id,
            student_id: model.student_id,
            rating: model.rating.to_u8().ok_or(Error::NumConversion)?,
            comment: model.comment,
            verified: model.verified,
            created_at: model.created_at,
        })
    }
}
