use crate::convert::TryFromDbModel;
use crate::error::Error;
use lectern_entity::quiz::attempt::Model as AttemptModel;
use lectern_entity::quiz::question::Model as QuestionModel;
use lectern_entity::quiz::quiz::Model as QuizModel;
use lectern_model::quiz::{AttemptSummary, Question, Quiz};
use num_traits::ToPrimitive;

impl TryFromDbModel<QuizModel> for Quiz {
    type Error = Error;

    fn try_from_db_model(model: QuizModel) -> Result<Self, Self::Error> {
        let max_attempts = match model.max_attempts {
            None | Some(0) => None,
            Some(limit) => Some(limit.to_u32().ok_or(Error::NumConversion)?),
        };

        Ok(Self {
            id: model.id,
            course_id: model.course_id,
            lesson_id: model.lesson_id,
            title: model.title,
            passing_score: model.passing_score.to_u8().ok_or(Error::NumConversion)?,
            max_attempts,
            published: model.published,
        })
    }
}

impl TryFromDbModel<QuestionModel> for Question {
    type Error = Error;

    fn try_from_db_model(model: QuestionModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            quiz_id: model.quiz_id,
            position: model.position.to_u32().ok_or(Error::NumConversion)?,
            text: model.text,
            options: serde_json::from_str(&model.options)?,
            correct_option: model.correct_option.to_u32().ok_or(Error::NumConversion)?,
            points: model.points.to_u32().ok_or(Error::NumConversion)?,
            explanation: model.explanation,
        })
    }
}

impl TryFromDbModel<AttemptModel> for AttemptSummary {
    type Error = Error;

    fn try_from_db_model(model: AttemptModel) -> Result<Self, Self::Error> {
        Ok(Self {
            attempt_id: model.id,
            attempt_number: model.attempt_number.to_u32().ok_or(Error::NumConversion)?,
            score: model.score.to_u32().ok_or(Error::NumConversion)?,
            max_score: model.max_score.to_u32().ok_or(Error::NumConversion)?,
            percentage: model.percentage,
            passed: model.passed,
            submitted_at: model.submitted_at,
        })
    }
}
