//! Course authoring: courses, lessons, quizzes and questions.

use crate::actor::require_owner;
use crate::error::{LearningError, ValidationError};
use lectern_config::LecternConfig;
use lectern_db::quiz::question::{self, NewQuestion};
use lectern_db::quiz::quiz::{self, NewQuiz};
use lectern_db::util::is_unique_violation;
use lectern_db::{course, lesson};
use lectern_entity::course::{Model as CourseModel, Status as CourseStatus};
use lectern_entity::quiz::quiz::Model as QuizModel;
use lectern_model::actor::{Actor, Capability};
use lectern_model::course::{Course, Lesson};
use lectern_model::quiz::{Question, Quiz};
use lectern_model_tools::convert::{IntoModel, TryIntoModel};
use lectern_model_tools::error::Error as ConversionError;
use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::instrument;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CourseDraft {
    pub title: String,
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct QuizDraft {
    pub course_id: Uuid,
    pub lesson_id: Option<Uuid>,
    pub title: String,
    /// Falls back to the configured default.
    pub passing_score: Option<u8>,
    /// `None` or `Some(0)` falls back to `grading.default-max-attempts`, unlimited if that is unset as well.
    pub max_attempts: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct QuestionDraft {
    pub text: String,
    pub options: Vec<String>,
    pub correct_option: u32,
    pub points: u32,
    pub explanation: Option<String>,
}

fn non_empty(value: &str, what: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(what));
    }
    Ok(())
}

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    non_empty(slug, "slug")?;
    if slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        Ok(())
    } else {
        Err(ValidationError::InvalidSlug(slug.to_owned()))
    }
}

impl QuestionDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_empty(&self.text, "question text")?;
        if self.options.len() < 2 {
            return Err(ValidationError::NotEnoughOptions);
        }
        if self.options.iter().any(|option| option.trim().is_empty()) {
            return Err(ValidationError::Empty("option"));
        }
        if usize::try_from(self.correct_option).map_or(true, |correct| correct >= self.options.len()) {
            return Err(ValidationError::CorrectOptionOutOfRange {
                correct: self.correct_option,
                options: self.options.len(),
            });
        }
        if self.points == 0 {
            return Err(ValidationError::InvalidPoints);
        }
        Ok(())
    }
}

async fn owned_course<C: ConnectionTrait>(
    conn: &C,
    actor: &Actor,
    course_id: Uuid,
) -> Result<CourseModel, LearningError> {
    let course = course::Query::find_by_id(conn, course_id)
        .await?
        .ok_or_else(|| LearningError::not_found("course", course_id))?;
    require_owner(actor, Capability::AuthorCourses, &course)?;
    Ok(course)
}

async fn owned_quiz<C: ConnectionTrait>(conn: &C, actor: &Actor, quiz_id: Uuid) -> Result<QuizModel, LearningError> {
    let quiz = quiz::Query::find_by_id(conn, quiz_id)
        .await?
        .ok_or_else(|| LearningError::not_found("quiz", quiz_id))?;
    owned_course(conn, actor, quiz.course_id).await?;
    Ok(quiz)
}

/// Creates a draft course owned by the actor.
#[instrument(skip(conn, actor, draft), fields(user_id = %actor.user_id, slug = %draft.slug))]
pub async fn create_course<C: ConnectionTrait>(
    conn: &C,
    actor: &Actor,
    draft: CourseDraft,
) -> Result<Course, LearningError> {
    actor.require(Capability::AuthorCourses)?;
    non_empty(&draft.title, "title")?;
    validate_slug(&draft.slug)?;

    let slug = draft.slug.clone();
    let course = course::Mutation::create(conn, actor.user_id, draft.title, draft.slug, draft.description)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                LearningError::from(ValidationError::SlugTaken(slug))
            } else {
                error.into()
            }
        })?;
    Ok(course.into_model())
}

pub async fn publish_course<C: ConnectionTrait>(
    conn: &C,
    actor: &Actor,
    course_id: Uuid,
) -> Result<Course, LearningError> {
    let course = owned_course(conn, actor, course_id).await?;
    if course.status == CourseStatus::Published {
        return Ok(course.into_model());
    }
    tracing::info!(%course_id, "publishing course");
    Ok(course::Mutation::set_status(conn, course_id, CourseStatus::Published)
        .await?
        .into_model())
}

/// Appends a lesson to the end of the course.
pub async fn add_lesson<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    actor: &Actor,
    course_id: Uuid,
    title: String,
    content_url: Option<String>,
) -> Result<Lesson, LearningError> {
    owned_course(conn, actor, course_id).await?;
    non_empty(&title, "title")?;

    let lesson = lesson::Mutation::append(conn, course_id, title, content_url).await?;
    Ok(lesson.try_into_model()?)
}

pub async fn create_quiz<C: ConnectionTrait>(
    conn: &C,
    config: &LecternConfig,
    actor: &Actor,
    draft: QuizDraft,
) -> Result<Quiz, LearningError> {
    owned_course(conn, actor, draft.course_id).await?;
    non_empty(&draft.title, "title")?;

    let passing_score = draft.passing_score.unwrap_or(config.grading().default_passing_score);
    if passing_score > 100 {
        return Err(ValidationError::InvalidPassingScore(passing_score).into());
    }
    if let Some(lesson_id) = draft.lesson_id {
        let lesson = lesson::Query::find_by_id(conn, lesson_id)
            .await?
            .ok_or_else(|| LearningError::not_found("lesson", lesson_id))?;
        if lesson.course_id != draft.course_id {
            return Err(ValidationError::LessonNotInCourse {
                lesson_id,
                course_id: draft.course_id,
            }
            .into());
        }
    }
    let max_attempts = draft
        .max_attempts
        .map(|limit| i32::try_from(limit).map_err(|_| ConversionError::NumConversion))
        .transpose()?;

    let quiz = quiz::Mutation::create(
        conn,
        NewQuiz {
            course_id: draft.course_id,
            lesson_id: draft.lesson_id,
            title: draft.title,
            passing_score: i16::from(passing_score),
            max_attempts,
        },
    )
    .await?;
    tracing::debug!(quiz_id = %quiz.id, passing_score, "created quiz");
    Ok(quiz.try_into_model()?)
}

/// Appends a question to the quiz.
pub async fn add_question<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    actor: &Actor,
    quiz_id: Uuid,
    draft: QuestionDraft,
) -> Result<Question, LearningError> {
    owned_quiz(conn, actor, quiz_id).await?;
    draft.validate()?;

    let new_question = NewQuestion {
        text: draft.text,
        options: draft.options,
        correct_option: i32::try_from(draft.correct_option).map_err(|_| ConversionError::NumConversion)?,
        points: i32::try_from(draft.points).map_err(|_| ConversionError::NumConversion)?,
        explanation: draft.explanation,
    };
    let question = question::Mutation::append(conn, quiz_id, new_question).await?;
    Ok(question.try_into_model()?)
}

/// Publishes the quiz. A quiz without questions cannot be published.
pub async fn publish_quiz<C: ConnectionTrait>(conn: &C, actor: &Actor, quiz_id: Uuid) -> Result<Quiz, LearningError> {
    let quiz = owned_quiz(conn, actor, quiz_id).await?;
    if quiz.published {
        return Ok(quiz.try_into_model()?);
    }
    if question::Query::list_for_quiz(conn, quiz_id).await?.is_empty() {
        return Err(ValidationError::NoQuestions.into());
    }

    tracing::info!(%quiz_id, "publishing quiz");
    Ok(quiz::Mutation::set_published(conn, quiz_id, true)
        .await?
        .try_into_model()?)
}
