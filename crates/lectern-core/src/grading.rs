//! Quiz grading.

use crate::error::{LearningError, ValidationError};
use crate::retry::{Retry, Round};
use lectern_config::LecternConfig;
use lectern_db::enrollment;
use lectern_db::quiz::attempt::{self, NewAttempt, NewAttemptAnswer};
use lectern_db::quiz::{question, quiz};
use lectern_db::util::{is_lock_contention, is_unique_violation};
use lectern_entity::quiz::attempt::Model as Attempt;
use lectern_model::actor::{Actor, Capability};
use lectern_model::quiz::{Answer, GradeOutcome, Question, QuestionResult, Quiz, QuizAttemptResult};
use lectern_model_tools::convert::TryIntoModel;
use lectern_model_tools::error::Error as ConversionError;
use sea_orm::{ConnectionTrait, DatabaseTransaction, TransactionTrait};
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

/// Grades the answers against the questions of a quiz.
///
/// Questions without an answer, or answered with `selected_option: None`, score zero.
pub fn grade(questions: &[Question], answers: &[Answer]) -> Result<GradeOutcome, ValidationError> {
    let by_id: HashMap<Uuid, &Question> = questions.iter().map(|question| (question.id, question)).collect();

    let mut selected: HashMap<Uuid, Option<u32>> = HashMap::with_capacity(answers.len());
    for answer in answers {
        let Some(question) = by_id.get(&answer.question_id) else {
            return Err(ValidationError::UnknownQuestion(answer.question_id));
        };
        if let Some(option) = answer.selected_option {
            if usize::try_from(option).map_or(true, |option| option >= question.options.len()) {
                return Err(ValidationError::OptionOutOfRange {
                    question_id: question.id,
                    selected: option,
                    options: question.options.len(),
                });
            }
        }
        if selected.insert(answer.question_id, answer.selected_option).is_some() {
            return Err(ValidationError::DuplicateAnswer(answer.question_id));
        }
    }

    let results: Vec<QuestionResult> = questions
        .iter()
        .map(|question| {
            let selected_option = selected.get(&question.id).copied().flatten();
            let correct = selected_option == Some(question.correct_option);
            QuestionResult {
                question_id: question.id,
                selected_option,
                correct_option: question.correct_option,
                correct,
                points_awarded: if correct { question.points } else { 0 },
                points: question.points,
                explanation: question.explanation.clone(),
            }
        })
        .collect();

    let score = results.iter().fold(0u32, |sum, result| sum.saturating_add(result.points_awarded));
    let max_score = results.iter().fold(0u32, |sum, result| sum.saturating_add(result.points));

    Ok(GradeOutcome {
        score,
        max_score,
        percentage: percentage(score, max_score),
        questions: results,
    })
}

/// `score / max_score` in percent, 0 if there is nothing to score.
#[must_use]
pub fn percentage(score: u32, max_score: u32) -> f64 {
    if max_score == 0 {
        return 0.0;
    }
    f64::from(score) * 100.0 / f64::from(max_score)
}

/// Compares in integers so that e.g. 7 of 10 points pass a 70% quiz.
///
/// Nothing to score counts as 0%, which only passes a passing score of 0.
#[must_use]
pub fn passed(score: u32, max_score: u32, passing_score: u8) -> bool {
    if max_score == 0 {
        return passing_score == 0;
    }
    u64::from(score) * 100 >= u64::from(passing_score) * u64::from(max_score)
}

fn to_i32(value: u32) -> Result<i32, ConversionError> {
    i32::try_from(value).map_err(|_| ConversionError::NumConversion)
}

/// One transaction round of `submit_quiz_attempt`: numbers the attempt and stores it.
async fn attempt_round(
    txn: &DatabaseTransaction,
    enrollment_id: Uuid,
    limit: Option<u32>,
    graded: &NewAttempt,
    answers: &[NewAttemptAnswer],
) -> Result<Round<(Attempt, u32)>, LearningError> {
    // Takes the write lock before the attempts are counted, submissions of the student queue up behind it.
    enrollment::Mutation::touch(txn, enrollment_id).await?;

    let previous = attempt::Query::count_for_student(txn, graded.quiz_id, graded.student_id).await?;
    if let Some(limit) = limit {
        if previous >= u64::from(limit) {
            tracing::debug!(quiz_id = %graded.quiz_id, limit, "attempt limit reached");
            return Err(LearningError::AttemptLimitExceeded { limit });
        }
    }

    let attempt_number = u32::try_from(previous + 1).map_err(|_| ConversionError::NumConversion)?;
    let new_attempt = NewAttempt {
        attempt_number: to_i32(attempt_number)?,
        ..graded.clone()
    };
    match attempt::Mutation::insert_graded(txn, new_attempt, answers.to_vec()).await {
        Ok(stored) => Ok(Round::Done((stored, attempt_number))),
        Err(error) if is_unique_violation(&error) => {
            tracing::debug!(quiz_id = %graded.quiz_id, attempt_number, "attempt number taken");
            Ok(Round::Lost)
        }
        Err(error) => Err(error.into()),
    }
}

/// Grades and stores a quiz attempt of the actor.
#[instrument(skip(conn, config, actor, answers), fields(user_id = %actor.user_id))]
pub async fn submit_quiz_attempt<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    config: &LecternConfig,
    actor: &Actor,
    quiz_id: Uuid,
    answers: &[Answer],
) -> Result<QuizAttemptResult, LearningError> {
    actor.require(Capability::SubmitQuiz)?;

    let quiz: Quiz = quiz::Query::find_by_id(conn, quiz_id)
        .await?
        .filter(|quiz| quiz.published)
        .ok_or_else(|| LearningError::not_found("quiz", quiz_id))?
        .try_into_model()?;

    let enrollment = enrollment::Query::find_for_student(conn, actor.user_id, quiz.course_id)
        .await?
        .filter(|enrollment| enrollment.status.is_active())
        .ok_or(LearningError::NotEnrolled {
            course_id: quiz.course_id,
        })?;

    let questions = question::Query::list_for_quiz(conn, quiz_id)
        .await?
        .into_iter()
        .map(TryIntoModel::<Question>::try_into_model)
        .collect::<Result<Vec<Question>, _>>()?;

    let outcome = grade(&questions, answers)?;
    let passed = passed(outcome.score, outcome.max_score, quiz.passing_score);
    let limit = config.grading().attempt_limit(quiz.max_attempts);

    let graded = NewAttempt {
        quiz_id,
        student_id: actor.user_id,
        attempt_number: 0,
        score: to_i32(outcome.score)?,
        max_score: to_i32(outcome.max_score)?,
        percentage: outcome.percentage,
        passed,
    };
    let answer_rows = outcome
        .questions
        .iter()
        .map(|result| {
            Ok(NewAttemptAnswer {
                question_id: result.question_id,
                selected_option: result.selected_option.map(to_i32).transpose()?,
                correct: result.correct,
                points_awarded: to_i32(result.points_awarded)?,
            })
        })
        .collect::<Result<Vec<_>, ConversionError>>()?;

    let mut retry = Retry::new(config);
    loop {
        let txn = conn.begin().await?;
        match attempt_round(&txn, enrollment.id, limit, &graded, &answer_rows).await {
            Ok(Round::Done((stored, attempt_number))) => match txn.commit().await {
                Ok(()) => {
                    tracing::info!(
                        attempt_id = %stored.id,
                        attempt_number,
                        score = outcome.score,
                        max_score = outcome.max_score,
                        passed,
                        "graded quiz attempt"
                    );
                    return Ok(QuizAttemptResult {
                        attempt_id: stored.id,
                        quiz_id,
                        student_id: actor.user_id,
                        attempt_number,
                        score: outcome.score,
                        max_score: outcome.max_score,
                        percentage: outcome.percentage,
                        passing_score: quiz.passing_score,
                        passed,
                        remaining_attempts: limit.map(|limit| limit.saturating_sub(attempt_number)),
                        submitted_at: stored.submitted_at,
                        questions: outcome.questions,
                    });
                }
                Err(error) if is_lock_contention(&error) => {}
                Err(error) => return Err(error.into()),
            },
            Ok(Round::Lost) => txn.rollback().await?,
            Err(LearningError::Database(error)) if is_lock_contention(&error) => txn.rollback().await?,
            Err(error) => {
                txn.rollback().await?;
                return Err(error);
            }
        }

        tracing::debug!(%quiz_id, retries = retry.retries(), "quiz submission lost a race, retrying");
        retry
            .lost()
            .await
            .inspect_err(|_| tracing::warn!(%quiz_id, "giving up on quiz submission"))?;
    }
}
