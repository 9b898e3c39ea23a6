pub mod attempt;
pub mod attempt_answer;
pub mod question;
#[allow(clippy::module_inception)]
pub mod quiz;
