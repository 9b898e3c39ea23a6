pub mod actor;
pub mod catalog;
pub mod enrollment;
pub mod error;
pub mod grading;
pub mod progress;
mod retry;
pub mod review;
pub mod statistics;

pub use actor::LoadActor;
pub use error::{LearningError, ValidationError};
