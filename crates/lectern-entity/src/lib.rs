pub mod course;
pub mod enrollment;
pub mod lesson;
pub mod lesson_completion;
pub mod quiz;
pub mod review;
pub mod user;
