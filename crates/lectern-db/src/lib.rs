pub mod course;
pub mod enrollment;
pub mod lesson;
pub mod lesson_completion;
pub mod quiz;
pub mod review;
pub mod schema;
pub mod user;
pub mod util;

pub use sea_orm;
