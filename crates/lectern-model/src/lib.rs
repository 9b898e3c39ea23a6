pub mod actor;
pub mod course;
pub mod enrollment;
pub mod quiz;
pub mod review;
