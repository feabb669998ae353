pub mod assessment_service;
pub mod errors;
pub mod grid;
pub mod question_service;
