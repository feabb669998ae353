pub mod assessment_routes;
pub mod question_routes;
