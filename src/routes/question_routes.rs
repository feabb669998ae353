use crate::AppState;
use crate::handlers::question_handler::{
    create_question, delete_question, get_question, import_questions, list_questions,
    update_question,
};
use axum::{
    Router,
    routing::{get, post},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_question).get(list_questions))
        .route("/import", post(import_questions))
        .route(
            "/:id",
            get(get_question).put(update_question).delete(delete_question),
        )
}
