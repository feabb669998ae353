use crate::AppState;
use crate::handlers::assessment_handler::{
    create_assessment, delete_assessment, get_assessment, list_assessments, update_assessment,
};
use axum::{
    Router,
    routing::{get, post},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_assessment).get(list_assessments))
        .route(
            "/:id",
            get(get_assessment)
                .put(update_assessment)
                .delete(delete_assessment),
        )
}
