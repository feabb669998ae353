pub mod assessment_handler;
pub mod extract;
pub mod question_handler;

use axum::Json;
use axum::http::HeaderName;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::services::grid::{GridPage, GridQuery, GridRow};

pub const TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

/// Serializes a list, applying grid parameters when any were sent.
pub fn grid_response<T>(grid: &GridQuery, rows: Vec<T>) -> Response
where
    T: GridRow + Serialize,
{
    let page = if grid.is_active() {
        grid.apply(rows)
    } else {
        let total = rows.len();
        GridPage { rows, total }
    };

    ([(TOTAL_COUNT, page.total.to_string())], Json(page.rows)).into_response()
}
