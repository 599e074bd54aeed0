//! Router assembly

use super::handlers::{authors, courses, root};
use super::middleware::{handle_panic, problem_details, require_acceptable};
use super::state::AppState;
use crate::links::paths;
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Build the full API router
///
/// Routes:
/// - GET /api - Root document
/// - GET|POST|OPTIONS /api/authors - Author collection
/// - GET|DELETE /api/authors/{authorId} - Single author
/// - GET|POST|OPTIONS /api/authors/{authorId}/courses - Course collection
/// - GET|PUT|DELETE /api/authors/{authorId}/courses/{courseId} - Single course
pub fn build_router(state: AppState) -> Router {
    let environment = state.config.environment;

    Router::new()
        .route(paths::ROOT, get(root::get_root))
        .route(
            paths::AUTHORS,
            get(authors::get_authors)
                .post(authors::create_author)
                .options(authors::options_authors),
        )
        .route(
            paths::AUTHOR,
            get(authors::get_author).delete(authors::delete_author),
        )
        .route(
            paths::COURSES,
            get(courses::get_courses_for_author)
                .post(courses::create_course_for_author)
                .options(courses::options_courses),
        )
        .route(
            paths::COURSE,
            get(courses::get_course_for_author)
                .put(courses::update_course_for_author)
                .delete(courses::delete_course_for_author),
        )
        .layer(from_fn(require_acceptable))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(from_fn_with_state(environment, problem_details))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
