//! Course resource handlers, nested under their author

use super::{COLLECTION_METHODS, ensure_fields, header_value};
use crate::core::error::{ApiError, RequestError};
use crate::core::property_mapping::sort_by_columns;
use crate::core::query::CoursesResourceParameters;
use crate::core::shaping::{ShapedEntity, shape_collection, shape_data};
use crate::core::validation::{ResourcePath, ResourceQuery, ValidatedJson};
use crate::entities::{Course, CourseDto, CourseForCreation, CourseForUpdate};
use crate::links::descriptor::LinkedCollection;
use crate::links::resources::{links_for_course, links_for_courses};
use crate::server::state::AppState;
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

async fn ensure_author(state: &AppState, author_id: Uuid) -> Result<(), ApiError> {
    if state.repository.author_exists(author_id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound)
    }
}

fn linked_course(state: &AppState, course: &Course) -> Result<ShapedEntity, ApiError> {
    let mut shaped = shape_data(&CourseDto::from(course), None);
    shaped.insert("links", links_for_course(&state.routes, course.author_id, course.id)?);
    Ok(shaped)
}

fn created(state: &AppState, course: &Course) -> Result<Response, ApiError> {
    let links = links_for_course(&state.routes, course.author_id, course.id)?;
    let location = header_value(&links[0].href)?;

    let mut shaped = shape_data(&CourseDto::from(course), None);
    shaped.insert("links", links);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(shaped)).into_response())
}

/// `GET /api/authors/{authorId}/courses`
pub async fn get_courses_for_author(
    State(state): State<AppState>,
    ResourcePath(author_id): ResourcePath<Uuid>,
    ResourceQuery(parameters): ResourceQuery<CoursesResourceParameters>,
) -> Result<Json<LinkedCollection<ShapedEntity>>, ApiError> {
    let order_by = parameters.order_by.as_deref();
    if !state
        .property_mappings
        .valid_mapping_exists_for::<CourseDto, Course>(order_by)?
    {
        return Err(RequestError::InvalidOrderBy {
            order_by: order_by.unwrap_or_default().to_string(),
        }
        .into());
    }
    let fields = parameters.fields.as_deref();
    ensure_fields::<CourseDto>(fields)?;
    ensure_author(&state, author_id).await?;

    let mut courses = state.repository.get_courses(author_id).await?;
    let columns = state
        .property_mappings
        .resolve_order_by::<CourseDto, Course>(order_by)?;
    sort_by_columns(&mut courses, &columns);

    let dtos: Vec<CourseDto> = courses.iter().map(CourseDto::from).collect();
    let value = shape_collection(&dtos, fields)
        .into_iter()
        .zip(&courses)
        .map(|(mut shaped, course)| -> Result<ShapedEntity, ApiError> {
            shaped.insert("links", links_for_course(&state.routes, author_id, course.id)?);
            Ok(shaped)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(LinkedCollection {
        value,
        links: links_for_courses(&state.routes, author_id)?,
    }))
}

/// `GET /api/authors/{authorId}/courses/{courseId}`
pub async fn get_course_for_author(
    State(state): State<AppState>,
    ResourcePath((author_id, course_id)): ResourcePath<(Uuid, Uuid)>,
) -> Result<Json<ShapedEntity>, ApiError> {
    ensure_author(&state, author_id).await?;

    let course = state
        .repository
        .get_course(author_id, course_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(linked_course(&state, &course)?))
}

/// `POST /api/authors/{authorId}/courses`
pub async fn create_course_for_author(
    State(state): State<AppState>,
    ResourcePath(author_id): ResourcePath<Uuid>,
    ValidatedJson(payload): ValidatedJson<CourseForCreation>,
) -> Result<Response, ApiError> {
    ensure_author(&state, author_id).await?;

    let course = payload.into_course(Uuid::new_v4(), author_id);
    state.repository.add_course(author_id, course.clone()).await?;
    state.repository.save().await?;
    tracing::info!(author_id = %author_id, course_id = %course.id, "created course");

    created(&state, &course)
}

/// `PUT /api/authors/{authorId}/courses/{courseId}`
///
/// Replaces an existing course (204), or creates it under the given id (201).
/// An id already owned by another author is refused (409).
pub async fn update_course_for_author(
    State(state): State<AppState>,
    ResourcePath((author_id, course_id)): ResourcePath<(Uuid, Uuid)>,
    ValidatedJson(payload): ValidatedJson<CourseForUpdate>,
) -> Result<Response, ApiError> {
    ensure_author(&state, author_id).await?;

    match state.repository.get_course(author_id, course_id).await? {
        Some(mut course) => {
            course.apply(payload);
            state.repository.update_course(course).await?;
            state.repository.save().await?;
            tracing::info!(author_id = %author_id, course_id = %course_id, "updated course");
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        None if state.repository.course_exists(course_id).await? => {
            Err(ApiError::Conflict {
                message: format!("course {course_id} belongs to another author"),
            })
        }
        None => {
            let course = payload.into_course(course_id, author_id);
            state.repository.add_course(author_id, course.clone()).await?;
            state.repository.save().await?;
            tracing::info!(author_id = %author_id, course_id = %course_id, "upserted course");
            created(&state, &course)
        }
    }
}

/// `DELETE /api/authors/{authorId}/courses/{courseId}`
pub async fn delete_course_for_author(
    State(state): State<AppState>,
    ResourcePath((author_id, course_id)): ResourcePath<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    ensure_author(&state, author_id).await?;

    let course = state
        .repository
        .get_course(author_id, course_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    if !state.repository.delete_course(&course).await? {
        return Err(ApiError::NotFound);
    }
    state.repository.save().await?;
    tracing::info!(author_id = %author_id, course_id = %course_id, "deleted course");
    Ok(StatusCode::NO_CONTENT)
}

/// `OPTIONS /api/authors/{authorId}/courses`
pub async fn options_courses() -> impl IntoResponse {
    [(header::ALLOW, COLLECTION_METHODS)]
}
