//! Author resource handlers

use super::{COLLECTION_METHODS, X_PAGINATION, ensure_fields, header_value};
use crate::config::LinkPlacement;
use crate::core::error::{ApiError, RequestError};
use crate::core::query::{AuthorsResourceParameters, PaginationMetadata, ShapingParameters};
use crate::core::repository::AuthorQuery;
use crate::core::shaping::{ShapedEntity, shape_collection, shape_data};
use crate::core::validation::{ResourcePath, ResourceQuery, ValidatedJson};
use crate::entities::{Author, AuthorDto, AuthorForCreation};
use crate::links::descriptor::{LinkedCollection, ResourceUriType};
use crate::links::resources::{authors_resource_uri, links_for_author, links_for_authors};
use crate::server::state::AppState;
use axum::{
    Json,
    extract::State,
    http::{HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// `GET /api/authors`: filtered, searched, sorted, paged and shaped
pub async fn get_authors(
    State(state): State<AppState>,
    ResourceQuery(parameters): ResourceQuery<AuthorsResourceParameters>,
) -> Result<Response, ApiError> {
    let order_by = parameters.order_by.as_deref();
    if !state
        .property_mappings
        .valid_mapping_exists_for::<AuthorDto, Author>(order_by)?
    {
        return Err(RequestError::InvalidOrderBy {
            order_by: order_by.unwrap_or_default().to_string(),
        }
        .into());
    }
    ensure_fields::<AuthorDto>(parameters.fields.as_deref())?;

    let pagination = &state.config.pagination;
    let parameters = parameters.normalized(pagination);
    let query = AuthorQuery {
        main_category: parameters.main_category.clone(),
        search_query: parameters.search_query.clone(),
        page_number: parameters.page_number(),
        page_size: parameters.page_size(pagination),
        sort: state
            .property_mappings
            .resolve_order_by::<AuthorDto, Author>(parameters.order_by.as_deref())?,
    };
    let page = state.repository.get_authors(&query).await?;

    let links_in_header = pagination.link_placement == LinkPlacement::Header;
    let mut metadata = PaginationMetadata::from_page(&page);
    if links_in_header {
        if page.has_previous() {
            metadata.previous_page_link = Some(authors_resource_uri(
                &state.routes,
                &parameters,
                ResourceUriType::PreviousPage,
            )?);
        }
        if page.has_next() {
            metadata.next_page_link = Some(authors_resource_uri(
                &state.routes,
                &parameters,
                ResourceUriType::NextPage,
            )?);
        }
    }

    let fields = parameters.fields.as_deref();
    let authors: Vec<AuthorDto> = page.iter().map(AuthorDto::from).collect();
    let value = shape_collection(&authors, fields)
        .into_iter()
        .zip(&authors)
        .map(|(mut shaped, author)| -> Result<ShapedEntity, ApiError> {
            shaped.insert("links", links_for_author(&state.routes, author.id, fields)?);
            Ok(shaped)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let links = links_for_authors(
        &state.routes,
        &parameters,
        page.has_next(),
        page.has_previous(),
        !links_in_header,
    )?;

    let pagination_header = header_value(&serde_json::to_string(&metadata)?)?;
    Ok((
        [(HeaderName::from_static(X_PAGINATION), pagination_header)],
        Json(LinkedCollection { value, links }),
    )
        .into_response())
}

/// `GET /api/authors/{authorId}`
pub async fn get_author(
    State(state): State<AppState>,
    ResourcePath(author_id): ResourcePath<Uuid>,
    ResourceQuery(ShapingParameters { fields }): ResourceQuery<ShapingParameters>,
) -> Result<Json<ShapedEntity>, ApiError> {
    let fields = fields.as_deref();
    ensure_fields::<AuthorDto>(fields)?;

    let author = state
        .repository
        .get_author(author_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let mut shaped = shape_data(&AuthorDto::from(&author), fields);
    shaped.insert("links", links_for_author(&state.routes, author.id, fields)?);
    Ok(Json(shaped))
}

/// `POST /api/authors`: creates an author with its courses
pub async fn create_author(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AuthorForCreation>,
) -> Result<Response, ApiError> {
    let (author, courses) = payload.into_entities();
    let course_count = courses.len();
    state.repository.add_author(author.clone(), courses).await?;
    state.repository.save().await?;
    tracing::info!(author_id = %author.id, courses = course_count, "created author");

    let links = links_for_author(&state.routes, author.id, None)?;
    let location = header_value(&links[0].href)?;

    let mut shaped = shape_data(&AuthorDto::from(&author), None);
    shaped.insert("links", links);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(shaped)).into_response())
}

/// `DELETE /api/authors/{authorId}`: removes the author and its courses
pub async fn delete_author(
    State(state): State<AppState>,
    ResourcePath(author_id): ResourcePath<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !state.repository.delete_author(author_id).await? {
        return Err(ApiError::NotFound);
    }
    state.repository.save().await?;
    tracing::info!(author_id = %author_id, "deleted author");
    Ok(StatusCode::NO_CONTENT)
}

/// `OPTIONS /api/authors`
pub async fn options_authors() -> impl IntoResponse {
    [(header::ALLOW, COLLECTION_METHODS)]
}
