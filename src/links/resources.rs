//! Link sets attached to each kind of resource

use super::descriptor::{LinkDescriptor, ResourceUriType};
use super::routes::{RouteTable, route_names};
use crate::core::error::ConfigError;
use crate::core::query::AuthorsResourceParameters;
use uuid::Uuid;

/// URL of one page of the author collection
///
/// Keeps every filter, ordering and shaping parameter; only the page number
/// moves.
pub fn authors_resource_uri(
    routes: &RouteTable,
    parameters: &AuthorsResourceParameters,
    uri_type: ResourceUriType,
) -> Result<String, ConfigError> {
    let page_number = uri_type.page_number(parameters.page_number());
    routes.link(
        route_names::GET_AUTHORS,
        &[],
        &parameters.to_query_pairs(page_number),
    )
}

/// Links of the author collection: `self`, plus `nextPage`/`previousPage`
/// when those pages exist and `include_paging` is set
pub fn links_for_authors(
    routes: &RouteTable,
    parameters: &AuthorsResourceParameters,
    has_next: bool,
    has_previous: bool,
    include_paging: bool,
) -> Result<Vec<LinkDescriptor>, ConfigError> {
    let mut links = vec![LinkDescriptor::new(
        authors_resource_uri(routes, parameters, ResourceUriType::Current)?,
        "self",
        "GET",
    )];

    if include_paging && has_next {
        links.push(LinkDescriptor::new(
            authors_resource_uri(routes, parameters, ResourceUriType::NextPage)?,
            "nextPage",
            "GET",
        ));
    }
    if include_paging && has_previous {
        links.push(LinkDescriptor::new(
            authors_resource_uri(routes, parameters, ResourceUriType::PreviousPage)?,
            "previousPage",
            "GET",
        ));
    }
    Ok(links)
}

/// Links of a single author; `self` keeps a non-blank field selection
pub fn links_for_author(
    routes: &RouteTable,
    author_id: Uuid,
    fields: Option<&str>,
) -> Result<Vec<LinkDescriptor>, ConfigError> {
    let id = [("authorId", author_id.to_string())];
    let self_query: Vec<(&str, String)> = fields
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(|f| vec![("fields", f.to_string())])
        .unwrap_or_default();

    Ok(vec![
        LinkDescriptor::new(routes.link(route_names::GET_AUTHOR, &id, &self_query)?, "self", "GET"),
        LinkDescriptor::new(
            routes.link(route_names::DELETE_AUTHOR, &id, &[])?,
            "delete_author",
            "DELETE",
        ),
        LinkDescriptor::new(
            routes.link(route_names::CREATE_COURSE_FOR_AUTHOR, &id, &[])?,
            "create_course_for_author",
            "POST",
        ),
        LinkDescriptor::new(
            routes.link(route_names::GET_COURSES_FOR_AUTHOR, &id, &[])?,
            "courses",
            "GET",
        ),
    ])
}

/// Links of a single course
pub fn links_for_course(
    routes: &RouteTable,
    author_id: Uuid,
    course_id: Uuid,
) -> Result<Vec<LinkDescriptor>, ConfigError> {
    let ids = [
        ("authorId", author_id.to_string()),
        ("courseId", course_id.to_string()),
    ];

    Ok(vec![
        LinkDescriptor::new(routes.link(route_names::GET_COURSE_FOR_AUTHOR, &ids, &[])?, "self", "GET"),
        LinkDescriptor::new(
            routes.link(route_names::DELETE_COURSE_FOR_AUTHOR, &ids, &[])?,
            "delete_course_for_author",
            "DELETE",
        ),
        LinkDescriptor::new(
            routes.link(route_names::UPDATE_COURSE_FOR_AUTHOR, &ids, &[])?,
            "update_course_for_author",
            "PUT",
        ),
    ])
}

/// Links of an author's course collection
pub fn links_for_courses(routes: &RouteTable, author_id: Uuid) -> Result<Vec<LinkDescriptor>, ConfigError> {
    let id = [("authorId", author_id.to_string())];
    Ok(vec![
        LinkDescriptor::new(routes.link(route_names::GET_COURSES_FOR_AUTHOR, &id, &[])?, "self", "GET"),
        LinkDescriptor::new(
            routes.link(route_names::CREATE_COURSE_FOR_AUTHOR, &id, &[])?,
            "create_course_for_author",
            "POST",
        ),
    ])
}

/// Links of the API root document
pub fn links_for_root(routes: &RouteTable) -> Result<Vec<LinkDescriptor>, ConfigError> {
    Ok(vec![
        LinkDescriptor::new(routes.link(route_names::GET_ROOT, &[], &[])?, "self", "GET"),
        LinkDescriptor::new(routes.link(route_names::GET_AUTHORS, &[], &[])?, "authors", "GET"),
        LinkDescriptor::new(
            routes.link(route_names::CREATE_AUTHOR, &[], &[])?,
            "create_author",
            "POST",
        ),
    ])
}
