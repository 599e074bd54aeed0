//! Named route templates and absolute URL generation
//!
//! The same path constants feed both the axum router and link generation, so
//! a link can never point at a path the router does not serve.

use crate::core::error::ConfigError;
use std::collections::HashMap;

/// Route names used when building links
pub mod route_names {
    pub const GET_ROOT: &str = "GetRoot";
    pub const GET_AUTHORS: &str = "GetAuthors";
    pub const GET_AUTHOR: &str = "GetAuthor";
    pub const CREATE_AUTHOR: &str = "CreateAuthor";
    pub const DELETE_AUTHOR: &str = "DeleteAuthor";
    pub const GET_COURSES_FOR_AUTHOR: &str = "GetCoursesForAuthor";
    pub const GET_COURSE_FOR_AUTHOR: &str = "GetCourseForAuthor";
    pub const CREATE_COURSE_FOR_AUTHOR: &str = "CreateCourseForAuthor";
    pub const UPDATE_COURSE_FOR_AUTHOR: &str = "UpdateCourseForAuthor";
    pub const DELETE_COURSE_FOR_AUTHOR: &str = "DeleteCourseForAuthor";

    /// Every route the handlers link to
    pub const ALL: &[&str] = &[
        GET_ROOT,
        GET_AUTHORS,
        GET_AUTHOR,
        CREATE_AUTHOR,
        DELETE_AUTHOR,
        GET_COURSES_FOR_AUTHOR,
        GET_COURSE_FOR_AUTHOR,
        CREATE_COURSE_FOR_AUTHOR,
        UPDATE_COURSE_FOR_AUTHOR,
        DELETE_COURSE_FOR_AUTHOR,
    ];
}

/// Path templates in axum syntax
pub mod paths {
    pub const ROOT: &str = "/api";
    pub const AUTHORS: &str = "/api/authors";
    pub const AUTHOR: &str = "/api/authors/{authorId}";
    pub const COURSES: &str = "/api/authors/{authorId}/courses";
    pub const COURSE: &str = "/api/authors/{authorId}/courses/{courseId}";
}

/// Resolves route names to absolute URLs under a base URL
#[derive(Debug, Clone)]
pub struct RouteTable {
    base_url: String,
    templates: HashMap<&'static str, &'static str>,
}

impl RouteTable {
    /// Create an empty table
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            templates: HashMap::new(),
        }
    }

    /// Register (or replace) a named template
    pub fn with_route(mut self, name: &'static str, template: &'static str) -> Self {
        self.templates.insert(name, template);
        self
    }

    /// The table of every route this API serves
    pub fn course_library(base_url: impl Into<String>) -> Self {
        use route_names::*;

        Self::new(base_url)
            .with_route(GET_ROOT, paths::ROOT)
            .with_route(GET_AUTHORS, paths::AUTHORS)
            .with_route(CREATE_AUTHOR, paths::AUTHORS)
            .with_route(GET_AUTHOR, paths::AUTHOR)
            .with_route(DELETE_AUTHOR, paths::AUTHOR)
            .with_route(GET_COURSES_FOR_AUTHOR, paths::COURSES)
            .with_route(CREATE_COURSE_FOR_AUTHOR, paths::COURSES)
            .with_route(GET_COURSE_FOR_AUTHOR, paths::COURSE)
            .with_route(UPDATE_COURSE_FOR_AUTHOR, paths::COURSE)
            .with_route(DELETE_COURSE_FOR_AUTHOR, paths::COURSE)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn template(&self, name: &str) -> Result<&'static str, ConfigError> {
        self.templates
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::RouteNotFound {
                name: name.to_string(),
            })
    }

    /// Fail on the first required route that is not registered
    pub fn verify(&self, required: &[&str]) -> Result<(), ConfigError> {
        required.iter().try_for_each(|name| self.template(name).map(|_| ()))
    }

    /// Absolute URL of a named route
    ///
    /// Every `{param}` of the template must be supplied. Query pairs are
    /// percent-encoded in the order given.
    pub fn link(
        &self,
        name: &str,
        path_params: &[(&str, String)],
        query: &[(&str, String)],
    ) -> Result<String, ConfigError> {
        let mut path = self.template(name)?.to_string();
        for (param, value) in path_params {
            path = path.replace(&format!("{{{param}}}"), value);
        }

        if let Some(start) = path.find('{') {
            let parameter = path[start + 1..]
                .split('}')
                .next()
                .unwrap_or_default()
                .to_string();
            return Err(ConfigError::MissingRouteParameter {
                route: name.to_string(),
                parameter,
            });
        }

        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            let encoded = serde_urlencoded::to_string(query).map_err(|e| ConfigError::LinkGeneration {
                route: name.to_string(),
                message: e.to_string(),
            })?;
            url.push('?');
            url.push_str(&encoded);
        }
        Ok(url)
    }
}
