//! # Course Library
//!
//! A REST API over authors and their courses, built on axum.
//!
//! ## Features
//!
//! - **Paging**: `pageNumber`/`pageSize` with an `X-Pagination` metadata header
//! - **Sorting**: `orderBy` over output fields, translated to entity fields by
//!   validated property mappings (one field may sort by several, or reversed)
//! - **Data Shaping**: `fields` projects resources down to the requested fields
//! - **HATEOAS**: every resource and collection carries its links
//! - **Problem Details**: 400/422/500 responses as `application/problem+json`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use course_library::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let repository = InMemoryRepository::new();
//!     seed_repository(&repository).await?;
//!
//!     ServerBuilder::new()
//!         .with_config(AppConfig::default())
//!         .with_repository(repository)
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod links;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ApiError, ConfigError, ProblemDetails, RequestError},
        field::FieldValue,
        property_checker::type_has_properties,
        property_mapping::{
            MappingError, PropertyMapping, PropertyMappingService, PropertyMappingValue, SortColumn,
        },
        query::{AuthorsResourceParameters, PagedList, PaginationMetadata},
        repository::{AuthorQuery, CourseLibraryRepository},
        shape::Shape,
        shaping::{ShapedEntity, shape_collection, shape_data},
        validation::{FieldError, Validatable, ValidationProblem},
    };

    // === Macros ===
    pub use crate::impl_shape;

    // === Entities ===
    pub use crate::entities::{
        Author, AuthorDto, AuthorForCreation, Course, CourseDto, CourseForManipulation,
        default_property_mappings,
    };

    // === Links ===
    pub use crate::links::{LinkDescriptor, LinkedCollection, RouteTable};

    // === Storage ===
    pub use crate::storage::{InMemoryRepository, seed_repository};

    // === Config ===
    pub use crate::config::{AppConfig, Environment, LinkPlacement, PaginationConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder, build_router};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
