//! Core module: resource shaping, sort mappings, queries and errors

pub mod error;
pub mod field;
pub mod property_checker;
pub mod property_mapping;
pub mod query;
pub mod repository;
pub mod shape;
pub mod shaping;
pub mod validation;

pub use error::{ApiError, ConfigError, ProblemDetails, RequestError};
pub use field::FieldValue;
pub use property_mapping::{PropertyMappingService, SortColumn};
pub use repository::{AuthorQuery, CourseLibraryRepository};
pub use shape::Shape;
pub use shaping::ShapedEntity;
