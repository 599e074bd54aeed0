//! Domain entities, their output shapes and request payloads

#[macro_use]
pub mod macros;

pub mod author;
pub mod course;

pub use author::{Author, AuthorDto, AuthorForCreation};
pub use course::{Course, CourseDto, CourseForCreation, CourseForManipulation, CourseForUpdate};

use crate::core::property_mapping::{MappingError, PropertyMappingService, PropertyMappingValue};

/// Sort mappings for every sortable output shape
///
/// Sorting an author by `name` sorts by first then last name; sorting by `age`
/// sorts by birth date in the opposite direction.
pub fn default_property_mappings() -> Result<PropertyMappingService, MappingError> {
    Ok(PropertyMappingService::builder()
        .register::<AuthorDto, Author>([
            ("id", PropertyMappingValue::new(["id"], false)?),
            ("mainCategory", PropertyMappingValue::new(["mainCategory"], false)?),
            ("name", PropertyMappingValue::new(["firstName", "lastName"], false)?),
            ("age", PropertyMappingValue::new(["dateOfBirth"], true)?),
        ])?
        .register::<CourseDto, Course>([
            ("id", PropertyMappingValue::new(["id"], false)?),
            ("title", PropertyMappingValue::new(["title"], false)?),
            ("description", PropertyMappingValue::new(["description"], false)?),
        ])?
        .build())
}
