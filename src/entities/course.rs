//! Course entity, its output shape and its creation/update payload

use crate::core::validation::{FieldError, Validatable, collect_field_errors};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub const DESCRIPTION_EQUALS_TITLE: &str =
    "The provided description should be different from the title.";

/// Key of course-level (cross-field) validation messages
pub const COURSE_PAYLOAD_KEY: &str = "CourseForManipulationDto";

/// A stored course, always owned by one author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

impl_shape!(Course, "Course", {
    "id" => |c| c.id,
    "authorId" => |c| c.author_id,
    "title" => |c| c.title.clone(),
    "description" => |c| c.description.clone(),
});

impl Course {
    /// Overwrite the client-editable fields
    pub fn apply(&mut self, update: CourseForUpdate) {
        self.title = update.title;
        self.description = update.description;
    }
}

/// Course as clients see it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

impl_shape!(CourseDto, "CourseDto", {
    "id" => |c| c.id,
    "title" => |c| c.title.clone(),
    "description" => |c| c.description.clone(),
    "authorId" => |c| c.author_id,
});

impl From<&Course> for CourseDto {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            description: course.description.clone(),
            author_id: course.author_id,
        }
    }
}

/// Payload shared by course creation and full update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseForManipulation {
    #[validate(length(min = 1, max = 100, message = "The title field must be between 1 and 100 characters."))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 1500, message = "The description shouldn't have more than 1500 characters."))]
    pub description: Option<String>,
}

pub type CourseForCreation = CourseForManipulation;
pub type CourseForUpdate = CourseForManipulation;

impl CourseForManipulation {
    /// Violations keyed with `prefix`, for payloads nested in another one
    pub fn field_errors(&self, prefix: &str) -> Vec<FieldError> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => collect_field_errors(&e, prefix),
        };
        if self.description.as_deref() == Some(self.title.as_str()) {
            errors.push(FieldError::new(
                format!("{prefix}{COURSE_PAYLOAD_KEY}"),
                DESCRIPTION_EQUALS_TITLE,
            ));
        }
        errors
    }

    pub fn into_course(self, id: Uuid, author_id: Uuid) -> Course {
        Course {
            id,
            author_id,
            title: self.title,
            description: self.description,
        }
    }
}

impl Validatable for CourseForManipulation {
    fn validate_fields(&self) -> Vec<FieldError> {
        self.field_errors("")
    }
}
