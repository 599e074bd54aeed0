//! Author entity, its output shape and its creation payload

use super::course::{Course, CourseForCreation};
use crate::core::validation::{FieldError, Validatable, collect_field_errors};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub const FIRST_NAME_EQUALS_LAST_NAME: &str =
    "The Provided Firstname Should be different from the LastName";
pub const FIRST_NAME_EQUALS_MAIN_CATEGORY: &str =
    "The Provided Firstname Should be different from the MainCategory";

/// Key of author-level (cross-field) validation messages
pub const AUTHOR_PAYLOAD_KEY: &str = "AuthorForCreationDto";

/// A stored author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub date_of_death: Option<DateTime<Utc>>,
    pub main_category: String,
}

impl_shape!(Author, "Author", {
    "id" => |a| a.id,
    "firstName" => |a| a.first_name.clone(),
    "lastName" => |a| a.last_name.clone(),
    "dateOfBirth" => |a| a.date_of_birth,
    "dateOfDeath" => |a| a.date_of_death,
    "mainCategory" => |a| a.main_category.clone(),
});

/// Author as clients see it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub main_category: String,
}

impl_shape!(AuthorDto, "AuthorDto", {
    "id" => |a| a.id,
    "name" => |a| a.name.clone(),
    "age" => |a| a.age,
    "mainCategory" => |a| a.main_category.clone(),
});

impl AuthorDto {
    pub fn from_author(author: &Author, now: DateTime<Utc>) -> Self {
        Self {
            id: author.id,
            name: format!("{} {}", author.first_name, author.last_name),
            age: current_age(author.date_of_birth, author.date_of_death, now),
            main_category: author.main_category.clone(),
        }
    }
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self::from_author(author, Utc::now())
    }
}

/// Whole years from birth until death, or until `now` for the living
pub fn current_age(
    date_of_birth: DateTime<Utc>,
    date_of_death: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> i32 {
    let until = date_of_death.unwrap_or(now);
    let mut age = until.year() - date_of_birth.year();
    if (until.month(), until.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Payload of `POST /api/authors`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthorForCreation {
    #[validate(length(min = 1, max = 50, message = "The firstName field must be between 1 and 50 characters."))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "The lastName field must be between 1 and 50 characters."))]
    pub last_name: String,

    pub date_of_birth: DateTime<Utc>,

    #[validate(length(min = 1, max = 50, message = "The mainCategory field must be between 1 and 50 characters."))]
    pub main_category: String,

    #[serde(default)]
    pub courses: Vec<CourseForCreation>,
}

impl Validatable for AuthorForCreation {
    fn validate_fields(&self) -> Vec<FieldError> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => collect_field_errors(&e, ""),
        };

        if self.first_name == self.last_name {
            errors.push(FieldError::new(AUTHOR_PAYLOAD_KEY, FIRST_NAME_EQUALS_LAST_NAME));
        }
        if self.first_name == self.main_category {
            errors.push(FieldError::new(AUTHOR_PAYLOAD_KEY, FIRST_NAME_EQUALS_MAIN_CATEGORY));
        }

        for (index, course) in self.courses.iter().enumerate() {
            errors.extend(course.field_errors(&format!("courses[{index}].")));
        }
        errors
    }
}

impl AuthorForCreation {
    /// Split into a new author and its courses, all with fresh ids
    pub fn into_entities(self) -> (Author, Vec<Course>) {
        let author = Author {
            id: Uuid::new_v4(),
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            date_of_death: None,
            main_category: self.main_category,
        };
        let courses = self
            .courses
            .into_iter()
            .map(|course| course.into_course(Uuid::new_v4(), author.id))
            .collect();
        (author, courses)
    }
}
