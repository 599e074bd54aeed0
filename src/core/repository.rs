//! Repository contract for authors and their courses

use crate::core::property_mapping::SortColumn;
use crate::core::query::PagedList;
use crate::entities::{Author, Course};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Filters, ordering and paging for an author listing, already translated to
/// entity fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorQuery {
    /// Exact match after trimming; blank means no filter
    pub main_category: Option<String>,

    /// Case-insensitive substring of main category, first name or last name
    pub search_query: Option<String>,

    pub page_number: usize,
    pub page_size: usize,

    /// Columns on [`Author`], applied left to right
    pub sort: Vec<SortColumn>,
}

/// Storage for authors and courses
///
/// Writes are staged and only become visible once [`save`](Self::save)
/// commits them, all at once. Reads see committed state only.
#[async_trait]
pub trait CourseLibraryRepository: Send + Sync {
    /// One page of authors matching `query`
    async fn get_authors(&self, query: &AuthorQuery) -> Result<PagedList<Author>>;

    async fn get_author(&self, author_id: Uuid) -> Result<Option<Author>>;

    async fn author_exists(&self, author_id: Uuid) -> Result<bool>;

    /// Stage a new author together with its courses
    async fn add_author(&self, author: Author, courses: Vec<Course>) -> Result<()>;

    /// Stage removal of an author and every course it owns
    ///
    /// Returns `false`, staging nothing, when the author does not exist or its
    /// removal is already staged.
    async fn delete_author(&self, author_id: Uuid) -> Result<bool>;

    /// Courses of one author, in insertion order
    async fn get_courses(&self, author_id: Uuid) -> Result<Vec<Course>>;

    async fn get_course(&self, author_id: Uuid, course_id: Uuid) -> Result<Option<Course>>;

    /// Whether any author owns a course with this id
    async fn course_exists(&self, course_id: Uuid) -> Result<bool>;

    /// Stage a new course; its owner is forced to `author_id`
    async fn add_course(&self, author_id: Uuid, course: Course) -> Result<()>;

    /// Stage replacement of an existing course
    async fn update_course(&self, course: Course) -> Result<()>;

    /// Stage removal of a course; `false` when it is gone or already staged
    async fn delete_course(&self, course: &Course) -> Result<bool>;

    /// Commit every staged change
    async fn save(&self) -> Result<bool>;
}
