//! In-memory implementation of CourseLibraryRepository for testing and development

use crate::core::property_mapping::sort_by_columns;
use crate::core::query::PagedList;
use crate::core::repository::{AuthorQuery, CourseLibraryRepository};
use crate::entities::{Author, Course};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    authors: IndexMap<Uuid, Author>,
    courses: IndexMap<Uuid, Course>,
}

#[derive(Debug)]
enum Change {
    AddAuthor(Author, Vec<Course>),
    DeleteAuthor(Uuid),
    AddCourse(Course),
    UpdateCourse(Course),
    DeleteCourse(Uuid),
}

impl Change {
    fn removes_same_row(&self, other: &Change) -> bool {
        match (self, other) {
            (Change::DeleteAuthor(a), Change::DeleteAuthor(b)) => a == b,
            (Change::DeleteCourse(a), Change::DeleteCourse(b)) => a == b,
            _ => false,
        }
    }
}

impl Tables {
    fn apply(&mut self, change: Change) {
        match change {
            Change::AddAuthor(author, courses) => {
                for course in courses {
                    self.courses.insert(course.id, course);
                }
                self.authors.insert(author.id, author);
            }
            Change::DeleteAuthor(author_id) => {
                self.authors.shift_remove(&author_id);
                self.courses.retain(|_, course| course.author_id != author_id);
            }
            Change::AddCourse(course) | Change::UpdateCourse(course) => {
                self.courses.insert(course.id, course);
            }
            Change::DeleteCourse(course_id) => {
                self.courses.shift_remove(&course_id);
            }
        }
    }
}

/// In-memory repository
///
/// Uses RwLock for the committed tables and a Mutex for staged changes.
/// Clones share the same storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
    pending: Arc<Mutex<Vec<Change>>>,
}

impl InMemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_pending(&self) -> Result<MutexGuard<'_, Vec<Change>>> {
        self.pending
            .lock()
            .map_err(|e| anyhow!("Failed to acquire staging lock: {}", e))
    }

    fn stage(&self, change: Change) -> Result<()> {
        self.lock_pending()?.push(change);
        Ok(())
    }

    /// Stage `change` unless `exists` fails on the committed tables or an
    /// equal removal is already pending
    ///
    /// The staging lock is held across the check, as `save` holds it while
    /// applying, so two removals of one row cannot both succeed.
    fn stage_removal(&self, change: Change, exists: impl FnOnce(&Tables) -> bool) -> Result<bool> {
        let mut pending = self.lock_pending()?;
        if pending.iter().any(|staged| staged.removes_same_row(&change)) {
            return Ok(false);
        }
        let tables = self.read_tables()?;
        if !exists(&*tables) {
            return Ok(false);
        }
        pending.push(change);
        Ok(true)
    }

    fn read_tables(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))
    }
}

fn matches_filters(author: &Author, main_category: Option<&str>, search: Option<&str>) -> bool {
    if main_category.is_some_and(|category| author.main_category != category) {
        return false;
    }
    if let Some(search) = search {
        let contains = |value: &str| value.to_lowercase().contains(search);
        return contains(&author.main_category)
            || contains(&author.first_name)
            || contains(&author.last_name);
    }
    true
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

#[async_trait]
impl CourseLibraryRepository for InMemoryRepository {
    async fn get_authors(&self, query: &AuthorQuery) -> Result<PagedList<Author>> {
        let main_category = non_blank(query.main_category.as_ref());
        let search = non_blank(query.search_query.as_ref()).map(str::to_lowercase);

        let mut authors: Vec<Author> = {
            let tables = self.read_tables()?;
            tables
                .authors
                .values()
                .filter(|author| matches_filters(author, main_category, search.as_deref()))
                .cloned()
                .collect()
        };

        sort_by_columns(&mut authors, &query.sort);

        Ok(PagedList::create(authors, query.page_number, query.page_size))
    }

    async fn get_author(&self, author_id: Uuid) -> Result<Option<Author>> {
        Ok(self.read_tables()?.authors.get(&author_id).cloned())
    }

    async fn author_exists(&self, author_id: Uuid) -> Result<bool> {
        Ok(self.read_tables()?.authors.contains_key(&author_id))
    }

    async fn add_author(&self, author: Author, courses: Vec<Course>) -> Result<()> {
        let courses = courses
            .into_iter()
            .map(|course| Course {
                author_id: author.id,
                ..course
            })
            .collect();
        self.stage(Change::AddAuthor(author, courses))
    }

    async fn delete_author(&self, author_id: Uuid) -> Result<bool> {
        self.stage_removal(Change::DeleteAuthor(author_id), |tables| {
            tables.authors.contains_key(&author_id)
        })
    }

    async fn get_courses(&self, author_id: Uuid) -> Result<Vec<Course>> {
        let tables = self.read_tables()?;
        Ok(tables
            .courses
            .values()
            .filter(|course| course.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn get_course(&self, author_id: Uuid, course_id: Uuid) -> Result<Option<Course>> {
        let tables = self.read_tables()?;
        Ok(tables
            .courses
            .get(&course_id)
            .filter(|course| course.author_id == author_id)
            .cloned())
    }

    async fn course_exists(&self, course_id: Uuid) -> Result<bool> {
        Ok(self.read_tables()?.courses.contains_key(&course_id))
    }

    async fn add_course(&self, author_id: Uuid, course: Course) -> Result<()> {
        self.stage(Change::AddCourse(Course { author_id, ..course }))
    }

    async fn update_course(&self, course: Course) -> Result<()> {
        self.stage(Change::UpdateCourse(course))
    }

    async fn delete_course(&self, course: &Course) -> Result<bool> {
        let course_id = course.id;
        self.stage_removal(Change::DeleteCourse(course_id), |tables| {
            tables.courses.contains_key(&course_id)
        })
    }

    async fn save(&self) -> Result<bool> {
        let mut pending = self.lock_pending()?;
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let count = pending.len();
        for change in pending.drain(..) {
            tables.apply(change);
        }
        if count > 0 {
            tracing::debug!(changes = count, "committed staged changes");
        }
        Ok(true)
    }
}
