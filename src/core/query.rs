//! Resource query parameters and pagination utilities

use crate::config::PaginationConfig;
use serde::{Deserialize, Serialize};

/// Query parameters for the author collection
///
/// # Example
/// ```text
/// GET /api/authors?pageNumber=2&pageSize=5
/// GET /api/authors?mainCategory=Rum&searchQuery=ri&orderBy=age desc,name
/// GET /api/authors?fields=id,name
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorsResourceParameters {
    /// Exact-match filter on the main category
    pub main_category: Option<String>,

    /// Substring search over main category, first name and last name
    pub search_query: Option<String>,

    /// Page number (starts at 1)
    pub page_number: Option<usize>,

    /// Number of items per page, capped by configuration
    pub page_size: Option<usize>,

    /// Ordering clause over the output shape, e.g. `name, age desc`
    pub order_by: Option<String>,

    /// Comma-separated field selection over the output shape
    pub fields: Option<String>,
}

impl Default for AuthorsResourceParameters {
    fn default() -> Self {
        Self {
            main_category: None,
            search_query: None,
            page_number: None,
            page_size: None,
            order_by: Some("name".to_string()),
            fields: None,
        }
    }
}

impl AuthorsResourceParameters {
    /// Get page number, ensuring minimum of 1
    pub fn page_number(&self) -> usize {
        self.page_number.unwrap_or(1).max(1)
    }

    /// Get page size, defaulted and capped by configuration
    pub fn page_size(&self, config: &PaginationConfig) -> usize {
        self.page_size
            .unwrap_or(config.default_page_size)
            .clamp(1, config.max_page_size.max(1))
    }

    /// Copy with page number and size resolved, as echoed back in links
    pub fn normalized(&self, config: &PaginationConfig) -> Self {
        Self {
            page_number: Some(self.page_number()),
            page_size: Some(self.page_size(config)),
            ..self.clone()
        }
    }

    /// Query-string pairs for a link to `page_number`, omitting absent values
    pub fn to_query_pairs(&self, page_number: usize) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        if let Some(fields) = &self.fields {
            pairs.push(("fields", fields.clone()));
        }
        if let Some(order_by) = &self.order_by {
            pairs.push(("orderBy", order_by.clone()));
        }
        pairs.push(("pageNumber", page_number.to_string()));
        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize", page_size.to_string()));
        }
        if let Some(main_category) = &self.main_category {
            pairs.push(("mainCategory", main_category.clone()));
        }
        if let Some(search_query) = &self.search_query {
            pairs.push(("searchQuery", search_query.clone()));
        }
        pairs
    }
}

/// Query parameters for single-resource reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapingParameters {
    pub fields: Option<String>,
}

/// Query parameters for an author's course list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoursesResourceParameters {
    pub order_by: Option<String>,
    pub fields: Option<String>,
}

/// One page of a larger result set
#[derive(Debug, Clone, PartialEq)]
pub struct PagedList<T> {
    items: Vec<T>,
    current_page: usize,
    total_pages: usize,
    page_size: usize,
    total_count: usize,
}

impl<T> PagedList<T> {
    /// Wrap an already-sliced page
    pub fn new(items: Vec<T>, total_count: usize, page_number: usize, page_size: usize) -> Self {
        // Ensure page size is at least 1 to avoid division by zero
        let page_size = page_size.max(1);
        Self {
            items,
            current_page: page_number.max(1),
            total_pages: total_count.div_ceil(page_size),
            page_size,
            total_count,
        }
    }

    /// Slice one page out of a full, already-ordered result set
    pub fn create(source: Vec<T>, page_number: usize, page_size: usize) -> Self {
        let page_number = page_number.max(1);
        let page_size = page_size.max(1);
        let total_count = source.len();
        let items = source
            .into_iter()
            .skip((page_number - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();
        Self::new(items, total_count, page_number, page_size)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl<'a, T> IntoIterator for &'a PagedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Pagination metadata sent in the `X-Pagination` header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub total_count: usize,
    pub page_size: usize,
    pub current_page: usize,
    pub total_pages: usize,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub previous_page_link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub next_page_link: Option<String>,
}

impl PaginationMetadata {
    pub fn from_page<T>(page: &PagedList<T>) -> Self {
        Self {
            total_count: page.total_count(),
            page_size: page.page_size(),
            current_page: page.current_page(),
            total_pages: page.total_pages(),
            previous_page_link: None,
            next_page_link: None,
        }
    }
}
