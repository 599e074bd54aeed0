//! Shared test harness for repository backends
//!
//! Provides builders for authors and courses plus the `repository_tests!`
//! contract suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod repository_tests;

use chrono::{TimeZone, Utc};
use course_library::core::repository::AuthorQuery;
use course_library::entities::{Author, Course};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// An author born on January 1st of `year`
pub fn make_author(first: &str, last: &str, year: i32, category: &str) -> Author {
    Author {
        id: Uuid::new_v4(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        date_of_birth: Utc
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .expect("valid date"),
        date_of_death: None,
        main_category: category.to_string(),
    }
}

pub fn make_course(author_id: Uuid, title: &str) -> Course {
    Course {
        id: Uuid::new_v4(),
        author_id,
        title: title.to_string(),
        description: Some(format!("All about {title}")),
    }
}

/// Four authors across three categories
pub fn crew() -> Vec<Author> {
    vec![
        make_author("Anne", "Bonny", 1697, "Rum"),
        make_author("Mary", "Read", 1685, "Ships"),
        make_author("Edward", "Teach", 1680, "Ships"),
        make_author("Calico", "Jack", 1682, "Tailoring"),
    ]
}

/// First page of `page_size` authors, unsorted and unfiltered
pub fn first_page(page_size: usize) -> AuthorQuery {
    AuthorQuery {
        page_number: 1,
        page_size,
        ..Default::default()
    }
}
