//! Macro-generated contract suite for `CourseLibraryRepository` backends.
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use course_library::storage::InMemoryRepository;
//!
//! repository_tests!(InMemoryRepository::new());
//! ```
//!
//! ## Unit of work
//! - `test_writes_are_staged_until_save`
//! - `test_save_without_changes`
//!
//! ## Authors
//! - `test_add_and_get_author`
//! - `test_get_nonexistent_author`
//! - `test_filter_by_main_category`
//! - `test_search_is_case_insensitive`
//! - `test_blank_filters_are_ignored`
//! - `test_sort_columns_apply_in_order`
//! - `test_paging_reports_totals`
//! - `test_delete_author_cascades`
//!
//! ## Courses
//! - `test_courses_are_scoped_to_author`
//! - `test_update_and_delete_course`
//!
//! ## Concurrency
//! - `test_concurrent_writers`

/// Generate the `CourseLibraryRepository` conformance suite.
///
/// `$factory` is re-evaluated for each test. The concurrency test also needs
/// the repository to be `Clone + 'static` with shared state.
#[macro_export]
macro_rules! repository_tests {
    ($factory:expr) => {
        mod repository_contract_tests {
            use super::*;
            use course_library::core::property_mapping::SortColumn;
            use course_library::core::query::PagedList;
            use course_library::core::repository::{AuthorQuery, CourseLibraryRepository};
            use course_library::entities::{Author, Course};
            use uuid::Uuid;

            async fn seeded() -> (impl CourseLibraryRepository + Clone + 'static, Vec<Author>) {
                let repository = $factory;
                let authors = crew();
                for author in &authors {
                    repository.add_author(author.clone(), Vec::new()).await.unwrap();
                }
                assert!(repository.save().await.unwrap());
                (repository, authors)
            }

            fn names(page: &PagedList<Author>) -> Vec<String> {
                page.iter()
                    .map(|a| format!("{} {}", a.first_name, a.last_name))
                    .collect()
            }

            // ==================================================================
            // Unit of work
            // ==================================================================

            #[tokio::test]
            async fn test_writes_are_staged_until_save() {
                let repository = $factory;
                let author = make_author("Anne", "Bonny", 1697, "Rum");
                let course = make_course(author.id, "Boarding");

                repository.add_author(author.clone(), vec![course.clone()]).await.unwrap();
                assert!(!repository.author_exists(author.id).await.unwrap());
                assert!(repository.get_course(author.id, course.id).await.unwrap().is_none());

                assert!(repository.save().await.unwrap());
                assert!(repository.author_exists(author.id).await.unwrap());
                assert_eq!(
                    repository.get_course(author.id, course.id).await.unwrap(),
                    Some(course)
                );
            }

            #[tokio::test]
            async fn test_save_without_changes() {
                let repository = $factory;
                assert!(repository.save().await.unwrap());
                assert_eq!(repository.get_authors(&first_page(10)).await.unwrap().total_count(), 0);
            }

            // ==================================================================
            // Authors
            // ==================================================================

            #[tokio::test]
            async fn test_add_and_get_author() {
                let (repository, authors) = seeded().await;
                let fetched = repository.get_author(authors[1].id).await.unwrap();
                assert_eq!(fetched, Some(authors[1].clone()));
            }

            #[tokio::test]
            async fn test_get_nonexistent_author() {
                let (repository, _) = seeded().await;
                assert!(repository.get_author(Uuid::new_v4()).await.unwrap().is_none());
                assert!(!repository.author_exists(Uuid::new_v4()).await.unwrap());
            }

            #[tokio::test]
            async fn test_filter_by_main_category() {
                let (repository, _) = seeded().await;
                let query = AuthorQuery {
                    main_category: Some("  Ships ".to_string()),
                    ..first_page(10)
                };
                let page = repository.get_authors(&query).await.unwrap();
                assert_eq!(names(&page), vec!["Mary Read", "Edward Teach"]);

                let query = AuthorQuery {
                    main_category: Some("ships".to_string()),
                    ..first_page(10)
                };
                assert_eq!(repository.get_authors(&query).await.unwrap().total_count(), 0);
            }

            #[tokio::test]
            async fn test_search_is_case_insensitive() {
                let (repository, _) = seeded().await;
                let query = AuthorQuery {
                    search_query: Some("AC".to_string()),
                    ..first_page(10)
                };
                let page = repository.get_authors(&query).await.unwrap();
                assert_eq!(names(&page), vec!["Edward Teach", "Calico Jack"]);
            }

            #[tokio::test]
            async fn test_blank_filters_are_ignored() {
                let (repository, _) = seeded().await;
                let query = AuthorQuery {
                    main_category: Some("   ".to_string()),
                    search_query: Some(String::new()),
                    ..first_page(10)
                };
                assert_eq!(repository.get_authors(&query).await.unwrap().total_count(), 4);
            }

            #[tokio::test]
            async fn test_sort_columns_apply_in_order() {
                let (repository, _) = seeded().await;
                let query = AuthorQuery {
                    sort: vec![
                        SortColumn::descending("mainCategory"),
                        SortColumn::ascending("dateOfBirth"),
                    ],
                    ..first_page(10)
                };
                let page = repository.get_authors(&query).await.unwrap();
                assert_eq!(
                    names(&page),
                    vec!["Calico Jack", "Edward Teach", "Mary Read", "Anne Bonny"]
                );
            }

            #[tokio::test]
            async fn test_paging_reports_totals() {
                let (repository, _) = seeded().await;
                let query = AuthorQuery {
                    page_number: 2,
                    sort: vec![SortColumn::ascending("firstName")],
                    ..first_page(3)
                };
                let page = repository.get_authors(&query).await.unwrap();
                assert_eq!(names(&page), vec!["Mary Read"]);
                assert_eq!(page.total_count(), 4);
                assert_eq!(page.total_pages(), 2);
                assert!(page.has_previous());
                assert!(!page.has_next());
            }

            #[tokio::test]
            async fn test_delete_author_cascades() {
                let repository = $factory;
                let author = make_author("Anne", "Bonny", 1697, "Rum");
                let courses = vec![make_course(author.id, "Boarding"), make_course(author.id, "Dueling")];
                repository.add_author(author.clone(), courses).await.unwrap();
                repository.save().await.unwrap();

                assert!(repository.delete_author(author.id).await.unwrap());
                assert!(!repository.delete_author(author.id).await.unwrap());
                assert!(repository.author_exists(author.id).await.unwrap());

                repository.save().await.unwrap();
                assert!(!repository.author_exists(author.id).await.unwrap());
                assert!(!repository.delete_author(author.id).await.unwrap());
                assert!(repository.get_courses(author.id).await.unwrap().is_empty());
            }

            // ==================================================================
            // Courses
            // ==================================================================

            #[tokio::test]
            async fn test_courses_are_scoped_to_author() {
                let (repository, authors) = seeded().await;
                let course = make_course(Uuid::nil(), "Navigation");
                repository.add_course(authors[1].id, course.clone()).await.unwrap();
                repository.save().await.unwrap();

                let courses = repository.get_courses(authors[1].id).await.unwrap();
                assert_eq!(courses.len(), 1);
                assert_eq!(courses[0].author_id, authors[1].id);

                assert!(repository.get_course(authors[0].id, course.id).await.unwrap().is_none());
                assert!(repository.get_courses(authors[0].id).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_update_and_delete_course() {
                let (repository, authors) = seeded().await;
                let author_id = authors[2].id;
                let course = make_course(author_id, "Beard Lighting");
                repository.add_course(author_id, course.clone()).await.unwrap();
                repository.save().await.unwrap();

                let renamed = Course {
                    title: "Beard Braiding".to_string(),
                    ..course.clone()
                };
                repository.update_course(renamed).await.unwrap();
                repository.save().await.unwrap();
                let fetched = repository.get_course(author_id, course.id).await.unwrap().unwrap();
                assert_eq!(fetched.title, "Beard Braiding");

                assert!(repository.course_exists(course.id).await.unwrap());
                assert!(repository.delete_course(&fetched).await.unwrap());
                repository.save().await.unwrap();
                assert!(repository.get_course(author_id, course.id).await.unwrap().is_none());
                assert!(!repository.course_exists(course.id).await.unwrap());
                assert!(!repository.delete_course(&fetched).await.unwrap());
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_writers() {
                let repository = $factory;
                let mut handles = Vec::new();
                for i in 0..10 {
                    let repository = repository.clone();
                    handles.push(tokio::spawn(async move {
                        let author = make_author(&format!("Pirate{i}"), "Crew", 1700 + i, "Rum");
                        repository.add_author(author, Vec::new()).await.unwrap();
                        repository.save().await.unwrap();
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }

                let page = repository.get_authors(&first_page(20)).await.unwrap();
                assert_eq!(page.total_count(), 10);
            }
        }
    };
}
