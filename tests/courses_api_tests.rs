//! HTTP tests for the course resources nested under an author

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use course_library::prelude::*;
use serde_json::{Value, json};

fn courses_uri(author_id: &str) -> String {
    format!("/api/authors/{author_id}/courses")
}

fn course_uri(author_id: &str, course_id: &str) -> String {
    format!("/api/authors/{author_id}/courses/{course_id}")
}

fn titles(body: &Value) -> Vec<&str> {
    body["value"]
        .as_array()
        .expect("value array")
        .iter()
        .map(|course| course["title"].as_str().unwrap_or_default())
        .collect()
}

// =============================================================================
// Read Tests
// =============================================================================

mod read_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_courses_for_author() {
        let server = test_server().await;
        let response = server.get(&courses_uri(BERRY_ID)).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(
            titles(&body),
            vec!["Commandeering a Ship Without Getting Caught", "Overthrowing Mutiny"]
        );
        for course in body["value"].as_array().unwrap() {
            assert_eq!(course["authorId"], BERRY_ID);
            assert_eq!(course["links"].as_array().unwrap().len(), 3);
        }

        let links = &body["links"];
        assert_eq!(
            link(links, "self"),
            Some(format!("{BASE_URL}{}", courses_uri(BERRY_ID)).as_str())
        );
        assert!(link(links, "create_course_for_author").is_some());
    }

    #[tokio::test]
    async fn test_author_without_courses_has_empty_list() {
        let server = test_server().await;
        let response = server.get(&courses_uri(ARNOLD_ID)).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert!(body["value"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_courses_of_unknown_author_is_404() {
        let server = test_server().await;
        let response = server.get(&courses_uri(&Uuid::new_v4().to_string())).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ordered_and_shaped_courses() {
        let server = test_server().await;
        let response = server
            .get(&courses_uri(BERRY_ID))
            .add_query_param("orderBy", "title desc")
            .add_query_param("fields", "title")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(
            titles(&body),
            vec!["Overthrowing Mutiny", "Commandeering a Ship Without Getting Caught"]
        );
        let keys: Vec<&String> = body["value"][0].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["title", "links"]);
    }

    #[tokio::test]
    async fn test_unknown_course_order_is_400() {
        let server = test_server().await;
        let response = server
            .get(&courses_uri(BERRY_ID))
            .add_query_param("orderBy", "authorId")
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_single_course() {
        let server = test_server().await;
        let response = server.get(&course_uri(BERRY_ID, COMMANDEERING_ID)).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["id"], COMMANDEERING_ID);
        assert_eq!(body["title"], "Commandeering a Ship Without Getting Caught");
        let rels: Vec<&str> = body["links"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["rel"].as_str().unwrap())
            .collect();
        assert_eq!(rels, vec!["self", "delete_course_for_author", "update_course_for_author"]);
    }

    #[tokio::test]
    async fn test_course_of_other_author_is_404() {
        let server = test_server().await;
        let response = server.get(&course_uri(NANCY_ID, COMMANDEERING_ID)).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_options_lists_methods() {
        let app = seeded_app().await;
        let reply = send(&app, request(Method::OPTIONS, &courses_uri(BERRY_ID))).await;
        assert_eq!(reply.header("allow"), Some("GET,OPTIONS,POST"));
    }
}

// =============================================================================
// Write Tests
// =============================================================================

mod write_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_course() {
        let app = seeded_app().await;
        let payload = json!({ "title": "Treasure Maps", "description": "X marks the spot" });
        let reply = send(&app, json_request(Method::POST, &courses_uri(NANCY_ID), &payload)).await;

        assert_eq!(reply.status, StatusCode::CREATED);
        let body = reply.json();
        let id = body["id"].as_str().unwrap();
        assert_eq!(body["authorId"], NANCY_ID);

        let location = reply.header("location").unwrap();
        assert_eq!(location, format!("{BASE_URL}{}", course_uri(NANCY_ID, id)));

        let fetched = send(&app, request(Method::GET, path_of(location))).await;
        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(fetched.json()["title"], "Treasure Maps");
    }

    #[tokio::test]
    async fn test_create_course_for_unknown_author_is_404() {
        let app = seeded_app().await;
        let payload = json!({ "title": "Treasure Maps" });
        let uri = courses_uri(&Uuid::new_v4().to_string());
        let reply = send(&app, json_request(Method::POST, &uri, &payload)).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_description_equal_to_title_is_422() {
        let app = seeded_app().await;
        let payload = json!({ "title": "Same", "description": "Same" });
        let reply = send(&app, json_request(Method::POST, &courses_uri(NANCY_ID), &payload)).await;

        assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
        let body = reply.json();
        assert_eq!(
            body["errors"]["CourseForManipulationDto"][0],
            "The provided description should be different from the title."
        );
        assert_eq!(body["instance"], courses_uri(NANCY_ID));
    }

    #[tokio::test]
    async fn test_title_too_long_is_422() {
        let app = seeded_app().await;
        let payload = json!({ "title": "x".repeat(101) });
        let reply = send(&app, json_request(Method::POST, &courses_uri(NANCY_ID), &payload)).await;

        assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(reply.json()["errors"].get("title").is_some());
    }

    #[tokio::test]
    async fn test_update_existing_course() {
        let app = seeded_app().await;
        let uri = course_uri(BERRY_ID, COMMANDEERING_ID);
        let payload = json!({ "title": "Commandeering, Revised", "description": "Second edition" });

        let reply = send(&app, json_request(Method::PUT, &uri, &payload)).await;
        assert_eq!(reply.status, StatusCode::NO_CONTENT);

        let body = send(&app, request(Method::GET, &uri)).await.json();
        assert_eq!(body["title"], "Commandeering, Revised");
        assert_eq!(body["description"], "Second edition");
    }

    #[tokio::test]
    async fn test_update_missing_course_creates_it() {
        let app = seeded_app().await;
        let course_id = Uuid::new_v4().to_string();
        let uri = course_uri(NANCY_ID, &course_id);
        let payload = json!({ "title": "Parrot Care" });

        let reply = send(&app, json_request(Method::PUT, &uri, &payload)).await;
        assert_eq!(reply.status, StatusCode::CREATED);
        assert_eq!(reply.json()["id"], course_id.as_str());
        assert_eq!(reply.header("location"), Some(format!("{BASE_URL}{uri}").as_str()));

        let fetched = send(&app, request(Method::GET, &uri)).await;
        assert_eq!(fetched.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_cannot_take_another_authors_course() {
        let app = seeded_app().await;
        let payload = json!({ "title": "Stolen" });
        let uri = course_uri(NANCY_ID, COMMANDEERING_ID);

        let reply = send(&app, json_request(Method::PUT, &uri, &payload)).await;
        assert_eq!(reply.status, StatusCode::CONFLICT);
        assert_eq!(reply.json()["instance"], uri.as_str());

        let owned = send(&app, request(Method::GET, &course_uri(BERRY_ID, COMMANDEERING_ID))).await;
        assert_eq!(owned.status, StatusCode::OK);
        assert_eq!(owned.json()["title"], "Commandeering a Ship Without Getting Caught");

        let berry = send(&app, request(Method::GET, &courses_uri(BERRY_ID))).await.json();
        assert_eq!(berry["value"].as_array().unwrap().len(), 2);
        let nancy = send(&app, request(Method::GET, &courses_uri(NANCY_ID))).await.json();
        assert!(!titles(&nancy).contains(&"Stolen"));
    }

    #[tokio::test]
    async fn test_invalid_update_changes_nothing() {
        let app = seeded_app().await;
        let uri = course_uri(BERRY_ID, COMMANDEERING_ID);
        let payload = json!({ "title": "Same", "description": "Same" });

        let reply = send(&app, json_request(Method::PUT, &uri, &payload)).await;
        assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);

        let body = send(&app, request(Method::GET, &uri)).await.json();
        assert_eq!(body["title"], "Commandeering a Ship Without Getting Caught");
    }

    #[tokio::test]
    async fn test_delete_course_twice() {
        let app = seeded_app().await;
        let uri = course_uri(BERRY_ID, COMMANDEERING_ID);

        let first = send(&app, request(Method::DELETE, &uri)).await;
        assert_eq!(first.status, StatusCode::NO_CONTENT);

        let second = send(&app, request(Method::DELETE, &uri)).await;
        assert_eq!(second.status, StatusCode::NOT_FOUND);

        let remaining = send(&app, request(Method::GET, &courses_uri(BERRY_ID))).await.json();
        assert_eq!(titles(&remaining), vec!["Overthrowing Mutiny"]);
    }
}
