mod common;
use axum::http::StatusCode;
use serde_json::Value;

use crate::common::{Action, Flow, config_with_load_delay, setup_server, setup_server_with, user_token};

fn ids(body: &Value) -> Vec<u64> {
    body["courses"]
        .as_array()
        .expect("courses missing")
        .iter()
        .map(|c| c["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn route_course_list_test() {
    let mut server = setup_server();

    Flow::new()
        .step(
            Action::new("default listing", "GET", "/api/v1/courses").assert_json(|body| {
                assert_eq!(body["status"], "loaded");
                assert_eq!(body["total"], 3);
                // most popular first
                assert_eq!(ids(body), vec![2, 3, 1]);
            }),
        )
        .step(
            Action::new("search is case-insensitive", "GET", "/api/v1/courses")
                .with_param("search", "ELENA")
                .assert_json(|body| assert_eq!(ids(body), vec![3])),
        )
        .step(
            Action::new("level filter", "GET", "/api/v1/courses")
                .with_param("level", "Beginner")
                .assert_json(|body| assert_eq!(ids(body), vec![2])),
        )
        .step(
            Action::new("category without courses", "GET", "/api/v1/courses")
                .with_param("category", "music")
                .assert_json(|body| {
                    assert_eq!(ids(body), Vec::<u64>::new());
                    assert_eq!(body["total"], 3);
                }),
        )
        .step(
            Action::new("several categories", "GET", "/api/v1/courses")
                .with_param("category", "business-development,personal-development")
                .assert_json(|body| assert_eq!(ids(body), vec![2, 3])),
        )
        .step(
            Action::new("feature filter", "GET", "/api/v1/courses")
                .with_param("feature", "Plating")
                .assert_json(|body| assert_eq!(ids(body), vec![2])),
        )
        .step(
            Action::new("newest first", "GET", "/api/v1/courses")
                .with_param("sort", "Newest")
                .assert_json(|body| assert_eq!(ids(body), vec![3, 1, 2])),
        )
        .step(
            Action::new("unknown sort falls back", "GET", "/api/v1/courses")
                .with_param("sort", "Cheapest")
                .assert_json(|body| assert_eq!(ids(body), vec![2, 3, 1])),
        )
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn route_course_list_loading_test() {
    let mut server = setup_server_with(config_with_load_delay(150));

    Flow::new()
        .step(
            Action::new("still loading", "GET", "/api/v1/courses").assert_json(|body| {
                assert_eq!(body["status"], "loading");
                assert!(body.get("courses").is_none());
            }),
        )
        .run(&mut server)
        .await;

    tokio::time::sleep(std::time::Duration::from_millis(400)).await;

    Flow::new()
        .step(
            Action::new("loaded", "GET", "/api/v1/courses")
                .assert_json(|body| assert_eq!(body["status"], "loaded")),
        )
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn route_course_detail_test() {
    let mut server = setup_server();

    Flow::new()
        .step(
            Action::new("detail", "GET", "/api/v1/courses/1").assert_json(|body| {
                assert_eq!(body["instructor"], "Dr. Evelyn Reed");
                assert_eq!(body["curriculum"].as_array().unwrap().len(), 3);
            }),
        )
        .step(
            Action::new("missing course", "GET", "/api/v1/courses/42")
                .with_expect(StatusCode::NOT_FOUND)
                .assert_body(|body| assert!(body.contains("resource not found"))),
        )
        .step(
            Action::new("enrolled route", "GET", "/api/v1/courses/1/route")
                .assert_json(|body| assert_eq!(body["route"], "/learn/1")),
        )
        .step(
            Action::new("browsing route", "GET", "/api/v1/courses/2/route")
                .assert_json(|body| assert_eq!(body["route"], "/course/2")),
        )
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn route_categories_test() {
    let mut server = setup_server();

    Flow::new()
        .step(
            Action::new("categories", "GET", "/api/v1/courses/categories").assert_json(|body| {
                let list = body.as_array().unwrap();
                assert_eq!(list[0]["slug"], "all");
                assert!(list.iter().any(|c| c["name"] == "Film & Video Production"));
            }),
        )
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn route_bookmark_test() {
    let mut server = setup_server();

    Flow::new()
        .step(
            Action::new("unbookmark", "POST", "/api/v1/courses/1/bookmark")
                .assert_json(|body| assert_eq!(body["bookmarked"], false)),
        )
        .step(
            Action::new("listing reflects bookmark", "GET", "/api/v1/courses/1")
                .assert_json(|body| assert_eq!(body["is_bookmarked"], false)),
        )
        .step(
            Action::new("bookmark again", "POST", "/api/v1/courses/1/bookmark")
                .assert_json(|body| assert_eq!(body["bookmarked"], true)),
        )
        .step(
            Action::new("toasts", "GET", "/api/v1/notifications").assert_json(|body| {
                let messages: Vec<_> = body
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|t| (t["message"].as_str().unwrap(), t["severity"].as_str().unwrap()))
                    .collect();
                assert_eq!(
                    messages,
                    vec![("Bookmark removed.", "info"), ("Course bookmarked!", "success")]
                );
            }),
        )
        .step(
            Action::new("missing course", "POST", "/api/v1/courses/42/bookmark")
                .with_expect(StatusCode::NOT_FOUND),
        )
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn route_my_courses_test() {
    let mut server = setup_server();

    Flow::new()
        .step(
            Action::new("anonymous", "GET", "/api/v1/courses/mine")
                .with_expect(StatusCode::UNAUTHORIZED),
        )
        .step(
            Action::new("signed in", "GET", "/api/v1/courses/mine")
                .with_token(user_token(0))
                .assert_json(|body| {
                    let ids: Vec<_> = body
                        .as_array()
                        .unwrap()
                        .iter()
                        .map(|c| c["id"].as_u64().unwrap())
                        .collect();
                    assert_eq!(ids, vec![1, 3]);
                }),
        )
        .step(
            Action::new("garbage cookie", "GET", "/api/v1/courses/mine")
                .with_token("not-a-jwt")
                .with_expect(StatusCode::BAD_REQUEST)
                .assert_body(|body| assert!(body.contains("cookie invalid"))),
        )
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn route_account_test() {
    let mut server = setup_server();

    Flow::new()
        .step(
            Action::new("anonymous", "GET", "/api/v1/account/me").assert_json(|body| {
                assert_eq!(body["authenticated"], false);
                assert_eq!(body["loyalty_points"], 0);
            }),
        )
        .step(
            Action::new("with points", "GET", "/api/v1/account/me")
                .with_token(user_token(1250))
                .assert_json(|body| {
                    assert_eq!(body["authenticated"], true);
                    assert_eq!(body["loyalty_points"], 1250);
                }),
        )
        .step(
            Action::new("workshops", "GET", "/api/v1/workshops")
                .assert_json(|body| assert_eq!(body.as_array().unwrap().len(), 2)),
        )
        .run(&mut server)
        .await;
}
