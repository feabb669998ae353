mod common;

use axum::http::{Method, StatusCode};
use common::{create_question, send, test_app};
use serde_json::json;
use test_platform_api::forms::Submission;
use test_platform_api::forms::assessment_form::AssessmentForm;
use test_platform_api::models::assessment::AssessmentDetail;

fn mapped_ids(body: &serde_json::Value) -> Vec<i64> {
    body["assessmentQuestionMapping"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["question"]["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn create_keeps_question_order() {
    let app = test_app().await;
    let first = create_question(&app, "first", "c").await;
    let second = create_question(&app, "second", "c").await;

    let res = send(
        &app,
        Method::POST,
        "/assessments",
        Some(json!({ "name": "Intro", "level": "JUNIOR", "questions": [second, first] })),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(mapped_ids(&res.body), vec![second, first]);
    assert_eq!(
        res.body["assessmentQuestionMapping"][0]["question"]["question"],
        "second"
    );

    let id = res.body["id"].as_i64().unwrap();
    let res = send(&app, Method::GET, &format!("/assessments/{}", id), None).await;
    assert_eq!(res.status, StatusCode::OK);
    let detail: AssessmentDetail = serde_json::from_value(res.body).unwrap();
    assert_eq!(detail.question_ids(), vec![second, first]);
}

#[tokio::test]
async fn create_rejects_bad_question_lists() {
    let app = test_app().await;
    let q = create_question(&app, "only", "c").await;

    let res = send(
        &app,
        Method::POST,
        "/assessments",
        Some(json!({ "name": "A", "level": "L", "questions": [q, 99] })),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Unknown question ids: 99");

    let res = send(
        &app,
        Method::POST,
        "/assessments",
        Some(json!({ "name": "A", "level": "L", "questions": [q, q] })),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = send(
        &app,
        Method::POST,
        "/assessments",
        Some(json!({ "name": "", "level": "L", "questions": [q] })),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = send(&app, Method::GET, "/assessments", None).await;
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn update_replaces_questions_only_when_sent() {
    let app = test_app().await;
    let a = create_question(&app, "a", "c").await;
    let b = create_question(&app, "b", "c").await;
    let c = create_question(&app, "c", "c").await;

    let res = send(
        &app,
        Method::POST,
        "/assessments",
        Some(json!({ "name": "Quiz", "level": "JUNIOR", "questions": [a, b] })),
    )
    .await;
    let id = res.body["id"].as_i64().unwrap();
    let uri = format!("/assessments/{}", id);

    let res = send(&app, Method::PUT, &uri, Some(json!({ "name": "Renamed" }))).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Renamed");
    assert_eq!(res.body["level"], "JUNIOR");
    assert_eq!(mapped_ids(&res.body), vec![a, b]);

    let res = send(&app, Method::PUT, &uri, Some(json!({ "questions": [c, a] }))).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(mapped_ids(&res.body), vec![c, a]);

    let res = send(
        &app,
        Method::PUT,
        "/assessments/999",
        Some(json!({ "name": "x" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_question_drops_it_from_assessments() {
    let app = test_app().await;
    let keep = create_question(&app, "keep", "c").await;
    let gone = create_question(&app, "gone", "c").await;

    let res = send(
        &app,
        Method::POST,
        "/assessments",
        Some(json!({ "name": "Quiz", "level": "MID", "questions": [gone, keep] })),
    )
    .await;
    let id = res.body["id"].as_i64().unwrap();

    let res = send(&app, Method::DELETE, &format!("/questions/{}", gone), None).await;
    assert_eq!(res.status, StatusCode::OK);

    let res = send(&app, Method::GET, &format!("/assessments/{}", id), None).await;
    assert_eq!(mapped_ids(&res.body), vec![keep]);
}

#[tokio::test]
async fn delete_and_list_assessments() {
    let app = test_app().await;
    let q = create_question(&app, "q", "c").await;
    for name in ["Alpha", "Beta"] {
        let res = send(
            &app,
            Method::POST,
            "/assessments",
            Some(json!({ "name": name, "level": "JUNIOR", "questions": [q] })),
        )
        .await;
        assert_eq!(res.status, StatusCode::CREATED);
    }

    let res = send(&app, Method::GET, "/assessments?q=beta", None).await;
    assert_eq!(res.total_count(), Some(1));
    assert_eq!(res.body[0]["name"], "Beta");

    let res = send(&app, Method::DELETE, "/assessments/1", None).await;
    assert_eq!(res.status, StatusCode::OK);
    let res = send(&app, Method::DELETE, "/assessments/1", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = send(&app, Method::GET, "/assessments", None).await;
    assert_eq!(res.total_count(), Some(1));
}

#[tokio::test]
async fn assessment_form_round_trip() {
    let app = test_app().await;
    let a = create_question(&app, "a", "c").await;
    let b = create_question(&app, "b", "c").await;

    let mut form = AssessmentForm::new();
    form.name = "Form made".into();
    form.level = "SENIOR".into();
    form.select(0, a);
    form.append();
    let Submission::Create(dto) = form.submit().unwrap() else {
        panic!("new form should create");
    };
    let res = send(
        &app,
        Method::POST,
        "/assessments",
        Some(serde_json::to_value(&dto).unwrap()),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let detail: AssessmentDetail = serde_json::from_value(res.body).unwrap();

    let mut edit = AssessmentForm::from_detail(&detail);
    edit.append();
    edit.select(1, b);
    let submission = edit.submit().unwrap();
    let res = send(
        &app,
        submission.method(),
        &submission.path("/assessments"),
        Some(match &submission {
            Submission::Update { dto, .. } => serde_json::to_value(dto).unwrap(),
            Submission::Create(dto) => serde_json::to_value(dto).unwrap(),
        }),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(mapped_ids(&res.body), vec![a, b]);
}
