//! HTTP-level integration tests for respondent submissions and their review.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_survey(app: axum::Router, token: &str, body: Value) -> Value {
    let response = post_json_auth(app.clone(), "/api/surveys", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    body_json(common::get(app, &format!("/api/surveys/{id}")).await).await["data"].clone()
}

/// One choice question (Yes/No, exactly one) and one optional open question.
async fn yes_no_survey(app: axum::Router, token: &str) -> Value {
    let body = json!({
        "title": "Quick poll",
        "questions": [
            { "title": "Do you agree?", "min": 1, "max": 1, "choices": ["Yes", "No"] },
            { "title": "Comments", "min": 0, "max": 0 }
        ]
    });
    create_survey(app, token, body).await
}

/// Build a submission body selecting the given choice indices.
fn answers(survey: &Value, name: &str, selected: &[usize], comment: &str) -> Value {
    let choice_question = &survey["questions"][0];
    let open_question = &survey["questions"][1];
    let close_answers: Vec<Value> = choice_question["choices"]
        .as_array()
        .unwrap()
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let value = i64::from(selected.contains(&i));
            json!({
                "questionID": choice_question["id"],
                "choiceID": c["id"],
                "value": value,
            })
        })
        .collect();

    json!({
        "surveyID": survey["id"],
        "name": name,
        "closeAnswers": close_answers,
        "openAnswers": [{ "questionID": open_question["id"], "text": comment }],
    })
}

async fn setup(pool: PgPool) -> (axum::Router, String, Value) {
    common::create_admin(&pool, "owner@example.com").await;
    let app = common::build_test_app(pool);
    let token = common::login(app.clone(), "owner@example.com").await;
    let survey = yes_no_survey(app.clone(), &token).await;
    (app, token, survey)
}

fn submissions_uri(survey: &Value) -> String {
    format!("/api/surveys/{}/submissions", survey["id"])
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submission_is_stored_and_reconciled(pool: PgPool) {
    let (app, token, survey) = setup(pool).await;
    let uri = submissions_uri(&survey);

    let response = post_json(app.clone(), &uri, answers(&survey, "Ann", &[0], "")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let respondent_id = body_json(response).await["data"]["respondent_id"].clone();
    assert!(respondent_id.is_i64());

    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let submissions = json["data"].as_array().unwrap();

    assert_eq!(submissions.len(), 1);
    let ann = &submissions[0];
    assert_eq!(ann["name"], "Ann");
    assert_eq!(ann["respondent_id"], respondent_id);
    let questions = ann["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);

    assert_eq!(questions[0]["type"], "choice");
    assert_eq!(questions[0]["title"], "Do you agree?");
    assert_eq!(questions[0]["content"][0]["text"], "Yes");
    assert_eq!(questions[0]["content"][0]["selected"], true);
    assert_eq!(questions[0]["content"][1]["text"], "No");
    assert_eq!(questions[0]["content"][1]["selected"], false);

    assert_eq!(questions[1]["type"], "open");
    assert_eq!(questions[1]["text"], "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_zero_selections_rejected_and_nothing_written(pool: PgPool) {
    let (app, token, survey) = setup(pool).await;
    let uri = submissions_uri(&survey);

    let response = post_json(app.clone(), &uri, answers(&survey, "Ann", &[], "")).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["details"]["kind"], "cardinality");
    assert_eq!(json["details"]["question_id"], survey["questions"][0]["id"]);
    assert_eq!(json["details"]["actual"], 0);

    let json = body_json(get_auth(app.clone(), &uri, &token).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let owner_id = survey["admin_id"].as_i64().unwrap();
    let json = body_json(
        get_auth(app, &format!("/api/admins/{owner_id}/surveys"), &token).await,
    )
    .await;
    assert_eq!(json["data"][0]["submission_count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_two_selections_exceed_max(pool: PgPool) {
    let (app, _token, survey) = setup(pool).await;

    let response = post_json(
        app,
        &submissions_uri(&survey),
        answers(&survey, "Ann", &[0, 1], ""),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["details"]["actual"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_two_respondents_get_distinct_ids_and_counter(pool: PgPool) {
    let (app, token, survey) = setup(pool).await;
    let uri = submissions_uri(&survey);

    let first = post_json(app.clone(), &uri, answers(&survey, "Ann", &[0], "great")).await;
    let second = post_json(app.clone(), &uri, answers(&survey, "Bob", &[1], "")).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(second.status(), StatusCode::CREATED);
    let first_id = body_json(first).await["data"]["respondent_id"].as_i64().unwrap();
    let second_id = body_json(second).await["data"]["respondent_id"].as_i64().unwrap();
    assert_ne!(first_id, second_id);

    let json = body_json(get_auth(app.clone(), &uri, &token).await).await;
    let submissions = json["data"].as_array().unwrap();
    assert_eq!(submissions.len(), 2);
    assert_eq!(submissions[0]["name"], "Ann");
    assert_eq!(submissions[0]["questions"][1]["text"], "great");
    assert_eq!(submissions[1]["name"], "Bob");
    assert_eq!(submissions[1]["questions"][0]["content"][1]["selected"], true);

    let owner_id = survey["admin_id"].as_i64().unwrap();
    let json = body_json(
        get_auth(app, &format!("/api/admins/{owner_id}/surveys"), &token).await,
    )
    .await;
    assert_eq!(json["data"][0]["submission_count"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_name_is_required(pool: PgPool) {
    let (app, _token, survey) = setup(pool).await;

    let response = post_json(
        app,
        &submissions_uri(&survey),
        answers(&survey, "", &[0], ""),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["details"]["kind"], "required_field");
    assert_eq!(json["details"]["field"]["type"], "name");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_long_open_answer_rejected(pool: PgPool) {
    let (app, _token, survey) = setup(pool).await;

    let response = post_json(
        app,
        &submissions_uri(&survey),
        answers(&survey, "Ann", &[0], &"x".repeat(201)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["details"]["kind"], "length");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mismatched_survey_id_rejected(pool: PgPool) {
    let (app, _token, survey) = setup(pool).await;
    let mut body = answers(&survey, "Ann", &[0], "");
    body["surveyID"] = json!(survey["id"].as_i64().unwrap() + 1);

    let response = post_json(app, &submissions_uri(&survey), body).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["details"]["kind"], "survey_mismatch");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submission_to_missing_survey_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "name": "Ann", "openAnswers": [], "closeAnswers": [] });

    let response = post_json(app, "/api/surveys/999999/submissions", body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_owner_can_review_submissions(pool: PgPool) {
    common::create_admin(&pool, "intruder@example.com").await;
    let (app, _token, survey) = setup(pool).await;
    let intruder = common::login(app.clone(), "intruder@example.com").await;

    let response = get_auth(app.clone(), &submissions_uri(&survey), &intruder).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = common::get(app, &submissions_uri(&survey)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submission_without_answers_appears_in_review(pool: PgPool) {
    common::create_admin(&pool, "owner@example.com").await;
    let app = common::build_test_app(pool);
    let token = common::login(app.clone(), "owner@example.com").await;
    let survey = create_survey(
        app.clone(),
        &token,
        json!({
            "title": "Feedback",
            "questions": [{ "title": "Comments", "min": 0, "max": 0 }]
        }),
    )
    .await;
    let uri = submissions_uri(&survey);

    let body = json!({ "name": "Ann", "openAnswers": [], "closeAnswers": [] });
    let response = post_json(app.clone(), &uri, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let respondent_id = body_json(response).await["data"]["respondent_id"].clone();

    let json = body_json(get_auth(app, &uri, &token).await).await;
    let submissions = json["data"].as_array().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0]["respondent_id"], respondent_id);
    assert_eq!(submissions[0]["name"], "Ann");
    assert!(submissions[0]["questions"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_omitted_choices_are_stored_unselected(pool: PgPool) {
    let (app, token, survey) = setup(pool).await;
    let uri = submissions_uri(&survey);
    let choice_question = &survey["questions"][0];
    let body = json!({
        "name": "Ann",
        "closeAnswers": [{
            "questionID": choice_question["id"],
            "choiceID": choice_question["choices"][0]["id"],
            "value": 1,
        }],
        "openAnswers": [],
    });

    let response = post_json(app.clone(), &uri, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get_auth(app, &uri, &token).await).await;
    let content = json["data"][0]["questions"][0]["content"].as_array().unwrap();
    assert_eq!(content.len(), 2);
    assert_eq!(content[0]["text"], "Yes");
    assert_eq!(content[0]["selected"], true);
    assert_eq!(content[1]["text"], "No");
    assert_eq!(content[1]["selected"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_optional_choice_question_left_blank_is_reviewed(pool: PgPool) {
    common::create_admin(&pool, "owner@example.com").await;
    let app = common::build_test_app(pool);
    let token = common::login(app.clone(), "owner@example.com").await;
    let survey = create_survey(
        app.clone(),
        &token,
        json!({
            "title": "Lunch",
            "questions": [
                { "title": "Pick", "min": 0, "max": 1, "choices": ["Yes", "No"] },
                { "title": "Comments", "min": 0, "max": 0 }
            ]
        }),
    )
    .await;
    let uri = submissions_uri(&survey);

    let body = json!({ "name": "Ann", "openAnswers": [], "closeAnswers": [] });
    let response = post_json(app.clone(), &uri, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get_auth(app, &uri, &token).await).await;
    let submissions = json["data"].as_array().unwrap();
    assert_eq!(submissions.len(), 1);
    let questions = submissions[0]["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0]["title"], "Pick");
    let content = questions[0]["content"].as_array().unwrap();
    assert_eq!(content.len(), 2);
    assert!(content.iter().all(|c| c["selected"] == false));
}
