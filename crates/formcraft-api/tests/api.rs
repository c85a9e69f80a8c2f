//! End-to-end tests over the full router: session boundary, form CRUD,
//! public share fetch, and submission admission.

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use formcraft_api::session::TokenVerifier;
use formcraft_api::{build_router, AppState};
use serde_json::{json, Value};
use uuid::Uuid;

const SECRET: &str = "test-secret";

fn server() -> TestServer {
    TestServer::new(build_router(AppState::in_memory(SECRET))).unwrap()
}

fn bearer(user: Uuid) -> HeaderValue {
    let token = TokenVerifier::new(SECRET)
        .issue(user, "owner@example.com")
        .unwrap();
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

fn contact_form() -> Value {
    json!({
        "title": "Contact",
        "description": "Say hello",
        "fields": [
            { "id": "f1", "type": "email", "label": "Email", "required": true },
            { "id": "f2", "type": "text", "label": "Name", "required": false }
        ]
    })
}

fn submission(url_id: &Value, email: &str) -> Value {
    json!({
        "urlId": url_id,
        "responses": {
            "f1_Email": email,
            "f2_Name": "Jo"
        }
    })
}

#[tokio::test]
async fn health_is_public() {
    let server = server();
    let res = server.get("/health").await;
    assert_eq!(res.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let server = server();

    let res = server.get("/api/forms").await;
    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
    assert!(res.json::<Value>().get("error").is_some());

    let res = server.post("/api/forms").json(&contact_form()).await;
    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_sets_the_session_cookie() {
    let server = server();
    let token = TokenVerifier::new(SECRET)
        .issue(Uuid::new_v4(), "jo@example.com")
        .unwrap();

    let res = server
        .post("/auth/login")
        .json(&json!({ "accessToken": token }))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    let cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("formcraft_session="));
    assert!(cookie.contains("HttpOnly"));

    // A garbage provider token is rejected.
    let res = server
        .post("/auth/login")
        .json(&json!({ "accessToken": "garbage" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_cookie_grants_access() {
    let server = server();
    let token = TokenVerifier::new(SECRET)
        .issue(Uuid::new_v4(), "jo@example.com")
        .unwrap();

    let res = server
        .get("/api/forms")
        .add_header(
            header::COOKIE,
            HeaderValue::from_str(&format!("formcraft_session={token}")).unwrap(),
        )
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.json::<Value>(), json!([]));
}

#[tokio::test]
async fn saving_a_form_without_an_email_field_fails() {
    let server = server();
    let auth = bearer(Uuid::new_v4());

    let body = json!({
        "title": "No email here",
        "description": "",
        "fields": [
            { "id": "f1", "type": "text", "label": "Name", "required": false }
        ]
    });
    let res = server
        .post("/api/forms")
        .add_header(header::AUTHORIZATION, auth)
        .json(&body)
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>()["error"],
        "The form must contain at least one email field."
    );
}

#[tokio::test]
async fn share_and_submit_flow() {
    let server = server();
    let owner = Uuid::new_v4();
    let auth = bearer(owner);

    let res = server
        .post("/api/forms")
        .add_header(header::AUTHORIZATION, auth.clone())
        .json(&contact_form())
        .await;
    assert_eq!(res.status_code(), StatusCode::CREATED);
    let form = res.json::<Value>();
    let url_id = form["urlId"].clone();

    // Public fetch needs no session.
    let res = server.get(&format!("/api/share/{}", url_id.as_str().unwrap())).await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.json::<Value>()["title"], "Contact");

    // First submission is admitted.
    let res = server
        .post("/api/forms/submit")
        .json(&submission(&url_id, "a@b.com"))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    // Same email again is a duplicate.
    let res = server
        .post("/api/forms/submit")
        .json(&submission(&url_id, "a@b.com"))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["error"], "You have already submitted this form.");

    // A different email is admitted.
    let res = server
        .post("/api/forms/submit")
        .json(&submission(&url_id, "c@d.com"))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    // The dashboard listing counts both submissions.
    let res = server
        .get("/api/forms")
        .add_header(header::AUTHORIZATION, auth.clone())
        .await;
    let summaries = res.json::<Value>();
    assert_eq!(summaries[0]["submissionCount"], 2);

    // Grouped submissions listing carries both, with responses intact.
    let res = server
        .get("/api/forms/submissions")
        .add_header(header::AUTHORIZATION, auth.clone())
        .await;
    let grouped = res.json::<Value>();
    assert_eq!(grouped[0]["formTitle"], "Contact");
    assert_eq!(grouped[0]["submissions"].as_array().unwrap().len(), 2);
    assert_eq!(grouped[0]["submissions"][0]["responses"]["f2_Name"], "Jo");

    // Deleting the form cascades: the share link dies with it.
    let form_id = form["id"].as_str().unwrap().to_string();
    let res = server
        .delete(&format!("/api/forms/{form_id}"))
        .add_header(header::AUTHORIZATION, auth.clone())
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    let res = server.get(&format!("/api/share/{}", url_id.as_str().unwrap())).await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

    let res = server
        .get("/api/forms/submissions")
        .add_header(header::AUTHORIZATION, auth)
        .await;
    assert_eq!(res.json::<Value>(), json!([]));
}

#[tokio::test]
async fn submit_with_unknown_url_id_is_not_found() {
    let server = server();
    let res = server
        .post("/api/forms/submit")
        .json(&submission(&json!(Uuid::new_v4()), "a@b.com"))
        .await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>()["error"], "Form not found.");
}

#[tokio::test]
async fn submit_with_malformed_body_is_a_validation_error() {
    let server = server();

    let res = server.post("/api/forms/submit").json(&json!({ "urlId": "not-a-uuid" })).await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);

    let res = server.post("/api/forms/submit").json(&json!({})).await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn submit_without_an_email_value_is_rejected() {
    let server = server();
    let auth = bearer(Uuid::new_v4());

    let res = server
        .post("/api/forms")
        .add_header(header::AUTHORIZATION, auth)
        .json(&contact_form())
        .await;
    let url_id = res.json::<Value>()["urlId"].clone();

    let body = json!({
        "urlId": url_id,
        "responses": { "f2_Name": "Jo" }
    });
    let res = server.post("/api/forms/submit").json(&body).await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["error"], "Submission requires a valid email field.");
}

#[tokio::test]
async fn forms_are_scoped_to_their_owner() {
    let server = server();
    let owner = bearer(Uuid::new_v4());
    let stranger = bearer(Uuid::new_v4());

    let res = server
        .post("/api/forms")
        .add_header(header::AUTHORIZATION, owner.clone())
        .json(&contact_form())
        .await;
    let form_id = res.json::<Value>()["id"].as_str().unwrap().to_string();

    // Another user cannot see, update, or delete it.
    let res = server
        .get(&format!("/api/forms/{form_id}"))
        .add_header(header::AUTHORIZATION, stranger.clone())
        .await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

    let res = server
        .delete(&format!("/api/forms/{form_id}"))
        .add_header(header::AUTHORIZATION, stranger.clone())
        .await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

    let res = server
        .get("/api/forms")
        .add_header(header::AUTHORIZATION, stranger)
        .await;
    assert_eq!(res.json::<Value>(), json!([]));
}

#[tokio::test]
async fn update_replaces_the_whole_document() {
    let server = server();
    let auth = bearer(Uuid::new_v4());

    let res = server
        .post("/api/forms")
        .add_header(header::AUTHORIZATION, auth.clone())
        .json(&contact_form())
        .await;
    let form_id = res.json::<Value>()["id"].as_str().unwrap().to_string();

    let replacement = json!({
        "title": "Renamed",
        "description": "v2",
        "fields": [
            { "id": "f9", "type": "email", "label": "Work Email", "required": true }
        ]
    });
    let res = server
        .put(&format!("/api/forms/{form_id}"))
        .add_header(header::AUTHORIZATION, auth.clone())
        .json(&replacement)
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    let res = server
        .get(&format!("/api/forms/{form_id}"))
        .add_header(header::AUTHORIZATION, auth.clone())
        .await;
    let form = res.json::<Value>();
    assert_eq!(form["title"], "Renamed");
    assert_eq!(form["fields"].as_array().unwrap().len(), 1);
    assert_eq!(form["fields"][0]["label"], "Work Email");

    // Dropping the email field through an update is also rejected.
    let invalid = json!({
        "title": "Renamed",
        "description": "v2",
        "fields": [
            { "id": "f9", "type": "text", "label": "Name", "required": false }
        ]
    });
    let res = server
        .put(&format!("/api/forms/{form_id}"))
        .add_header(header::AUTHORIZATION, auth)
        .json(&invalid)
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
}
