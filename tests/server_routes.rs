use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use std::sync::Arc;
use tower::ServiceExt;

use stillsafe::inference::InferenceEndpoint;
use stillsafe::intake::FIELD_NAMES;
use stillsafe::server::{router, AppState};
use stillsafe::{AssessmentError, RiskAssessor, ScalerParams};

struct FixedEndpoint {
    reply: Result<&'static str, &'static str>,
}

#[async_trait]
impl InferenceEndpoint for FixedEndpoint {
    async fn invoke(&self, _csv_line: &str) -> Result<String, AssessmentError> {
        self.reply
            .map(str::to_string)
            .map_err(|e| AssessmentError::Transport(e.to_string()))
    }
}

fn app(reply: Result<&'static str, &'static str>) -> Router {
    let scaler = ScalerParams {
        feature_names: FIELD_NAMES.iter().map(|s| s.to_string()).collect(),
        mean: vec![0.0; FIELD_NAMES.len()],
        scale: vec![1.0; FIELD_NAMES.len()],
    };
    let assessor = RiskAssessor::new(scaler, Arc::new(FixedEndpoint { reply }));
    router(AppState { assessor: Arc::new(assessor) })
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_all_pages_render() {
    let pages = [
        ("/", "About StillSafe"),
        ("/assessment", "Risk Assessment Tool"),
        ("/team", "Meet Our Team"),
        ("/tips", "Your Guide to a Safe and Healthy Pregnancy"),
        ("/feedback", "Your Feedback"),
    ];
    for (uri, marker) in pages {
        let response = app(Ok("0")).oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "uri = {}", uri);
        assert!(body_string(response).await.contains(marker), "uri = {}", uri);
    }
}

#[tokio::test]
async fn test_health() {
    let response = app(Ok("0")).oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_form_submission_renders_low_risk_message() {
    let request = post_form(
        "/assessment",
        "delivery_month=June&mothers_age=30&mothers_race=White+%28alone%29&weight_pounds=120&height_inches=60",
    );
    let response = app(Ok("0.08")).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("We are pleased to inform you"));
    assert!(html.contains("Your calculated pre-pregnancy BMI: 23.43"));
    assert!(html.contains("<option value=\"June\" selected>June</option>"));
}

#[tokio::test]
async fn test_form_submission_out_of_range() {
    let response = app(Ok("0")).oneshot(post_form("/assessment", "mothers_age=70")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_string(response).await.contains("Mother's age 70 out of range [0, 65]"));
}

#[tokio::test]
async fn test_form_submission_with_unparseable_number() {
    for body in ["mothers_age=&delivery_month=June", "mothers_age=30.0"] {
        let response = app(Ok("0")).oneshot(post_form("/assessment", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "body = {}", body);

        let html = body_string(response).await;
        assert!(html.contains("Please check your answers:"), "body = {}", body);
        assert!(html.contains("Failed to deserialize form body"), "body = {}", body);
        assert!(html.contains("Risk Assessment Tool"), "body = {}", body);
    }
}

#[tokio::test]
async fn test_form_submission_shows_failure_in_place_of_message() {
    let response = app(Err("connection refused")).oneshot(post_form("/assessment", "mothers_age=30")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let html = body_string(response).await;
    assert!(html.contains("inference request failed: connection refused"));
    assert!(!html.contains("We are pleased to inform you"));
}

#[tokio::test]
async fn test_json_assessment_high_risk() {
    let request = post_json("/v1/assess", serde_json::json!({ "delivery_month": "June", "diabetes_prepregnancy": "Yes" }));
    let response = app(Ok("0.97,0.03")).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["prediction"], 1);
    assert_eq!(body["risk"], "high");
    assert!(body["message"].as_str().unwrap().starts_with("We regret to inform you"));
}

#[tokio::test]
async fn test_json_assessment_tags_failures() {
    let response = app(Ok("not-a-number")).oneshot(post_json("/v1/assess", serde_json::json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["kind"], "parse");

    let request = post_json("/v1/assess", serde_json::json!({ "mothers_race": "Unlisted" }));
    let response = app(Ok("0")).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["kind"], "unknown_option");
}

#[tokio::test]
async fn test_json_assessment_validation() {
    let request = post_json("/v1/assess", serde_json::json!({ "prenatal_care_month": 0, "infant_sex": "Other" }));
    let response = app(Ok("0")).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "invalid");
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_feedback_submission() {
    let response = app(Ok("0")).oneshot(post_form("/feedback", "message=+++")).await.unwrap();
    assert!(body_string(response).await.contains("Please enter some feedback"));

    let response = app(Ok("0")).oneshot(post_form("/feedback", "message=Lovely+site")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Thank you for your feedback!"));
}
