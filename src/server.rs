use axum::{
    extract::{rejection::FormRejection, Form, Json, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::assessment::RiskAssessor;
use crate::error::AssessmentError;
use crate::intake::IntakeForm;
use crate::views::{self, FeedbackNotice, Outcome};

// Assessment failures rendered as a tagged JSON body
struct ServerError(AssessmentError);

fn failure_status(err: &AssessmentError) -> StatusCode {
    if err.is_upstream() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        log_failure(&self.0);
        let body = json!({
            "status": "error",
            "kind": self.0.kind(),
            "message": self.0.to_string(),
        });
        (failure_status(&self.0), Json(body)).into_response()
    }
}

impl From<AssessmentError> for ServerError {
    fn from(err: AssessmentError) -> Self { Self(err) }
}

#[derive(Clone)]
pub struct AppState {
    pub assessor: Arc<RiskAssessor>,
}

#[derive(Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    message: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/assessment", get(assessment_form).post(submit_assessment))
        .route("/team", get(team))
        .route("/tips", get(tips))
        .route("/feedback", get(feedback_form).post(submit_feedback))
        .route("/v1/assess", post(assess_json))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("StillSafe ready: http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home() -> Html<String> {
    Html(views::home())
}

async fn team() -> Html<String> {
    Html(views::team())
}

async fn tips() -> Html<String> {
    Html(views::tips())
}

async fn health() -> &'static str {
    "ok"
}

async fn assessment_form() -> Html<String> {
    Html(views::assessment(&IntakeForm::default(), None))
}

async fn submit_assessment(
    State(state): State<AppState>,
    form: Result<Form<IntakeForm>, FormRejection>,
) -> Response {
    // Unparseable numbers never reach validate(); show them on the form instead
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!("Rejected assessment form: {}", rejection.body_text());
            let errors = [rejection.body_text()];
            let page = views::assessment(&IntakeForm::default(), Some(Outcome::Invalid(&errors)));
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
        }
    };

    if let Err(errors) = form.validate() {
        let page = views::assessment(&form, Some(Outcome::Invalid(&errors)));
        return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
    }

    match state.assessor.assess(&form).await {
        Ok(assessment) => Html(views::assessment(&form, Some(Outcome::Risk(&assessment)))).into_response(),
        Err(e) => {
            log_failure(&e);
            // The failure text takes the place of the risk message
            let page = views::assessment(&form, Some(Outcome::Failed(e.to_string())));
            (failure_status(&e), Html(page)).into_response()
        }
    }
}

async fn assess_json(
    State(state): State<AppState>,
    Json(form): Json<IntakeForm>,
) -> Result<Response, ServerError> {
    if let Err(errors) = form.validate() {
        let body = json!({ "status": "invalid", "errors": errors });
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response());
    }

    let assessment = state.assessor.assess(&form).await?;
    Ok(Json(json!({
        "status": "ok",
        "prediction": assessment.prediction,
        "risk": assessment.risk,
        "message": assessment.message,
    }))
    .into_response())
}

async fn feedback_form() -> Html<String> {
    Html(views::feedback(None))
}

async fn submit_feedback(Form(feedback): Form<FeedbackForm>) -> Html<String> {
    let message = feedback.message.trim();
    if message.is_empty() {
        warn!("Empty feedback submitted");
        return Html(views::feedback(Some(FeedbackNotice::Empty)));
    }

    // Feedback is acknowledged, never stored
    info!(chars = message.chars().count(), "Feedback received");
    Html(views::feedback(Some(FeedbackNotice::Thanks)))
}

fn log_failure(err: &AssessmentError) {
    if err.is_upstream() {
        warn!(kind = err.kind(), "Assessment failed upstream: {}", err);
    } else {
        error!(kind = err.kind(), "Assessment failed: {}", err);
    }
}
