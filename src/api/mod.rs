use axum::Json;
use axum::extract::Query;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;

use crate::db::repository;
use crate::error::AppError;
use crate::models::*;
use crate::services::EnrollmentService;
use crate::state::AppState;

#[derive(Deserialize)]
struct RegistrationQueryParams {
    student_email: Option<String>,
}

#[derive(Deserialize)]
struct MarksQueryParams {
    student_email: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route("/registrations", get(list_registrations))
        .route("/attendance", get(list_marks))
        .route("/register", post(enroll))
        .route("/register/drop", post(drop_registration))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = repository::fetch_courses(&state.db).await?;
    Ok(Json(courses))
}

async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<NewCourseRequest>,
) -> Result<Json<Course>, AppError> {
    let course = repository::insert_course(&state.db, req).await?;
    Ok(Json(course))
}

/// With `student_email` set, the student's own registrations; without it,
/// the full roster joined with course titles for the admin view.
async fn list_registrations(
    State(state): State<AppState>,
    Query(params): Query<RegistrationQueryParams>,
) -> Result<Response, AppError> {
    match params.student_email {
        Some(email) => {
            let regs = repository::fetch_registrations_for_student(&state.db, &email).await?;
            Ok(Json(regs).into_response())
        }
        None => {
            let roster = repository::fetch_roster(&state.db).await?;
            Ok(Json(roster).into_response())
        }
    }
}

async fn list_marks(
    State(state): State<AppState>,
    Query(params): Query<MarksQueryParams>,
) -> Result<Json<Vec<StudentMarks>>, AppError> {
    let marks = repository::fetch_marks_for_student(&state.db, &params.student_email).await?;
    Ok(Json(marks))
}

async fn enroll(
    State(state): State<AppState>,
    Json(req): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<Registration>), AppError> {
    let service = EnrollmentService::new(state.db.clone(), state.marks.clone());
    let registration = service.enroll(req).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

async fn drop_registration(
    State(state): State<AppState>,
    Json(req): Json<DropRequest>,
) -> Result<StatusCode, AppError> {
    let service = EnrollmentService::new(state.db.clone(), state.marks.clone());
    service.withdraw(req).await?;
    Ok(StatusCode::NO_CONTENT)
}
