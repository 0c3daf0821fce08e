//! Axum route handlers for the guidance API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppJson};
use crate::guidance::workflows::{
    run_admission, run_career, run_comparison, run_interaction, run_suggestions,
    ComparisonReport, GuidanceReport, InteractionReport, InteractionRequest, SuggestionReport,
};
use crate::models::{CareerGoal, HelpType, Profession, StudentProfile};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub professions: Vec<Profession>,
    pub career_goals: Vec<CareerGoal>,
    pub help_types: Vec<HelpType>,
}

#[derive(Debug, Serialize)]
pub struct CollegesResponse {
    pub colleges: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub college_a: String,
    pub college_b: String,
}

#[derive(Debug, Deserialize)]
pub struct AdmissionRequest {
    #[serde(default)]
    pub target_college: Option<String>,
    #[serde(default)]
    pub target_course: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CareerRequest {
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub preferred_course: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/options
///
/// Choices for the profile form.
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        professions: Profession::ALL.to_vec(),
        career_goals: CareerGoal::ALL.to_vec(),
        help_types: HelpType::ALL.to_vec(),
    })
}

/// GET /api/v1/colleges
///
/// Distinct college names in catalog order, for the comparison pickers.
pub async fn handle_colleges(State(state): State<AppState>) -> Json<CollegesResponse> {
    Json(CollegesResponse {
        colleges: state
            .catalog
            .college_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

/// POST /api/v1/suggestions
pub async fn handle_suggestions(
    State(state): State<AppState>,
    AppJson(profile): AppJson<StudentProfile>,
) -> Result<Json<SuggestionReport>, AppError> {
    let report = run_suggestions(
        &state.catalog,
        state.guidance.as_ref(),
        &state.settings,
        &profile,
    )
    .await?;
    Ok(Json(report))
}

/// POST /api/v1/compare
pub async fn handle_compare(
    State(state): State<AppState>,
    AppJson(request): AppJson<CompareRequest>,
) -> Result<Json<ComparisonReport>, AppError> {
    let report = run_comparison(&state.catalog, &request.college_a, &request.college_b)?;
    Ok(Json(report))
}

/// POST /api/v1/admission
pub async fn handle_admission(
    State(state): State<AppState>,
    AppJson(request): AppJson<AdmissionRequest>,
) -> Result<Json<GuidanceReport>, AppError> {
    let report = run_admission(
        state.guidance.as_ref(),
        &state.settings,
        request.target_college.as_deref(),
        request.target_course.as_deref(),
    )
    .await?;
    Ok(Json(report))
}

/// POST /api/v1/career
pub async fn handle_career(
    State(state): State<AppState>,
    AppJson(request): AppJson<CareerRequest>,
) -> Result<Json<GuidanceReport>, AppError> {
    let report = run_career(
        state.guidance.as_ref(),
        &state.settings,
        request.course.as_deref(),
        request.preferred_course.as_deref(),
    )
    .await?;
    Ok(Json(report))
}

/// POST /api/v1/interact
///
/// Runs whichever workflow `profile.help_type` selects.
pub async fn handle_interact(
    State(state): State<AppState>,
    AppJson(request): AppJson<InteractionRequest>,
) -> Result<Json<InteractionReport>, AppError> {
    let report = run_interaction(
        &state.catalog,
        state.guidance.as_ref(),
        &state.settings,
        &request,
    )
    .await?;
    Ok(Json(report))
}
