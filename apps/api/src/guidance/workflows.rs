//! Interaction workflows: one function per help type.
//!
//! Flow: validate inputs → filter/compare → build prompts → guidance calls → render.
//! Sections within one interaction are independent; a failed section is reported in place
//! and never aborts the ones around it.

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::filter::top_college_names;
use crate::catalog::{compare, suggest, Catalog};
use crate::errors::AppError;
use crate::guidance::prompts::{fields, GuidanceRequest, PromptContext, PromptKind};
use crate::guidance::render;
use crate::llm_client::{generate_with_timeout, GuidanceClient};
use crate::models::profile::non_blank;
use crate::models::{CollegeRecord, HelpType, StudentProfile};

pub const NO_MATCHES_WARNING: &str = "No exact matches found. Try changing filters.";
const ADMISSION_INPUTS_REQUIRED: &str = "Please enter both college and course.";
const CAREER_COURSE_REQUIRED: &str = "Please enter a course to get career guidance.";
const COMPARISON_NAMES_REQUIRED: &str = "Please select two colleges to compare.";

/// How guidance calls are issued. Built from `Config` at startup.
#[derive(Debug, Clone, Copy)]
pub struct GuidanceSettings {
    pub timeout: Duration,
    /// Issue a workflow's sections concurrently instead of one after another.
    pub concurrent: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionOutcome {
    Ready { content: String },
    Failed { message: String },
}

/// One generated block of guidance, e.g. "Entrance Exams".
#[derive(Debug, Clone, Serialize)]
pub struct GuidanceSection {
    pub kind: PromptKind,
    pub title: &'static str,
    #[serde(flatten)]
    pub outcome: SectionOutcome,
}

impl GuidanceSection {
    pub fn is_ready(&self) -> bool {
        matches!(self.outcome, SectionOutcome::Ready { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionReport {
    pub matches: Vec<CollegeRecord>,
    /// Set instead of calling the model when nothing matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<GuidanceSection>,
    pub markdown: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub first: CollegeRecord,
    pub second: CollegeRecord,
    /// Rendered cards, one per column.
    pub markdown: [String; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct GuidanceReport {
    pub sections: Vec<GuidanceSection>,
    pub markdown: String,
    pub generated_at: DateTime<Utc>,
}

/// Body of the dispatch endpoint: the profile plus whatever inputs its help type needs.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionRequest {
    pub profile: StudentProfile,
    #[serde(default)]
    pub college_a: Option<String>,
    #[serde(default)]
    pub college_b: Option<String>,
    #[serde(default)]
    pub target_college: Option<String>,
    #[serde(default)]
    pub target_course: Option<String>,
    /// Confirmed course for career guidance; falls back to the profile's preferred course.
    #[serde(default)]
    pub course: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "help_type", rename_all = "snake_case")]
pub enum InteractionReport {
    Suggestions(SuggestionReport),
    Comparison(ComparisonReport),
    AdmissionHelp(GuidanceReport),
    CareerGuidance(GuidanceReport),
}

// ────────────────────────────────────────────────────────────────────────────
// Workflows
// ────────────────────────────────────────────────────────────────────────────

/// College suggestions: ranked matches plus one summary section.
///
/// No matches is a normal outcome: the report carries `NO_MATCHES_WARNING` and the
/// model is not called.
pub async fn run_suggestions(
    catalog: &Catalog,
    guidance: &dyn GuidanceClient,
    settings: &GuidanceSettings,
    profile: &StudentProfile,
) -> Result<SuggestionReport, AppError> {
    let ranked = suggest(catalog, profile);
    info!(
        "Suggestions for {}: {} matches",
        profile.profession,
        ranked.len()
    );

    if ranked.is_empty() {
        return Ok(SuggestionReport {
            matches: Vec::new(),
            warning: Some(NO_MATCHES_WARNING.to_string()),
            guidance: None,
            markdown: format!("⚠️ {NO_MATCHES_WARNING}\n"),
            generated_at: Utc::now(),
        });
    }

    let context = PromptContext::from([
        (fields::PROFESSION, profile.profession.to_string()),
        (fields::COURSE, profile.course_filter().unwrap_or("Any").to_string()),
        (fields::CAREER_GOAL, profile.career_goal.to_string()),
        (fields::LOCATION, profile.location_filter().unwrap_or("Any").to_string()),
        (fields::TOP_COLLEGES, top_college_names(&ranked)),
    ]);
    let request = GuidanceRequest::for_kind(PromptKind::Suggestion, &context)?;
    let section = run_section(guidance, settings.timeout, request).await;

    let mut markdown: String = ranked.iter().map(|r| render::college_card(r)).collect();
    markdown.push('\n');
    markdown.push_str(&render::sections(std::slice::from_ref(&section)));

    Ok(SuggestionReport {
        matches: ranked.into_iter().cloned().collect(),
        warning: None,
        guidance: Some(section),
        markdown,
        generated_at: Utc::now(),
    })
}

/// Side-by-side comparison of two catalog colleges. Never calls the model.
pub fn run_comparison(
    catalog: &Catalog,
    college_a: &str,
    college_b: &str,
) -> Result<ComparisonReport, AppError> {
    let (first, second) = compare(catalog, college_a, college_b)?;
    Ok(ComparisonReport {
        markdown: [render::comparison_card(first), render::comparison_card(second)],
        first: first.clone(),
        second: second.clone(),
    })
}

/// Admission help for a target college and course: eligibility, exams, process, tips, motivation.
pub async fn run_admission(
    guidance: &dyn GuidanceClient,
    settings: &GuidanceSettings,
    target_college: Option<&str>,
    target_course: Option<&str>,
) -> Result<GuidanceReport, AppError> {
    let (Some(college), Some(course)) = (non_blank(target_college), non_blank(target_course))
    else {
        return Err(AppError::Validation(ADMISSION_INPUTS_REQUIRED.to_string()));
    };

    info!("Admission guidance for '{course}' at '{college}'");
    let context = PromptContext::from([
        (fields::TARGET_COLLEGE, college.to_string()),
        (fields::TARGET_COURSE, course.to_string()),
    ]);
    run_report(guidance, settings, &PromptKind::ADMISSION, &context).await
}

/// Career guidance for a confirmed course, falling back to the preferred course.
pub async fn run_career(
    guidance: &dyn GuidanceClient,
    settings: &GuidanceSettings,
    course: Option<&str>,
    preferred_course: Option<&str>,
) -> Result<GuidanceReport, AppError> {
    let course = non_blank(course)
        .or_else(|| non_blank(preferred_course))
        .ok_or_else(|| AppError::Validation(CAREER_COURSE_REQUIRED.to_string()))?;

    info!("Career guidance for '{course}'");
    let context = PromptContext::from([(fields::COURSE, course.to_string())]);
    run_report(guidance, settings, &PromptKind::CAREER, &context).await
}

/// Routes a full interaction by the profile's help type.
pub async fn run_interaction(
    catalog: &Catalog,
    guidance: &dyn GuidanceClient,
    settings: &GuidanceSettings,
    request: &InteractionRequest,
) -> Result<InteractionReport, AppError> {
    match request.profile.help_type {
        HelpType::Suggestions => run_suggestions(catalog, guidance, settings, &request.profile)
            .await
            .map(InteractionReport::Suggestions),
        HelpType::Comparison => {
            let (Some(a), Some(b)) = (request.college_a.as_deref(), request.college_b.as_deref())
            else {
                return Err(AppError::Validation(COMPARISON_NAMES_REQUIRED.to_string()));
            };
            run_comparison(catalog, a, b).map(InteractionReport::Comparison)
        }
        HelpType::AdmissionHelp => run_admission(
            guidance,
            settings,
            request.target_college.as_deref(),
            request.target_course.as_deref(),
        )
        .await
        .map(InteractionReport::AdmissionHelp),
        HelpType::CareerGuidance => run_career(
            guidance,
            settings,
            request.course.as_deref(),
            request.profile.preferred_course.as_deref(),
        )
        .await
        .map(InteractionReport::CareerGuidance),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section dispatch
// ────────────────────────────────────────────────────────────────────────────

async fn run_report(
    guidance: &dyn GuidanceClient,
    settings: &GuidanceSettings,
    kinds: &[PromptKind],
    context: &PromptContext,
) -> Result<GuidanceReport, AppError> {
    // All prompts are built before any call so a template error never leaves half a report.
    let requests = kinds
        .iter()
        .map(|kind| GuidanceRequest::for_kind(*kind, context))
        .collect::<Result<Vec<_>, _>>()?;

    let sections = run_sections(guidance, settings, requests).await;
    let failed = sections.iter().filter(|s| !s.is_ready()).count();
    if failed > 0 {
        warn!("{failed} of {} guidance sections failed", sections.len());
    }

    Ok(GuidanceReport {
        markdown: render::sections(&sections),
        sections,
        generated_at: Utc::now(),
    })
}

/// Runs every request and returns sections in request order, whether issued
/// concurrently or sequentially.
pub async fn run_sections(
    guidance: &dyn GuidanceClient,
    settings: &GuidanceSettings,
    requests: Vec<GuidanceRequest>,
) -> Vec<GuidanceSection> {
    if settings.concurrent {
        join_all(
            requests
                .into_iter()
                .map(|request| run_section(guidance, settings.timeout, request)),
        )
        .await
    } else {
        let mut sections = Vec::with_capacity(requests.len());
        for request in requests {
            sections.push(run_section(guidance, settings.timeout, request).await);
        }
        sections
    }
}

async fn run_section(
    guidance: &dyn GuidanceClient,
    timeout: Duration,
    request: GuidanceRequest,
) -> GuidanceSection {
    let outcome =
        match generate_with_timeout(guidance, &request.prompt, &request.params, timeout).await {
            Ok(content) => SectionOutcome::Ready { content },
            Err(e) => {
                warn!("Guidance section {:?} failed: {e}", request.kind);
                SectionOutcome::Failed {
                    message: format!("Could not generate {}: {e}", request.kind.title()),
                }
            }
        };

    GuidanceSection {
        kind: request.kind,
        title: request.kind.title(),
        outcome,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
