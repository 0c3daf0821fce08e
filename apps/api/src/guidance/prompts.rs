//! Prompt Builder: fixed templates per guidance kind, rendered with literal substitution.
//!
//! Templates use `{name}` placeholders. Rendering is single-pass, so text coming from the
//! student is embedded verbatim and never re-expanded even if it contains braces.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::GenerationParams;

/// Sampling temperature for every randomized kind.
const SAMPLED_TEMPERATURE: f32 = 0.5;

/// Placeholder names shared by the templates and their callers.
pub mod fields {
    pub const PROFESSION: &str = "profession";
    pub const COURSE: &str = "course";
    pub const CAREER_GOAL: &str = "career_goal";
    pub const LOCATION: &str = "location";
    pub const TOP_COLLEGES: &str = "top_colleges";
    pub const TARGET_COLLEGE: &str = "target_college";
    pub const TARGET_COURSE: &str = "target_course";
}

#[derive(Debug, Error, PartialEq)]
pub enum PromptError {
    #[error("template placeholder '{{{0}}}' has no value in the prompt context")]
    MissingField(String),
}

/// Every prompt the service can send. Each is dispatched as its own generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    Suggestion,
    Eligibility,
    Exams,
    Process,
    Tips,
    Motivation,
    Careers,
    HigherStudies,
    Skills,
    CareerMotivation,
}

impl PromptKind {
    /// Admission-help sections, in presentation order.
    pub const ADMISSION: [PromptKind; 5] = [
        PromptKind::Eligibility,
        PromptKind::Exams,
        PromptKind::Process,
        PromptKind::Tips,
        PromptKind::Motivation,
    ];

    /// Career-guidance sections, in presentation order.
    pub const CAREER: [PromptKind; 4] = [
        PromptKind::Careers,
        PromptKind::HigherStudies,
        PromptKind::Skills,
        PromptKind::CareerMotivation,
    ];

    pub fn template(&self) -> &'static str {
        match self {
            PromptKind::Suggestion => SUGGESTION_TEMPLATE,
            PromptKind::Eligibility => ELIGIBILITY_TEMPLATE,
            PromptKind::Exams => EXAMS_TEMPLATE,
            PromptKind::Process => PROCESS_TEMPLATE,
            PromptKind::Tips => TIPS_TEMPLATE,
            PromptKind::Motivation => MOTIVATION_TEMPLATE,
            PromptKind::Careers => CAREERS_TEMPLATE,
            PromptKind::HigherStudies => HIGHER_STUDIES_TEMPLATE,
            PromptKind::Skills => SKILLS_TEMPLATE,
            PromptKind::CareerMotivation => CAREER_MOTIVATION_TEMPLATE,
        }
    }

    /// Length budget and decoding policy. Part of the contract with the guidance client.
    pub fn params(&self) -> GenerationParams {
        match self {
            PromptKind::Suggestion => GenerationParams::greedy(250),
            PromptKind::Eligibility
            | PromptKind::Exams
            | PromptKind::Careers
            | PromptKind::HigherStudies
            | PromptKind::Skills
            | PromptKind::CareerMotivation => GenerationParams::sampled(80, SAMPLED_TEMPERATURE),
            PromptKind::Process | PromptKind::Tips | PromptKind::Motivation => {
                GenerationParams::sampled(120, SAMPLED_TEMPERATURE)
            }
        }
    }

    /// Section heading shown above the generated text.
    pub fn title(&self) -> &'static str {
        match self {
            PromptKind::Suggestion => "AI Guidance",
            PromptKind::Eligibility => "Eligibility",
            PromptKind::Exams => "Entrance Exams",
            PromptKind::Process => "Admission Process",
            PromptKind::Tips => "Preparation Tips",
            PromptKind::Motivation | PromptKind::CareerMotivation => "Motivation",
            PromptKind::Careers => "Career Options",
            PromptKind::HigherStudies => "Higher Studies",
            PromptKind::Skills => "Skills to Build",
        }
    }
}

pub const SUGGESTION_TEMPLATE: &str = "Suggest colleges and motivate the student.

Details:
Profession: {profession}
Course: {course}
Career Goal: {career_goal}
Location: {location}

Top colleges:
{top_colleges}

Give:
1. Best college explanation
2. Admission steps
3. Motivation";

pub const ELIGIBILITY_TEMPLATE: &str = "List 2–3 short eligibility points for admission to
{target_course} at {target_college} in India.
Use simple bullet points.";

pub const EXAMS_TEMPLATE: &str = "Mention entrance exams (if any) required for
{target_course} at {target_college}.
If admission is merit-based, clearly say so.
Keep it short.";

pub const PROCESS_TEMPLATE: &str = "Explain the admission process for {target_course}
at {target_college} in exactly 4 simple numbered steps.";

pub const TIPS_TEMPLATE: &str = "Give 4 practical preparation tips for a student
applying to {target_course} in India.
Use bullet points.";

pub const MOTIVATION_TEMPLATE: &str = "Write a short motivational message (4–5 lines)
to encourage a student applying for college.
Keep it positive and simple.";

pub const CAREERS_TEMPLATE: &str =
    "List 4 career options after studying {course} in India as short bullet points.";

pub const HIGHER_STUDIES_TEMPLATE: &str =
    "List common higher study options in India after {course}.";

pub const SKILLS_TEMPLATE: &str =
    "List important skills students should build for success in {course}.";

pub const CAREER_MOTIVATION_TEMPLATE: &str =
    "Write a short, positive motivational message for a college student.";

/// Values substituted into a template, keyed by placeholder name.
pub type PromptContext = HashMap<&'static str, String>;

/// Renders the template for `kind` against `context`.
///
/// Keys the template does not use are ignored. A placeholder with no value is an error.
pub fn build_prompt(kind: PromptKind, context: &PromptContext) -> Result<String, PromptError> {
    render(kind.template(), context)
}

/// A ready-to-send prompt with its generation parameters. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct GuidanceRequest {
    pub kind: PromptKind,
    pub prompt: String,
    pub params: GenerationParams,
}

impl GuidanceRequest {
    pub fn for_kind(kind: PromptKind, context: &PromptContext) -> Result<Self, PromptError> {
        Ok(Self {
            kind,
            prompt: build_prompt(kind, context)?,
            params: kind.params(),
        })
    }
}

/// Single-pass `{name}` substitution. Braces that do not wrap an identifier are kept as-is.
fn render(template: &str, context: &PromptContext) -> Result<String, PromptError> {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let placeholder = after
            .find('}')
            .map(|close| &after[..close])
            .filter(|name| is_placeholder_name(name));

        match placeholder {
            Some(name) => {
                let value = context
                    .get(name)
                    .ok_or_else(|| PromptError::MissingField(name.to_string()))?;
                out.push_str(value);
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admission_context() -> PromptContext {
        PromptContext::from([
            (fields::TARGET_COLLEGE, "Hindu College, Delhi".to_string()),
            (fields::TARGET_COURSE, "BA Economics".to_string()),
        ])
    }

    fn suggestion_context() -> PromptContext {
        PromptContext::from([
            (fields::PROFESSION, "Engineering".to_string()),
            (fields::COURSE, "Any".to_string()),
            (fields::CAREER_GOAL, "Research".to_string()),
            (fields::LOCATION, "Chennai".to_string()),
            (fields::TOP_COLLEGES, "B, A".to_string()),
        ])
    }

    #[test]
    fn test_suggestion_prompt_contents() {
        let prompt = build_prompt(PromptKind::Suggestion, &suggestion_context()).unwrap();
        assert!(prompt.starts_with("Suggest colleges and motivate the student."));
        assert!(prompt.contains("Profession: Engineering\nCourse: Any\n"));
        assert!(prompt.contains("Career Goal: Research"));
        assert!(prompt.contains("Top colleges:\nB, A\n"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_admission_wording_is_verbatim() {
        let eligibility = build_prompt(PromptKind::Eligibility, &admission_context()).unwrap();
        assert!(eligibility.starts_with("List 2–3 short eligibility points for admission to\n"));
        let motivation = build_prompt(PromptKind::Motivation, &admission_context()).unwrap();
        assert!(motivation.starts_with("Write a short motivational message (4–5 lines)\n"));
    }

    #[test]
    fn test_every_admission_kind_renders() {
        for kind in PromptKind::ADMISSION {
            let prompt = build_prompt(kind, &admission_context()).unwrap();
            assert!(!prompt.contains('{'), "{kind:?} left a placeholder");
        }
        let process = build_prompt(PromptKind::Process, &admission_context()).unwrap();
        assert_eq!(
            process,
            "Explain the admission process for BA Economics\n\
             at Hindu College, Delhi in exactly 4 simple numbered steps."
        );
    }

    #[test]
    fn test_every_career_kind_renders() {
        let context = PromptContext::from([(fields::COURSE, "B.Com".to_string())]);
        for kind in PromptKind::CAREER {
            assert!(build_prompt(kind, &context).is_ok(), "{kind:?} failed");
        }
        assert_eq!(
            build_prompt(PromptKind::Skills, &context).unwrap(),
            "List important skills students should build for success in B.Com."
        );
    }

    #[test]
    fn test_missing_field_is_error() {
        let err = build_prompt(PromptKind::Careers, &PromptContext::new()).unwrap_err();
        assert_eq!(err, PromptError::MissingField("course".to_string()));
    }

    #[test]
    fn test_deterministic() {
        let ctx = suggestion_context();
        assert_eq!(
            build_prompt(PromptKind::Suggestion, &ctx),
            build_prompt(PromptKind::Suggestion, &ctx)
        );
    }

    #[test]
    fn test_user_text_is_not_re_expanded() {
        let context = PromptContext::from([
            (fields::TARGET_COLLEGE, "{target_course}".to_string()),
            (fields::TARGET_COURSE, "Law {x} }{".to_string()),
        ]);
        let prompt = build_prompt(PromptKind::Exams, &context).unwrap();
        assert!(prompt.contains("Law {x} }{ at {target_course}."));
    }

    #[test]
    fn test_non_placeholder_braces_kept() {
        let ctx = PromptContext::from([(fields::COURSE, "MBA".to_string())]);
        assert_eq!(render("a {} b {Not} {course}", &ctx).unwrap(), "a {} b {Not} MBA");
        assert_eq!(render("dangling {", &ctx).unwrap(), "dangling {");
    }

    #[test]
    fn test_params_per_kind() {
        let suggestion = PromptKind::Suggestion.params();
        assert_eq!(suggestion.max_new_tokens, 250);
        assert!(!suggestion.sampling);

        assert_eq!(PromptKind::Eligibility.params().max_new_tokens, 80);
        assert_eq!(PromptKind::Process.params().max_new_tokens, 120);
        assert_eq!(PromptKind::Tips.params().max_new_tokens, 120);
        assert_eq!(PromptKind::Motivation.params().max_new_tokens, 120);
        assert_eq!(PromptKind::CareerMotivation.params().max_new_tokens, 80);

        for kind in PromptKind::ADMISSION.iter().chain(PromptKind::CAREER.iter()) {
            let p = kind.params();
            assert!(p.sampling);
            assert_eq!(p.temperature, 0.5);
        }
    }

    #[test]
    fn test_guidance_request_pairs_prompt_and_params() {
        let req = GuidanceRequest::for_kind(PromptKind::Tips, &admission_context()).unwrap();
        assert_eq!(req.params, PromptKind::Tips.params());
        assert!(req.prompt.contains("applying to BA Economics in India."));
    }
}
