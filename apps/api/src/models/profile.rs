use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::college::Profession;

/// What the student is aiming for after graduating. Only feeds the suggestion prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareerGoal {
    #[serde(rename = "Higher Studies")]
    HigherStudies,
    #[serde(rename = "Job Placement")]
    JobPlacement,
    #[serde(rename = "Government Exams")]
    GovernmentExams,
    Entrepreneurship,
    Research,
    #[default]
    #[serde(rename = "Still exploring")]
    StillExploring,
}

impl CareerGoal {
    pub const ALL: [CareerGoal; 6] = [
        CareerGoal::HigherStudies,
        CareerGoal::JobPlacement,
        CareerGoal::GovernmentExams,
        CareerGoal::Entrepreneurship,
        CareerGoal::Research,
        CareerGoal::StillExploring,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CareerGoal::HigherStudies => "Higher Studies",
            CareerGoal::JobPlacement => "Job Placement",
            CareerGoal::GovernmentExams => "Government Exams",
            CareerGoal::Entrepreneurship => "Entrepreneurship",
            CareerGoal::Research => "Research",
            CareerGoal::StillExploring => "Still exploring",
        }
    }
}

impl fmt::Display for CareerGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which workflow an interaction follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpType {
    #[default]
    Suggestions,
    Comparison,
    AdmissionHelp,
    CareerGuidance,
}

impl HelpType {
    pub const ALL: [HelpType; 4] = [
        HelpType::Suggestions,
        HelpType::Comparison,
        HelpType::AdmissionHelp,
        HelpType::CareerGuidance,
    ];
}

/// The sidebar selections for a single interaction. Built from the request body, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub profession: Profession,
    #[serde(default)]
    pub preferred_course: Option<String>,
    #[serde(default)]
    pub career_goal: CareerGoal,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub help_type: HelpType,
}

impl StudentProfile {
    /// Preferred course with surrounding whitespace removed; `None` when blank.
    pub fn course_filter(&self) -> Option<&str> {
        non_blank(self.preferred_course.as_deref())
    }

    /// Preferred location with surrounding whitespace removed; `None` when blank.
    pub fn location_filter(&self) -> Option<&str> {
        non_blank(self.location.as_deref())
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
