use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level track a college row belongs to.
///
/// Wire and CSV spellings match the labels students pick from, so
/// `"Arts & Science"` round-trips as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profession {
    Engineering,
    Medical,
    #[serde(rename = "Arts & Science", alias = "Arts&Science")]
    ArtsAndScience,
    Management,
}

impl Profession {
    pub const ALL: [Profession; 4] = [
        Profession::Engineering,
        Profession::Medical,
        Profession::ArtsAndScience,
        Profession::Management,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Profession::Engineering => "Engineering",
            Profession::Medical => "Medical",
            Profession::ArtsAndScience => "Arts & Science",
            Profession::Management => "Management",
        }
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the college catalog. Validated once at load time and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollegeRecord {
    pub college: String,
    pub profession: Profession,
    pub course: String,
    pub location: String,
    pub rating: f32,
    pub review1: String,
    pub review2: String,
}
