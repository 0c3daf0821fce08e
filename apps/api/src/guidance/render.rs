//! Markdown presentation of college cards and guidance sections.

use std::fmt::Write;

use crate::guidance::workflows::{GuidanceSection, SectionOutcome};
use crate::models::CollegeRecord;

/// Full card used in the suggestion list.
pub fn college_card(record: &CollegeRecord) -> String {
    format!(
        "### 🏫 {}\n\
         ⭐ **Rating:** {} / 5  \n\
         📍 **Location:** {}  \n\
         🎓 **Course:** {}\n\
         \n\
         **Why this college?**\n\
         - {}\n\
         - {}\n",
        record.college,
        record.rating,
        record.location,
        record.course,
        record.review1,
        record.review2
    )
}

/// Compact card used in the side-by-side comparison columns.
pub fn comparison_card(record: &CollegeRecord) -> String {
    format!(
        "### 🏫 {}\n⭐ {} / 5  \n📍 {}  \n🎓 {}\n- {}\n- {}\n",
        record.college,
        record.rating,
        record.location,
        record.course,
        record.review1,
        record.review2
    )
}

/// One heading per section; failed sections show their message in place of the body.
pub fn sections(sections: &[GuidanceSection]) -> String {
    let mut out = String::new();
    for section in sections {
        let _ = writeln!(out, "### {}", section.title);
        match &section.outcome {
            SectionOutcome::Ready { content } => {
                let _ = writeln!(out, "{content}\n");
            }
            SectionOutcome::Failed { message } => {
                let _ = writeln!(out, "_⚠️ {message}_\n");
            }
        }
    }
    out
}
