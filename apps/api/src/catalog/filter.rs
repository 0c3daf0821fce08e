//! Filter Engine: profession/course/location predicates plus rating ranking.

use std::cmp::Ordering;

use crate::catalog::Catalog;
use crate::models::{CollegeRecord, StudentProfile};

/// How many ranked colleges are named in the suggestion prompt.
pub const TOP_COLLEGES: usize = 5;

/// Returns the records matching `profile`, best rated first.
///
/// Algorithm:
/// 1. Exact match on profession
/// 2. Case-insensitive substring on course, skipped when the preference is blank
/// 3. Same for location
/// 4. Stable sort by rating, descending (ties keep catalog order)
pub fn suggest<'a>(catalog: &'a Catalog, profile: &StudentProfile) -> Vec<&'a CollegeRecord> {
    let course = profile.course_filter().map(str::to_lowercase);
    let location = profile.location_filter().map(str::to_lowercase);

    let mut matches: Vec<&CollegeRecord> = catalog
        .records()
        .iter()
        .filter(|r| r.profession == profile.profession)
        .filter(|r| contains_ci(&r.course, course.as_deref()))
        .filter(|r| contains_ci(&r.location, location.as_deref()))
        .collect();

    // `sort_by` is stable, which is what keeps equal ratings in catalog order.
    // `-0.0` and `0.0` compare equal here, unlike under `total_cmp`.
    matches.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
    matches
}

/// Comma-joined names of the first `TOP_COLLEGES` ranked matches.
pub fn top_college_names(ranked: &[&CollegeRecord]) -> String {
    ranked
        .iter()
        .take(TOP_COLLEGES)
        .map(|r| r.college.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `needle_lower` must already be lowercased. `None` always matches.
fn contains_ci(haystack: &str, needle_lower: Option<&str>) -> bool {
    match needle_lower {
        Some(needle) => haystack.to_lowercase().contains(needle),
        None => true,
    }
}
