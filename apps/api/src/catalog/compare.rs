//! Comparison Selector: side-by-side lookup of two named colleges.

use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::models::CollegeRecord;

/// Returns the first record for each name, in the order requested.
///
/// Names are matched exactly; they come from `Catalog::college_names`, not free text.
/// Any absent name is a `NotFound` and nothing is returned for the other one.
pub fn compare<'a>(
    catalog: &'a Catalog,
    college_a: &str,
    college_b: &str,
) -> Result<(&'a CollegeRecord, &'a CollegeRecord), AppError> {
    let first = lookup(catalog, college_a)?;
    let second = lookup(catalog, college_b)?;
    Ok((first, second))
}

fn lookup<'a>(catalog: &'a Catalog, college: &str) -> Result<&'a CollegeRecord, AppError> {
    catalog
        .find(college)
        .ok_or_else(|| AppError::NotFound(format!("College '{college}' is not in the catalog")))
}
