pub mod college;
pub mod profile;

pub use college::{CollegeRecord, Profession};
pub use profile::{CareerGoal, HelpType, StudentProfile};
