//! gradecalc-core: quality-point tables, GPA and CGPA aggregation.
//!
//! This crate is the grading engine: per-mark quality-point tables for each
//! total-marks scheme, resolution of obtained marks against them, semester
//! GPA and cumulative CGPA aggregation, and input validation. Everything is
//! synchronous and side-effect free; results are full precision and should
//! only be rounded for display.

pub mod cgpa;
pub mod error;
pub mod gpa;
pub mod model;
pub mod resolver;
pub mod results;
pub mod table;
pub mod validation;

pub use cgpa::{compute_cgpa, estimate_cgpa, process_dashboard, summarize_semesters, GpaStanding};
pub use error::GradingError;
pub use gpa::{compute_gpa, evaluate_course, process_semester};
pub use model::{CourseInput, Grade, ReportedSemester, SemesterInput, TotalMarksScheme};
pub use resolver::{resolve_quality_point, round_half_up, MarkResolution};
pub use results::{CgpaSummary, CourseResult, DashboardResult, GpaResult, SemesterResult};
pub use table::{get_table, table_for, QualityPointTable};
pub use validation::{validate_course, CourseDraft, ValidationError, ValidationReport};
