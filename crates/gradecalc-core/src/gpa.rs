//! Semester GPA from a list of courses.
//!
//! GPA = Σ quality points / Σ credit hours over graded courses with
//! positive credit hours. Table quality points already carry the credit
//! weight, so they are summed as-is and never multiplied by credit hours.

use crate::model::{CourseInput, Grade, SemesterInput};
use crate::resolver::resolve_quality_point;
use crate::results::{CourseResult, GpaResult, SemesterResult};

/// Attach quality point, grade and percentage to a single course.
///
/// Audit courses are still resolved so their marks can be shown, but their
/// grade becomes `P` and their weighted quality point is zero.
pub fn evaluate_course(course: &CourseInput) -> CourseResult {
    let resolution = resolve_quality_point(course.obtained_marks, course.total_marks);
    let (grade, weighted_quality_point) = if course.is_audit {
        (Grade::Pass, 0.0)
    } else {
        (resolution.grade, resolution.quality_point)
    };

    CourseResult {
        input: course.clone(),
        quality_point: resolution.quality_point,
        grade,
        percentage: resolution.percentage,
        weighted_quality_point,
    }
}

/// Compute GPA for a set of courses.
///
/// Empty input, or input where no course counts, gives a GPA of zero.
/// The returned course list preserves input order and includes excluded
/// courses for display.
pub fn compute_gpa(courses: &[CourseInput]) -> GpaResult {
    if courses.is_empty() {
        return GpaResult::default();
    }

    let courses: Vec<CourseResult> = courses.iter().map(evaluate_course).collect();

    let mut total_credit_hours = 0.0;
    let mut total_quality_points = 0.0;
    for (index, course) in courses.iter().enumerate() {
        if course.counts_toward_gpa() {
            total_credit_hours += course.credit_hours();
            total_quality_points += course.weighted_quality_point;
        } else {
            tracing::debug!(
                index,
                name = course.input.name.as_deref().unwrap_or(""),
                audit = course.is_audit(),
                credit_hours = course.credit_hours(),
                "course excluded from GPA"
            );
        }
    }

    let gpa = if total_credit_hours > 0.0 {
        total_quality_points / total_credit_hours
    } else {
        0.0
    };

    GpaResult {
        gpa,
        total_quality_points,
        total_credit_hours,
        courses,
    }
}

/// Compute a semester's result from its identity and courses.
pub fn process_semester(id: &str, name: &str, courses: &[CourseInput]) -> SemesterResult {
    let result = compute_gpa(courses);
    SemesterResult {
        id: id.to_string(),
        name: name.to_string(),
        courses: result.courses,
        gpa: result.gpa,
        total_credit_hours: result.total_credit_hours,
        total_quality_points: result.total_quality_points,
    }
}

impl From<&SemesterInput> for SemesterResult {
    fn from(semester: &SemesterInput) -> Self {
        process_semester(&semester.id, &semester.name, &semester.courses)
    }
}
