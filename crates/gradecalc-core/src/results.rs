//! Derived result types.
//!
//! Everything here is computed from inputs on demand and never constructed
//! independently by callers.

use serde::{Deserialize, Serialize};

use crate::model::{CourseInput, Grade};

/// A course with its resolved quality point attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseResult {
    /// The course exactly as supplied.
    #[serde(flatten)]
    pub input: CourseInput,
    /// Table quality point for the course's marks, shown even for audit
    /// courses.
    pub quality_point: f64,
    /// Table grade, or `P` for audit courses.
    pub grade: Grade,
    pub percentage: f64,
    /// Quality point that enters the GPA sum; zero for audit courses.
    pub weighted_quality_point: f64,
}

impl CourseResult {
    pub fn is_audit(&self) -> bool {
        self.input.is_audit
    }

    pub fn credit_hours(&self) -> f64 {
        self.input.credit_hours
    }

    /// Whether this course enters the GPA sums: graded and carrying
    /// positive credit hours.
    pub fn counts_toward_gpa(&self) -> bool {
        !self.input.is_audit && self.input.credit_hours > 0.0
    }
}

/// GPA over one list of courses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpaResult {
    pub gpa: f64,
    pub total_quality_points: f64,
    pub total_credit_hours: f64,
    /// Every input course, in input order, including excluded ones.
    pub courses: Vec<CourseResult>,
}

/// One semester's courses and totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemesterResult {
    pub id: String,
    pub name: String,
    pub courses: Vec<CourseResult>,
    pub gpa: f64,
    pub total_credit_hours: f64,
    pub total_quality_points: f64,
}

/// Cumulative totals across semesters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CgpaSummary {
    pub cgpa: f64,
    pub total_credit_hours: f64,
    pub total_quality_points: f64,
}

/// All semesters plus their cumulative totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardResult {
    pub semesters: Vec<SemesterResult>,
    pub cgpa: f64,
    pub total_credit_hours: f64,
    pub total_quality_points: f64,
}

impl DashboardResult {
    /// Courses across every semester, in order.
    pub fn course_count(&self) -> usize {
        self.semesters.iter().map(|s| s.courses.len()).sum()
    }
}
