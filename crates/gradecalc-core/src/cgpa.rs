//! Cumulative GPA across semesters.
//!
//! CGPA is a second-level weighted average over semester totals:
//! Σ semester quality points / Σ semester credit hours. It never looks at
//! individual courses again, so audit and zero-credit exclusions are already
//! reflected in each semester's totals.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gpa::process_semester;
use crate::model::{ReportedSemester, SemesterInput};
use crate::results::{CgpaSummary, DashboardResult, SemesterResult};

/// Highest GPA on the university's scale.
pub const GPA_SCALE_MAX: f64 = 4.0;

/// Sum semester totals and derive the cumulative GPA.
pub fn summarize_semesters(semesters: &[SemesterResult]) -> CgpaSummary {
    let total_quality_points: f64 = semesters.iter().map(|s| s.total_quality_points).sum();
    let total_credit_hours: f64 = semesters.iter().map(|s| s.total_credit_hours).sum();

    let cgpa = if total_credit_hours > 0.0 {
        total_quality_points / total_credit_hours
    } else {
        0.0
    };

    CgpaSummary {
        cgpa,
        total_credit_hours,
        total_quality_points,
    }
}

/// Cumulative GPA of already-aggregated semesters; zero when there are no
/// semesters or no credit hours.
pub fn compute_cgpa(semesters: &[SemesterResult]) -> f64 {
    summarize_semesters(semesters).cgpa
}

/// Aggregate every semester and the cumulative totals in one pass.
pub fn process_dashboard(semesters: &[SemesterInput]) -> DashboardResult {
    let semesters: Vec<SemesterResult> = semesters
        .iter()
        .map(|s| process_semester(&s.id, &s.name, &s.courses))
        .collect();
    let summary = summarize_semesters(&semesters);

    tracing::debug!(
        semesters = semesters.len(),
        cgpa = summary.cgpa,
        credit_hours = summary.total_credit_hours,
        "dashboard aggregated"
    );

    DashboardResult {
        semesters,
        cgpa: summary.cgpa,
        total_credit_hours: summary.total_credit_hours,
        total_quality_points: summary.total_quality_points,
    }
}

/// Estimate CGPA from semesters whose GPA is already known.
///
/// Each GPA is weighted by its credit hours. Entries with non-positive
/// credit hours or a GPA outside `0..=4` are skipped. The estimate is
/// rounded half up to two decimals, as the quick calculator shows it.
pub fn estimate_cgpa(semesters: &[ReportedSemester]) -> f64 {
    let (weighted, hours) = semesters
        .iter()
        .filter(|s| s.credit_hours > 0.0 && (0.0..=GPA_SCALE_MAX).contains(&s.gpa))
        .fold((0.0, 0.0), |(weighted, hours), s| {
            (weighted + s.gpa * s.credit_hours, hours + s.credit_hours)
        });

    if hours > 0.0 {
        crate::resolver::round_half_up(weighted / hours, 2)
    } else {
        0.0
    }
}

/// Qualitative band for a GPA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GpaStanding {
    Excellent,
    Good,
    Average,
    NeedsWork,
}

impl GpaStanding {
    /// Classify a GPA, clamped to `0..=4` first.
    pub fn from_gpa(gpa: f64) -> Self {
        let gpa = clamp_to_scale(gpa);
        if gpa >= 3.5 {
            Self::Excellent
        } else if gpa >= 3.0 {
            Self::Good
        } else if gpa >= 2.5 {
            Self::Average
        } else {
            Self::NeedsWork
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::NeedsWork => "Needs Work",
        }
    }
}

impl fmt::Display for GpaStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clamp a GPA into `0..=4` for display. NaN reads as 0.
pub fn clamp_to_scale(gpa: f64) -> f64 {
    if gpa.is_nan() {
        0.0
    } else {
        gpa.clamp(0.0, GPA_SCALE_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CourseInput, TotalMarksScheme};

    const EPS: f64 = 1e-9;

    fn semester(gpa: f64, hours: f64, qp: f64) -> SemesterResult {
        SemesterResult {
            id: String::new(),
            name: String::new(),
            courses: vec![],
            gpa,
            total_credit_hours: hours,
            total_quality_points: qp,
        }
    }

    #[test]
    fn cgpa_of_two_semesters() {
        let semesters = vec![semester(3.5, 15.0, 52.5), semester(3.0, 15.0, 45.0)];
        assert!((compute_cgpa(&semesters) - 3.25).abs() < EPS);

        let summary = summarize_semesters(&semesters);
        assert!((summary.total_credit_hours - 30.0).abs() < EPS);
        assert!((summary.total_quality_points - 97.5).abs() < EPS);
    }

    #[test]
    fn cgpa_weights_by_credit_hours_not_semester_count() {
        let semesters = vec![semester(4.0, 18.0, 72.0), semester(2.0, 6.0, 12.0)];
        // (72 + 12) / 24 = 3.5, not (4 + 2) / 2 = 3.0
        assert!((compute_cgpa(&semesters) - 3.5).abs() < EPS);
    }

    #[test]
    fn cgpa_of_nothing_is_zero() {
        assert_eq!(compute_cgpa(&[]), 0.0);
        assert_eq!(summarize_semesters(&[]), CgpaSummary::default());
    }

    #[test]
    fn cgpa_with_zero_credit_hours_is_zero() {
        let semesters = vec![semester(0.0, 0.0, 0.0), semester(0.0, 0.0, 0.0)];
        assert_eq!(compute_cgpa(&semesters), 0.0);
    }

    #[test]
    fn dashboard_respects_semester_exclusions() {
        let semesters = vec![
            SemesterInput {
                id: "1".into(),
                name: "Fall".into(),
                courses: vec![
                    CourseInput::new(3.0, TotalMarksScheme::Sixty, 48.0),
                    CourseInput::new(2.0, TotalMarksScheme::Forty, 40.0).audit(),
                ],
            },
            SemesterInput {
                id: "2".into(),
                name: "Spring".into(),
                courses: vec![CourseInput::new(3.0, TotalMarksScheme::Sixty, 30.0)],
            },
        ];

        let dashboard = process_dashboard(&semesters);
        assert_eq!(dashboard.semesters.len(), 2);
        assert_eq!(dashboard.course_count(), 3);
        assert!((dashboard.total_credit_hours - 6.0).abs() < EPS);
        assert!((dashboard.total_quality_points - 18.0).abs() < EPS);
        assert!((dashboard.cgpa - 3.0).abs() < EPS);
        assert!((dashboard.semesters[0].gpa - 4.0).abs() < EPS);
        assert!((dashboard.semesters[1].gpa - 2.0).abs() < EPS);
    }

    #[test]
    fn empty_dashboard() {
        let dashboard = process_dashboard(&[]);
        assert!(dashboard.semesters.is_empty());
        assert_eq!(dashboard.cgpa, 0.0);
    }

    #[test]
    fn estimate_weights_reported_gpas() {
        let semesters = vec![
            ReportedSemester {
                credit_hours: 15.0,
                gpa: 3.5,
            },
            ReportedSemester {
                credit_hours: 15.0,
                gpa: 3.0,
            },
        ];
        assert_eq!(estimate_cgpa(&semesters), 3.25);
    }

    #[test]
    fn estimate_skips_invalid_entries() {
        let semesters = vec![
            ReportedSemester {
                credit_hours: 18.0,
                gpa: 3.2,
            },
            ReportedSemester {
                credit_hours: 0.0,
                gpa: 4.0,
            },
            ReportedSemester {
                credit_hours: 12.0,
                gpa: 4.5,
            },
        ];
        assert_eq!(estimate_cgpa(&semesters), 3.2);
        assert_eq!(estimate_cgpa(&[]), 0.0);
    }

    #[test]
    fn estimate_rounds_for_display() {
        let semesters = vec![
            ReportedSemester {
                credit_hours: 17.0,
                gpa: 3.1,
            },
            ReportedSemester {
                credit_hours: 16.0,
                gpa: 3.67,
            },
        ];
        // (52.7 + 58.72) / 33 = 3.37636..
        assert_eq!(estimate_cgpa(&semesters), 3.38);
    }

    #[test]
    fn standing_bands() {
        assert_eq!(GpaStanding::from_gpa(3.9), GpaStanding::Excellent);
        assert_eq!(GpaStanding::from_gpa(3.5), GpaStanding::Excellent);
        assert_eq!(GpaStanding::from_gpa(3.49), GpaStanding::Good);
        assert_eq!(GpaStanding::from_gpa(3.0), GpaStanding::Good);
        assert_eq!(GpaStanding::from_gpa(2.5), GpaStanding::Average);
        assert_eq!(GpaStanding::from_gpa(2.49), GpaStanding::NeedsWork);
        assert_eq!(GpaStanding::from_gpa(7.0), GpaStanding::Excellent);
        assert_eq!(GpaStanding::from_gpa(-1.0), GpaStanding::NeedsWork);
        assert_eq!(GpaStanding::NeedsWork.to_string(), "Needs Work");
    }

    #[test]
    fn clamp_handles_out_of_scale() {
        assert_eq!(clamp_to_scale(4.4), 4.0);
        assert_eq!(clamp_to_scale(-0.1), 0.0);
        assert_eq!(clamp_to_scale(f64::NAN), 0.0);
        assert_eq!(clamp_to_scale(3.2), 3.2);
    }
}
