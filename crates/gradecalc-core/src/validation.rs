//! Input validation.
//!
//! Validation is advisory: it returns every failed rule as a named
//! [`ValidationError`] rather than stopping at the first one, and the
//! calculation functions never depend on it having run. Raw input arrives
//! as a [`CourseDraft`] (total marks still an unchecked integer) and only
//! becomes a [`CourseInput`] once it passes.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cgpa::GPA_SCALE_MAX;
use crate::error::GradingError;
use crate::model::{CourseInput, ReportedSemester, TotalMarksScheme};

pub const MAX_CREDIT_HOURS: f64 = 10.0;
pub const MAX_COURSE_NAME_LEN: usize = 100;
pub const MAX_SEMESTER_NAME_LEN: usize = 50;
pub const MAX_BATCH_SEMESTERS: usize = 8;

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Credit hours must be a number")]
    CreditHoursNotANumber,

    #[error("Credit hours must be a positive number")]
    CreditHoursNotPositive,

    #[error("Credit hours cannot exceed 10")]
    CreditHoursTooHigh,

    #[error("Total marks must be one of: 20, 40, 60, 80, or 100")]
    InvalidTotalMarks { total_marks: u32 },

    #[error("Obtained marks must be a number")]
    ObtainedMarksNotANumber,

    #[error("Obtained marks cannot be negative")]
    ObtainedMarksNegative,

    #[error("Obtained marks cannot exceed total marks")]
    ObtainedMarksExceedTotal,

    #[error("Course name is required")]
    CourseNameRequired,

    #[error("Course name too long (max 100 characters)")]
    CourseNameTooLong,

    #[error("Semester name is required")]
    SemesterNameRequired,

    #[error("Semester name too long (max 50 characters)")]
    SemesterNameTooLong,

    #[error("At least one semester is required")]
    NoSemesters,

    #[error("Maximum 8 semesters allowed")]
    TooManySemesters { count: usize },

    #[error("At least one course is required")]
    NoCourses,

    #[error("GPA must be between 0 and 4")]
    GpaOutOfRange,
}

/// Outcome of validating one input: valid when `errors` is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable reasons, in rule order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }
}

/// Unchecked course fields as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDraft {
    #[serde(default)]
    pub name: Option<String>,
    pub credit_hours: f64,
    pub total_marks: u32,
    pub obtained_marks: f64,
    #[serde(default, alias = "audit")]
    pub is_audit: bool,
}

impl CourseDraft {
    /// Validate (name optional) and convert into an engine input.
    pub fn into_input(self) -> Result<CourseInput, ValidationReport> {
        let report = validate_course(&self);
        if !report.is_valid() {
            return Err(report);
        }
        let total_marks = TotalMarksScheme::try_from(self.total_marks).map_err(|_| {
            ValidationReport {
                errors: vec![ValidationError::InvalidTotalMarks {
                    total_marks: self.total_marks,
                }],
            }
        })?;
        Ok(CourseInput {
            name: trimmed_name(self.name),
            credit_hours: self.credit_hours,
            total_marks,
            obtained_marks: self.obtained_marks,
            is_audit: self.is_audit,
        })
    }

    /// Convert without validating anything but the scheme. The engine clamps
    /// out-of-range marks, so this is enough to compute a result.
    pub fn into_input_lenient(self) -> Result<CourseInput, GradingError> {
        let total_marks = TotalMarksScheme::try_from(self.total_marks)?;
        Ok(CourseInput {
            name: trimmed_name(self.name),
            credit_hours: self.credit_hours,
            total_marks,
            obtained_marks: self.obtained_marks,
            is_audit: self.is_audit,
        })
    }
}

fn trimmed_name(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

impl From<&CourseInput> for CourseDraft {
    fn from(input: &CourseInput) -> Self {
        Self {
            name: input.name.clone(),
            credit_hours: input.credit_hours,
            total_marks: input.total_marks.max_marks(),
            obtained_marks: input.obtained_marks,
            is_audit: input.is_audit,
        }
    }
}

fn check_numbers(draft: &CourseDraft, report: &mut ValidationReport) {
    let ch = draft.credit_hours;
    if !ch.is_finite() {
        report.push(ValidationError::CreditHoursNotANumber);
    } else if ch < 0.0 || (ch == 0.0 && !draft.is_audit) {
        report.push(ValidationError::CreditHoursNotPositive);
    } else if ch > MAX_CREDIT_HOURS {
        report.push(ValidationError::CreditHoursTooHigh);
    }

    if !TotalMarksScheme::is_valid(draft.total_marks) {
        report.push(ValidationError::InvalidTotalMarks {
            total_marks: draft.total_marks,
        });
    }

    let obtained = draft.obtained_marks;
    if !obtained.is_finite() {
        report.push(ValidationError::ObtainedMarksNotANumber);
    } else if obtained < 0.0 {
        report.push(ValidationError::ObtainedMarksNegative);
    } else if obtained > f64::from(draft.total_marks) {
        report.push(ValidationError::ObtainedMarksExceedTotal);
    }
}

fn check_course_name(name: Option<&str>, required: bool, report: &mut ValidationReport) {
    match name.map(str::trim) {
        None | Some("") if required => report.push(ValidationError::CourseNameRequired),
        None | Some("") => {}
        Some(n) if n.chars().count() > MAX_COURSE_NAME_LEN => {
            report.push(ValidationError::CourseNameTooLong)
        }
        Some(_) => {}
    }
}

/// Validate a course where the name is optional (public calculator).
///
/// A blank name counts as absent; a present name is at most 100
/// characters.
pub fn validate_course(draft: &CourseDraft) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_course_name(draft.name.as_deref(), false, &mut report);
    check_numbers(draft, &mut report);
    report
}

/// Validate a course that must carry a name (stored courses, onboarding).
pub fn validate_named_course(draft: &CourseDraft) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_course_name(draft.name.as_deref(), true, &mut report);
    check_numbers(draft, &mut report);
    report
}

/// Validate a semester name: non-blank, at most 50 characters.
pub fn validate_semester_name(name: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    let trimmed = name.trim();
    if trimmed.is_empty() {
        report.push(ValidationError::SemesterNameRequired);
    } else if trimmed.chars().count() > MAX_SEMESTER_NAME_LEN {
        report.push(ValidationError::SemesterNameTooLong);
    }
    report
}

/// Validate a quick-estimate entry: positive credit hours, GPA in `0..=4`.
pub fn validate_reported_semester(semester: &ReportedSemester) -> ValidationReport {
    let mut report = ValidationReport::default();
    if !semester.credit_hours.is_finite() {
        report.push(ValidationError::CreditHoursNotANumber);
    } else if semester.credit_hours <= 0.0 {
        report.push(ValidationError::CreditHoursNotPositive);
    }
    if !(0.0..=GPA_SCALE_MAX).contains(&semester.gpa) {
        report.push(ValidationError::GpaOutOfRange);
    }
    report
}

/// A semester in a bulk onboarding batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub courses: Vec<CourseDraft>,
}

/// Where in a batch a rule failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueLocation {
    Batch,
    Semester {
        index: usize,
        name: String,
    },
    Course {
        semester: String,
        index: usize,
        name: Option<String>,
    },
}

/// A failed rule and where it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchIssue {
    pub location: IssueLocation,
    pub error: ValidationError,
}

impl fmt::Display for BatchIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            IssueLocation::Batch => write!(f, "{}", self.error),
            IssueLocation::Semester { index, name } if name.trim().is_empty() => {
                write!(f, "Semester {}: {}", index + 1, self.error)
            }
            IssueLocation::Semester { name, .. } => {
                write!(f, "Semester \"{}\": {}", name.trim(), self.error)
            }
            IssueLocation::Course {
                semester,
                index,
                name,
            } => match name.as_deref().map(str::trim) {
                Some(n) if !n.is_empty() => {
                    write!(f, "Semester \"{semester}\", Course \"{n}\": {}", self.error)
                }
                _ => write!(
                    f,
                    "Semester \"{semester}\", Course {}: {}",
                    index + 1,
                    self.error
                ),
            },
        }
    }
}

/// Validate a bulk onboarding batch: 1 to 8 semesters, each named and
/// holding at least one named, valid course. Returns every issue found.
pub fn validate_batch(semesters: &[SemesterDraft]) -> Vec<BatchIssue> {
    let mut issues = Vec::new();

    if semesters.is_empty() {
        issues.push(BatchIssue {
            location: IssueLocation::Batch,
            error: ValidationError::NoSemesters,
        });
    } else if semesters.len() > MAX_BATCH_SEMESTERS {
        issues.push(BatchIssue {
            location: IssueLocation::Batch,
            error: ValidationError::TooManySemesters {
                count: semesters.len(),
            },
        });
    }

    for (index, semester) in semesters.iter().enumerate() {
        let location = IssueLocation::Semester {
            index,
            name: semester.name.clone(),
        };
        for error in validate_semester_name(&semester.name).errors {
            issues.push(BatchIssue {
                location: location.clone(),
                error,
            });
        }
        if semester.courses.is_empty() {
            issues.push(BatchIssue {
                location: location.clone(),
                error: ValidationError::NoCourses,
            });
        }

        for (course_index, course) in semester.courses.iter().enumerate() {
            for error in validate_named_course(course).errors {
                issues.push(BatchIssue {
                    location: IssueLocation::Course {
                        semester: semester.name.trim().to_string(),
                        index: course_index,
                        name: course.name.clone(),
                    },
                    error,
                });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(credit_hours: f64, total_marks: u32, obtained_marks: f64) -> CourseDraft {
        CourseDraft {
            name: Some("Linear Algebra".into()),
            credit_hours,
            total_marks,
            obtained_marks,
            is_audit: false,
        }
    }

    fn semester(name: &str, courses: Vec<CourseDraft>) -> SemesterDraft {
        SemesterDraft {
            id: None,
            name: name.into(),
            courses,
        }
    }

    #[test]
    fn valid_course_passes() {
        let report = validate_course(&draft(3.0, 60, 45.0));
        assert!(report.is_valid());
        assert!(report.messages().is_empty());
    }

    #[test]
    fn obtained_equal_to_total_passes() {
        assert!(validate_course(&draft(3.0, 100, 100.0)).is_valid());
    }

    #[test]
    fn obtained_above_total_fails() {
        let report = validate_course(&draft(3.0, 100, 100.01));
        assert_eq!(report.errors, vec![ValidationError::ObtainedMarksExceedTotal]);
        assert!(report.messages()[0].contains("exceed total marks"));
    }

    #[test]
    fn negative_obtained_fails() {
        let report = validate_course(&draft(3.0, 60, -1.0));
        assert_eq!(report.errors, vec![ValidationError::ObtainedMarksNegative]);
    }

    #[test]
    fn zero_credit_hours_need_audit() {
        let report = validate_course(&draft(0.0, 60, 30.0));
        assert_eq!(report.errors, vec![ValidationError::CreditHoursNotPositive]);

        let mut audit = draft(0.0, 60, 30.0);
        audit.is_audit = true;
        assert!(validate_course(&audit).is_valid());
    }

    #[test]
    fn negative_credit_hours_fail_even_for_audit() {
        let mut audit = draft(-1.0, 60, 30.0);
        audit.is_audit = true;
        assert_eq!(
            validate_course(&audit).errors,
            vec![ValidationError::CreditHoursNotPositive]
        );
    }

    #[test]
    fn credit_hours_upper_bound() {
        assert!(validate_course(&draft(10.0, 100, 50.0)).is_valid());
        assert_eq!(
            validate_course(&draft(10.5, 100, 50.0)).errors,
            vec![ValidationError::CreditHoursTooHigh]
        );
    }

    #[test]
    fn non_finite_numbers_fail() {
        let report = validate_course(&draft(f64::NAN, 60, f64::INFINITY));
        assert_eq!(
            report.errors,
            vec![
                ValidationError::CreditHoursNotANumber,
                ValidationError::ObtainedMarksNotANumber
            ]
        );
    }

    #[test]
    fn invalid_scheme_fails() {
        let report = validate_course(&draft(3.0, 50, 20.0));
        assert_eq!(
            report.errors,
            vec![ValidationError::InvalidTotalMarks { total_marks: 50 }]
        );
    }

    #[test]
    fn collects_every_failed_rule() {
        let report = validate_named_course(&CourseDraft {
            name: Some("   ".into()),
            credit_hours: 12.0,
            total_marks: 30,
            obtained_marks: 31.0,
            is_audit: false,
        });
        assert_eq!(
            report.errors,
            vec![
                ValidationError::CourseNameRequired,
                ValidationError::CreditHoursTooHigh,
                ValidationError::InvalidTotalMarks { total_marks: 30 },
                ValidationError::ObtainedMarksExceedTotal,
            ]
        );
    }

    #[test]
    fn name_rules() {
        let mut unnamed = draft(3.0, 60, 30.0);
        unnamed.name = None;
        assert!(validate_course(&unnamed).is_valid());
        assert_eq!(
            validate_named_course(&unnamed).errors,
            vec![ValidationError::CourseNameRequired]
        );

        let mut long = draft(3.0, 60, 30.0);
        long.name = Some("x".repeat(101));
        assert_eq!(
            validate_course(&long).errors,
            vec![ValidationError::CourseNameTooLong]
        );
        long.name = Some("x".repeat(100));
        assert!(validate_course(&long).is_valid());
    }

    #[test]
    fn blank_optional_name_counts_as_absent() {
        let mut blank = draft(3.0, 60, 30.0);
        blank.name = Some(String::new());
        assert!(validate_course(&blank).is_valid());

        blank.name = Some("   ".into());
        assert!(validate_course(&blank).is_valid());
        assert_eq!(blank.clone().into_input().unwrap().name, None);
        assert_eq!(
            validate_named_course(&blank).errors,
            vec![ValidationError::CourseNameRequired]
        );
    }

    #[test]
    fn semester_name_rules() {
        assert!(validate_semester_name("Fall 2024").is_valid());
        assert_eq!(
            validate_semester_name("  ").errors,
            vec![ValidationError::SemesterNameRequired]
        );
        assert_eq!(
            validate_semester_name(&"s".repeat(51)).errors,
            vec![ValidationError::SemesterNameTooLong]
        );
        assert!(validate_semester_name(&"s".repeat(50)).is_valid());
    }

    #[test]
    fn reported_semester_rules() {
        let ok = ReportedSemester {
            credit_hours: 15.0,
            gpa: 4.0,
        };
        assert!(validate_reported_semester(&ok).is_valid());

        let bad = ReportedSemester {
            credit_hours: 0.0,
            gpa: 4.2,
        };
        assert_eq!(
            validate_reported_semester(&bad).errors,
            vec![
                ValidationError::CreditHoursNotPositive,
                ValidationError::GpaOutOfRange
            ]
        );
    }

    #[test]
    fn into_input_converts_valid_draft() {
        let mut d = draft(3.0, 80, 57.0);
        d.name = Some("  Databases ".into());
        let input = d.into_input().unwrap();
        assert_eq!(input.total_marks, TotalMarksScheme::Eighty);
        assert_eq!(input.name.as_deref(), Some("Databases"));
    }

    #[test]
    fn into_input_returns_report() {
        let report = draft(3.0, 60, 61.0).into_input().unwrap_err();
        assert_eq!(report.errors, vec![ValidationError::ObtainedMarksExceedTotal]);
    }

    #[test]
    fn lenient_conversion_only_checks_scheme() {
        let input = draft(3.0, 60, 75.0).into_input_lenient().unwrap();
        assert_eq!(input.obtained_marks, 75.0);
        assert_eq!(
            draft(3.0, 70, 30.0).into_input_lenient().unwrap_err(),
            GradingError::InvalidScheme(70)
        );
    }

    #[test]
    fn draft_roundtrips_from_input() {
        let input = CourseInput::new(4.0, TotalMarksScheme::Eighty, 64.0).audit();
        let draft = CourseDraft::from(&input);
        assert_eq!(draft.total_marks, 80);
        assert_eq!(draft.into_input().unwrap(), input);
    }

    #[test]
    fn batch_requires_semesters() {
        let issues = validate_batch(&[]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].error, ValidationError::NoSemesters);
        assert_eq!(issues[0].to_string(), "At least one semester is required");
    }

    #[test]
    fn batch_caps_semester_count() {
        let semesters: Vec<_> = (1..=9)
            .map(|i| semester(&format!("Semester {i}"), vec![draft(3.0, 60, 40.0)]))
            .collect();
        let issues = validate_batch(&semesters);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].error, ValidationError::TooManySemesters { count: 9 });

        assert!(validate_batch(&semesters[..8]).is_empty());
    }

    #[test]
    fn batch_requires_courses_per_semester() {
        let issues = validate_batch(&[semester("Fall", vec![])]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].error, ValidationError::NoCourses);
        assert_eq!(
            issues[0].to_string(),
            "Semester \"Fall\": At least one course is required"
        );
    }

    #[test]
    fn batch_reports_course_locations() {
        let mut unnamed = draft(3.0, 60, 30.0);
        unnamed.name = None;
        let issues = validate_batch(&[
            semester("", vec![draft(3.0, 60, 30.0)]),
            semester("Spring", vec![draft(3.0, 60, 70.0), unnamed]),
        ]);
        let messages: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "Semester 1: Semester name is required",
                "Semester \"Spring\", Course \"Linear Algebra\": Obtained marks cannot exceed total marks",
                "Semester \"Spring\", Course 2: Course name is required",
            ]
        );
    }

    #[test]
    fn error_serializes_with_rule_tag() {
        let json = serde_json::to_string(&ValidationError::ObtainedMarksExceedTotal).unwrap();
        assert_eq!(json, r#"{"rule":"obtained_marks_exceed_total"}"#);
        let json =
            serde_json::to_string(&ValidationError::InvalidTotalMarks { total_marks: 50 }).unwrap();
        assert_eq!(json, r#"{"rule":"invalid_total_marks","total_marks":50}"#);
    }
}
