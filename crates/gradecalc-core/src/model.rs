//! Core input types for gradecalc.
//!
//! These are the plain values callers hand to the engine: the total-marks
//! scheme a course is graded under, the letter grades, and per-course and
//! per-semester inputs. The engine never mutates or stores them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GradingError;

/// The maximum achievable mark for a course. Selects the lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TotalMarksScheme {
    Twenty,
    Forty,
    Sixty,
    Eighty,
    Hundred,
}

impl TotalMarksScheme {
    /// Every supported scheme, in ascending order.
    pub const ALL: [TotalMarksScheme; 5] = [
        TotalMarksScheme::Twenty,
        TotalMarksScheme::Forty,
        TotalMarksScheme::Sixty,
        TotalMarksScheme::Eighty,
        TotalMarksScheme::Hundred,
    ];

    /// The maximum mark under this scheme.
    pub const fn max_marks(self) -> u32 {
        match self {
            TotalMarksScheme::Twenty => 20,
            TotalMarksScheme::Forty => 40,
            TotalMarksScheme::Sixty => 60,
            TotalMarksScheme::Eighty => 80,
            TotalMarksScheme::Hundred => 100,
        }
    }

    /// Credit hours conventionally paired with this scheme (20 marks per
    /// credit hour).
    pub fn credit_hours(self) -> f64 {
        f64::from(self.max_marks() / 20)
    }

    /// The scheme conventionally paired with a credit-hour load.
    ///
    /// Credit hours are rounded to the nearest whole hour; only 1 through 5
    /// map to a scheme.
    pub fn from_credit_hours(credit_hours: f64) -> Option<Self> {
        if !credit_hours.is_finite() {
            return None;
        }
        let rounded = (credit_hours + 0.5).floor();
        if !(1.0..=5.0).contains(&rounded) {
            return None;
        }
        Self::try_from(rounded as u32 * 20).ok()
    }

    /// Whether `marks` names a supported scheme.
    pub fn is_valid(marks: u32) -> bool {
        Self::try_from(marks).is_ok()
    }
}

impl TryFrom<u32> for TotalMarksScheme {
    type Error = GradingError;

    fn try_from(marks: u32) -> Result<Self, Self::Error> {
        match marks {
            20 => Ok(TotalMarksScheme::Twenty),
            40 => Ok(TotalMarksScheme::Forty),
            60 => Ok(TotalMarksScheme::Sixty),
            80 => Ok(TotalMarksScheme::Eighty),
            100 => Ok(TotalMarksScheme::Hundred),
            other => Err(GradingError::InvalidScheme(other)),
        }
    }
}

impl From<TotalMarksScheme> for u32 {
    fn from(scheme: TotalMarksScheme) -> Self {
        scheme.max_marks()
    }
}

impl fmt::Display for TotalMarksScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.max_marks())
    }
}

impl FromStr for TotalMarksScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let marks: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid total marks: {s}"))?;
        Self::try_from(marks).map_err(|e| e.to_string())
    }
}

/// Letter grade attached to a course result.
///
/// `Pass` is never produced by a lookup table; it replaces the table grade
/// on audit courses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
    #[serde(rename = "P")]
    Pass,
}

impl Grade {
    /// Single-letter label, as printed on a transcript.
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
            Grade::Pass => "P",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            "P" | "PASS" => Ok(Grade::Pass),
            other => Err(format!("unknown grade: {other}")),
        }
    }
}

/// One course as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseInput {
    /// Display name; optional for the public calculator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Credit hours carried by the course.
    pub credit_hours: f64,
    /// Maximum achievable mark.
    pub total_marks: TotalMarksScheme,
    /// Marks the student obtained.
    pub obtained_marks: f64,
    /// Audit/pass course, excluded from GPA.
    #[serde(default)]
    pub is_audit: bool,
}

impl CourseInput {
    /// An unnamed, graded course.
    pub fn new(credit_hours: f64, total_marks: TotalMarksScheme, obtained_marks: f64) -> Self {
        Self {
            name: None,
            credit_hours,
            total_marks,
            obtained_marks,
            is_audit: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Mark the course as audit/pass.
    pub fn audit(mut self) -> Self {
        self.is_audit = true;
        self
    }
}

/// A semester's identity and its courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterInput {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub courses: Vec<CourseInput>,
}

/// A semester summarised by its already-known result, as entered into the
/// quick CGPA estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportedSemester {
    pub credit_hours: f64,
    pub gpa: f64,
}
