//! Per-mark quality-point tables.
//!
//! Each total-marks scheme has its own published table mapping every whole
//! mark to a quality point and a letter grade. The tables come from the
//! university grading circular and are not derivable from a formula: letter
//! grades are not monotonic in places (scheme 60 gives B at 33 but C at 34),
//! so every value is transcribed as published.
//!
//! Tables are stored sparsely as [`Breakpoint`]s and expanded by
//! [`build_table`] into a dense table where every mark not named by a
//! breakpoint is `F` with zero quality points. Quality points are already
//! weighted by the course's credit hours: a full-marks 100-mark (5 credit
//! hour) course earns 20.0, not 4.0.

use std::sync::LazyLock;

use serde::Serialize;

use crate::error::GradingError;
use crate::model::Grade::{A, B, C, D};
use crate::model::{Grade, TotalMarksScheme};

/// Identifier of the grading circular the built-in tables transcribe.
///
/// A change in grading policy means new breakpoints and a new identifier,
/// never a patch to previously computed results.
pub const PUBLISHED_POLICY: &str = "MNSUAM-CGPA";

/// A sparse table entry: one mark or an inclusive mark range sharing a grade
/// and quality point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Breakpoint {
    Mark {
        mark: u32,
        grade: Grade,
        quality_point: f64,
    },
    Range {
        start: u32,
        end: u32,
        grade: Grade,
        quality_point: f64,
    },
}

impl Breakpoint {
    /// A breakpoint covering a single mark.
    pub const fn at(mark: u32, grade: Grade, quality_point: f64) -> Self {
        Breakpoint::Mark {
            mark,
            grade,
            quality_point,
        }
    }

    /// A breakpoint covering `start..=end`.
    pub const fn span(start: u32, end: u32, grade: Grade, quality_point: f64) -> Self {
        Breakpoint::Range {
            start,
            end,
            grade,
            quality_point,
        }
    }

    fn bounds(&self) -> (u32, u32) {
        match *self {
            Breakpoint::Mark { mark, .. } => (mark, mark),
            Breakpoint::Range { start, end, .. } => (start, end),
        }
    }

    fn entry(&self) -> MarkQuality {
        match *self {
            Breakpoint::Mark {
                grade,
                quality_point,
                ..
            }
            | Breakpoint::Range {
                grade,
                quality_point,
                ..
            } => MarkQuality {
                quality_point,
                grade,
            },
        }
    }
}

/// The quality point and letter grade for one whole mark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkQuality {
    pub quality_point: f64,
    pub grade: Grade,
}

impl MarkQuality {
    /// Value of every mark a table does not list.
    pub const FAIL: MarkQuality = MarkQuality {
        quality_point: 0.0,
        grade: Grade::F,
    };
}

/// A dense table with exactly `scheme + 1` entries, indexed by mark.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityPointTable {
    scheme: TotalMarksScheme,
    entries: Vec<MarkQuality>,
}

impl QualityPointTable {
    pub fn scheme(&self) -> TotalMarksScheme {
        self.scheme
    }

    /// All entries; index `m` holds the value for mark `m`.
    pub fn entries(&self) -> &[MarkQuality] {
        &self.entries
    }

    /// Entry for `mark`. Marks above the scheme maximum read as [`MarkQuality::FAIL`];
    /// callers wanting capping behaviour go through the resolver.
    pub fn get(&self, mark: u32) -> MarkQuality {
        self.entries
            .get(mark as usize)
            .copied()
            .unwrap_or(MarkQuality::FAIL)
    }

    /// Number of entries (always `scheme + 1`).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(mark, entry)` pairs in ascending mark order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, MarkQuality)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(mark, entry)| (mark as u32, *entry))
    }

    /// Lowest mark earning a non-zero quality point, if any.
    pub fn passing_mark(&self) -> Option<u32> {
        self.iter()
            .find(|(_, entry)| entry.quality_point > 0.0)
            .map(|(mark, _)| mark)
    }

    /// Lowest mark earning the table's maximum quality point.
    pub fn full_credit_mark(&self) -> u32 {
        let max = self
            .entries
            .iter()
            .map(|e| e.quality_point)
            .fold(0.0f64, f64::max);
        self.iter()
            .find(|(_, entry)| entry.quality_point >= max)
            .map(|(mark, _)| mark)
            .unwrap_or(self.scheme.max_marks())
    }
}

/// Expand sparse breakpoints into a dense table for `scheme`.
///
/// Later breakpoints overwrite earlier ones where they overlap. Every mark
/// not covered is [`MarkQuality::FAIL`].
pub fn build_table(
    scheme: TotalMarksScheme,
    breakpoints: &[Breakpoint],
) -> Result<QualityPointTable, GradingError> {
    let max = scheme.max_marks();
    let mut entries = vec![MarkQuality::FAIL; max as usize + 1];

    for bp in breakpoints {
        let (start, end) = bp.bounds();
        if start > end {
            return Err(GradingError::InvertedRange { start, end });
        }
        if end > max {
            return Err(GradingError::MarkOutOfRange { mark: end, scheme: max });
        }
        let entry = bp.entry();
        if !entry.quality_point.is_finite() || entry.quality_point < 0.0 {
            return Err(GradingError::InvalidQualityPoint {
                mark: start,
                quality_point: entry.quality_point,
            });
        }
        if entry.grade == Grade::Pass {
            return Err(GradingError::PassGradeInTable { mark: start });
        }
        for slot in &mut entries[start as usize..=end as usize] {
            *slot = entry;
        }
    }

    Ok(QualityPointTable { scheme, entries })
}

pub const BREAKPOINTS_20: &[Breakpoint] = &[
    Breakpoint::at(8, D, 1.0),
    Breakpoint::at(9, D, 1.5),
    Breakpoint::at(10, C, 2.0),
    Breakpoint::at(11, C, 2.33),
    Breakpoint::at(12, C, 2.67),
    Breakpoint::at(13, C, 3.0),
    Breakpoint::at(14, B, 3.33),
    Breakpoint::at(15, B, 3.67),
    Breakpoint::span(16, 20, A, 4.0),
];

pub const BREAKPOINTS_40: &[Breakpoint] = &[
    Breakpoint::at(16, D, 2.0),
    Breakpoint::at(17, D, 2.5),
    Breakpoint::at(18, D, 3.0),
    Breakpoint::at(19, C, 3.5),
    Breakpoint::at(20, C, 4.0),
    Breakpoint::at(21, C, 4.33),
    Breakpoint::at(22, B, 4.67),
    Breakpoint::at(23, B, 5.0),
    Breakpoint::at(24, B, 5.33),
    Breakpoint::at(25, B, 5.67),
    Breakpoint::at(26, C, 6.0),
    Breakpoint::at(27, C, 6.33),
    Breakpoint::at(28, B, 6.67),
    Breakpoint::at(29, B, 7.0),
    Breakpoint::at(30, B, 7.33),
    Breakpoint::at(31, B, 7.67),
    Breakpoint::span(32, 40, A, 8.0),
];

pub const BREAKPOINTS_60: &[Breakpoint] = &[
    Breakpoint::at(24, D, 3.0),
    Breakpoint::at(25, D, 3.5),
    Breakpoint::at(26, D, 4.0),
    Breakpoint::at(27, C, 4.5),
    Breakpoint::at(28, C, 5.0),
    Breakpoint::at(29, C, 5.5),
    Breakpoint::at(30, B, 6.0),
    Breakpoint::at(31, B, 6.33),
    Breakpoint::at(32, B, 6.67),
    Breakpoint::at(33, B, 7.0),
    Breakpoint::at(34, C, 7.33),
    Breakpoint::at(35, C, 7.67),
    Breakpoint::at(36, B, 8.0),
    Breakpoint::at(37, B, 8.33),
    Breakpoint::at(38, C, 8.67),
    Breakpoint::at(39, B, 9.0),
    Breakpoint::at(40, A, 9.33),
    Breakpoint::at(41, A, 9.67),
    Breakpoint::at(42, A, 10.0),
    Breakpoint::at(43, B, 10.33),
    Breakpoint::at(44, B, 10.67),
    Breakpoint::at(45, A, 11.0),
    Breakpoint::at(46, A, 11.33),
    Breakpoint::at(47, A, 11.67),
    Breakpoint::span(48, 60, A, 12.0),
];

pub const BREAKPOINTS_80: &[Breakpoint] = &[
    Breakpoint::at(32, D, 4.0),
    Breakpoint::at(33, D, 4.5),
    Breakpoint::at(34, D, 5.0),
    Breakpoint::at(35, C, 5.5),
    Breakpoint::at(36, C, 6.0),
    Breakpoint::at(37, C, 6.5),
    Breakpoint::at(38, B, 7.0),
    Breakpoint::at(39, B, 7.5),
    Breakpoint::at(40, B, 8.0),
    Breakpoint::at(41, A, 8.33),
    Breakpoint::at(42, A, 8.67),
    Breakpoint::at(43, A, 9.0),
    Breakpoint::at(44, C, 9.33),
    Breakpoint::at(45, C, 9.67),
    Breakpoint::at(46, B, 10.0),
    Breakpoint::at(47, B, 10.33),
    Breakpoint::at(48, A, 10.67),
    Breakpoint::at(49, A, 11.0),
    Breakpoint::at(50, A, 11.33),
    Breakpoint::at(51, C, 11.67),
    Breakpoint::at(52, C, 12.0),
    Breakpoint::at(53, B, 12.33),
    Breakpoint::at(54, B, 12.67),
    Breakpoint::at(55, B, 13.0),
    Breakpoint::at(56, A, 13.33),
    Breakpoint::at(57, A, 13.67),
    Breakpoint::at(58, B, 14.0),
    Breakpoint::at(59, B, 14.33),
    Breakpoint::at(60, A, 14.67),
    Breakpoint::at(61, A, 15.0),
    Breakpoint::at(62, A, 15.33),
    Breakpoint::at(63, A, 15.67),
    Breakpoint::span(64, 80, A, 16.0),
];

pub const BREAKPOINTS_100: &[Breakpoint] = &[
    Breakpoint::at(40, D, 5.0),
    Breakpoint::at(41, D, 5.5),
    Breakpoint::at(42, D, 6.0),
    Breakpoint::at(43, C, 6.5),
    Breakpoint::at(44, C, 7.0),
    Breakpoint::at(45, C, 7.5),
    Breakpoint::at(46, B, 8.0),
    Breakpoint::at(47, B, 8.5),
    Breakpoint::at(48, B, 9.0),
    Breakpoint::at(49, A, 9.5),
    Breakpoint::at(50, A, 10.0),
    Breakpoint::at(51, A, 10.33),
    Breakpoint::at(52, C, 10.67),
    Breakpoint::at(53, C, 11.0),
    Breakpoint::at(54, B, 11.33),
    Breakpoint::at(55, B, 11.67),
    Breakpoint::at(56, A, 12.0),
    Breakpoint::at(57, A, 12.33),
    Breakpoint::at(58, B, 12.67),
    Breakpoint::at(59, B, 13.0),
    Breakpoint::at(60, A, 13.33),
    Breakpoint::at(61, A, 13.67),
    Breakpoint::at(62, A, 14.0),
    Breakpoint::at(63, A, 14.33),
    Breakpoint::at(64, A, 14.67),
    Breakpoint::at(65, A, 15.0),
    Breakpoint::at(66, B, 15.33),
    Breakpoint::at(67, B, 15.67),
    Breakpoint::at(68, B, 16.0),
    Breakpoint::at(69, B, 16.33),
    Breakpoint::at(70, B, 16.67),
    Breakpoint::at(71, A, 17.0),
    Breakpoint::at(72, A, 17.33),
    Breakpoint::at(73, A, 17.67),
    Breakpoint::at(74, A, 18.0),
    Breakpoint::at(75, A, 18.33),
    Breakpoint::at(76, A, 18.67),
    Breakpoint::at(77, A, 19.0),
    Breakpoint::at(78, A, 19.33),
    Breakpoint::at(79, A, 19.67),
    Breakpoint::span(80, 100, A, 20.0),
];

/// The published breakpoints for `scheme`.
pub fn published_breakpoints(scheme: TotalMarksScheme) -> &'static [Breakpoint] {
    match scheme {
        TotalMarksScheme::Twenty => BREAKPOINTS_20,
        TotalMarksScheme::Forty => BREAKPOINTS_40,
        TotalMarksScheme::Sixty => BREAKPOINTS_60,
        TotalMarksScheme::Eighty => BREAKPOINTS_80,
        TotalMarksScheme::Hundred => BREAKPOINTS_100,
    }
}

// Indexed in `TotalMarksScheme::ALL` order.
static PUBLISHED_TABLES: LazyLock<[QualityPointTable; 5]> = LazyLock::new(|| {
    TotalMarksScheme::ALL.map(|scheme| {
        build_table(scheme, published_breakpoints(scheme))
            .expect("published breakpoints fit their schemes")
    })
});

/// The published table for `scheme`.
pub fn table_for(scheme: TotalMarksScheme) -> &'static QualityPointTable {
    &PUBLISHED_TABLES[scheme as usize]
}

/// The published table for a raw total-marks value.
pub fn get_table(total_marks: u32) -> Result<&'static QualityPointTable, GradingError> {
    TotalMarksScheme::try_from(total_marks).map(table_for)
}
