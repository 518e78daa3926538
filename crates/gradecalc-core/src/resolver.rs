//! Mark resolution: obtained marks to quality point, grade and percentage.

use serde::{Deserialize, Serialize};

use crate::error::GradingError;
use crate::model::{Grade, TotalMarksScheme};
use crate::table::table_for;

/// The table entry a course's marks resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkResolution {
    /// Whole mark used for the lookup, after rounding and clamping.
    pub mark: u32,
    pub quality_point: f64,
    pub grade: Grade,
    /// `mark / total * 100`, rounded half up to two decimals.
    pub percentage: f64,
}

/// Round half up (towards positive infinity on ties) to `decimals` places.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor + 0.5).floor() / factor
}

/// Resolve obtained marks against the published table for `scheme`.
///
/// Marks are rounded half up to a whole mark, then clamped into
/// `0..=total`: anything above the total earns the total's entry and
/// anything negative earns mark 0's. A NaN reads as 0. This never fails;
/// rejecting bad marks is the validator's job.
pub fn resolve_quality_point(obtained_marks: f64, scheme: TotalMarksScheme) -> MarkResolution {
    let total = scheme.max_marks();
    let rounded = if obtained_marks.is_nan() {
        0.0
    } else {
        (obtained_marks + 0.5).floor()
    };
    let max = f64::from(total);
    if !(0.0..=max).contains(&rounded) {
        tracing::warn!(
            obtained_marks,
            total,
            "obtained marks outside 0..={total}, clamping"
        );
    }
    let mark = rounded.clamp(0.0, max) as u32;

    let entry = table_for(scheme).get(mark);
    let percentage = round_half_up(f64::from(mark) / max * 100.0, 2);

    tracing::trace!(
        obtained_marks,
        total,
        mark,
        quality_point = entry.quality_point,
        grade = %entry.grade,
        "resolved marks"
    );

    MarkResolution {
        mark,
        quality_point: entry.quality_point,
        grade: entry.grade,
        percentage,
    }
}

/// Like [`resolve_quality_point`], for a raw total-marks value.
pub fn resolve_with_total(
    obtained_marks: f64,
    total_marks: u32,
) -> Result<MarkResolution, GradingError> {
    let scheme = TotalMarksScheme::try_from(total_marks)?;
    Ok(resolve_quality_point(obtained_marks, scheme))
}
