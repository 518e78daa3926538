//! Grading engine error types.
//!
//! These errors cover configuration-time problems: an unsupported
//! total-marks scheme or a breakpoint list that cannot be laid onto a
//! table. Calculation itself never fails; out-of-range marks are clamped
//! and empty inputs produce zero results.

use thiserror::Error;

/// Errors raised while selecting or constructing a quality-point table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradingError {
    /// The requested total marks is not one of 20, 40, 60, 80 or 100.
    #[error("invalid total marks scheme {0}: must be one of 20, 40, 60, 80, or 100")]
    InvalidScheme(u32),

    /// A breakpoint names a mark beyond the scheme's maximum.
    #[error("breakpoint mark {mark} is outside the 0..={scheme} table")]
    MarkOutOfRange { mark: u32, scheme: u32 },

    /// A breakpoint range ends before it starts.
    #[error("breakpoint range {start}..={end} is inverted")]
    InvertedRange { start: u32, end: u32 },

    /// A breakpoint carries a negative or non-finite quality point.
    #[error("breakpoint at mark {mark} has invalid quality point {quality_point}")]
    InvalidQualityPoint { mark: u32, quality_point: f64 },

    /// A breakpoint tries to assign the audit-only pass grade.
    #[error("breakpoint at mark {mark} uses the audit-only grade P")]
    PassGradeInTable { mark: u32 },
}

