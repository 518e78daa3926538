//! TOML transcript parser.
//!
//! A transcript file holds a degree's semesters and their courses as raw
//! drafts. Validation and conversion into engine inputs are separate steps so
//! `validate` can report every problem while `dashboard` can still aggregate
//! a lenient transcript.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use uuid::Uuid;

use gradecalc_core::validation::{validate_batch, BatchIssue, SemesterDraft};
use gradecalc_core::SemesterInput;

/// Intermediate TOML structure for parsing transcript files.
#[derive(Debug, Deserialize)]
struct TomlTranscriptFile {
    #[serde(default)]
    transcript: Option<TomlTranscriptHeader>,
    #[serde(default)]
    semesters: Vec<SemesterDraft>,
}

#[derive(Debug, Deserialize)]
struct TomlTranscriptHeader {
    name: String,
}

/// A parsed transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub name: String,
    pub semesters: Vec<SemesterDraft>,
}

impl Transcript {
    pub fn course_count(&self) -> usize {
        self.semesters.iter().map(|s| s.courses.len()).sum()
    }

    /// Every rule the transcript breaks, with its location.
    pub fn validate(&self) -> Vec<BatchIssue> {
        validate_batch(&self.semesters)
    }

    /// Convert into engine inputs, assigning a v4 uuid to any semester
    /// without an id.
    ///
    /// Only the total-marks scheme is checked here: a course whose scheme is
    /// not one of the five is an error, anything else out of range is left
    /// for the engine to clamp.
    pub fn to_inputs(&self) -> Result<Vec<SemesterInput>> {
        self.semesters
            .iter()
            .map(|semester| -> Result<SemesterInput> {
                let courses = semester
                    .courses
                    .iter()
                    .enumerate()
                    .map(|(i, course)| {
                        course.clone().into_input_lenient().with_context(|| {
                            format!(
                                "semester \"{}\", course {}",
                                semester.name.trim(),
                                i + 1
                            )
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;

                let id = semester
                    .id
                    .clone()
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| Uuid::new_v4().to_string());

                Ok(SemesterInput {
                    id,
                    name: semester.name.trim().to_string(),
                    courses,
                })
            })
            .collect()
    }
}

/// Parse a transcript file.
pub fn parse_transcript(path: &Path) -> Result<Transcript> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read transcript: {}", path.display()))?;
    parse_transcript_str(&content, path)
}

/// Parse a transcript from a TOML string. `source_path` names the fallback
/// transcript and appears in error messages.
pub fn parse_transcript_str(content: &str, source_path: &Path) -> Result<Transcript> {
    let file: TomlTranscriptFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let name = match file.transcript {
        Some(header) if !header.name.trim().is_empty() => header.name.trim().to_string(),
        _ => source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "transcript".to_string()),
    };

    tracing::debug!(
        transcript = %name,
        semesters = file.semesters.len(),
        "transcript parsed"
    );

    Ok(Transcript {
        name,
        semesters: file.semesters,
    })
}
