//! Transcript reports with JSON persistence and text/markdown rendering.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Table};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gradecalc_core::table::PUBLISHED_POLICY;
use gradecalc_core::{round_half_up, CourseResult, DashboardResult, GpaStanding, SemesterResult};

/// A complete transcript report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Transcript name.
    pub transcript: String,
    /// Grading policy the quality points were read from.
    pub policy: String,
    pub dashboard: DashboardResult,
}

impl TranscriptReport {
    pub fn new(transcript: impl Into<String>, dashboard: DashboardResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            transcript: transcript.into(),
            policy: PUBLISHED_POLICY.to_string(),
            dashboard,
        }
    }

    pub fn standing(&self) -> GpaStanding {
        GpaStanding::from_gpa(self.dashboard.cgpa)
    }

    /// Default file name under the output directory.
    pub fn file_name(&self) -> String {
        format!(
            "report-{}.json",
            self.generated_at.format("%Y%m%dT%H%M%SZ")
        )
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: TranscriptReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Render as a markdown document.
    pub fn to_markdown(&self, precision: u32) -> String {
        let d = &self.dashboard;
        let mut md = String::new();

        let _ = writeln!(md, "# {}\n", self.transcript);
        let _ = writeln!(
            md,
            "**CGPA: {}** ({}) over {} credit hours, {} semester(s).\n",
            display_decimal(d.cgpa, precision),
            self.standing(),
            display_decimal(d.total_credit_hours, 1),
            d.semesters.len()
        );

        for semester in &d.semesters {
            let _ = writeln!(
                md,
                "## {} (GPA {})\n",
                semester.name,
                display_decimal(semester.gpa, precision)
            );
            md.push_str("| Course | Credit Hours | Marks | Grade | Quality Points |\n");
            md.push_str("|--------|--------------|-------|-------|----------------|\n");
            for (i, course) in semester.courses.iter().enumerate() {
                let _ = writeln!(
                    md,
                    "| {} | {} | {} | {} | {} |",
                    course_label(course, i),
                    display_decimal(course.credit_hours(), 1),
                    marks_label(course),
                    course.grade,
                    quality_point_label(course)
                );
            }
            md.push('\n');
        }

        let _ = writeln!(
            md,
            "_Generated {} under policy {}._",
            self.generated_at.format("%Y-%m-%d %H:%M UTC"),
            self.policy
        );
        md
    }

    /// Render as plain-text tables: one per semester plus a summary.
    pub fn to_text(&self, precision: u32) -> String {
        let d = &self.dashboard;
        let mut out = String::new();

        let _ = writeln!(out, "Transcript: {}\n", self.transcript);
        for semester in &d.semesters {
            let _ = writeln!(out, "{}", semester_table(semester, precision));
        }

        let mut summary = Table::new();
        summary.set_header(vec!["Semester", "Credit Hours", "Quality Points", "GPA"]);
        for semester in &d.semesters {
            summary.add_row(vec![
                Cell::new(&semester.name),
                Cell::new(display_decimal(semester.total_credit_hours, 1)),
                Cell::new(display_decimal(semester.total_quality_points, precision)),
                Cell::new(display_decimal(semester.gpa, precision)),
            ]);
        }
        let _ = writeln!(out, "{summary}");
        let _ = writeln!(
            out,
            "\nCGPA: {} ({})",
            display_decimal(d.cgpa, precision),
            self.standing()
        );
        out
    }
}

/// One semester's courses as a table.
pub fn semester_table(semester: &SemesterResult, precision: u32) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        "Course",
        "Credit Hours",
        "Marks",
        "%",
        "Grade",
        "Quality Points",
    ]);
    for (i, course) in semester.courses.iter().enumerate() {
        table.add_row(course_row(course, i));
    }
    format!(
        "{} (GPA {})\n{table}",
        semester.name,
        display_decimal(semester.gpa, precision)
    )
}

/// Cells for one course row, shared by every course listing.
pub fn course_row(course: &CourseResult, index: usize) -> Vec<Cell> {
    vec![
        Cell::new(course_label(course, index)),
        Cell::new(display_decimal(course.credit_hours(), 1)),
        Cell::new(marks_label(course)),
        Cell::new(display_decimal(course.percentage, 2)),
        Cell::new(course.grade),
        Cell::new(quality_point_label(course)),
    ]
}

/// Round half up to `precision` decimals and print exactly that many.
pub fn display_decimal(value: f64, precision: u32) -> String {
    format!(
        "{:.*}",
        precision as usize,
        round_half_up(value, precision)
    )
}

fn course_label(course: &CourseResult, index: usize) -> String {
    match course.input.name.as_deref() {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => format!("Course {}", index + 1),
    }
}

fn marks_label(course: &CourseResult) -> String {
    format!(
        "{}/{}",
        display_decimal(course.input.obtained_marks, 1),
        course.input.total_marks
    )
}

/// The table quality point, marked when it stays out of the GPA sums.
pub fn quality_point_label(course: &CourseResult) -> String {
    let qp = display_decimal(course.quality_point, 2);
    if course.is_audit() {
        format!("{qp} (audit)")
    } else if !course.counts_toward_gpa() {
        format!("{qp} (excluded)")
    } else {
        qp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradecalc_core::{process_dashboard, CourseInput, SemesterInput, TotalMarksScheme};

    fn sample_report() -> TranscriptReport {
        let semesters = vec![
            SemesterInput {
                id: "s1".into(),
                name: "Fall 2023".into(),
                courses: vec![
                    CourseInput::new(3.0, TotalMarksScheme::Sixty, 48.0).with_name("Calculus I"),
                    CourseInput::new(2.0, TotalMarksScheme::Forty, 30.0)
                        .with_name("Islamic Studies")
                        .audit(),
                ],
            },
            SemesterInput {
                id: "s2".into(),
                name: "Spring 2024".into(),
                courses: vec![CourseInput::new(3.0, TotalMarksScheme::Sixty, 30.0)],
            },
        ];
        TranscriptReport::new("BS CS", process_dashboard(&semesters))
    }

    #[test]
    fn display_rounds_half_up() {
        assert_eq!(display_decimal(3.125, 2), "3.13");
        assert_eq!(display_decimal(3.0, 2), "3.00");
        assert_eq!(display_decimal(2.0 / 3.0, 3), "0.667");
        assert_eq!(display_decimal(7.0, 0), "7");
    }

    #[test]
    fn report_roundtrip() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = TranscriptReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.transcript, "BS CS");
        assert_eq!(loaded.policy, PUBLISHED_POLICY);
        assert_eq!(loaded.dashboard, report.dashboard);
    }

    #[test]
    fn load_missing_report_fails() {
        assert!(TranscriptReport::load_json(Path::new("/nonexistent/report.json")).is_err());
    }

    #[test]
    fn markdown_lists_semesters_and_cgpa() {
        let md = sample_report().to_markdown(2);
        assert!(md.starts_with("# BS CS"));
        assert!(md.contains("**CGPA: 3.00** (Good)"));
        assert!(md.contains("## Fall 2023 (GPA 4.00)"));
        assert!(md.contains("## Spring 2024 (GPA 2.00)"));
        assert!(md.contains("| Islamic Studies | 2.0 | 30.0/40 | P | 7.33 (audit) |"));
        assert!(md.contains("| Course 1 |"));
    }

    #[test]
    fn audit_and_zero_credit_courses_show_their_table_quality_point() {
        let courses = vec![
            CourseInput::new(2.0, TotalMarksScheme::Forty, 30.0)
                .with_name("Isl")
                .audit(),
            CourseInput::new(0.0, TotalMarksScheme::Forty, 30.0).with_name("Z"),
        ];
        let semester = gradecalc_core::process_semester("s", "Fall", &courses);

        assert_eq!(quality_point_label(&semester.courses[0]), "7.33 (audit)");
        assert_eq!(quality_point_label(&semester.courses[1]), "7.33 (excluded)");
        assert_eq!(semester.courses[0].weighted_quality_point, 0.0);
        assert_eq!(semester.total_quality_points, 0.0);
    }

    #[test]
    fn text_contains_summary() {
        let text = sample_report().to_text(2);
        assert!(text.contains("Transcript: BS CS"));
        assert!(text.contains("Calculus I"));
        assert!(text.contains("CGPA: 3.00 (Good)"));
    }

    #[test]
    fn file_name_is_timestamped() {
        let name = sample_report().file_name();
        assert!(name.starts_with("report-"));
        assert!(name.ends_with("Z.json"));
    }
}
