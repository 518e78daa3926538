//! The `gradecalc cgpa` command.

use anyhow::{Context, Result};

use gradecalc_cli::config::{GradecalcConfig, OutputFormat};
use gradecalc_cli::report::display_decimal;
use gradecalc_core::validation::validate_reported_semester;
use gradecalc_core::{estimate_cgpa, GpaStanding, ReportedSemester};

pub fn execute(
    semesters: Vec<String>,
    format: Option<OutputFormat>,
    config: &GradecalcConfig,
) -> Result<()> {
    let mut reported = Vec::with_capacity(semesters.len());
    for (i, arg) in semesters.iter().enumerate() {
        let semester = parse_semester_arg(arg).with_context(|| format!("semester {}", i + 1))?;
        let report = validate_reported_semester(&semester);
        anyhow::ensure!(
            report.is_valid(),
            "semester {} ({arg}): {}",
            i + 1,
            report.messages().join("; ")
        );
        reported.push(semester);
    }

    let cgpa = estimate_cgpa(&reported);
    let total_credit_hours: f64 = reported.iter().map(|s| s.credit_hours).sum();
    let standing = GpaStanding::from_gpa(cgpa);

    match format.unwrap_or(config.default_format) {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "cgpa": cgpa,
                "total_credit_hours": total_credit_hours,
                "standing": standing,
                "semesters": reported,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Markdown => {
            println!("| Semester | Credit Hours | GPA |");
            println!("|----------|--------------|-----|");
            for (i, s) in reported.iter().enumerate() {
                println!(
                    "| {} | {} | {} |",
                    i + 1,
                    display_decimal(s.credit_hours, 1),
                    display_decimal(s.gpa, 2)
                );
            }
            println!("\n**Estimated CGPA: {}** ({standing})", display_decimal(cgpa, 2));
        }
        OutputFormat::Text => {
            println!(
                "Estimated CGPA: {} ({standing}) over {} credit hours",
                display_decimal(cgpa, 2),
                display_decimal(total_credit_hours, 1)
            );
        }
    }

    Ok(())
}

/// Parse `CH:GPA`.
fn parse_semester_arg(arg: &str) -> Result<ReportedSemester> {
    let (ch, gpa) = arg
        .split_once(':')
        .with_context(|| format!("expected CH:GPA, got '{arg}'"))?;
    Ok(ReportedSemester {
        credit_hours: ch
            .trim()
            .parse()
            .with_context(|| format!("invalid credit hours '{ch}'"))?,
        gpa: gpa
            .trim()
            .parse()
            .with_context(|| format!("invalid GPA '{gpa}'"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_semester() {
        let s = parse_semester_arg("18:3.45").unwrap();
        assert_eq!(s.credit_hours, 18.0);
        assert_eq!(s.gpa, 3.45);
    }

    #[test]
    fn parse_rejects_malformed_values() {
        assert!(parse_semester_arg("18").is_err());
        assert!(parse_semester_arg("eighteen:3.0").is_err());
        assert!(parse_semester_arg("18:A").is_err());
    }
}
