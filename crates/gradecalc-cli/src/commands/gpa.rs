//! The `gradecalc gpa` command.

use anyhow::{Context, Result};
use comfy_table::Table;

use gradecalc_cli::config::{GradecalcConfig, OutputFormat};
use gradecalc_cli::report::{course_row, display_decimal, quality_point_label};
use gradecalc_core::{compute_gpa, CourseDraft, CourseInput, GpaStanding};

pub fn execute(
    courses: Vec<String>,
    format: Option<OutputFormat>,
    config: &GradecalcConfig,
) -> Result<()> {
    let inputs = parse_courses(&courses)?;
    let result = compute_gpa(&inputs);
    let precision = config.precision;

    match format.unwrap_or(config.default_format) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Markdown => {
            println!("| Course | Credit Hours | Marks | Grade | Quality Points |");
            println!("|--------|--------------|-------|-------|----------------|");
            for (i, course) in result.courses.iter().enumerate() {
                println!(
                    "| {} | {} | {}/{} | {} | {} |",
                    i + 1,
                    display_decimal(course.credit_hours(), 1),
                    display_decimal(course.input.obtained_marks, 1),
                    course.input.total_marks,
                    course.grade,
                    quality_point_label(course)
                );
            }
            println!(
                "\n**GPA: {}** ({})",
                display_decimal(result.gpa, precision),
                GpaStanding::from_gpa(result.gpa)
            );
        }
        OutputFormat::Text => {
            let mut table = Table::new();
            table.set_header(vec![
                "Course",
                "Credit Hours",
                "Marks",
                "%",
                "Grade",
                "Quality Points",
            ]);
            for (i, course) in result.courses.iter().enumerate() {
                table.add_row(course_row(course, i));
            }
            println!("{table}");
            println!(
                "\nGPA: {} ({})",
                display_decimal(result.gpa, precision),
                GpaStanding::from_gpa(result.gpa)
            );
            println!(
                "Credit hours: {}, quality points: {}",
                display_decimal(result.total_credit_hours, 1),
                display_decimal(result.total_quality_points, precision)
            );
        }
    }

    Ok(())
}

/// Parse and validate every `--course` value, reporting all failures.
fn parse_courses(args: &[String]) -> Result<Vec<CourseInput>> {
    let mut inputs = Vec::with_capacity(args.len());
    let mut problems = Vec::new();

    for (i, arg) in args.iter().enumerate() {
        let draft = parse_course_arg(arg).with_context(|| format!("course {}", i + 1))?;
        match draft.into_input() {
            Ok(input) => inputs.push(input),
            Err(report) => {
                for message in report.messages() {
                    problems.push(format!("Course {} ({arg}): {message}", i + 1));
                }
            }
        }
    }

    if !problems.is_empty() {
        for p in &problems {
            eprintln!("  {p}");
        }
        anyhow::bail!("{} invalid course value(s)", problems.len());
    }

    Ok(inputs)
}

/// Parse `CH:TOTAL:OBTAINED` or `CH:TOTAL:OBTAINED:audit`.
fn parse_course_arg(arg: &str) -> Result<CourseDraft> {
    let parts: Vec<&str> = arg.split(':').map(str::trim).collect();
    let (is_audit, fields) = match parts.as_slice() {
        [ch, total, obtained] => (false, [*ch, *total, *obtained]),
        [ch, total, obtained, flag] if flag.eq_ignore_ascii_case("audit") => {
            (true, [*ch, *total, *obtained])
        }
        _ => anyhow::bail!("expected CH:TOTAL:OBTAINED[:audit], got '{arg}'"),
    };

    let [ch, total, obtained] = fields;
    Ok(CourseDraft {
        name: None,
        credit_hours: ch
            .parse()
            .with_context(|| format!("invalid credit hours '{ch}'"))?,
        total_marks: total
            .parse()
            .with_context(|| format!("invalid total marks '{total}'"))?,
        obtained_marks: obtained
            .parse()
            .with_context(|| format!("invalid obtained marks '{obtained}'"))?,
        is_audit,
    })
}
